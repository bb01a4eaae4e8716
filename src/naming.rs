//! The `NNN-name` ordering convention for photos and album directories.
//!
//! An optional numeric prefix fixes the position of an entry; the rest is its
//! name, with dashes shown as spaces:
//! - `010-Landscapes/` → position 10, "Landscapes"
//! - `001-dawn.jpg` → position 1, "dawn"
//! - `wip-drafts/` → no position, "wip drafts" (ordered after numbered entries)

use std::cmp::Ordering;

/// Result of parsing an entry name like `020-My-Best-Photos`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryName {
    /// Number prefix if present.
    pub number: Option<u32>,
    /// Name with dashes turned into spaces. Empty for number-only names.
    pub title: String,
}

impl EntryName {
    /// Ordering used for photos within an album: numbered entries by number,
    /// then unnumbered entries. Ties are left to the caller.
    pub fn position_cmp(&self, other: &Self) -> Ordering {
        match (self.number, other.number) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

/// Parse a file stem or directory name following the `NNN-name` convention.
///
/// - `"020-My-Best-Photos"` → number=Some(20), title="My Best Photos"
/// - `"001"` / `"001-"` → number=Some(1), title=""
/// - `"wip-drafts"` → number=None, title="wip drafts"
pub fn parse_entry_name(name: &str) -> EntryName {
    let (prefix, rest) = match name.split_once('-') {
        Some((prefix, rest)) => (prefix, rest),
        None => (name, ""),
    };
    match prefix.parse::<u32>() {
        Ok(number) if prefix.bytes().all(|b| b.is_ascii_digit()) => EntryName {
            number: Some(number),
            title: rest.replace('-', " "),
        },
        _ => EntryName {
            number: None,
            title: name.replace('-', " "),
        },
    }
}
