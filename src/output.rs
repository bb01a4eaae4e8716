//! CLI output formatting for both pipeline stages.
//!
//! Output is information-centric: every album leads with its positional index
//! and title, with the source directory as an indented context line.
//!
//! ## Scan
//!
//! ```text
//! Albums
//! 001 Landscapes (3 photos)
//!     Source: 010-Landscapes/
//!     001 001-dawn 3000×2000
//!     002 002-dusk 2000×2000
//!     003 010-peak (unreadable)
//! ```
//!
//! ## Arrange
//!
//! ```text
//! 001 Landscapes (3 photos) → 1 row, 1200px wide, 350px tall
//!     Row 001: 3 photos at 350px
//!         001-dawn 540×350
//! ```
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout.

use crate::arrange::AlbumLayout;
use crate::scan::Manifest;
use crate::types::{LayoutItem, PhotoInput};

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `1 row`, `3 rows`.
fn counted(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// Format an album header: positional index + title + photo count.
fn album_header(index: usize, title: &str, count: usize) -> String {
    format!("{} {} ({})", format_index(index), title, counted(count, "photo"))
}

/// Last path segment of a photo id, the name shown to users.
fn photo_name(id: &str) -> &str {
    id.rsplit('/').next().unwrap_or(id)
}

/// Pixel value rounded for display.
fn px(value: f64) -> String {
    format!("{}", value.round())
}

fn photo_line(index: usize, photo: &PhotoInput) -> String {
    let dims = if photo.width > 0.0 && photo.height > 0.0 {
        format!("{}×{}", px(photo.width), px(photo.height))
    } else {
        "(unreadable)".to_string()
    };
    format!("{} {} {}", format_index(index), photo_name(&photo.id), dims)
}

fn item_line(item: &LayoutItem) -> String {
    format!(
        "{} {}×{}",
        photo_name(&item.photo_id),
        px(item.display_width),
        px(item.display_height)
    )
}

// ============================================================================
// Stage 1: Scan output
// ============================================================================

/// Format scan stage output: every album with its photos and dimensions.
pub fn format_scan_output(manifest: &Manifest) -> Vec<String> {
    let mut lines = vec!["Albums".to_string()];
    if manifest.albums.is_empty() {
        lines.push(format!("{}(no photos found)", indent(1)));
    }
    for (i, album) in manifest.albums.iter().enumerate() {
        lines.push(album_header(i + 1, &album.title, album.photos.len()));
        let source = if album.path.is_empty() {
            "./".to_string()
        } else {
            format!("{}/", album.path)
        };
        lines.push(format!("{}Source: {}", indent(1), source));
        for (j, photo) in album.photos.iter().enumerate() {
            lines.push(format!("{}{}", indent(1), photo_line(j + 1, photo)));
        }
    }
    lines
}

/// Print scan output to stdout.
pub fn print_scan_output(manifest: &Manifest) {
    for line in format_scan_output(manifest) {
        println!("{}", line);
    }
}

// ============================================================================
// Stage 2: Arrange output
// ============================================================================

/// Format computed layouts: per album the row summary, per row its size and
/// height, per item its display size.
pub fn format_arrange_output(layouts: &[AlbumLayout]) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, layout) in layouts.iter().enumerate() {
        let count: usize = layout.rows.iter().map(|r| r.len()).sum();
        lines.push(format!(
            "{} → {}, {}px wide, {}px tall",
            album_header(i + 1, &layout.title, count),
            counted(layout.rows.len(), "row"),
            px(layout.container_width),
            px(layout.total_height)
        ));
        for (r, row) in layout.rows.iter().enumerate() {
            lines.push(format!(
                "{}Row {}: {} at {}px",
                indent(1),
                format_index(r + 1),
                counted(row.len(), "photo"),
                px(row.height)
            ));
            for item in &row.items {
                lines.push(format!("{}{}", indent(2), item_line(item)));
            }
        }
    }
    let total: usize = layouts.iter().map(|l| l.rows.len()).sum();
    lines.push(String::new());
    lines.push(format!(
        "Arranged {} into {}",
        counted(layouts.len(), "album"),
        counted(total, "row")
    ));
    lines
}

/// Print arrange output to stdout.
pub fn print_arrange_output(layouts: &[AlbumLayout]) {
    for line in format_arrange_output(layouts) {
        println!("{}", line);
    }
}
