//! Shared test utilities for the justified-gallery test suite.
//!
//! Provides photo builders, on-disk fixture setup, and assertions for the
//! layout properties every engine result must satisfy.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_helpers::*;
//!
//! let photos = photos_with_ratios(&[1.5, 0.67, 1.0]);
//! let rows = compute_justified_layout(&photos, 1000.0, &LayoutOptions::default());
//! assert_complete(&photos, &rows);
//! assert_width_fidelity(&rows, 1000.0);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::layout::GAP;
use crate::types::{PhotoInput, Row};

// =========================================================================
// Builders
// =========================================================================

/// One photo per ratio, 1000px tall, ids `p0`, `p1`, ...
pub fn photos_with_ratios(ratios: &[f64]) -> Vec<PhotoInput> {
    ratios
        .iter()
        .enumerate()
        .map(|(i, r)| PhotoInput::new(format!("p{i}"), format!("p{i}.jpg"), r * 1000.0, 1000.0))
        .collect()
}

/// Write a tiny PNG of the given size. Only the header matters to the scanner.
pub fn write_png(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    image::RgbImage::new(width, height).save(path).unwrap();
}

/// A content tree with two albums and a nested one:
///
/// ```text
/// 010-Landscapes/  001-dawn.png (30×20)  002-dusk.png (20×20)  010-peak.png (40×20)
/// 020-Travel/010-Japan/  001-tokyo.png (20×30)  002-kyoto.png (30×20)
/// ```
pub fn setup_content() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_png(&root.join("010-Landscapes/001-dawn.png"), 30, 20);
    write_png(&root.join("010-Landscapes/002-dusk.png"), 20, 20);
    write_png(&root.join("010-Landscapes/010-peak.png"), 40, 20);
    write_png(&root.join("020-Travel/010-Japan/001-tokyo.png"), 20, 30);
    write_png(&root.join("020-Travel/010-Japan/002-kyoto.png"), 30, 20);
    tmp
}

// =========================================================================
// Layout assertions
// =========================================================================

/// Rows hold every photo exactly once, in input order.
pub fn assert_complete(photos: &[PhotoInput], rows: &[Row]) {
    let placed: Vec<&str> = rows
        .iter()
        .flat_map(|r| &r.items)
        .map(|i| i.photo_id.as_str())
        .collect();
    let expected: Vec<&str> = photos.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(placed, expected, "rows do not reproduce the input order");
}

/// Every row spans the container, gaps included, within one unit.
pub fn assert_width_fidelity(rows: &[Row], container_width: f64) {
    for (i, row) in rows.iter().enumerate() {
        let widths: f64 = row.items.iter().map(|item| item.display_width).sum();
        let total = widths + (row.items.len() - 1) as f64 * GAP;
        assert!(
            (total - container_width).abs() <= 1.0,
            "row {i} spans {total}, expected {container_width}"
        );
    }
}
