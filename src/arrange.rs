//! Per-album layout.
//!
//! Stage 2 of the pipeline. Runs the layout engine over every album of a
//! scan [`Manifest`], each with its own cascaded options. Results are
//! returned to the caller for printing; nothing is written to disk, since a
//! layout is only valid for the width it was computed at.
//!
//! Albums are independent and the engine keeps no state, so albums are laid
//! out in parallel with [rayon](https://docs.rs/rayon).

use crate::layout::compute_justified_layout;
use crate::scan::{Album, Manifest};
use crate::types::{Row, total_height};
use rayon::prelude::*;
use serde::Serialize;

/// Rows computed for one album.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlbumLayout {
    pub path: String,
    pub title: String,
    pub container_width: f64,
    /// Height of all rows stacked with gaps between them.
    pub total_height: f64,
    pub rows: Vec<Row>,
}

/// Lay out every album. `container_width` overrides each album's configured
/// width when given.
pub fn arrange(manifest: &Manifest, container_width: Option<f64>) -> Vec<AlbumLayout> {
    manifest
        .albums
        .par_iter()
        .map(|album| arrange_album(album, container_width))
        .collect()
}

pub fn arrange_album(album: &Album, container_width: Option<f64>) -> AlbumLayout {
    let width = container_width.unwrap_or(album.layout.container_width);
    let rows = compute_justified_layout(&album.photos, width, &album.layout.options());
    tracing::debug!(album = %album.path, width, rows = rows.len(), "arranged album");
    AlbumLayout {
        path: album.path.clone(),
        title: album.title.clone(),
        container_width: width,
        total_height: total_height(&rows),
        rows,
    }
}
