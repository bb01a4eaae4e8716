//! Shared types used across the scan and arrange stages.
//!
//! [`PhotoInput`] is what the scan stage writes to `photos.json` and what any
//! other caller hands to the layout engine. [`LayoutItem`] and [`Row`] are the
//! engine's output, serialized as-is by `arrange --json`.

use crate::layout::calculations::{self, GAP};
use serde::{Deserialize, Serialize};

/// A photo to be placed in the grid.
///
/// Dimensions are only used for their ratio. Missing, zero, negative or
/// non-finite values are tolerated and fall back to a square aspect ratio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoInput {
    /// Stable identifier, echoed back as [`LayoutItem::photo_id`].
    pub id: String,
    /// Where the renderer fetches the image from. Opaque to the engine.
    pub url: String,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
}

impl PhotoInput {
    pub fn new(id: impl Into<String>, url: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            width,
            height,
        }
    }

    /// Width over height, or `1.0` when the dimensions are unusable.
    pub fn aspect_ratio(&self) -> f64 {
        calculations::aspect_ratio(self.width, self.height)
    }
}

/// One placed photo: the input identity plus its computed display size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutItem {
    pub photo_id: String,
    pub url: String,
    pub aspect_ratio: f64,
    pub display_width: f64,
    pub display_height: f64,
}

/// A horizontal band of photos sharing one height.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub items: Vec<LayoutItem>,
    pub height: f64,
}

impl Row {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Horizontal offset of each item, left to right, with [`GAP`] between
    /// neighbours.
    pub fn item_offsets(&self) -> Vec<f64> {
        let mut x = 0.0;
        self.items
            .iter()
            .map(|item| {
                let offset = x;
                x += item.display_width + GAP;
                offset
            })
            .collect()
    }

    /// Occupied width: item widths plus the gaps between them.
    pub fn width(&self) -> f64 {
        let items: f64 = self.items.iter().map(|i| i.display_width).sum();
        items + calculations::gap_width(self.items.len())
    }
}

/// Total height of stacked rows, with [`GAP`] between consecutive rows.
pub fn total_height(rows: &[Row]) -> f64 {
    let heights: f64 = rows.iter().map(|r| r.height).sum();
    heights + calculations::gap_width(rows.len())
}
