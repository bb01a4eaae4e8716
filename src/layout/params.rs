//! Caller-supplied options for one layout call.
//!
//! [`LayoutOptions`] deserializes from partial input (missing fields take
//! their defaults), so `{"target_row_height": 180}` is a valid option set.
//! The engine never rejects options: row-size bounds are used as given,
//! however odd, except that no row may hold more photos than the container
//! has room for. An unusable target height is replaced by the default.

use super::calculations::GAP;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MIN_PHOTOS_PER_ROW: usize = 2;
pub const DEFAULT_MAX_PHOTOS_PER_ROW: usize = 8;
pub const DEFAULT_TARGET_ROW_HEIGHT: f64 = 240.0;

/// Row-size bounds and the height rows should gravitate toward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// Fewest photos in any row but the last.
    pub min_photos_per_row: usize,
    /// Most photos in any row.
    pub max_photos_per_row: usize,
    pub target_row_height: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            min_photos_per_row: DEFAULT_MIN_PHOTOS_PER_ROW,
            max_photos_per_row: DEFAULT_MAX_PHOTOS_PER_ROW,
            target_row_height: DEFAULT_TARGET_ROW_HEIGHT,
        }
    }
}

impl LayoutOptions {
    /// Copy with a usable target height. Row-size bounds are left untouched.
    pub(crate) fn sanitized(self) -> Self {
        let target_row_height = if self.target_row_height.is_finite() && self.target_row_height > 0.0
        {
            self.target_row_height
        } else {
            DEFAULT_TARGET_ROW_HEIGHT
        };
        Self {
            target_row_height,
            ..self
        }
    }

    /// Copy whose row sizes fit `container_width`: no row may hold more
    /// photos than leave a positive width once the gaps are taken.
    pub(crate) fn fitted_to(self, container_width: f64) -> Self {
        let fit = (container_width / GAP).ceil().max(1.0) as usize;
        Self {
            min_photos_per_row: self.min_photos_per_row.min(fit),
            max_photos_per_row: self.max_photos_per_row.min(fit),
            ..self
        }
    }
}
