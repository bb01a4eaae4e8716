//! Pure cost and geometry functions for the row-break search.
//!
//! All functions here are pure and testable without any photos. The
//! constants are the tuned weights of the cost function; changing any of
//! them changes which partitions win.

/// Horizontal spacing between neighbouring items (and vertical spacing
/// between rows when stacked).
pub const GAP: f64 = 4.0;

/// No row is ever rendered taller than this, including single-row layouts.
pub const MAX_ROW_HEIGHT: f64 = 350.0;

/// Aspect ratio used when a photo's dimensions are unusable (a 400×400 square).
pub const DEFAULT_ASPECT_RATIO: f64 = 1.0;

/// Added to a forced row when no regular row can end at a position.
pub const FALLBACK_PENALTY: f64 = 2000.0;

/// Balance penalty weight per squared item of difference between adjacent rows.
const BALANCE_WEIGHT: f64 = 50.0;

/// Ideal-size penalty weight per item beyond the tolerance.
const IDEAL_WEIGHT: f64 = 10.0;

/// Deviation from the ideal row size that costs nothing.
const IDEAL_TOLERANCE: f64 = 1.5;

/// Width over height, substituting [`DEFAULT_ASPECT_RATIO`] for anything that
/// would not yield a finite positive ratio.
pub fn aspect_ratio(width: f64, height: f64) -> f64 {
    if width > 0.0 && height > 0.0 {
        let ratio = width / height;
        if ratio.is_finite() && ratio > 0.0 {
            return ratio;
        }
    }
    DEFAULT_ASPECT_RATIO
}

/// Total spacing taken by the gaps between `count` items.
pub fn gap_width(count: usize) -> f64 {
    count.saturating_sub(1) as f64 * GAP
}

/// Width left for the photos of a row of `count` items once gaps are taken.
///
/// Never negative: a container too narrow for its gaps leaves nothing.
pub fn available_width(container_width: f64, count: usize) -> f64 {
    (container_width - gap_width(count)).max(0.0)
}

/// Height at which `count` photos whose ratios sum to `aspect_sum` exactly
/// fill the container width. Uncapped.
pub fn row_height(container_width: f64, aspect_sum: f64, count: usize) -> f64 {
    available_width(container_width, count) / aspect_sum
}

/// Extra cost for rows that are unusably short or absurdly tall.
///
/// # Examples
/// ```
/// # use justified_gallery::layout::calculations::height_penalty;
/// assert_eq!(height_penalty(90.0), 500.0);
/// assert_eq!(height_penalty(240.0), 0.0);
/// assert_eq!(height_penalty(380.0), 50.0);
/// ```
pub fn height_penalty(row_height: f64) -> f64 {
    if row_height < 100.0 {
        500.0
    } else if row_height < 150.0 {
        100.0
    } else if row_height > 400.0 {
        200.0
    } else if row_height > 350.0 {
        50.0
    } else {
        0.0
    }
}

/// Cost of a row of `row_size` items following a row of `previous_size`.
///
/// Alternating by one item is free; larger jumps grow quadratically.
pub fn balance_penalty(row_size: usize, previous_size: f64) -> f64 {
    let diff = (row_size as f64 - previous_size).abs();
    if diff <= 1.0 {
        0.0
    } else {
        diff * diff * BALANCE_WEIGHT
    }
}

/// Cost of straying from the gallery-wide ideal row size.
pub fn ideal_penalty(row_size: usize, ideal: f64) -> f64 {
    let diff = (row_size as f64 - ideal).abs();
    if diff <= IDEAL_TOLERANCE {
        0.0
    } else {
        (diff - 1.0) * IDEAL_WEIGHT
    }
}

/// Average number of photos per row if `count` photos were spread over the
/// row count suggested by the midpoint of the allowed size range.
///
/// Only feeds [`ideal_penalty`] and seeds the first balance comparison.
pub fn ideal_photos_per_row(count: usize, min_per_row: usize, max_per_row: usize) -> f64 {
    let midpoint = ((min_per_row + max_per_row) as f64 / 2.0).max(1.0);
    let estimated_rows = (count as f64 / midpoint).round().max(1.0);
    count as f64 / estimated_rows
}

/// Inputs for pricing one candidate row.
#[derive(Debug, Clone, Copy)]
pub struct RowCandidate {
    pub size: usize,
    pub aspect_sum: f64,
    pub previous_size: f64,
}

/// Full cost of a candidate row: distance from the target height plus the
/// height, balance and ideal-size penalties.
pub fn row_cost(
    candidate: RowCandidate,
    container_width: f64,
    target_row_height: f64,
    ideal: f64,
) -> f64 {
    let height = row_height(container_width, candidate.aspect_sum, candidate.size);
    (height - target_row_height).abs()
        + height_penalty(height)
        + balance_penalty(candidate.size, candidate.previous_size)
        + ideal_penalty(candidate.size, ideal)
}
