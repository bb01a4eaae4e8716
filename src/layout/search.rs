//! Row-break search.
//!
//! `dp[i]` holds the cheapest way to lay out the first `i` photos. A row
//! ending at `i` may only start within `max_photos_per_row` positions of it,
//! so the search costs O(n · max) in time and space. The final row alone may
//! be shorter than the minimum. Positions no regular row can end at stay
//! unreached, so they never start a row.

use super::calculations::{self, FALLBACK_PENALTY, RowCandidate};
use super::params::LayoutOptions;

/// One cell of the search table.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Step {
    /// Cheapest total cost of laying out everything before this position.
    cost: f64,
    /// Start of the last row, `None` only for position 0.
    prev_break: Option<usize>,
    /// Size of the last row. Fractional only at position 0.
    last_row_size: f64,
}

impl Step {
    const UNREACHED: Self = Self {
        cost: f64::INFINITY,
        prev_break: None,
        last_row_size: 0.0,
    };
}

/// Find the row boundaries for photos with the given aspect ratios.
///
/// Returns ascending positions starting at `0` and ending at
/// `aspect_ratios.len()`; consecutive pairs delimit one row. Always yields a
/// complete partition, whatever the options.
pub(super) fn find_breaks(
    aspect_ratios: &[f64],
    container_width: f64,
    options: &LayoutOptions,
) -> Vec<usize> {
    let n = aspect_ratios.len();
    if n == 0 {
        return vec![0];
    }

    let min = options.min_photos_per_row;
    let max = options.max_photos_per_row;
    let ideal = calculations::ideal_photos_per_row(n, min, max);
    // Bounds under which every row but the last can be a regular one.
    let regular = min.max(1) <= max;

    // prefix[i] - prefix[j] is the aspect sum of photos[j..i)
    let mut prefix = Vec::with_capacity(n + 1);
    let mut running = 0.0;
    prefix.push(running);
    for ar in aspect_ratios {
        running += ar;
        prefix.push(running);
    }

    let mut dp = vec![Step::UNREACHED; n + 1];
    dp[0] = Step {
        cost: 0.0,
        prev_break: None,
        last_row_size: ideal,
    };

    for i in 1..=n {
        let smallest = if i == n { 1 } else { min.max(1) };
        let largest = max.min(i);

        let mut best: Option<Step> = None;
        if smallest <= largest {
            for j in (i - largest)..=(i - smallest) {
                let from = dp[j];
                if !from.cost.is_finite() {
                    continue;
                }
                let size = i - j;
                let candidate = RowCandidate {
                    size,
                    aspect_sum: prefix[i] - prefix[j],
                    previous_size: from.last_row_size,
                };
                let total = from.cost
                    + calculations::row_cost(
                        candidate,
                        container_width,
                        options.target_row_height,
                        ideal,
                    );
                if total.is_finite() && best.is_none_or(|b| total < b.cost) {
                    best = Some(Step {
                        cost: total,
                        prev_break: Some(j),
                        last_row_size: size as f64,
                    });
                }
            }
        }

        dp[i] = match best {
            Some(step) => step,
            // Sound bounds always reach `n` through regular rows, so only
            // degenerate bounds need forced rows along the way.
            None if !regular || i == n => forced_row(&dp, i, min),
            None => Step::UNREACHED,
        };
    }

    let mut breaks = vec![n];
    let mut at = n;
    while let Some(prev) = dp[at].prev_break {
        breaks.push(prev);
        at = prev;
    }
    breaks.reverse();
    breaks
}

/// A row of `min` photos (at least one, at most `end`) ending at `end`,
/// priced with [`FALLBACK_PENALTY`]. Only used when the row-size bounds admit
/// no regular row at all.
fn forced_row(dp: &[Step], end: usize, min: usize) -> Step {
    let size = min.clamp(1, end);
    let start = end - size;
    tracing::trace!(end, size, "no regular row ends here, forcing one");
    Step {
        cost: dp[start].cost + FALLBACK_PENALTY,
        prev_break: Some(start),
        last_row_size: size as f64,
    }
}
