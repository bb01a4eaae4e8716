//! Justified layout engine.
//!
//! Splits an ordered list of photos into rows that each span the container
//! width exactly, with every photo in a row sharing the row's height:
//!
//! ```text
//! container_width
//! ├──────────────────────────────────────────┤
//! ┌────────┐ ┌──────────────┐ ┌──────────────┐   row height h₀
//! └────────┘ └──────────────┘ └──────────────┘
//! ┌──────────┐ ┌────┐ ┌─────────┐ ┌─────────┐    row height h₁
//! └──────────┘ └────┘ └─────────┘ └─────────┘
//! ```
//!
//! The engine is a pure function: plain data in, plain data out, no state
//! kept between calls. It is safe to call from any number of threads.
//!
//! - **Calculations**: cost terms and geometry constants (unit testable)
//! - **Parameters**: [`LayoutOptions`]
//! - **Search**: the bounded dynamic program choosing row breaks
//! - this module: turning breaks into sized [`Row`]s

pub mod calculations;
mod params;
mod search;

pub use calculations::{GAP, MAX_ROW_HEIGHT};
pub use params::{
    DEFAULT_MAX_PHOTOS_PER_ROW, DEFAULT_MIN_PHOTOS_PER_ROW, DEFAULT_TARGET_ROW_HEIGHT,
    LayoutOptions,
};

use crate::types::{LayoutItem, PhotoInput, Row};

/// Partition `photos` into justified rows for a container `container_width`
/// units wide.
///
/// Total: empty input or a non-positive (or non-finite) width yields no rows;
/// fewer photos than `min_photos_per_row` yields a single row; anything else
/// goes through the row-break search. Rows come back in input order and
/// together contain every photo exactly once.
///
/// Containers too narrow for `max_photos_per_row` photos and their gaps get
/// smaller rows instead: both row-size bounds are capped at the most photos
/// that still leave a positive width, so every row has a positive height.
///
/// # Examples
/// ```
/// use justified_gallery::layout::{LayoutOptions, compute_justified_layout};
/// use justified_gallery::types::PhotoInput;
///
/// let photos: Vec<PhotoInput> = (0..6)
///     .map(|i| PhotoInput::new(format!("p{i}"), format!("p{i}.jpg"), 600.0, 400.0))
///     .collect();
/// let rows = compute_justified_layout(&photos, 1000.0, &LayoutOptions::default());
///
/// let placed: usize = rows.iter().map(|r| r.items.len()).sum();
/// assert_eq!(placed, 6);
/// for row in &rows {
///     assert!((row.width() - 1000.0).abs() < 1.0);
/// }
/// ```
pub fn compute_justified_layout(
    photos: &[PhotoInput],
    container_width: f64,
    options: &LayoutOptions,
) -> Vec<Row> {
    if photos.is_empty() || !container_width.is_finite() || container_width <= 0.0 {
        return Vec::new();
    }

    let options = options.sanitized().fitted_to(container_width);
    let aspect_ratios: Vec<f64> = photos.iter().map(PhotoInput::aspect_ratio).collect();

    if photos.len() < options.min_photos_per_row {
        return vec![build_row(photos, &aspect_ratios, container_width)];
    }

    search::find_breaks(&aspect_ratios, container_width, &options)
        .windows(2)
        .map(|w| {
            let (start, end) = (w[0], w[1]);
            build_row(
                &photos[start..end],
                &aspect_ratios[start..end],
                container_width,
            )
        })
        .collect()
}

/// Size one row: a shared height capped at [`MAX_ROW_HEIGHT`], widths split
/// by each photo's share of the row's total aspect ratio.
fn build_row(photos: &[PhotoInput], aspect_ratios: &[f64], container_width: f64) -> Row {
    let aspect_sum: f64 = aspect_ratios.iter().sum();
    let available = calculations::available_width(container_width, photos.len());
    let height =
        calculations::row_height(container_width, aspect_sum, photos.len()).min(MAX_ROW_HEIGHT);

    let items = photos
        .iter()
        .zip(aspect_ratios)
        .map(|(photo, &aspect_ratio)| LayoutItem {
            photo_id: photo.id.clone(),
            url: photo.url.clone(),
            aspect_ratio,
            display_width: available * aspect_ratio / aspect_sum,
            display_height: height,
        })
        .collect();

    Row { items, height }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{assert_complete, assert_width_fidelity, photos_with_ratios};

    #[test]
    fn empty_photos_give_no_rows() {
        assert!(compute_justified_layout(&[], 1000.0, &LayoutOptions::default()).is_empty());
    }

    #[test]
    fn non_positive_width_gives_no_rows() {
        let photos = photos_with_ratios(&[1.5; 6]);
        for width in [0.0, -100.0, f64::NAN, f64::INFINITY] {
            assert!(
                compute_justified_layout(&photos, width, &LayoutOptions::default()).is_empty(),
                "width {width} produced rows"
            );
        }
    }

    #[test]
    fn single_photo_below_minimum_is_one_capped_row() {
        // One 1.5 photo in 1000px would be 666px tall; capped at 350
        let photos = photos_with_ratios(&[1.5]);
        let rows = compute_justified_layout(&photos, 1000.0, &LayoutOptions::default());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].height, MAX_ROW_HEIGHT);
        assert!((rows[0].items[0].display_width - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn fewer_photos_than_minimum_is_one_row() {
        let photos = photos_with_ratios(&[1.0, 0.75, 1.5]);
        let options = LayoutOptions {
            min_photos_per_row: 4,
            ..LayoutOptions::default()
        };
        let rows = compute_justified_layout(&photos, 1000.0, &options);
        assert_eq!(rows.len(), 1);
        assert_complete(&photos, &rows);
        // (1000 - 8) / 3.25 ≈ 305, under the cap
        assert!((rows[0].height - 992.0 / 3.25).abs() < 1e-9);
    }

    #[test]
    fn six_landscapes_in_one_thousand() {
        let photos = photos_with_ratios(&[1.5; 6]);
        let rows = compute_justified_layout(&photos, 1000.0, &LayoutOptions::default());
        assert_complete(&photos, &rows);
        assert_width_fidelity(&rows, 1000.0);
        assert_eq!(rows.len(), 1);
        assert!((rows[0].height - 980.0 / 9.0).abs() < 1e-9);
        for item in &rows[0].items {
            assert!((item.display_width - 980.0 / 6.0).abs() < 1e-9);
            assert_eq!(item.display_height, rows[0].height);
        }
    }

    #[test]
    fn widths_follow_aspect_ratio_share() {
        let photos = photos_with_ratios(&[2.0, 1.0]);
        let rows = compute_justified_layout(&photos, 604.0, &LayoutOptions::default());
        assert_eq!(rows.len(), 1);
        assert!((rows[0].items[0].display_width - 400.0).abs() < 1e-9);
        assert!((rows[0].items[1].display_width - 200.0).abs() < 1e-9);
        assert!((rows[0].height - 200.0).abs() < 1e-9);
    }

    #[test]
    fn invalid_dimensions_use_square_ratio() {
        let photos = vec![
            PhotoInput::new("a", "a.jpg", 0.0, 0.0),
            PhotoInput::new("b", "b.jpg", -5.0, 400.0),
        ];
        let rows = compute_justified_layout(&photos, 1000.0, &LayoutOptions::default());
        assert_eq!(rows.len(), 1);
        for item in &rows[0].items {
            assert_eq!(item.aspect_ratio, 1.0);
            assert!(item.display_width.is_finite());
        }
        assert_width_fidelity(&rows, 1000.0);
    }

    #[test]
    fn unusable_target_height_uses_default() {
        let photos = photos_with_ratios(&[1.5; 12]);
        let nan = LayoutOptions {
            target_row_height: f64::NAN,
            ..LayoutOptions::default()
        };
        assert_eq!(
            compute_justified_layout(&photos, 1000.0, &nan),
            compute_justified_layout(&photos, 1000.0, &LayoutOptions::default())
        );
    }

    #[test]
    fn narrow_container_rows_keep_positive_height() {
        // 10px fits three photos and two gaps; eight would need 28px of gaps
        let photos = photos_with_ratios(&[1.5; 9]);
        let rows = compute_justified_layout(&photos, 10.0, &LayoutOptions::default());
        assert_complete(&photos, &rows);
        assert_width_fidelity(&rows, 10.0);
        for row in &rows {
            assert!(row.len() <= 3, "row of {}", row.len());
            assert!(row.height > 0.0);
        }
    }

    #[test]
    fn items_keep_photo_identity() {
        let photos = photos_with_ratios(&[1.5, 0.67, 1.0, 1.78, 1.33]);
        let rows = compute_justified_layout(&photos, 900.0, &LayoutOptions::default());
        let urls: Vec<&str> = rows
            .iter()
            .flat_map(|r| &r.items)
            .map(|i| i.url.as_str())
            .collect();
        let expected: Vec<&str> = photos.iter().map(|p| p.url.as_str()).collect();
        assert_eq!(urls, expected);
    }

    #[test]
    fn repeated_calls_are_identical() {
        let photos = photos_with_ratios(&[1.5, 0.67, 1.0, 1.78, 1.33, 0.8, 2.4, 1.5, 1.0]);
        let a = compute_justified_layout(&photos, 1280.0, &LayoutOptions::default());
        let b = compute_justified_layout(&photos, 1280.0, &LayoutOptions::default());
        assert_eq!(a, b);
    }
}
