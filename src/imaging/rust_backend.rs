//! Pure Rust identification backend.
//!
//! Reads dimensions through the `image` crate's format sniffing, which parses
//! only as much of the file as it needs to find the size.

use super::backend::{BackendError, Dimensions, ImageBackend};
use std::path::Path;

/// Production backend: statically linked, no external tools.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) = image::image_dimensions(path).map_err(|e| match e {
            image::ImageError::IoError(io) => BackendError::Io(io),
            other => BackendError::ProcessingFailed(format!(
                "Failed to read dimensions of {}: {other}",
                path.display()
            )),
        })?;
        Ok(Dimensions { width, height })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::write_png;
    use tempfile::TempDir;

    #[test]
    fn identify_reads_png_header() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("wide.png");
        write_png(&path, 48, 16);

        let dims = RustBackend::new().identify(&path).unwrap();
        assert_eq!(
            dims,
            Dimensions {
                width: 48,
                height: 16
            }
        );
    }

    #[test]
    fn identify_missing_file_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let result = RustBackend::new().identify(&tmp.path().join("nope.png"));
        assert!(matches!(result, Err(BackendError::Io(_))));
    }

    #[test]
    fn identify_garbage_is_processing_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("broken.jpg");
        std::fs::write(&path, b"not an image at all").unwrap();
        assert!(matches!(
            RustBackend::new().identify(&path),
            Err(BackendError::ProcessingFailed(_))
        ));
    }
}
