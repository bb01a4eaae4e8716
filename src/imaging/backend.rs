//! Identification backend trait and shared types.
//!
//! The [`ImageBackend`] trait is the seam between the scanner and whatever
//! reads image files. The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend); tests use a mock that
//! hands out canned dimensions.

use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for identification backends.
///
/// `Sync` so the scanner can identify files from rayon workers.
pub trait ImageBackend: Sync {
    /// Get image dimensions.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;
}
