//! Image identification: reading pixel dimensions from file headers.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::image_dimensions` (header only, no decode) |
//!
//! The module is split into:
//! - **Backend**: [`ImageBackend`] trait + [`Dimensions`]
//! - **RustBackend**: the production implementation

pub mod backend;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use rust_backend::RustBackend;
