#![deny(missing_docs)]
//! Float pixel buffer and elementwise operations for shock filtering

/// Float image representation and elementwise operations.
pub mod image;

/// Error types for the image module.
pub mod error;

pub use crate::error::ImageError;
pub use crate::image::{FloatImage, ImageSize};
