#![deny(missing_docs)]
//! Convolution masks, structure tensor analysis and shock filters

/// Convolution mask tables and boundary-clamped sampling.
pub mod masks;

/// Filter application over whole images.
pub mod filter;

/// Structure tensor and 2x2 eigen-analysis.
pub mod tensor;

/// Iterative shock sharpening filters.
pub mod shock;

/// Summed-area-table box-mean filtering.
pub mod mean;

pub use crate::masks::{Axis, LinearMask, RectMask};
pub use crate::shock::{ImprovedShockFilter, SimpleShockFilter};
