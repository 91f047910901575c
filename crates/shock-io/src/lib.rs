#![deny(missing_docs)]
//! Image decoding and encoding for the shock filtering tools

/// High-level image reading and writing functions.
pub mod functional;

/// Error types for the io module.
pub mod error;

pub use crate::error::IoError;
