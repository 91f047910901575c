/// An error type for the image module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when the data length does not match the image shape.
    #[error("Data length ({0}) does not match the image shape ({1})")]
    InvalidLength(usize, usize),

    /// Error when the channel count is not supported.
    #[error("Invalid channel count ({0}), expected 1 or 3")]
    InvalidChannelCount(usize),

    /// Error when two buffers of different shapes are combined.
    #[error("Shape mismatch: {0}x{1}x{2} vs {3}x{4}x{5}")]
    ShapeMismatch(usize, usize, usize, usize, usize, usize),
}
