//! Filter application
//!
//! Every filter maps a [`FloatImage`] to a freshly allocated one of the same
//! width, height and channel count. Output rows are computed in parallel;
//! the source is only ever read, so the iteration order does not matter.

use rayon::prelude::*;
use shock_image::{FloatImage, ImageError};

use crate::masks::{Axis, LinearMask, RectMask};

/// Apply a linear mask along one axis over every pixel and channel.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `mask` - The 1-D mask to accumulate at every sample.
/// * `axis` - The axis the mask taps move along.
pub fn linear_filter(
    src: &FloatImage,
    mask: &LinearMask,
    axis: Axis,
) -> Result<FloatImage, ImageError> {
    let (w, c) = (src.width(), src.channels());
    let mut data = vec![0.0f32; w * src.height() * c];

    data.par_chunks_mut(w * c).enumerate().for_each(|(y, row)| {
        for x in 0..w {
            for ch in 0..c {
                row[x * c + ch] = mask.apply(src, x, y, ch, axis);
            }
        }
    });

    FloatImage::new(src.size(), c, data)
}

/// Apply a rectangular mask over every pixel and channel.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `mask` - The 2-D mask to accumulate at every sample.
pub fn rect_filter(src: &FloatImage, mask: &RectMask) -> Result<FloatImage, ImageError> {
    let (w, c) = (src.width(), src.channels());
    let mut data = vec![0.0f32; w * src.height() * c];

    data.par_chunks_mut(w * c).enumerate().for_each(|(y, row)| {
        for x in 0..w {
            for ch in 0..c {
                row[x * c + ch] = mask.apply(src, x, y, ch);
            }
        }
    });

    FloatImage::new(src.size(), c, data)
}

/// Apply the same linear mask along both axes in two passes.
///
/// Realizes a 2-D convolution with a separable kernel in `O(w * h * k)`
/// instead of `O(w * h * k^2)`.
pub fn separable_filter(src: &FloatImage, mask: &LinearMask) -> Result<FloatImage, ImageError> {
    let tmp = linear_filter(src, mask, Axis::Horizontal)?;
    linear_filter(&tmp, mask, Axis::Vertical)
}

/// Blur an image with a separable Gaussian of the given scale.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `sigma` - The scale of the Gaussian, must be positive.
pub fn gaussian_blur(src: &FloatImage, sigma: f32) -> Result<FloatImage, ImageError> {
    separable_filter(src, &LinearMask::gaussian(sigma))
}
