use crate::error::ImageError;

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

/// A float-valued pixel buffer with 1 or 3 interleaved channels.
///
/// Samples are stored row-major with interleaved channels, nominally in the
/// range `[0, 1]`. The range is not enforced until [`FloatImage::saturate`]
/// is called, so intermediate results of derivative masks may leave it.
#[derive(Clone, Debug, PartialEq)]
pub struct FloatImage {
    size: ImageSize,
    channels: usize,
    data: Vec<f32>,
}

impl FloatImage {
    /// Create a new image from pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `channels` - The number of channels (1 or 3).
    /// * `data` - The pixel data, row-major with interleaved channels.
    ///
    /// # Errors
    ///
    /// If the channel count is not 1 or 3, or the data length does not match
    /// `width * height * channels`, an error is returned.
    pub fn new(size: ImageSize, channels: usize, data: Vec<f32>) -> Result<Self, ImageError> {
        if channels != 1 && channels != 3 {
            return Err(ImageError::InvalidChannelCount(channels));
        }
        let expected = size.width * size.height * channels;
        if data.len() != expected {
            return Err(ImageError::InvalidLength(data.len(), expected));
        }
        Ok(Self {
            size,
            channels,
            data,
        })
    }

    /// Create a new image filled with a constant value.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `channels` - The number of channels (1 or 3).
    /// * `val` - The value to fill the image with.
    pub fn from_size_val(size: ImageSize, channels: usize, val: f32) -> Result<Self, ImageError> {
        let data = vec![val; size.width * size.height * channels];
        Self::new(size, channels, data)
    }

    /// Create a 3-channel image from 8-bit RGB samples, scaling each channel
    /// by `1 / 255`.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `samples` - The 8-bit RGB samples, row-major and interleaved.
    pub fn from_rgb8(size: ImageSize, samples: &[u8]) -> Result<Self, ImageError> {
        let data = samples.iter().map(|&v| v as f32 / 255.0).collect();
        Self::new(size, 3, data)
    }

    /// The size of the image in pixels.
    #[inline]
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// The width of the image in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// The height of the image in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// The number of channels (1 or 3).
    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Get the image data as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Get the image data as a mutable slice.
    #[inline]
    pub fn as_slice_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Read the sample at `(x, y, c)`.
    ///
    /// In-range coordinates are a precondition; boundary handling is the
    /// responsibility of the convolution masks.
    #[inline]
    pub fn get(&self, x: usize, y: usize, c: usize) -> f32 {
        debug_assert!(x < self.size.width && y < self.size.height && c < self.channels);
        self.data[(y * self.size.width + x) * self.channels + c]
    }

    /// Write the sample at `(x, y, c)`. See [`FloatImage::get`] for the
    /// coordinate precondition.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, c: usize, v: f32) {
        debug_assert!(x < self.size.width && y < self.size.height && c < self.channels);
        self.data[(y * self.size.width + x) * self.channels + c] = v;
    }

    /// Reduce a 3-channel image to a single channel by unweighted averaging,
    /// `(r + g + b) / 3`. No-op when the image is already single-channel.
    pub fn make_grey(&mut self) {
        if self.channels == 1 {
            return;
        }
        let grey = self
            .data
            .chunks_exact(3)
            .map(|px| (px[0] + px[1] + px[2]) / 3.0)
            .collect();
        self.channels = 1;
        self.data = grey;
    }

    /// Clamp every sample to `[0, 1]`.
    pub fn saturate(&mut self) {
        self.data.iter_mut().for_each(|v| *v = v.clamp(0.0, 1.0));
    }

    /// Square every sample in place.
    pub fn square(&mut self) {
        self.data.iter_mut().for_each(|v| *v *= *v);
    }

    /// Take the square root of every sample in place.
    pub fn square_root(&mut self) {
        self.data.iter_mut().for_each(|v| *v = v.sqrt());
    }

    /// Replace every sample with its sign: exactly `-1`, `0` or `1`.
    ///
    /// Zero maps to zero, not to either unit value. The shock update relies
    /// on this to stay inert in perfectly flat regions.
    pub fn signum(&mut self) {
        self.data.iter_mut().for_each(|v| {
            *v = if *v > 0.0 {
                1.0
            } else if *v < 0.0 {
                -1.0
            } else {
                0.0
            }
        });
    }

    /// Elementwise sum of two images of identical shape, returning a new
    /// image.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::ShapeMismatch`] when the shapes differ.
    pub fn add(&self, other: &Self) -> Result<Self, ImageError> {
        self.check_shape(other)?;
        let data = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| a + b)
            .collect();
        Self::new(self.size, self.channels, data)
    }

    /// Elementwise product of two images of identical shape, returning a new
    /// image.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::ShapeMismatch`] when the shapes differ.
    pub fn mul(&self, other: &Self) -> Result<Self, ImageError> {
        self.check_shape(other)?;
        let data = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| a * b)
            .collect();
        Self::new(self.size, self.channels, data)
    }

    /// Multiply every sample by a scalar, returning a new image.
    pub fn scale(&self, factor: f32) -> Self {
        let data = self.data.iter().map(|v| v * factor).collect();
        Self {
            size: self.size,
            channels: self.channels,
            data,
        }
    }

    /// Render the buffer to 8-bit RGB samples.
    ///
    /// A 3-channel buffer maps directly to R/G/B; a 1-channel buffer
    /// replicates its value across all three. The buffer must already be
    /// saturated to `[0, 1]`.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.size.width * self.size.height * 3);
        match self.channels {
            3 => out.extend(self.data.iter().map(|&v| (v * 255.0) as u8)),
            _ => {
                for &v in &self.data {
                    let b = (v * 255.0) as u8;
                    out.extend_from_slice(&[b, b, b]);
                }
            }
        }
        out
    }

    fn check_shape(&self, other: &Self) -> Result<(), ImageError> {
        if self.size != other.size || self.channels != other.channels {
            return Err(ImageError::ShapeMismatch(
                self.size.width,
                self.size.height,
                self.channels,
                other.size.width,
                other.size.height,
                other.channels,
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(width: usize, height: usize) -> ImageSize {
        ImageSize { width, height }
    }

    #[test]
    fn test_new_checks_length() {
        let res = FloatImage::new(size(2, 2), 3, vec![0.0; 11]);
        assert_eq!(res, Err(ImageError::InvalidLength(11, 12)));
    }

    #[test]
    fn test_new_checks_channels() {
        let res = FloatImage::new(size(2, 2), 2, vec![0.0; 8]);
        assert_eq!(res, Err(ImageError::InvalidChannelCount(2)));
    }

    #[test]
    fn test_from_rgb8_scales() -> Result<(), ImageError> {
        let img = FloatImage::from_rgb8(size(1, 2), &[0, 255, 51, 255, 0, 102])?;
        assert_eq!(img.channels(), 3);
        assert_eq!(img.get(0, 0, 0), 0.0);
        assert_eq!(img.get(0, 0, 1), 1.0);
        assert_eq!(img.get(0, 1, 0), 1.0);
        approx::assert_relative_eq!(img.get(0, 0, 2), 0.2, epsilon = 1e-6);
        approx::assert_relative_eq!(img.get(0, 1, 2), 0.4, epsilon = 1e-6);
        Ok(())
    }

    #[test]
    fn test_make_grey_averages() -> Result<(), ImageError> {
        let mut img = FloatImage::new(size(2, 1), 3, vec![0.3, 0.6, 0.9, 1.0, 1.0, 1.0])?;
        img.make_grey();
        assert_eq!(img.channels(), 1);
        approx::assert_relative_eq!(img.get(0, 0, 0), 0.6, epsilon = 1e-6);
        approx::assert_relative_eq!(img.get(1, 0, 0), 1.0, epsilon = 1e-6);

        // already grey: no-op
        let before = img.clone();
        img.make_grey();
        assert_eq!(img, before);
        Ok(())
    }

    #[test]
    fn test_saturate_clamps() -> Result<(), ImageError> {
        let mut img = FloatImage::new(size(2, 2), 1, vec![-0.5, 0.25, 1.5, 1e9])?;
        img.saturate();
        assert_eq!(img.as_slice(), &[0.0, 0.25, 1.0, 1.0]);
        Ok(())
    }

    #[test]
    fn test_signum_is_tri_valued() -> Result<(), ImageError> {
        let mut img = FloatImage::new(size(2, 2), 1, vec![-3.5, 0.0, 0.7, -0.0])?;
        img.signum();
        assert_eq!(img.as_slice(), &[-1.0, 0.0, 1.0, 0.0]);
        Ok(())
    }

    #[test]
    fn test_square_and_root() -> Result<(), ImageError> {
        let mut img = FloatImage::new(size(2, 1), 1, vec![2.0, -3.0])?;
        img.square();
        assert_eq!(img.as_slice(), &[4.0, 9.0]);
        img.square_root();
        assert_eq!(img.as_slice(), &[2.0, 3.0]);
        Ok(())
    }

    #[test]
    fn test_add_mul_scale() -> Result<(), ImageError> {
        let a = FloatImage::new(size(2, 1), 1, vec![0.25, 0.5])?;
        let b = FloatImage::new(size(2, 1), 1, vec![0.5, 0.25])?;
        assert_eq!(a.add(&b)?.as_slice(), &[0.75, 0.75]);
        assert_eq!(a.mul(&b)?.as_slice(), &[0.125, 0.125]);
        assert_eq!(a.scale(2.0).as_slice(), &[0.5, 1.0]);
        Ok(())
    }

    #[test]
    fn test_shape_mismatch_rejected() -> Result<(), ImageError> {
        let a = FloatImage::from_size_val(size(2, 2), 1, 0.0)?;
        let b = FloatImage::from_size_val(size(2, 3), 1, 0.0)?;
        assert_eq!(
            a.add(&b),
            Err(ImageError::ShapeMismatch(2, 2, 1, 2, 3, 1))
        );
        assert!(a.mul(&b).is_err());

        // same pixel count, different channel count still mismatches
        let c = FloatImage::from_size_val(size(2, 2), 3, 0.0)?;
        assert!(a.add(&c).is_err());
        Ok(())
    }

    #[test]
    fn test_to_rgb8_replicates_grey() -> Result<(), ImageError> {
        let grey = FloatImage::new(size(2, 1), 1, vec![0.0, 1.0])?;
        assert_eq!(grey.to_rgb8(), vec![0, 0, 0, 255, 255, 255]);

        let rgb = FloatImage::new(size(1, 1), 3, vec![1.0, 0.0, 0.2])?;
        assert_eq!(rgb.to_rgb8(), vec![255, 0, 51]);
        Ok(())
    }
}
