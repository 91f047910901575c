//! Structure tensor and closed-form 2x2 eigen-analysis
//!
//! The structure tensor is the Gaussian-smoothed outer product of the image
//! gradient. Its dominant eigenvector encodes the local edge normal; the
//! improved shock filter sharpens along it.

use shock_image::{FloatImage, ImageError};

use crate::filter::separable_filter;
use crate::masks::LinearMask;

/// Compute the structure tensor fields of a gradient pair.
///
/// Builds `a = gx^2`, `d = gy^2` and `c = gx * gy` and smooths each field
/// with the given integration mask. The result represents the symmetric
/// per-pixel matrix `[[a, c], [c, d]]`.
///
/// # Arguments
///
/// * `grad_x` - The x component of the gradient.
/// * `grad_y` - The y component of the gradient.
/// * `integration` - The Gaussian mask of the integration scale, usually
///   wider than the differentiation scale of the gradient itself.
pub fn structure_tensor(
    grad_x: &FloatImage,
    grad_y: &FloatImage,
    integration: &LinearMask,
) -> Result<(FloatImage, FloatImage, FloatImage), ImageError> {
    let mut a = grad_x.clone();
    a.square();
    let mut d = grad_y.clone();
    d.square();
    let c = grad_x.mul(grad_y)?;

    Ok((
        separable_filter(&a, integration)?,
        separable_filter(&c, integration)?,
        separable_filter(&d, integration)?,
    ))
}

/// Solve the symmetric 2x2 eigenproblem `[[a, c], [c, d]]` for the unit
/// eigenvector of the larger eigenvalue.
///
/// A zero cross term is an explicit branch, not a degeneracy: the matrix is
/// already diagonal and the eigenvector is axis-aligned with the larger of
/// `a` and `d`.
pub fn dominant_eigenvector(a: f32, c: f32, d: f32) -> (f32, f32) {
    if c == 0.0 {
        if a > d {
            (1.0, 0.0)
        } else {
            (0.0, 1.0)
        }
    } else {
        let half_trace = (a + d) / 2.0;
        let eigenvalue = half_trace + (half_trace * half_trace - a * d + c * c).sqrt();
        let b = (eigenvalue - a) / c;
        let scale = (1.0 + b * b).sqrt();
        (1.0 / scale, b / scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shock_image::ImageSize;

    #[test]
    fn test_eigen_diagonal_matrix() {
        assert_eq!(dominant_eigenvector(5.0, 0.0, 2.0), (1.0, 0.0));
        assert_eq!(dominant_eigenvector(2.0, 0.0, 5.0), (0.0, 1.0));
        // the zero tensor of a flat region picks the vertical axis
        assert_eq!(dominant_eigenvector(0.0, 0.0, 0.0), (0.0, 1.0));
    }

    #[test]
    fn test_eigen_equation_holds() {
        let (a, c, d) = (3.0, 1.0, 3.0);
        let (x, y) = dominant_eigenvector(a, c, d);

        approx::assert_relative_eq!(x * x + y * y, 1.0, epsilon = 1e-6);

        // larger eigenvalue of [[3, 1], [1, 3]] is 4
        let eigenvalue = 4.0;
        approx::assert_relative_eq!(a * x + c * y, eigenvalue * x, epsilon = 1e-5);
        approx::assert_relative_eq!(c * x + d * y, eigenvalue * y, epsilon = 1e-5);
    }

    #[test]
    fn test_eigen_general_symmetric() {
        let (a, c, d) = (2.0f32, -1.5, 7.0);
        let (x, y) = dominant_eigenvector(a, c, d);

        let half_trace = (a + d) / 2.0;
        let eigenvalue = half_trace + (half_trace * half_trace - a * d + c * c).sqrt();

        approx::assert_relative_eq!(x * x + y * y, 1.0, epsilon = 1e-6);
        approx::assert_relative_eq!(a * x + c * y, eigenvalue * x, epsilon = 1e-5);
        approx::assert_relative_eq!(c * x + d * y, eigenvalue * y, epsilon = 1e-5);
    }

    #[test]
    fn test_structure_tensor_of_flat_image_is_zero() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 6,
            height: 6,
        };
        let zero = FloatImage::from_size_val(size, 1, 0.0)?;
        let (a, c, d) = structure_tensor(&zero, &zero, &LinearMask::gaussian(2.0))?;
        assert!(a.as_slice().iter().all(|&v| v == 0.0));
        assert!(c.as_slice().iter().all(|&v| v == 0.0));
        assert!(d.as_slice().iter().all(|&v| v == 0.0));
        Ok(())
    }

    #[test]
    fn test_structure_tensor_vertical_edge() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 8,
            height: 8,
        };
        // constant horizontal gradient, no vertical component
        let gx = FloatImage::from_size_val(size, 1, 0.5)?;
        let gy = FloatImage::from_size_val(size, 1, 0.0)?;
        let (a, c, d) = structure_tensor(&gx, &gy, &LinearMask::gaussian(1.0))?;

        approx::assert_relative_eq!(a.get(4, 4, 0), 0.25, epsilon = 1e-5);
        assert_eq!(c.get(4, 4, 0), 0.0);
        assert_eq!(d.get(4, 4, 0), 0.0);

        let (x, y) = dominant_eigenvector(a.get(4, 4, 0), c.get(4, 4, 0), d.get(4, 4, 0));
        assert_eq!((x, y), (1.0, 0.0));
        Ok(())
    }
}
