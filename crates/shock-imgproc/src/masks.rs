//! Convolution mask tables
//!
//! Masks are constructed once through the factory functions below and never
//! mutated afterwards. Sampling clamps tap coordinates to the image bounds
//! (edge replicate); zero padding would darken the output of derivative
//! masks near the border.

use shock_image::FloatImage;

/// The axis a linear mask is applied along.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// Taps move along x.
    Horizontal,
    /// Taps move along y.
    Vertical,
}

#[inline]
fn clamp_coord(coord: isize, dim: usize) -> usize {
    coord.clamp(0, dim as isize - 1) as usize
}

/// A 1-D convolution mask: an ordered weight table plus an anchor offset.
#[derive(Clone, Debug)]
pub struct LinearMask {
    weights: Vec<f32>,
    anchor: isize,
}

impl LinearMask {
    fn new(weights: Vec<f32>, anchor: isize) -> Self {
        Self { weights, anchor }
    }

    fn normalize(&mut self) {
        let sum = self.weights.iter().sum::<f32>();
        self.weights.iter_mut().for_each(|w| *w /= sum);
    }

    /// The weight table.
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Accumulate the mask at `(x, y, c)` along the given axis, clamping tap
    /// coordinates to the image bounds.
    pub fn apply(&self, src: &FloatImage, x: usize, y: usize, c: usize, axis: Axis) -> f32 {
        let mut acc = 0.0;
        for (i, &w) in self.weights.iter().enumerate() {
            let tap = i as isize + self.anchor;
            let (sx, sy) = match axis {
                Axis::Horizontal => (clamp_coord(x as isize + tap, src.width()), y),
                Axis::Vertical => (x, clamp_coord(y as isize + tap, src.height())),
            };
            acc += w * src.get(sx, sy, c);
        }
        acc
    }

    /// The 2-tap forward difference `[-1, 1]`, anchored one tap back.
    pub fn nabla() -> Self {
        Self::new(vec![-1.0, 1.0], -1)
    }

    /// The 3-tap second derivative `[1, -2, 1]`, anchored one tap back.
    pub fn second_derivative() -> Self {
        Self::new(vec![1.0, -2.0, 1.0], -1)
    }

    /// A discrete Gaussian with support radius `floor(4 * sigma)`, sampled
    /// from the density and renormalized to sum 1.
    pub fn gaussian(sigma: f32) -> Self {
        debug_assert!(sigma > 0.0);
        let radius = (4.0 * sigma) as usize;
        let mut weights = vec![0.0; 2 * radius + 1];
        let norm = sigma * (2.0 * std::f32::consts::PI).sqrt();
        for x in 0..=radius {
            let h = (-((x * x) as f32) / (2.0 * sigma * sigma)).exp() / norm;
            weights[radius + x] = h;
            weights[radius - x] = h;
        }
        let mut mask = Self::new(weights, -(radius as isize));
        mask.normalize();
        mask
    }
}

/// A 2-D convolution mask: a rectangular weight grid plus independent x/y
/// anchor offsets. The grid height is derived from the weight count.
#[derive(Clone, Debug)]
pub struct RectMask {
    weights: Vec<f32>,
    width: usize,
    anchor_x: isize,
    anchor_y: isize,
}

impl RectMask {
    fn new(weights: Vec<f32>, width: usize, anchor_x: isize, anchor_y: isize) -> Self {
        Self {
            weights,
            width,
            anchor_x,
            anchor_y,
        }
    }

    /// The weight grid, row-major.
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Accumulate the mask at `(x, y, c)`, clamping tap coordinates to the
    /// image bounds independently on both axes.
    pub fn apply(&self, src: &FloatImage, x: usize, y: usize, c: usize) -> f32 {
        let height = self.weights.len() / self.width;
        let mut acc = 0.0;
        for iy in 0..height {
            let sy = clamp_coord(y as isize + iy as isize + self.anchor_y, src.height());
            for ix in 0..self.width {
                let sx = clamp_coord(x as isize + ix as isize + self.anchor_x, src.width());
                acc += src.get(sx, sy, c) * self.weights[iy * self.width + ix];
            }
        }
        acc
    }

    /// The 2x2 cross derivative `[[1, -1], [-1, 1]]`, anchored at (-1, -1).
    pub fn cross_derivative() -> Self {
        Self::new(vec![1.0, -1.0, -1.0, 1.0], 2, -1, -1)
    }

    /// The 3x3 four-neighbour Laplacian.
    pub fn laplace() -> Self {
        #[rustfmt::skip]
        let weights = vec![
            0.0,  1.0, 0.0,
            1.0, -4.0, 1.0,
            0.0,  1.0, 0.0,
        ];
        Self::new(weights, 3, -1, -1)
    }

    /// The 3x3 eight-neighbour Laplacian, weighting the diagonals as well.
    pub fn laplace_diag() -> Self {
        #[rustfmt::skip]
        let weights = vec![
            1.0,  1.0, 1.0,
            1.0, -8.0, 1.0,
            1.0,  1.0, 1.0,
        ];
        Self::new(weights, 3, -1, -1)
    }
}
