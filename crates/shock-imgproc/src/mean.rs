//! Box-mean filtering via a summed-area table
//!
//! A single-pass mean filter over 8-bit RGB samples. The window is clamped
//! to the image bounds, so border pixels average over a smaller area instead
//! of reading padded values.

use shock_image::ImageSize;

#[inline]
fn sat_at(sat: &[u64], width: usize, x: isize, y: isize, c: usize) -> u64 {
    if x < 0 || y < 0 {
        return 0;
    }
    sat[(y as usize * width + x as usize) * 3 + c]
}

/// Apply a box-mean filter of the given window size to 8-bit RGB samples.
///
/// # Arguments
///
/// * `src` - The 8-bit RGB samples, row-major and interleaved.
/// * `size` - The size of the image in pixels.
/// * `window` - The side length of the averaging square, at least 1.
///
/// # Returns
///
/// The filtered samples, same layout and length as the input.
pub fn mean_filter(src: &[u8], size: ImageSize, window: usize) -> Vec<u8> {
    let (width, height) = (size.width, size.height);
    debug_assert_eq!(src.len(), width * height * 3);
    debug_assert!(window >= 1);

    // inclusive prefix sums, columns first then rows
    let mut sat = vec![0u64; width * height * 3];
    for x in 0..width {
        for c in 0..3 {
            sat[x * 3 + c] = src[x * 3 + c] as u64;
        }
        for y in 1..height {
            let idx = (y * width + x) * 3;
            let above = ((y - 1) * width + x) * 3;
            for c in 0..3 {
                sat[idx + c] = sat[above + c] + src[idx + c] as u64;
            }
        }
    }
    for y in 0..height {
        for x in 1..width {
            let idx = (y * width + x) * 3;
            let left = (y * width + x - 1) * 3;
            for c in 0..3 {
                sat[idx + c] += sat[left + c];
            }
        }
    }

    let half = (window / 2) as isize;
    let mut out = vec![0u8; src.len()];
    for y in 0..height {
        let y_lo = (y as isize - half).max(0);
        let y_hi = (y as isize - half + window as isize - 1).min(height as isize - 1);

        for x in 0..width {
            let x_lo = (x as isize - half).max(0);
            let x_hi = (x as isize - half + window as isize - 1).min(width as isize - 1);

            let area = ((x_hi - x_lo + 1) * (y_hi - y_lo + 1)) as u64;
            for c in 0..3 {
                let sum = sat_at(&sat, width, x_hi, y_hi, c)
                    + sat_at(&sat, width, x_lo - 1, y_lo - 1, c)
                    - sat_at(&sat, width, x_lo - 1, y_hi, c)
                    - sat_at(&sat, width, x_hi, y_lo - 1, c);
                out[(y * width + x) * 3 + c] = (sum / area) as u8;
            }
        }
    }

    out
}
