/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! 2D convolution on single channel `f32` images
//!
//! The kernel is first rotated by 180 degrees, after which convolution
//! is a plain correlation, so inner loops walk image and kernel in the
//! same direction.
//!
//! Output has the size of the image, samples outside the image are
//! clamped to the nearest edge pixel.
//!
//! # Tiers
//! - [`convolve_naive`]: clamp every tap, read through checked accessors
//! - [`convolve_optimized`]: split the output into border and interior,
//!   interior pixels skip clamping and read rows without bounds checks
//! - [`convolve_simd`]: like optimized, but the interior is computed
//!   [`LANES`] output pixels at a time
//!
//! All tiers add the same products in the same order, their output is bit identical.
use pixbench_image::buffer::PixelBuffer;
use pixbench_image::errors::ImageErrors;

use crate::rotate::rotate180_optimized;
use crate::simd::scalar::ScalarF32x8;
use crate::simd::{detect_backend, Backend, F32Lanes, LANES};
use crate::strategy::Strategy;
use crate::utils::{clamp_to_edge, ensure_live, ensure_same_dimensions, interior_range};

/// Convolve using the fastest tier, see [`convolve_simd`]
///
/// # Errors
/// - [`ImageErrors::DimensionMismatch`] if `out` differs in shape from `image`
/// - [`ImageErrors::BufferReleased`] if any buffer was disposed
///
/// # Example
/// ```
/// use pixbench_image::buffer::PixelBuffer;
/// use pixbench_procs::convolve::convolve;
///
/// let image = PixelBuffer::from_slice(3, 1, &[1.0, 2.0, 3.0]).unwrap();
/// // a 3 tap box filter
/// let kernel = PixelBuffer::from_slice(3, 1, &[1.0, 1.0, 1.0]).unwrap();
/// let mut out = PixelBuffer::new(3, 1).unwrap();
///
/// convolve(&image, &kernel, &mut out).unwrap();
/// // edges borrow their own value
/// assert_eq!(out.to_vec(), [4.0, 6.0, 8.0]);
/// ```
pub fn convolve(
    image: &PixelBuffer<f32>, kernel: &PixelBuffer<f32>, out: &mut PixelBuffer<f32>
) -> Result<(), ImageErrors> {
    convolve_simd(image, kernel, out)
}

/// Convolve using the given tier
///
/// # Errors
/// See [`convolve`]
pub fn convolve_with(
    strategy: Strategy, image: &PixelBuffer<f32>, kernel: &PixelBuffer<f32>,
    out: &mut PixelBuffer<f32>
) -> Result<(), ImageErrors> {
    match strategy {
        Strategy::Naive => convolve_naive(image, kernel, out),
        Strategy::Optimized => convolve_optimized(image, kernel, out),
        Strategy::Simd => convolve_simd(image, kernel, out)
    }
}

/// Convolve every output pixel with clamped, checked reads
///
/// # Errors
/// See [`convolve`]
pub fn convolve_naive(
    image: &PixelBuffer<f32>, kernel: &PixelBuffer<f32>, out: &mut PixelBuffer<f32>
) -> Result<(), ImageErrors> {
    let flipped = prepare(image, kernel, out)?;

    Correlation::new(image, &flipped).perform_naive(out)
}

/// Convolve with an interior/border split
///
/// # Errors
/// See [`convolve`]
pub fn convolve_optimized(
    image: &PixelBuffer<f32>, kernel: &PixelBuffer<f32>, out: &mut PixelBuffer<f32>
) -> Result<(), ImageErrors> {
    let flipped = prepare(image, kernel, out)?;

    Correlation::new(image, &flipped).perform_split(out);
    Ok(())
}

/// Convolve with an interior/border split and a vectorized interior
///
/// # Errors
/// See [`convolve`]
pub fn convolve_simd(
    image: &PixelBuffer<f32>, kernel: &PixelBuffer<f32>, out: &mut PixelBuffer<f32>
) -> Result<(), ImageErrors> {
    let flipped = prepare(image, kernel, out)?;
    let correlation = Correlation::new(image, &flipped);

    match detect_backend() {
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        #[cfg(feature = "avx")]
        Backend::Avx => unsafe { perform_vector_avx(&correlation, out, false) },
        // safety: portable lanes need no CPU support
        _ => unsafe { correlation.perform_vector::<ScalarF32x8>(out, false) }
    }
    Ok(())
}

/// Compute only the full lane groups of the interior
///
/// Border pixels and the scalar interior remainder are left untouched,
/// this measures the vector loop in isolation and is not a complete convolution.
///
/// # Errors
/// See [`convolve`]
pub fn convolve_simd_interior(
    image: &PixelBuffer<f32>, kernel: &PixelBuffer<f32>, out: &mut PixelBuffer<f32>
) -> Result<(), ImageErrors> {
    let flipped = prepare(image, kernel, out)?;
    let correlation = Correlation::new(image, &flipped);

    match detect_backend() {
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        #[cfg(feature = "avx")]
        Backend::Avx => unsafe { perform_vector_avx(&correlation, out, true) },
        // safety: portable lanes need no CPU support
        _ => unsafe { correlation.perform_vector::<ScalarF32x8>(out, true) }
    }
    Ok(())
}

/// Validate operands and return the kernel flipped on both axes
fn prepare(
    image: &PixelBuffer<f32>, kernel: &PixelBuffer<f32>, out: &PixelBuffer<f32>
) -> Result<PixelBuffer<f32>, ImageErrors> {
    ensure_live(&[image, kernel, out])?;
    ensure_same_dimensions(image, out)?;

    let mut flipped = PixelBuffer::new(kernel.width(), kernel.height())?;
    rotate180_optimized(kernel, &mut flipped)?;

    Ok(flipped)
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
#[cfg(feature = "avx")]
#[target_feature(enable = "avx")]
unsafe fn perform_vector_avx(correlation: &Correlation, out: &mut PixelBuffer<f32>, interior_only: bool) {
    correlation.perform_vector::<crate::simd::avx::AvxF32x8>(out, interior_only);
}

/// Correlation of an image with an already flipped kernel
///
/// The kernel tap `(ofsx, ofsy)` sits on top of the output pixel.
struct Correlation<'a> {
    image:  &'a PixelBuffer<f32>,
    kernel: &'a PixelBuffer<f32>,
    ofsx:   usize,
    ofsy:   usize,
    // last valid kernel and image coordinates
    kw1:    usize,
    kh1:    usize,
    iw1:    usize,
    ih1:    usize
}

impl<'a> Correlation<'a> {
    fn new(image: &'a PixelBuffer<f32>, kernel: &'a PixelBuffer<f32>) -> Correlation<'a> {
        Correlation {
            image,
            kernel,
            ofsx: kernel.width() / 2,
            ofsy: kernel.height() / 2,
            kw1: kernel.width() - 1,
            kh1: kernel.height() - 1,
            iw1: image.width() - 1,
            ih1: image.height() - 1
        }
    }

    fn perform_naive(&self, out: &mut PixelBuffer<f32>) -> Result<(), ImageErrors> {
        for y in 0..out.height() {
            for x in 0..out.width() {
                let value = self.process_checked(x, y)?;
                out.set(x, y, value)?;
            }
        }
        Ok(())
    }

    fn perform_split(&self, out: &mut PixelBuffer<f32>) {
        let columns = interior_range(out.width(), self.ofsx, self.kw1);
        let rows = interior_range(out.height(), self.ofsy, self.kh1);
        let width = out.width();

        for y in 0..out.height() {
            let row = out.row_mut(y);

            if !rows.contains(&y) {
                self.border_span(row, y, 0..width);
                continue;
            }
            self.border_span(row, y, 0..columns.start);

            for x in columns.clone() {
                // safety: x and y are interior, no tap leaves the image
                row[x] = unsafe { self.process_interior(x, y) };
            }
            self.border_span(row, y, columns.end..width);
        }
    }

    /// # Safety
    /// The CPU must support `V`
    #[inline(always)]
    unsafe fn perform_vector<V: F32Lanes>(&self, out: &mut PixelBuffer<f32>, interior_only: bool) {
        let columns = interior_range(out.width(), self.ofsx, self.kw1);
        let rows = interior_range(out.height(), self.ofsy, self.kh1);
        // end of the last full lane group in the interior
        let vector_end = columns.start + columns.len() / LANES * LANES;
        let width = out.width();

        for y in 0..out.height() {
            let row = out.row_mut(y);

            if !rows.contains(&y) {
                if !interior_only {
                    self.border_span(row, y, 0..width);
                }
                continue;
            }

            for x in (columns.start..vector_end).step_by(LANES) {
                self.process_vector::<V>(row, x, y);
            }
            if interior_only {
                continue;
            }
            for x in vector_end..columns.end {
                row[x] = self.process_interior(x, y);
            }
            self.border_span(row, y, 0..columns.start);
            self.border_span(row, y, columns.end..width);
        }
    }

    fn border_span(&self, row: &mut [f32], y: usize, span: core::ops::Range<usize>) {
        for x in span {
            row[x] = self.process_border(x, y);
        }
    }

    /// Clamp every tap and read through checked accessors
    fn process_checked(&self, x0: usize, y0: usize) -> Result<f32, ImageErrors> {
        let mut sum = 0.0_f32;

        for j in 0..=self.kh1 {
            let y = clamp_to_edge(y0 + j, self.ofsy, self.ih1);

            for i in 0..=self.kw1 {
                let x = clamp_to_edge(x0 + i, self.ofsx, self.iw1);
                sum += self.image.get(x, y)? * self.kernel.get(i, j)?;
            }
        }
        Ok(sum)
    }

    /// Clamp once per kernel row instead of once per tap
    ///
    /// Taps `x1..=x2` fall inside the image row, taps left of `x1` all read
    /// the first pixel and taps right of `x2` all read the last one.
    fn process_border(&self, x0: usize, y0: usize) -> f32 {
        let mut sum = 0.0_f32;

        let x1 = self.ofsx.saturating_sub(x0);
        let x2 = self.kw1.min(self.iw1 + self.ofsx - x0);
        // image column read by tap x1
        let start = x0 + x1 - self.ofsx;
        let end = start + (x2 - x1);

        for j in 0..=self.kh1 {
            let y = clamp_to_edge(y0 + j, self.ofsy, self.ih1);
            let p = self.image.row(y);
            let k = self.kernel.row(j);

            for weight in &k[..x1] {
                sum += p[start] * weight;
            }
            for (pixel, weight) in p[start..=end].iter().zip(&k[x1..=x2]) {
                sum += pixel * weight;
            }
            for weight in &k[x2 + 1..] {
                sum += p[end] * weight;
            }
        }
        sum
    }

    /// # Safety
    /// `(x0, y0)` must lie in the interior, every tap inside the image
    #[inline(always)]
    unsafe fn process_interior(&self, x0: usize, y0: usize) -> f32 {
        let mut sum = 0.0_f32;
        let start = x0 - self.ofsx;

        for j in 0..=self.kh1 {
            // walks kw1 + 1 elements forward, all inside the source row
            let p = self.image.row_ptr(start, y0 - self.ofsy + j);

            for (i, weight) in self.kernel.row(j).iter().enumerate() {
                sum += *p.add(i) * weight;
            }
        }
        sum
    }

    /// Compute output pixels `x0..x0 + LANES` of row `y0`
    ///
    /// Every kernel coefficient is broadcast and multiplied against
    /// [`LANES`] consecutive source pixels.
    ///
    /// # Safety
    /// The CPU must support `V`, and all of `x0..x0 + LANES` must be interior
    #[inline(always)]
    unsafe fn process_vector<V: F32Lanes>(&self, row: &mut [f32], x0: usize, y0: usize) {
        let mut sum = V::zero();
        let start = x0 - self.ofsx;

        for j in 0..=self.kh1 {
            let s = self
                .image
                .row(y0 - self.ofsy + j)
                .get_unchecked(start..start + self.kw1 + LANES);
            let k = self.kernel.row(j);

            for (i, weight) in k.iter().enumerate() {
                sum = sum.mul_add(V::load(s.get_unchecked(i..)), V::splat(*weight));
            }
        }
        sum.store(&mut row[x0..x0 + LANES]);
    }
}

#[cfg(test)]
mod tests {
    use nanorand::Rng;
    use pixbench_image::buffer::PixelBuffer;
    use pixbench_image::errors::ImageErrors;

    use crate::convolve::{convolve_naive, convolve_simd_interior, convolve_with, prepare, Correlation};
    use crate::simd::scalar::ScalarF32x8;
    use crate::strategy::Strategy;

    fn random_image(width: usize, height: usize, seed: u64) -> PixelBuffer<f32> {
        let mut rng = nanorand::WyRand::new_seed(seed);
        let data: Vec<f32> = (0..width * height)
            .map(|_| rng.generate::<f32>() * 10.0 - 5.0)
            .collect();
        PixelBuffer::from_slice(width, height, &data).unwrap()
    }

    #[test]
    fn convolve_small_example() {
        let image = PixelBuffer::from_slice(
            3,
            4,
            &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0]
        )
        .unwrap();
        let kernel = PixelBuffer::from_slice(2, 3, &[1.0, 0.0, 0.0, 2.0, 3.0, 1.0]).unwrap();
        let expected = PixelBuffer::from_slice(
            3,
            4,
            &[10.0, 14.0, 21.0, 19.0, 23.0, 30.0, 40.0, 44.0, 51.0, 58.0, 62.0, 69.0]
        )
        .unwrap();

        for strategy in Strategy::ALL {
            let mut out = PixelBuffer::new(3, 4).unwrap();
            convolve_with(strategy, &image, &kernel, &mut out).unwrap();
            assert_eq!(out, expected, "{strategy}");
        }
    }

    #[test]
    fn convolve_tiers_agree() {
        let image = random_image(45, 23, 3);

        for (kw, kh) in [(1, 1), (2, 3), (3, 3), (5, 5), (7, 7), (4, 6), (15, 15)] {
            let kernel = random_image(kw, kh, 9);

            let mut reference = PixelBuffer::new(45, 23).unwrap();
            convolve_naive(&image, &kernel, &mut reference).unwrap();

            for strategy in [Strategy::Optimized, Strategy::Simd] {
                let mut out = PixelBuffer::new(45, 23).unwrap();
                convolve_with(strategy, &image, &kernel, &mut out).unwrap();
                assert_eq!(out, reference, "{strategy} kernel {kw}x{kh}");
            }

            let flipped = prepare(&image, &kernel, &reference).unwrap();
            let mut portable = PixelBuffer::new(45, 23).unwrap();
            unsafe { Correlation::new(&image, &flipped).perform_vector::<ScalarF32x8>(&mut portable, false) };
            assert_eq!(portable, reference, "portable kernel {kw}x{kh}");
        }
    }

    #[test]
    fn kernel_larger_than_image() {
        let kernel = random_image(9, 7, 5);

        for (width, height) in [(1, 1), (2, 3), (4, 2), (8, 6)] {
            let image = random_image(width, height, 11);

            let mut reference = PixelBuffer::new(width, height).unwrap();
            convolve_naive(&image, &kernel, &mut reference).unwrap();

            for strategy in [Strategy::Optimized, Strategy::Simd] {
                let mut out = PixelBuffer::new(width, height).unwrap();
                convolve_with(strategy, &image, &kernel, &mut out).unwrap();
                assert_eq!(out, reference, "{strategy} image {width}x{height}");
            }
        }
    }

    #[test]
    fn constant_image_keeps_kernel_sum() {
        let mut image = PixelBuffer::new(20, 13).unwrap();
        image.fill(2.0);
        let mut kernel = PixelBuffer::new(5, 3).unwrap();
        kernel.fill(1.0);

        for strategy in Strategy::ALL {
            let mut out = PixelBuffer::new(20, 13).unwrap();
            convolve_with(strategy, &image, &kernel, &mut out).unwrap();
            assert!(out.to_vec().iter().all(|x| *x == 30.0), "{strategy}");
        }
    }

    #[test]
    fn interior_only_leaves_border_untouched() {
        let image = random_image(30, 12, 1);
        let kernel = random_image(3, 3, 2);

        let mut full = PixelBuffer::new(30, 12).unwrap();
        convolve_naive(&image, &kernel, &mut full).unwrap();

        let mut partial = PixelBuffer::new(30, 12).unwrap();
        partial.fill(-1.0);
        convolve_simd_interior(&image, &kernel, &mut partial).unwrap();

        // interior columns are 1..29, 28 wide, so lane groups cover 1..25
        for y in 0..12 {
            for x in 0..30 {
                let value = partial.get(x, y).unwrap();
                if (1..11).contains(&y) && (1..25).contains(&x) {
                    assert_eq!(value, full.get(x, y).unwrap());
                } else {
                    assert_eq!(value, -1.0, "({x},{y})");
                }
            }
        }
    }

    #[test]
    fn convolve_rejects_wrong_output_shape() {
        let image = PixelBuffer::<f32>::new(6, 6).unwrap();
        let kernel = PixelBuffer::<f32>::new(3, 3).unwrap();
        let mut out = PixelBuffer::<f32>::new(6, 5).unwrap();

        for strategy in Strategy::ALL {
            assert!(matches!(
                convolve_with(strategy, &image, &kernel, &mut out),
                Err(ImageErrors::DimensionMismatch((6, 6), (6, 5)))
            ));
        }
    }
}
