/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Rotate an image by 180 degrees
//!
//! `dst[width - 1 - x, height - 1 - y] = src[x, y]`
//!
//! The convolution kernel uses this to flip its mask on both axes,
//! turning correlation into convolution.
//!
//! ```text
//! [1,2,3]    [9,8,7]
//! [4,5,6] -> [6,5,4]
//! [7,8,9]    [3,2,1]
//! ```
use pixbench_image::buffer::PixelBuffer;
use pixbench_image::errors::ImageErrors;
use pixbench_image::pixel::Pixel;

use crate::simd::scalar::ScalarF32x8;
use crate::simd::{detect_backend, Backend, F32Lanes, LANES};
use crate::strategy::Strategy;
use crate::utils::{ensure_live, ensure_same_dimensions};

fn check_operands<T: Pixel>(src: &PixelBuffer<T>, dst: &PixelBuffer<T>) -> Result<(), ImageErrors> {
    ensure_live(&[src, dst])?;
    ensure_same_dimensions(src, dst)
}

/// Rotate using the fastest tier, see [`rotate180_simd`]
///
/// # Errors
/// - [`ImageErrors::DimensionMismatch`] if `dst` differs in shape from `src`
/// - [`ImageErrors::BufferReleased`] if either buffer was disposed
pub fn rotate180(src: &PixelBuffer<f32>, dst: &mut PixelBuffer<f32>) -> Result<(), ImageErrors> {
    rotate180_simd(src, dst)
}

/// Rotate using the given tier
///
/// # Errors
/// See [`rotate180`]
pub fn rotate180_with(
    strategy: Strategy, src: &PixelBuffer<f32>, dst: &mut PixelBuffer<f32>
) -> Result<(), ImageErrors> {
    match strategy {
        Strategy::Naive => rotate180_naive(src, dst),
        Strategy::Optimized => rotate180_optimized(src, dst),
        Strategy::Simd => rotate180_simd(src, dst)
    }
}

/// Rotate through checked accessors
///
/// # Errors
/// See [`rotate180`]
pub fn rotate180_naive<T: Pixel>(src: &PixelBuffer<T>, dst: &mut PixelBuffer<T>) -> Result<(), ImageErrors> {
    check_operands(src, dst)?;

    let w = src.width() - 1;
    let h = src.height() - 1;

    for y in 0..=h {
        for x in 0..=w {
            dst.set(w - x, h - y, src.get(x, y)?)?;
        }
    }
    Ok(())
}

/// Rotate walking the source row forward and the mirrored destination row backward
///
/// # Errors
/// See [`rotate180`]
pub fn rotate180_optimized<T: Pixel>(
    src: &PixelBuffer<T>, dst: &mut PixelBuffer<T>
) -> Result<(), ImageErrors> {
    check_operands(src, dst)?;

    let h = src.height() - 1;

    for y in 0..=h {
        for (d, s) in dst.row_mut(h - y).iter_mut().rev().zip(src.row(y)) {
            *d = *s;
        }
    }
    Ok(())
}

/// Rotate [`LANES`] elements at a time by reversing lane order
///
/// Source lane groups are aligned loads, their mirrored destinations
/// generally are not, so stores are unaligned.
///
/// # Errors
/// See [`rotate180`]
pub fn rotate180_simd(src: &PixelBuffer<f32>, dst: &mut PixelBuffer<f32>) -> Result<(), ImageErrors> {
    check_operands(src, dst)?;

    match detect_backend() {
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        #[cfg(feature = "avx")]
        Backend::Avx => unsafe { rotate180_avx(src, dst) },
        // safety: portable lanes need no CPU support
        _ => unsafe { rotate180_lanes::<ScalarF32x8>(src, dst) }
    }
    Ok(())
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
#[cfg(feature = "avx")]
#[target_feature(enable = "avx")]
unsafe fn rotate180_avx(src: &PixelBuffer<f32>, dst: &mut PixelBuffer<f32>) {
    rotate180_lanes::<crate::simd::avx::AvxF32x8>(src, dst);
}

/// # Safety
/// The CPU must support `V`, operands must be live and share one shape
#[inline(always)]
unsafe fn rotate180_lanes<V: F32Lanes>(src: &PixelBuffer<f32>, dst: &mut PixelBuffer<f32>) {
    let width = src.width();
    let w8 = width / LANES * LANES;
    let h = src.height() - 1;

    for y in 0..=h {
        let s = src.row(y);
        let d = dst.row_mut(h - y);

        // d is filled from the end, lane group i lands at width - (i + 1) * LANES
        for (i, chunk) in s.chunks_exact(LANES).enumerate() {
            let end = width - i * LANES;
            V::load_aligned(chunk).reverse().store(&mut d[end - LANES..end]);
        }
        for (d, s) in d[..width - w8].iter_mut().rev().zip(&s[w8..]) {
            *d = *s;
        }
    }
}
