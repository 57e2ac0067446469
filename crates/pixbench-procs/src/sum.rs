/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Element-wise sum of two images
//!
//! `out[x, y] = a[x, y] + b[x, y]`
//!
//! Every tier adds the same two operands per element, so the results
//! are bit identical across tiers.
use pixbench_image::buffer::PixelBuffer;
use pixbench_image::errors::ImageErrors;

use crate::simd::scalar::ScalarF32x8;
use crate::simd::{detect_backend, Backend, F32Lanes, LANES};
use crate::strategy::Strategy;
use crate::utils::{ensure_live, ensure_same_dimensions};

fn check_operands(
    a: &PixelBuffer<f32>, b: &PixelBuffer<f32>, out: &PixelBuffer<f32>
) -> Result<(), ImageErrors> {
    ensure_live(&[a, b, out])?;
    ensure_same_dimensions(a, b)?;
    ensure_same_dimensions(a, out)
}

/// Sum using the fastest tier, see [`sum_simd`]
///
/// # Errors
/// - [`ImageErrors::DimensionMismatch`] if the three buffers differ in shape
/// - [`ImageErrors::BufferReleased`] if any buffer was disposed
pub fn sum(a: &PixelBuffer<f32>, b: &PixelBuffer<f32>, out: &mut PixelBuffer<f32>) -> Result<(), ImageErrors> {
    sum_simd(a, b, out)
}

/// Sum using the given tier
///
/// # Errors
/// See [`sum`]
pub fn sum_with(
    strategy: Strategy, a: &PixelBuffer<f32>, b: &PixelBuffer<f32>, out: &mut PixelBuffer<f32>
) -> Result<(), ImageErrors> {
    match strategy {
        Strategy::Naive => sum_naive(a, b, out),
        Strategy::Optimized => sum_optimized(a, b, out),
        Strategy::Simd => sum_simd(a, b, out)
    }
}

/// Sum reading and writing every element through checked accessors
///
/// # Errors
/// See [`sum`]
pub fn sum_naive(
    a: &PixelBuffer<f32>, b: &PixelBuffer<f32>, out: &mut PixelBuffer<f32>
) -> Result<(), ImageErrors> {
    check_operands(a, b, out)?;

    for y in 0..out.height() {
        for x in 0..out.width() {
            out.set(x, y, a.get(x, y)? + b.get(x, y)?)?;
        }
    }
    Ok(())
}

/// Sum with per-row slices, bounds are checked once per row
///
/// # Errors
/// See [`sum`]
pub fn sum_optimized(
    a: &PixelBuffer<f32>, b: &PixelBuffer<f32>, out: &mut PixelBuffer<f32>
) -> Result<(), ImageErrors> {
    check_operands(a, b, out)?;

    for y in 0..out.height() {
        let (row_a, row_b) = (a.row(y), b.row(y));

        for ((res, p1), p2) in out.row_mut(y).iter_mut().zip(row_a).zip(row_b) {
            *res = p1 + p2;
        }
    }
    Ok(())
}

/// Sum [`LANES`] elements at a time, finishing each row with scalar adds
///
/// Rows start 32 byte aligned, so every full lane group is loaded and
/// stored with aligned accesses.
///
/// # Errors
/// See [`sum`]
pub fn sum_simd(
    a: &PixelBuffer<f32>, b: &PixelBuffer<f32>, out: &mut PixelBuffer<f32>
) -> Result<(), ImageErrors> {
    check_operands(a, b, out)?;

    match detect_backend() {
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        #[cfg(feature = "avx")]
        Backend::Avx => unsafe { sum_avx(a, b, out) },
        // safety: portable lanes need no CPU support
        _ => unsafe { sum_lanes::<ScalarF32x8>(a, b, out) }
    }
    Ok(())
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
#[cfg(feature = "avx")]
#[target_feature(enable = "avx")]
unsafe fn sum_avx(a: &PixelBuffer<f32>, b: &PixelBuffer<f32>, out: &mut PixelBuffer<f32>) {
    sum_lanes::<crate::simd::avx::AvxF32x8>(a, b, out);
}

/// # Safety
/// The CPU must support `V`, operands must be live and share one shape
#[inline(always)]
unsafe fn sum_lanes<V: F32Lanes>(a: &PixelBuffer<f32>, b: &PixelBuffer<f32>, out: &mut PixelBuffer<f32>) {
    let w8 = out.width() / LANES * LANES;

    for y in 0..out.height() {
        let (row_a, row_b) = (a.row(y), b.row(y));
        let row_out = out.row_mut(y);

        for ((p1, p2), res) in row_a
            .chunks_exact(LANES)
            .zip(row_b.chunks_exact(LANES))
            .zip(row_out.chunks_exact_mut(LANES))
        {
            V::load_aligned(p1)
                .add(V::load_aligned(p2))
                .store_aligned(res);
        }
        // remainder
        for ((res, p1), p2) in row_out[w8..].iter_mut().zip(&row_a[w8..]).zip(&row_b[w8..]) {
            *res = p1 + p2;
        }
    }
}
