/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A portable vector width abstraction over `f32` lanes
//!
//! Kernels are written once, generic over [`F32Lanes`], and instantiated
//! for either the portable [`ScalarF32x8`](scalar::ScalarF32x8) or, on x86 with
//! the `avx` feature, the [`AvxF32x8`](avx::AvxF32x8) register type inside a
//! `#[target_feature(enable = "avx")]` wrapper.
//!
//! Every implementation keeps multiplication and addition as two separately
//! rounded operations, so a lane computes exactly what the scalar loop computes.
use std::sync::Once;

use log::trace;

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
#[cfg(feature = "avx")]
pub(crate) mod avx;
pub(crate) mod scalar;

/// Number of `f32` elements processed together
pub const LANES: usize = 8;

#[allow(dead_code)]
pub(crate) const ROW_ALIGNMENT_MASK: usize = pixbench_image::buffer::ROW_ALIGNMENT - 1;

static START: Once = Once::new();

/// A group of [`LANES`] `f32` values
///
/// # Safety
/// All methods are unsafe because implementations may use instructions the
/// running CPU does not support, callers must confirm support first.
///
/// Loads and stores read or write exactly [`LANES`] elements from the start
/// of the slice, which must be at least that long. The `_aligned` variants
/// further require the slice to start on a 32 byte boundary.
pub trait F32Lanes: Copy {
    /// All lanes set to zero
    unsafe fn zero() -> Self;
    /// All lanes set to `value`
    unsafe fn splat(value: f32) -> Self;
    /// Load from a slice with any alignment
    unsafe fn load(src: &[f32]) -> Self;
    /// Load from a slice starting on a 32 byte boundary
    unsafe fn load_aligned(src: &[f32]) -> Self;
    /// Store to a slice with any alignment
    unsafe fn store(self, dst: &mut [f32]);
    /// Store to a slice starting on a 32 byte boundary
    unsafe fn store_aligned(self, dst: &mut [f32]);
    unsafe fn add(self, other: Self) -> Self;
    unsafe fn mul(self, other: Self) -> Self;
    /// Lane order reversed, lane `0` becomes lane `LANES - 1`
    unsafe fn reverse(self) -> Self;

    /// `self + a * b`, rounded after the multiply and again after the add
    #[inline(always)]
    unsafe fn mul_add(self, a: Self, b: Self) -> Self {
        self.add(a.mul(b))
    }
}

/// The lane implementation a vectorized tier runs on
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Backend {
    /// 256 bit AVX registers
    Avx,
    /// `[f32; 8]` arrays, left to the compiler to vectorize
    Portable
}

/// Pick the best backend supported by this CPU
///
/// The first call logs the decision.
pub fn detect_backend() -> Backend {
    let backend = detect_backend_inner();

    START.call_once(|| {
        trace!("Using {backend:?} lanes for vectorized kernels");
    });
    backend
}

#[allow(unreachable_code)]
fn detect_backend_inner() -> Backend {
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    {
        #[cfg(feature = "avx")]
        {
            if is_x86_feature_detected!("avx") {
                return Backend::Avx;
            }
        }
    }
    Backend::Portable
}

#[cfg(test)]
mod tests {
    use nanorand::Rng;

    use crate::simd::scalar::ScalarF32x8;
    use crate::simd::{F32Lanes, LANES};

    fn random_lanes() -> [f32; LANES] {
        let mut rng = nanorand::WyRand::new_seed(7);
        let mut out = [0.0; LANES];
        for x in &mut out {
            *x = rng.generate::<f32>() * 100.0 - 50.0;
        }
        out
    }

    fn check_lanes<V: F32Lanes>() {
        let a = random_lanes();
        let b: [f32; LANES] = core::array::from_fn(|i| a[LANES - 1 - i] * 0.5);
        let mut out = [0.0; LANES];

        unsafe {
            let va = V::load(&a);
            let vb = V::load(&b);

            V::splat(2.0).mul_add(va, vb).store(&mut out);
            for i in 0..LANES {
                assert_eq!(out[i], 2.0 + a[i] * b[i]);
            }

            va.reverse().store(&mut out);
            for i in 0..LANES {
                assert_eq!(out[i], a[LANES - 1 - i]);
            }

            V::zero().add(va).store(&mut out);
            assert_eq!(out, a);
        }
    }

    #[test]
    fn portable_lanes_match_scalar_math() {
        check_lanes::<ScalarF32x8>();
    }

    #[test]
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    #[cfg(feature = "avx")]
    fn avx_lanes_match_scalar_math() {
        if !is_x86_feature_detected!("avx") {
            return;
        }
        check_lanes::<crate::simd::avx::AvxF32x8>();
    }
}
