/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

#![cfg(any(target_arch = "x86", target_arch = "x86_64"))]
#![cfg(feature = "avx")]

#[cfg(target_arch = "x86")]
use core::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

use crate::simd::{F32Lanes, LANES, ROW_ALIGNMENT_MASK};

/// Lanes held in a 256 bit AVX register
///
/// Only construct this inside a function compiled with
/// `#[target_feature(enable = "avx")]` after runtime detection.
#[derive(Copy, Clone)]
pub struct AvxF32x8(__m256);

impl F32Lanes for AvxF32x8 {
    #[inline(always)]
    unsafe fn zero() -> Self {
        AvxF32x8(_mm256_setzero_ps())
    }

    #[inline(always)]
    unsafe fn splat(value: f32) -> Self {
        AvxF32x8(_mm256_set1_ps(value))
    }

    #[inline(always)]
    unsafe fn load(src: &[f32]) -> Self {
        debug_assert!(src.len() >= LANES);
        AvxF32x8(_mm256_loadu_ps(src.as_ptr()))
    }

    #[inline(always)]
    unsafe fn load_aligned(src: &[f32]) -> Self {
        debug_assert!(src.len() >= LANES);
        debug_assert_eq!(src.as_ptr() as usize & ROW_ALIGNMENT_MASK, 0);
        AvxF32x8(_mm256_load_ps(src.as_ptr()))
    }

    #[inline(always)]
    unsafe fn store(self, dst: &mut [f32]) {
        debug_assert!(dst.len() >= LANES);
        _mm256_storeu_ps(dst.as_mut_ptr(), self.0);
    }

    #[inline(always)]
    unsafe fn store_aligned(self, dst: &mut [f32]) {
        debug_assert!(dst.len() >= LANES);
        debug_assert_eq!(dst.as_ptr() as usize & ROW_ALIGNMENT_MASK, 0);
        _mm256_store_ps(dst.as_mut_ptr(), self.0);
    }

    #[inline(always)]
    unsafe fn add(self, other: Self) -> Self {
        AvxF32x8(_mm256_add_ps(self.0, other.0))
    }

    #[inline(always)]
    unsafe fn mul(self, other: Self) -> Self {
        AvxF32x8(_mm256_mul_ps(self.0, other.0))
    }

    #[inline(always)]
    unsafe fn reverse(self) -> Self {
        // reverse within each 128 bit half, then swap the halves
        let v = _mm256_permute_ps::<0x1b>(self.0);
        AvxF32x8(_mm256_permute2f128_ps::<1>(v, v))
    }
}
