/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use crate::simd::{F32Lanes, LANES};

/// Portable lanes backed by a plain array
///
/// Nothing here needs special CPU support, the unsafe methods are only
/// unsafe because the trait is.
#[derive(Copy, Clone, Debug)]
pub struct ScalarF32x8([f32; LANES]);

impl F32Lanes for ScalarF32x8 {
    #[inline(always)]
    unsafe fn zero() -> Self {
        ScalarF32x8([0.0; LANES])
    }

    #[inline(always)]
    unsafe fn splat(value: f32) -> Self {
        ScalarF32x8([value; LANES])
    }

    #[inline(always)]
    unsafe fn load(src: &[f32]) -> Self {
        let mut lanes = [0.0; LANES];
        lanes.copy_from_slice(&src[..LANES]);
        ScalarF32x8(lanes)
    }

    #[inline(always)]
    unsafe fn load_aligned(src: &[f32]) -> Self {
        Self::load(src)
    }

    #[inline(always)]
    unsafe fn store(self, dst: &mut [f32]) {
        dst[..LANES].copy_from_slice(&self.0);
    }

    #[inline(always)]
    unsafe fn store_aligned(self, dst: &mut [f32]) {
        self.store(dst);
    }

    #[inline(always)]
    unsafe fn add(self, other: Self) -> Self {
        ScalarF32x8(core::array::from_fn(|i| self.0[i] + other.0[i]))
    }

    #[inline(always)]
    unsafe fn mul(self, other: Self) -> Self {
        ScalarF32x8(core::array::from_fn(|i| self.0[i] * other.0[i]))
    }

    #[inline(always)]
    unsafe fn reverse(self) -> Self {
        let mut lanes = self.0;
        lanes.reverse();
        ScalarF32x8(lanes)
    }
}
