/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Element types storable in a [`PixelBuffer`](crate::buffer::PixelBuffer)
use core::cmp::Ordering;
use core::fmt::Debug;

use bytemuck::Pod;

mod sealed {
    pub trait Sealed {}
}

/// A single channel sample type
///
/// Implemented for `u8, u16, i16, u32, i32, f32, f64`.
/// All of them have a size that divides 32, so a 32 byte aligned
/// row stride is always a whole number of elements.
pub trait Pixel: Pod + Default + PartialEq + Debug + sealed::Sealed {
    /// Total ordering used when sorting samples, e.g by the median filter
    fn total_cmp(&self, other: &Self) -> Ordering;
}

macro_rules! pixel_for_int {
    ($int:tt) => {
        impl sealed::Sealed for $int {}

        impl Pixel for $int {
            #[inline(always)]
            fn total_cmp(&self, other: &Self) -> Ordering {
                self.cmp(other)
            }
        }
    };
}

macro_rules! pixel_for_float {
    ($float:tt) => {
        impl sealed::Sealed for $float {}

        impl Pixel for $float {
            #[inline(always)]
            fn total_cmp(&self, other: &Self) -> Ordering {
                $float::total_cmp(self, other)
            }
        }
    };
}

pixel_for_int!(u8);
pixel_for_int!(u16);
pixel_for_int!(i16);
pixel_for_int!(u32);
pixel_for_int!(i32);

pixel_for_float!(f32);
pixel_for_float!(f64);

#[cfg(test)]
mod tests {
    use core::cmp::Ordering;

    use crate::pixel::Pixel;

    #[test]
    fn floats_sort_with_total_order() {
        let mut values = [3.0_f32, -0.0, f32::NAN, 0.0, -7.5];
        values.sort_unstable_by(Pixel::total_cmp);

        assert_eq!(values[0], -7.5);
        assert!(values[1].is_sign_negative());
        assert_eq!(values[3], 3.0);
        assert!(values[4].is_nan());
    }

    #[test]
    fn ints_use_natural_order() {
        assert_eq!(Pixel::total_cmp(&3_u16, &9), Ordering::Less);
        assert_eq!(Pixel::total_cmp(&-3_i16, &-9), Ordering::Greater);
    }
}
