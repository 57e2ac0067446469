/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use core::ops::Range;

use pixbench_image::buffer::PixelBuffer;
use pixbench_image::errors::ImageErrors;
use pixbench_image::pixel::Pixel;

/// Fail with `BufferReleased` if any operand was disposed
pub(crate) fn ensure_live<T: Pixel>(buffers: &[&PixelBuffer<T>]) -> Result<(), ImageErrors> {
    if buffers.iter().any(|x| x.is_disposed()) {
        return Err(ImageErrors::BufferReleased);
    }
    Ok(())
}

/// Fail with `DimensionMismatch` unless `found` has the shape of `expected`
pub(crate) fn ensure_same_dimensions<T: Pixel, U: Pixel>(
    expected: &PixelBuffer<T>, found: &PixelBuffer<U>
) -> Result<(), ImageErrors> {
    if !expected.same_dimensions(found) {
        return Err(ImageErrors::DimensionMismatch(
            expected.dimensions(),
            found.dimensions()
        ));
    }
    Ok(())
}

/// Clamp-to-edge sample position
///
/// Computes `clamp(position - offset, 0, last)` without leaving `usize`
#[inline(always)]
pub(crate) fn clamp_to_edge(position: usize, offset: usize, last: usize) -> usize {
    position.saturating_sub(offset).min(last)
}

/// Output positions along one axis for which no window tap leaves `0..len`
///
/// A window covers `p - offset ..= p - offset + extent` for output position `p`,
/// `extent` being the number of taps after the first one.
///
/// ```text
///  0      start                 end      len
///  ├────────┼─────────────────────┼────────┤
///   border         interior         border
/// ```
///
/// When the window is wider than the axis the interior is empty and
/// every position is a border position.
pub(crate) fn interior_range(len: usize, offset: usize, extent: usize) -> Range<usize> {
    let start = offset.min(len);
    let end = (len + offset).saturating_sub(extent).min(len).max(start);

    start..end
}

#[cfg(test)]
mod tests {
    use crate::utils::{clamp_to_edge, interior_range};

    #[test]
    fn interior_of_centered_windows() {
        // 3 wide window over 10 elements
        assert_eq!(interior_range(10, 1, 2), 1..9);
        // 2 wide window, center tap is the second one
        assert_eq!(interior_range(3, 1, 1), 1..3);
        // single tap, everything is interior
        assert_eq!(interior_range(5, 0, 0), 0..5);
    }

    #[test]
    fn window_wider_than_axis_has_no_interior() {
        assert_eq!(interior_range(3, 3, 6), 3..3);
        assert_eq!(interior_range(2, 3, 6), 2..2);
        assert_eq!(interior_range(1, 7, 14), 1..1);
    }

    #[test]
    fn every_interior_window_stays_in_bounds() {
        for len in 1..20 {
            for extent in 0..12 {
                let offset = (extent + 1) / 2;
                for p in interior_range(len, offset, extent) {
                    assert!(p >= offset);
                    assert!(p - offset + extent < len);
                }
            }
        }
    }

    #[test]
    fn clamps_both_edges() {
        assert_eq!(clamp_to_edge(0, 3, 9), 0);
        assert_eq!(clamp_to_edge(5, 3, 9), 2);
        assert_eq!(clamp_to_edge(20, 3, 9), 9);
    }
}
