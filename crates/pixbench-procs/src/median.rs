/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Median filter
//!
//! Each output pixel is the median of the `(2 * radius + 1)^2` square
//! window centered on it. The window is always odd sized, so the median is
//! the middle element of the sorted window and never an interpolation.
//!
//! Samples outside the image are clamped to the nearest edge pixel.
use pixbench_image::buffer::{PixelBuffer, MAX_DIMENSIONS};
use pixbench_image::errors::ImageErrors;
use pixbench_image::pixel::Pixel;

use crate::utils::{clamp_to_edge, ensure_live, ensure_same_dimensions, interior_range};

/// Median filter `src` into `out`
///
/// Pixels whose window lies fully inside the image read samples without
/// bounds checks, the rest clamp every sample. A radius of `0` copies the
/// image.
///
/// Samples are ordered with [`Pixel::total_cmp`], for floats this places
/// `-0.0` before `0.0` and NaNs at the ends.
///
/// The window buffer holds `(2 * radius + 1)^2` samples whatever the image
/// size, at the largest legal radius of 8191 that is about 268 million
/// samples. Radii should stay well below the image dimensions.
///
/// # Errors
/// - [`ImageErrors::InvalidDimension`] if `2 * radius + 1` is larger than [`MAX_DIMENSIONS`]
/// - [`ImageErrors::AllocationFailed`] if the window buffer cannot be allocated
/// - [`ImageErrors::DimensionMismatch`] if `out` differs in shape from `src`
/// - [`ImageErrors::BufferReleased`] if either buffer was disposed
///
/// # Example
/// ```
/// use pixbench_image::buffer::PixelBuffer;
/// use pixbench_procs::median::median_filter;
///
/// let src = PixelBuffer::from_slice(3, 1, &[9_u8, 1, 5]).unwrap();
/// let mut out = PixelBuffer::new(3, 1).unwrap();
///
/// median_filter(&src, 1, &mut out).unwrap();
/// assert_eq!(out.to_vec(), [9, 5, 5]);
/// ```
pub fn median_filter<T: Pixel>(
    src: &PixelBuffer<T>, radius: usize, out: &mut PixelBuffer<T>
) -> Result<(), ImageErrors> {
    median_impl(src, radius, out, true)
}

/// Median filter clamping every sample of every window
///
/// Same output as [`median_filter`], without the interior shortcut.
///
/// # Errors
/// See [`median_filter`]
pub fn median_filter_naive<T: Pixel>(
    src: &PixelBuffer<T>, radius: usize, out: &mut PixelBuffer<T>
) -> Result<(), ImageErrors> {
    median_impl(src, radius, out, false)
}

fn median_impl<T: Pixel>(
    src: &PixelBuffer<T>, radius: usize, out: &mut PixelBuffer<T>, split: bool
) -> Result<(), ImageErrors> {
    let diameter = window_diameter(radius)?;

    ensure_live(&[src, &*out])?;
    ensure_same_dimensions(src, out)?;

    let (width, height) = src.dimensions();
    let (columns, rows) = if split {
        (
            interior_range(width, radius, diameter - 1),
            interior_range(height, radius, diameter - 1)
        )
    } else {
        (0..0, 0..0)
    };

    let middle = diameter * diameter / 2;
    let mut window = window_buffer::<T>(diameter * diameter)?;

    for y0 in 0..height {
        let interior_row = rows.contains(&y0);
        let out_row = out.row_mut(y0);

        for (x0, pixel) in out_row.iter_mut().enumerate() {
            window.clear();

            if interior_row && columns.contains(&x0) {
                for y in y0 - radius..=y0 + radius {
                    for x in x0 - radius..=x0 + radius {
                        // safety: the window lies inside the image
                        window.push(unsafe { src.get_unchecked(x, y) });
                    }
                }
            } else {
                for j in 0..diameter {
                    let row = src.row(clamp_to_edge(y0 + j, radius, height - 1));

                    for i in 0..diameter {
                        window.push(row[clamp_to_edge(x0 + i, radius, width - 1)]);
                    }
                }
            }
            window.sort_unstable_by(|a, b| a.total_cmp(b));

            *pixel = window[middle];
        }
    }
    Ok(())
}

/// Side of the square window, `2 * radius + 1`
fn window_diameter(radius: usize) -> Result<usize, ImageErrors> {
    let diameter = radius.saturating_mul(2).saturating_add(1);

    if diameter > MAX_DIMENSIONS {
        return Err(ImageErrors::InvalidDimension(diameter, diameter));
    }
    Ok(diameter)
}

/// Empty scratch space for `samples` window samples
fn window_buffer<T: Pixel>(samples: usize) -> Result<Vec<T>, ImageErrors> {
    let mut window = Vec::new();

    window
        .try_reserve_exact(samples)
        .map_err(|_| ImageErrors::AllocationFailed(samples.saturating_mul(core::mem::size_of::<T>())))?;

    Ok(window)
}
