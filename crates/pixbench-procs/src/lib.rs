/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Tiered image kernels for `pixbench`
//!
//! Every kernel comes in up to three tiers, see [`Strategy`](strategy::Strategy),
//! which differ only in how they touch memory. Tiers of one kernel produce
//! bit identical output, which is what makes timing them against each other meaningful.
//!
//! Kernels never allocate their result, they write into a caller supplied
//! buffer of the same shape as the input.
//!
//! # Example
//! - Blur an image with a 3x3 box kernel
//! ```
//! use pixbench_image::buffer::PixelBuffer;
//! use pixbench_procs::convolve::convolve_with;
//! use pixbench_procs::strategy::Strategy;
//!
//! let mut image = PixelBuffer::<f32>::new(32, 32).unwrap();
//! image.fill(4.0);
//! let mut kernel = PixelBuffer::<f32>::new(3, 3).unwrap();
//! kernel.fill(1.0 / 9.0);
//!
//! let mut naive = PixelBuffer::new(32, 32).unwrap();
//! let mut simd = PixelBuffer::new(32, 32).unwrap();
//!
//! convolve_with(Strategy::Naive, &image, &kernel, &mut naive).unwrap();
//! convolve_with(Strategy::Simd, &image, &kernel, &mut simd).unwrap();
//! assert_eq!(naive, simd);
//! ```
#![warn(
    clippy::correctness,
    clippy::perf,
    clippy::pedantic,
    clippy::missing_errors_doc,
    clippy::panic
)]
#![allow(
    clippy::needless_return,
    clippy::similar_names,
    clippy::inline_always,
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::missing_panics_doc,
    clippy::many_single_char_names
)]

pub mod convolve;
pub mod median;
pub mod rotate;
pub mod simd;
pub mod strategy;
pub mod sum;
mod utils;
