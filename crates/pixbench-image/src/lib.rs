/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Aligned pixel buffers for `pixbench`
//!
//! This crate provides [`PixelBuffer`](buffer::PixelBuffer), a single channel,
//! row padded image whose rows all start on a 32 byte boundary.
//!
//! It exposes checked accessors, which fail with
//! [`ImageErrors::OutOfRange`](errors::ImageErrors::OutOfRange),
//! and explicitly named unchecked ones meant for kernels that already
//! proved their coordinates are in range.
//!
//! # Example
//! ```
//! use pixbench_image::buffer::PixelBuffer;
//! use pixbench_image::errors::ImageErrors;
//!
//! let mut image = PixelBuffer::<f32>::new(64, 64)?;
//! image.fill(1.0);
//! image.set(3, 4, 2.5)?;
//! assert_eq!(image.get(3, 4)?, 2.5);
//! assert!(image.get(64, 0).is_err());
//! # Ok::<(), ImageErrors>(())
//! ```
#![warn(
    clippy::correctness,
    clippy::perf,
    clippy::pedantic,
    clippy::inline_always,
    clippy::missing_errors_doc,
    clippy::panic
)]
#![allow(
    clippy::inline_always,
    clippy::module_name_repetitions,
    clippy::missing_panics_doc,
    clippy::doc_markdown
)]

pub mod buffer;
pub mod errors;
pub mod pixel;
