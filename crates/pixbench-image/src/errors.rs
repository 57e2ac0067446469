/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Errors possible when creating, accessing and combining pixel buffers
use std::fmt::{Debug, Display, Formatter};

use crate::buffer::MAX_DIMENSIONS;

/// All possible buffer errors that can occur.
///
/// Unchecked accessors never return these, they are reserved
/// for the checked paths and for validating kernel operands
pub enum ImageErrors {
    /// Width or height is zero or larger than [`MAX_DIMENSIONS`]
    ///
    /// Fields are `(width, height)`
    InvalidDimension(usize, usize),
    /// A checked accessor was called with a coordinate outside the buffer
    ///
    /// Fields are `(x, y, width, height)`
    OutOfRange(usize, usize, usize, usize),
    /// Operands of a kernel do not share the same shape
    ///
    /// Fields are `((expected width, expected height), (found width, found height))`
    DimensionMismatch((usize, usize), (usize, usize)),
    /// The buffer memory was already released via `dispose`
    BufferReleased,
    /// The allocator could not provide the requested number of bytes
    AllocationFailed(usize)
}

impl Debug for ImageErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDimension(width, height) => {
                writeln!(
                    f,
                    "Invalid dimensions {width}x{height}, width and height must be in 1..={MAX_DIMENSIONS}"
                )
            }
            Self::OutOfRange(x, y, width, height) => {
                writeln!(
                    f,
                    "Coordinate ({x},{y}) is outside of buffer with dimensions {width}x{height}"
                )
            }
            Self::DimensionMismatch(expected, found) => {
                writeln!(
                    f,
                    "Dimensions mismatch, expected {}x{} but found {}x{}",
                    expected.0, expected.1, found.0, found.1
                )
            }
            Self::BufferReleased => {
                writeln!(f, "Buffer memory has already been released")
            }
            Self::AllocationFailed(size) => {
                writeln!(f, "Could not allocate {size} bytes for pixel buffer")
            }
        }
    }
}

impl Display for ImageErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl std::error::Error for ImageErrors {}
