/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! This module encapsulates a single aligned pixel buffer
//!
//! The buffer is analogous to a C `aligned_alloc`ed block with a row stride,
//! it owns its memory exclusively and releases it exactly once.
//!
//! Rows are padded so that every row start is aligned to [`ROW_ALIGNMENT`]
//! bytes, which lets vectorized kernels use aligned loads and stores on
//! the first lane group of every row.
//!
//! ```text
//!   base ─►┌──────────────────────────┬───────┐
//!          │  row 0   (width * T)     │ pad   │
//!          ├──────────────────────────┼───────┤ ◄─ base + stride
//!          │  row 1                   │ pad   │
//!          ├──────────────────────────┼───────┤ ◄─ base + 2 * stride
//!          │  ...                     │       │
//!          └──────────────────────────┴───────┘
//! ```
use std::alloc::{alloc_zeroed, dealloc, Layout};
use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;
use std::mem::size_of;

use log::trace;

use crate::errors::ImageErrors;
use crate::pixel::Pixel;

/// Largest width or height a buffer can have
pub const MAX_DIMENSIONS: usize = 16384;

/// Alignment in bytes of the buffer base and of every row start
///
/// 32 bytes is the width of an AVX register, so a row of `f32`s can
/// be loaded eight at a time with aligned loads.
pub const ROW_ALIGNMENT: usize = 32;

/// An aligned, strided, rectangular block of pixels
///
/// Element `(x, y)` is the `x`-th element of row `y`, and row `y`
/// starts `y * stride` bytes after the base address.
///
/// The buffer is not `Clone`, it exclusively owns its memory.
pub struct PixelBuffer<T: Pixel> {
    ptr:     *mut u8,
    layout:  Layout,
    width:   usize,
    height:  usize,
    // bytes per row, a multiple of ROW_ALIGNMENT
    stride:  usize,
    _marker: PhantomData<T>
}

// safety: The buffer owns its allocation and never hands out
// aliasing mutable access, the raw pointer is an implementation detail.
unsafe impl<T: Pixel> Send for PixelBuffer<T> {}

unsafe impl<T: Pixel> Sync for PixelBuffer<T> {}

/// Round `value` up to the next multiple of [`ROW_ALIGNMENT`]
const fn round_up_to_alignment(value: usize) -> usize {
    (value + ROW_ALIGNMENT - 1) / ROW_ALIGNMENT * ROW_ALIGNMENT
}

impl<T: Pixel> PixelBuffer<T> {
    /// Create a new zero initialized buffer
    ///
    /// # Errors
    /// - [`ImageErrors::InvalidDimension`] if width or height is zero or larger than [`MAX_DIMENSIONS`]
    /// - [`ImageErrors::AllocationFailed`] if the allocator could not satisfy the request
    ///
    /// # Example
    /// ```
    /// use pixbench_image::buffer::PixelBuffer;
    /// let buffer = PixelBuffer::<f32>::new(100, 20).unwrap();
    /// assert_eq!(buffer.dimensions(), (100, 20));
    /// assert_eq!(buffer.stride() % 32, 0);
    /// ```
    pub fn new(width: usize, height: usize) -> Result<PixelBuffer<T>, ImageErrors> {
        if width == 0 || width > MAX_DIMENSIONS || height == 0 || height > MAX_DIMENSIONS {
            return Err(ImageErrors::InvalidDimension(width, height));
        }
        let stride = round_up_to_alignment(width * size_of::<T>());
        let size = stride * height;

        let layout = Layout::from_size_align(size, ROW_ALIGNMENT)
            .map_err(|_| ImageErrors::AllocationFailed(size))?;
        // Safety
        //  - size is non zero since width and height are at least one
        //  - zeroed memory is a valid bit pattern for every Pod type
        let ptr = unsafe { alloc_zeroed(layout) };

        if ptr.is_null() {
            return Err(ImageErrors::AllocationFailed(size));
        }
        trace!("Allocated {width}x{height} buffer, stride {stride}, {size} bytes");

        Ok(PixelBuffer {
            ptr,
            layout,
            width,
            height,
            stride,
            _marker: PhantomData
        })
    }

    /// Create a buffer and fill it from row major `data`
    ///
    /// Missing trailing elements are left as `T::default()`,
    /// extra elements are ignored.
    ///
    /// # Errors
    /// Same as [`PixelBuffer::new`]
    ///
    /// # Example
    /// ```
    /// use pixbench_image::buffer::PixelBuffer;
    /// let buffer = PixelBuffer::from_slice(2, 2, &[1_u8, 2, 3]).unwrap();
    /// assert_eq!(buffer.to_vec(), [1, 2, 3, 0]);
    /// ```
    pub fn from_slice(width: usize, height: usize, data: &[T]) -> Result<PixelBuffer<T>, ImageErrors> {
        let mut buffer = PixelBuffer::new(width, height)?;

        for (y, chunk) in data.chunks(width).take(height).enumerate() {
            buffer.row_mut(y)[..chunk.len()].copy_from_slice(chunk);
        }
        Ok(buffer)
    }

    /// Width in elements
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Height in rows
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Return `(width, height)`
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Bytes between the start of two consecutive rows
    pub const fn stride(&self) -> usize {
        self.stride
    }

    /// Return true if the memory has been released via [`dispose`](Self::dispose)
    pub fn is_disposed(&self) -> bool {
        self.ptr.is_null()
    }

    /// Return true if `other` has the same width and height
    pub fn same_dimensions<U: Pixel>(&self, other: &PixelBuffer<U>) -> bool {
        self.dimensions() == other.dimensions()
    }

    const fn stride_elements(&self) -> usize {
        self.stride / size_of::<T>()
    }

    /// The whole allocation, padding included
    fn data(&self) -> &[T] {
        if self.ptr.is_null() {
            return &[];
        }
        // Safety: we own the allocation and it spans layout.size() bytes
        let bytes = unsafe { std::slice::from_raw_parts(self.ptr, self.layout.size()) };
        bytemuck::cast_slice(bytes)
    }

    fn data_mut(&mut self) -> &mut [T] {
        if self.ptr.is_null() {
            return &mut [];
        }
        // Safety: we own the allocation and it spans layout.size() bytes
        let bytes = unsafe { std::slice::from_raw_parts_mut(self.ptr, self.layout.size()) };
        bytemuck::cast_slice_mut(bytes)
    }

    fn check_coordinates(&self, x: usize, y: usize) -> Result<(), ImageErrors> {
        if self.is_disposed() {
            return Err(ImageErrors::BufferReleased);
        }
        if x >= self.width || y >= self.height {
            return Err(ImageErrors::OutOfRange(x, y, self.width, self.height));
        }
        Ok(())
    }

    /// Read the element at `(x, y)`
    ///
    /// # Errors
    /// - [`ImageErrors::OutOfRange`] if `x >= width` or `y >= height`
    /// - [`ImageErrors::BufferReleased`] if the buffer was disposed
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Result<T, ImageErrors> {
        self.check_coordinates(x, y)?;
        // Safety: coordinates were checked above
        Ok(unsafe { self.get_unchecked(x, y) })
    }

    /// Write `value` to `(x, y)`
    ///
    /// # Errors
    /// - [`ImageErrors::OutOfRange`] if `x >= width` or `y >= height`
    /// - [`ImageErrors::BufferReleased`] if the buffer was disposed
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: T) -> Result<(), ImageErrors> {
        self.check_coordinates(x, y)?;
        // Safety: coordinates were checked above
        unsafe { self.set_unchecked(x, y, value) };
        Ok(())
    }

    /// Read the element at `(x, y)` without any checks
    ///
    /// # Safety
    /// The buffer must not be disposed, `x < width` and `y < height`.
    /// Only kernels that proved the coordinate lies inside the buffer
    /// (e.g the interior of an interior/border split) should call this.
    #[inline(always)]
    pub unsafe fn get_unchecked(&self, x: usize, y: usize) -> T {
        debug_assert!(!self.is_disposed() && x < self.width && y < self.height);
        self.ptr.add(y * self.stride).cast::<T>().add(x).read()
    }

    /// Write `value` to `(x, y)` without any checks
    ///
    /// # Safety
    /// Same contract as [`get_unchecked`](Self::get_unchecked)
    #[inline(always)]
    pub unsafe fn set_unchecked(&mut self, x: usize, y: usize, value: T) {
        debug_assert!(!self.is_disposed() && x < self.width && y < self.height);
        self.ptr.add(y * self.stride).cast::<T>().add(x).write(value);
    }

    /// Address of element `(x, y)`
    ///
    /// Usable for contiguous forward and backward iteration along the row.
    /// The pointer is only valid while the buffer is alive and not disposed,
    /// dereferencing it is up to the caller.
    #[inline(always)]
    pub fn row_ptr(&self, x: usize, y: usize) -> *const T {
        self.ptr
            .wrapping_add(y * self.stride)
            .cast::<T>()
            .wrapping_add(x)
            .cast_const()
    }

    /// Mutable address of element `(x, y)`, see [`row_ptr`](Self::row_ptr)
    #[inline(always)]
    pub fn row_ptr_mut(&mut self, x: usize, y: usize) -> *mut T {
        self.ptr
            .wrapping_add(y * self.stride)
            .cast::<T>()
            .wrapping_add(x)
    }

    /// The `width` valid elements of row `y`
    ///
    /// The returned slice starts on a [`ROW_ALIGNMENT`] boundary.
    ///
    /// # Panics
    /// If `y >= height` or the buffer was disposed
    #[inline]
    pub fn row(&self, y: usize) -> &[T] {
        let start = y * self.stride_elements();
        &self.data()[start..start + self.width]
    }

    /// Mutable version of [`row`](Self::row)
    ///
    /// # Panics
    /// If `y >= height` or the buffer was disposed
    #[inline]
    pub fn row_mut(&mut self, y: usize) -> &mut [T] {
        let start = y * self.stride_elements();
        let width = self.width;
        &mut self.data_mut()[start..start + width]
    }

    /// Set every valid element to `value`, padding stays untouched
    pub fn fill(&mut self, value: T) {
        for y in 0..self.height {
            self.row_mut(y).fill(value);
        }
    }

    /// Copy valid elements out in row major order
    pub fn to_vec(&self) -> Vec<T> {
        if self.is_disposed() {
            return Vec::new();
        }
        let mut out = Vec::with_capacity(self.width * self.height);

        for y in 0..self.height {
            out.extend_from_slice(self.row(y));
        }
        out
    }

    /// Release the owned memory
    ///
    /// Calling this more than once is a no-op, after it every
    /// checked accessor returns [`ImageErrors::BufferReleased`].
    pub fn dispose(&mut self) {
        if self.ptr.is_null() {
            return;
        }
        // safety
        // - The same layout we used for alloc is the same we are using for dealloc
        // - ptr is nulled right after, so this runs at most once
        unsafe {
            dealloc(self.ptr, self.layout);
        }
        self.ptr = std::ptr::null_mut();

        trace!("Released {}x{} buffer", self.width, self.height);
    }
}

impl<T: Pixel> Drop for PixelBuffer<T> {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl<T: Pixel> PartialEq for PixelBuffer<T> {
    fn eq(&self, other: &Self) -> bool {
        if !self.same_dimensions(other) || self.is_disposed() != other.is_disposed() {
            return false;
        }
        if self.is_disposed() {
            return true;
        }
        (0..self.height).all(|y| self.row(y) == other.row(y))
    }
}

impl<T: Pixel> Debug for PixelBuffer<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("stride", &self.stride)
            .field("disposed", &self.is_disposed())
            .finish()
    }
}
