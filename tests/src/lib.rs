/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

#![allow(unused_imports, unused)]

use std::fs::read;
use std::path::{Path, PathBuf};

use pixbench_image::buffer::PixelBuffer;
use serde::Deserialize;

mod harness;
mod kernels;

#[derive(Copy, Clone, Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonOperation {
    Sum,
    Rotate,
    Convolve,
    Median
}

#[derive(Clone, Deserialize, Debug)]
pub struct TestEntry {
    pub name:      String,
    pub operation: JsonOperation,
    pub width:     usize,
    pub height:    usize,
    /// `[width, height]` of the convolution kernel
    pub kernel:    Option<[usize; 2]>,
    pub radius:    Option<usize>,
    pub checksum:  u64
}

pub fn entries_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/kernels.json")
}

pub fn load_entries() -> Vec<TestEntry> {
    let json_file = read(entries_path()).unwrap();

    serde_json::from_slice(&json_file).unwrap()
}

/// An image of small integers, every kernel output stays exact in `f32`
fn pattern(width: usize, height: usize, f: impl Fn(usize, usize) -> usize) -> PixelBuffer<f32> {
    let data: Vec<f32> = (0..height)
        .flat_map(|y| (0..width).map(move |x| (x, y)))
        .map(|(x, y)| f(x, y) as f32)
        .collect();

    PixelBuffer::from_slice(width, height, &data).unwrap()
}

pub fn first_image(width: usize, height: usize) -> PixelBuffer<f32> {
    pattern(width, height, |x, y| (x * 7 + y * 13) % 17)
}

pub fn second_image(width: usize, height: usize) -> PixelBuffer<f32> {
    pattern(width, height, |x, y| (x * 11 + y * 3) % 19)
}

pub fn kernel_image(width: usize, height: usize) -> PixelBuffer<f32> {
    pattern(width, height, |x, y| (x * 3 + y * 5) % 5)
}

/// Position weighted sum of all pixels, sensitive to where each value lands
fn checksum(image: &PixelBuffer<f32>) -> u64 {
    image
        .to_vec()
        .iter()
        .enumerate()
        .map(|(i, v)| *v as u64 * (i as u64 % 97 + 1))
        .sum()
}
