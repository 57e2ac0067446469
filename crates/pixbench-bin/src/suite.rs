/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::io::Write;

use log::{debug, info};
use pixbench_harness::clock::Clock;
use pixbench_harness::{Harness, Measurement};
use pixbench_image::buffer::PixelBuffer;
use pixbench_image::errors::ImageErrors;
use pixbench_procs::convolve::{convolve_simd_interior, convolve_with};
use pixbench_procs::median::{median_filter, median_filter_naive};
use pixbench_procs::rotate::rotate180_with;
use pixbench_procs::simd::detect_backend;
use pixbench_procs::strategy::Strategy;
use pixbench_procs::sum::sum_with;

use crate::cmd_parsers::global_options::CmdOptions;
use crate::errors::BenchErrors;
use crate::serde::Report;

/// Inputs shared by every benchmark
pub(crate) struct Images {
    first:  PixelBuffer<f32>,
    second: PixelBuffer<f32>,
    kernel: PixelBuffer<f32>
}

impl Images {
    /// Two `size x size` images filled with `1.0` and `2.0`, and a
    /// `kernel x kernel` kernel of ones
    pub fn new(size: usize, kernel: usize) -> Result<Images, ImageErrors> {
        let mut first = PixelBuffer::new(size, size)?;
        first.fill(1.0);
        let mut second = PixelBuffer::new(size, size)?;
        second.fill(2.0);
        let mut kernel = PixelBuffer::new(kernel, kernel)?;
        kernel.fill(1.0);

        Ok(Images { first, second, kernel })
    }

    fn output(&self) -> Result<PixelBuffer<f32>, ImageErrors> {
        PixelBuffer::new(self.first.width(), self.first.height())
    }
}

/// Runs benchmarks that pass the name filter and collects their measurements
pub(crate) struct Suite<'a, C: Clock, W: Write> {
    harness:      Harness<C, W>,
    filter:       Option<&'a str>,
    measurements: Vec<Measurement>
}

impl<'a, C: Clock, W: Write> Suite<'a, C, W> {
    pub fn new(harness: Harness<C, W>, filter: Option<&'a str>) -> Suite<'a, C, W> {
        Suite {
            harness,
            filter,
            measurements: Vec::new()
        }
    }

    /// Measure `op` unless the filter excludes `name`
    ///
    /// The first error `op` returns aborts the suite once timing finished.
    pub fn bench<F>(&mut self, name: &str, mut op: F) -> Result<(), BenchErrors>
    where
        F: FnMut() -> Result<(), ImageErrors>
    {
        if let Some(filter) = self.filter {
            if !name.contains(filter) {
                debug!("Skipping {name}");
                return Ok(());
            }
        }
        let mut failure = None;

        let measurement = self.harness.run_default(
            || {
                if let Err(err) = op() {
                    failure.get_or_insert(err);
                }
            },
            name
        )?;

        if let Some(err) = failure {
            return Err(err.into());
        }
        self.measurements.push(measurement);
        Ok(())
    }

    pub fn into_parts(self) -> (Harness<C, W>, Vec<Measurement>) {
        (self.harness, self.measurements)
    }
}

/// An image of small integers taken from `f(x, y)`
fn pattern(width: usize, height: usize, f: impl Fn(usize, usize) -> usize) -> Result<PixelBuffer<f32>, ImageErrors> {
    let data: Vec<f32> = (0..height)
        .flat_map(|y| (0..width).map(move |x| (x, y)))
        .map(|(x, y)| f(x, y) as f32)
        .collect();

    PixelBuffer::from_slice(width, height, &data)
}

fn ensure_agreement(
    name: &str, reference: &PixelBuffer<f32>, candidate: &PixelBuffer<f32>
) -> Result<(), BenchErrors> {
    if reference != candidate {
        return Err(BenchErrors::TierMismatch(name.to_string()));
    }
    Ok(())
}

/// Check every tier of every kernel against the naive one
///
/// Runs on pattern images the size of the driver images, a constant image
/// would hide mistakes in the clamped border.
pub(crate) fn verify_tiers(images: &Images, radii: &[usize]) -> Result<(), BenchErrors> {
    let (width, height) = images.first.dimensions();
    let (kernel_width, kernel_height) = images.kernel.dimensions();

    let first = pattern(width, height, |x, y| (x * 7 + y * 13) % 17)?;
    let second = pattern(width, height, |x, y| (x * 11 + y * 3) % 19)?;
    let kernel = pattern(kernel_width, kernel_height, |x, y| (x * 3 + y * 5) % 5)?;

    let mut reference = images.output()?;
    let mut candidate = images.output()?;

    for strategy in [Strategy::Optimized, Strategy::Simd] {
        sum_with(Strategy::Naive, &first, &second, &mut reference)?;
        sum_with(strategy, &first, &second, &mut candidate)?;
        ensure_agreement(&format!("Sum: {strategy}"), &reference, &candidate)?;

        rotate180_with(Strategy::Naive, &first, &mut reference)?;
        rotate180_with(strategy, &first, &mut candidate)?;
        ensure_agreement(&format!("Rotate: {strategy}"), &reference, &candidate)?;

        convolve_with(Strategy::Naive, &first, &kernel, &mut reference)?;
        convolve_with(strategy, &first, &kernel, &mut candidate)?;
        ensure_agreement(&format!("Convolution: {strategy}"), &reference, &candidate)?;
    }
    for &radius in radii {
        median_filter_naive(&first, radius, &mut reference)?;
        median_filter(&first, radius, &mut candidate)?;
        ensure_agreement(&format!("Median radius {radius}"), &reference, &candidate)?;
    }
    info!("All tiers agree");
    Ok(())
}

/// Run the full suite in its fixed order
pub(crate) fn run_benchmarks<C: Clock, W: Write>(
    suite: &mut Suite<'_, C, W>, images: &Images, radii: &[usize]
) -> Result<(), BenchErrors> {
    let mut out = images.output()?;

    suite.bench("Empty action", || Ok(()))?;

    for strategy in Strategy::ALL {
        suite.bench(&format!("Sum: {strategy}"), || {
            sum_with(strategy, &images.first, &images.second, &mut out)
        })?;
    }
    for strategy in Strategy::ALL {
        suite.bench(&format!("Rotate: {strategy}"), || {
            rotate180_with(strategy, &images.first, &mut out)
        })?;
    }
    for &radius in radii {
        let diameter = radius.saturating_mul(2).saturating_add(1);

        suite.bench(&format!("Median {diameter}x{diameter}"), || {
            median_filter(&images.first, radius, &mut out)
        })?;
    }
    for strategy in Strategy::ALL {
        suite.bench(&format!("Convolution: {strategy}"), || {
            convolve_with(strategy, &images.first, &images.kernel, &mut out)
        })?;
    }
    suite.bench("Convolution [*]: simd", || {
        convolve_simd_interior(&images.first, &images.kernel, &mut out)
    })?;

    Ok(())
}

pub(crate) fn run_suite(options: &CmdOptions) -> Result<(), BenchErrors> {
    let backend = detect_backend();
    info!("Vectorized tiers use {backend:?} lanes");

    let images = Images::new(options.size, options.kernel)?;

    if options.verify {
        verify_tiers(&images, &options.radii)?;
    }
    let harness = Harness::stdout().set_options(options.harness);
    let mut suite = Suite::new(harness, options.filter.as_deref());

    run_benchmarks(&mut suite, &images, &options.radii)?;

    if options.json {
        let (_, measurements) = suite.into_parts();
        let report = Report::new(
            options.size,
            options.kernel,
            format!("{backend:?}"),
            &measurements
        );
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(())
}
