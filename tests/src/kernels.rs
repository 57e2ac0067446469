/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use pixbench_image::buffer::PixelBuffer;
use pixbench_procs::convolve::convolve_with;
use pixbench_procs::median::median_filter;
use pixbench_procs::rotate::rotate180_with;
use pixbench_procs::strategy::Strategy;
use pixbench_procs::sum::sum_with;

use crate::{checksum, first_image, kernel_image, load_entries, second_image, JsonOperation, TestEntry};

/// Run `entry` with the given tier
fn run_entry(entry: &TestEntry, strategy: Strategy) -> PixelBuffer<f32> {
    let (width, height) = (entry.width, entry.height);
    let first = first_image(width, height);
    let mut out = PixelBuffer::new(width, height).unwrap();

    match entry.operation {
        JsonOperation::Sum => {
            let second = second_image(width, height);
            sum_with(strategy, &first, &second, &mut out).unwrap();
        }
        JsonOperation::Rotate => {
            rotate180_with(strategy, &first, &mut out).unwrap();
        }
        JsonOperation::Convolve => {
            let [kw, kh] = entry.kernel.unwrap();
            convolve_with(strategy, &first, &kernel_image(kw, kh), &mut out).unwrap();
        }
        JsonOperation::Median => {
            median_filter(&first, entry.radius.unwrap(), &mut out).unwrap();
        }
    }
    out
}

#[test]
#[allow(clippy::uninlined_format_args)]
fn test_kernels() {
    let entries = load_entries();
    let mut error = false;
    let mut failed = Vec::new();

    for entry in &entries {
        for strategy in Strategy::ALL {
            let out = run_entry(entry, strategy);
            let found = checksum(&out);

            if found != entry.checksum {
                error = true;
                failed.push(format!("{} ({})", entry.name, strategy));

                let err = format!(
                    "Checksum mismatch for {}, tier {}\nExpected {} but found {}\nConfig:{:#?}",
                    entry.name, strategy, entry.checksum, found, entry
                );
                eprintln!("{}\n", err);
            }
        }
    }
    if error {
        panic!("Kernel output mismatch for {:#?}", failed);
    }
}
