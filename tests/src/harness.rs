/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use pixbench_harness::clock::{Clock, MonotonicClock};
use pixbench_harness::{Harness, HarnessOptions, Measurement};
use pixbench_image::buffer::PixelBuffer;
use pixbench_procs::convolve::convolve_with;
use pixbench_procs::strategy::Strategy;
use pixbench_procs::sum::sum_with;

use crate::{first_image, kernel_image, second_image};

/// Only moves when the measured operation says so
#[derive(Clone, Default)]
struct ScriptedClock(Rc<Cell<Duration>>);

impl ScriptedClock {
    fn advance(&self, by: Duration) {
        self.0.set(self.0.get() + by);
    }
}

impl Clock for ScriptedClock {
    fn now(&self) -> Duration {
        self.0.get()
    }
}

#[test]
fn real_kernels_on_a_scripted_clock() {
    let clock = ScriptedClock::default();
    let mut harness = Harness::new(clock.clone(), Vec::new(), HarnessOptions::default());

    let a = first_image(32, 32);
    let b = second_image(32, 32);
    let mut out = PixelBuffer::new(32, 32).unwrap();
    let mut calls = 0_u64;

    let measurement = harness
        .run_default(
            || {
                calls += 1;
                sum_with(Strategy::Simd, &a, &b, &mut out).unwrap();
                // 2^-9 seconds, sums of it stay exact
                clock.advance(Duration::from_nanos(1_953_125));
            },
            "Sum: simd"
        )
        .unwrap();

    assert_eq!(measurement.iterations, 512);
    assert_eq!(measurement.bucket_size, 1);
    assert_eq!(measurement.samples, 512);
    // warm up, 64 probe calls and the samples
    assert_eq!(calls, 1 + 64 + 512);
    assert_eq!(out.get(1, 1).unwrap(), a.get(1, 1).unwrap() + b.get(1, 1).unwrap());

    let report = String::from_utf8(harness.into_sink()).unwrap();
    assert_eq!(
        report,
        "Sum: simd                     : 1.953 ms/op, 512.0  op/s | 1.953 ms/op, 512.0  op/s\n"
    );
}

#[test]
fn measurements_serialize_for_reports() {
    let options = HarnessOptions::default()
        .set_execute_time(0.005)
        .set_probe_time(0.001);
    let mut harness = Harness::new(MonotonicClock::new(), Vec::new(), options);

    let image = first_image(48, 48);
    let kernel = kernel_image(5, 5);
    let mut out = PixelBuffer::new(48, 48).unwrap();

    let mut measurements: Vec<Measurement> = Vec::new();
    for strategy in Strategy::ALL {
        let name = format!("Convolution: {strategy}");
        let measurement = harness
            .run_default(|| convolve_with(strategy, &image, &kernel, &mut out).unwrap(), &name)
            .unwrap();
        assert!(measurement.best <= measurement.mean);
        measurements.push(measurement);
    }

    let json = serde_json::to_value(&measurements).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 3);
    assert_eq!(json[2]["name"], "Convolution: simd");
    assert!(json[0]["best"].as_f64().unwrap() > 0.0);
}
