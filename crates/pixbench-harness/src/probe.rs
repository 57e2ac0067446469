/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Calibration, how long does one call take and how often should it run
//!
//! The probe calls the operation in doubling rounds, `1, 1, 2, 4, ...` calls,
//! accumulating the elapsed time until it exceeds the probe time. The
//! estimate is total time over total calls.
//!
//! From that estimate, [`iteration_count`] derives how many calls fit into the
//! execute time and [`SamplingPlan`] decides whether calls are timed one by
//! one or in buckets, fast operations need many calls per reading to rise
//! above the clock resolution.
use std::hint::black_box;
use std::num::NonZeroU32;

use log::debug;

use crate::clock::Clock;
use crate::options::HarnessOptions;

/// Estimate the time of a single call of `op`, in seconds
///
/// Every call goes through [`black_box`], so the optimizer cannot drop
/// calls of an operation without side effects.
///
/// Stops once `probe_time` seconds were spent, or when the call limit can no
/// longer double, whichever comes first.
pub fn probe<F: FnMut(), C: Clock>(op: &mut F, clock: &C, probe_time: f64) -> f64 {
    let mut count: u32 = 0;
    let mut limit: u32 = 1;
    let mut elapsed = 0.0;

    loop {
        let start = clock.now();

        while count < limit {
            black_box(&mut *op)();
            count += 1;
        }
        elapsed += clock.since(start).as_secs_f64();

        if elapsed >= probe_time {
            break;
        }
        match limit.checked_mul(2) {
            Some(next) => limit = next,
            None => break
        }
    }
    let approx = elapsed / f64::from(count);

    debug!("Probe ran {count} calls in {elapsed:.6}s, about {approx:e}s per call");

    approx
}

/// Number of calls that fit into the execute time
///
/// This is `execute_time / approx` truncated and capped at the maximum
/// iteration count. Operations slower than the execute time still run once.
pub fn iteration_count(approx: f64, options: &HarnessOptions) -> u64 {
    let max = options.get_max_iteration_count();

    if approx <= 0.0 {
        // too fast to register on the clock
        return max;
    }
    let count = (options.get_execute_time() / approx).min(max as f64);

    // truncation, float to int casts saturate
    (count as u64).clamp(1, max)
}

/// How calls are grouped into timed samples
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct SamplingPlan {
    /// Calls per timed sample
    pub bucket_size:  u64,
    /// Number of timed samples
    pub sample_count: u64
}

impl SamplingPlan {
    /// Plan sampling for `iterations` calls
    ///
    /// Up to the bucket threshold every call is its own sample, above it the
    /// calls are split into `bucket_count` buckets of equal size. The
    /// remainder of that division is dropped.
    pub fn new(iterations: u64, options: &HarnessOptions) -> SamplingPlan {
        if iterations <= options.get_bucket_threshold() {
            return SamplingPlan {
                bucket_size:  1,
                sample_count: iterations
            };
        }
        let buckets = options.get_bucket_count().max(1);

        SamplingPlan {
            bucket_size:  (iterations / buckets).max(1),
            sample_count: buckets
        }
    }

    /// Whether calls are grouped, more than one call per sample
    pub const fn is_bucketed(&self) -> bool {
        self.bucket_size > 1
    }

    /// Time every sample, returning seconds per logical operation
    ///
    /// A sample is the time of `bucket_size` calls divided by
    /// `batch_factor * bucket_size`, `batch_factor` being the number of
    /// operations a single call performs.
    pub fn collect<F: FnMut(), C: Clock>(
        &self, op: &mut F, clock: &C, batch_factor: NonZeroU32
    ) -> Vec<f64> {
        let divisor = f64::from(batch_factor.get()) * self.bucket_size as f64;
        let mut samples = Vec::with_capacity(usize::try_from(self.sample_count).unwrap_or(0));

        for _ in 0..self.sample_count {
            let start = clock.now();

            for _ in 0..self.bucket_size {
                black_box(&mut *op)();
            }
            samples.push(clock.since(start).as_secs_f64() / divisor);
        }
        samples
    }
}
