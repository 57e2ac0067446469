/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Summary statistics over timing samples
use crate::errors::HarnessErrors;

/// Summary of a sample set, all times in seconds per operation
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Statistics {
    /// The 10th percentile, `sorted[n / 10]`
    pub best:    f64,
    /// Arithmetic mean of all samples
    pub mean:    f64,
    /// Number of samples summarised
    pub samples: usize
}

impl Statistics {
    /// Summarise `samples`
    ///
    /// Samples are sorted in place with a total order.
    ///
    /// # Errors
    /// [`HarnessErrors::NoSamples`] if `samples` is empty
    pub fn from_samples(samples: &mut [f64]) -> Result<Statistics, HarnessErrors> {
        if samples.is_empty() {
            return Err(HarnessErrors::NoSamples);
        }
        samples.sort_unstable_by(f64::total_cmp);

        let n = samples.len();
        let mean = samples.iter().sum::<f64>() / n as f64;

        Ok(Statistics {
            best: samples[n / 10],
            mean,
            samples: n
        })
    }
}
