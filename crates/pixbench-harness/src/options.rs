/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Harness options
//!
//! Options follow a builder pattern, each `set_` consumes and returns
//! the options so they can be chained
//!
//! ```
//! use pixbench_harness::HarnessOptions;
//!
//! let options = HarnessOptions::default()
//!     .set_execute_time(0.5)
//!     .set_probe_time(0.05);
//!
//! assert_eq!(options.get_execute_time(), 0.5);
//! assert_eq!(options.get_bucket_count(), 1000);
//! ```

/// Options that steer probing, sampling and reporting
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HarnessOptions {
    /// Target time spent sampling one benchmark, in seconds
    ///
    /// - Default value: 1.0
    execute_time:        f64,
    /// Time the probe runs before estimating a single call, in seconds
    ///
    /// - Default value: 0.1
    probe_time:          f64,
    /// Width of the name column in report lines
    ///
    /// Longer names are truncated, shorter ones padded with spaces
    ///
    /// - Default value: 30
    max_name_length:     usize,
    /// Upper bound on the number of timed calls
    ///
    /// - Default value: 1_000_000_000
    max_iteration_count: u64,
    /// Number of buckets fast operations are grouped into
    ///
    /// - Default value: 1000
    bucket_count:        u64,
    /// Iteration counts up to and including this are timed one call at a time
    ///
    /// - Default value: 5000
    bucket_threshold:    u64
}

impl Default for HarnessOptions {
    fn default() -> Self {
        HarnessOptions {
            execute_time:        1.0,
            probe_time:          0.1,
            max_name_length:     30,
            max_iteration_count: 1_000_000_000,
            bucket_count:        1000,
            bucket_threshold:    5000
        }
    }
}

impl HarnessOptions {
    /// Get the target sampling time in seconds
    pub const fn get_execute_time(&self) -> f64 {
        self.execute_time
    }
    /// Set the target sampling time in seconds
    #[must_use]
    pub fn set_execute_time(mut self, seconds: f64) -> Self {
        self.execute_time = seconds;
        self
    }
    /// Get the probe time in seconds
    pub const fn get_probe_time(&self) -> f64 {
        self.probe_time
    }
    /// Set the probe time in seconds
    #[must_use]
    pub fn set_probe_time(mut self, seconds: f64) -> Self {
        self.probe_time = seconds;
        self
    }
    /// Get the width of the name column
    pub const fn get_max_name_length(&self) -> usize {
        self.max_name_length
    }
    /// Set the width of the name column
    #[must_use]
    pub fn set_max_name_length(mut self, length: usize) -> Self {
        self.max_name_length = length;
        self
    }
    /// Get the maximum number of timed calls
    pub const fn get_max_iteration_count(&self) -> u64 {
        self.max_iteration_count
    }
    /// Set the maximum number of timed calls
    ///
    /// A value of zero is treated as one
    #[must_use]
    pub fn set_max_iteration_count(mut self, count: u64) -> Self {
        self.max_iteration_count = count.max(1);
        self
    }
    /// Get the number of buckets used for fast operations
    pub const fn get_bucket_count(&self) -> u64 {
        self.bucket_count
    }
    /// Set the number of buckets used for fast operations
    ///
    /// A value of zero is treated as one
    #[must_use]
    pub fn set_bucket_count(mut self, count: u64) -> Self {
        self.bucket_count = count.max(1);
        self
    }
    /// Get the largest iteration count that is still sampled call by call
    pub const fn get_bucket_threshold(&self) -> u64 {
        self.bucket_threshold
    }
    /// Set the largest iteration count that is still sampled call by call
    #[must_use]
    pub fn set_bucket_threshold(mut self, threshold: u64) -> Self {
        self.bucket_threshold = threshold;
        self
    }
}
