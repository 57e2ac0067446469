/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A self calibrating micro benchmark harness
//!
//! Each benchmark is warmed up, probed to estimate the time of a single call,
//! and then sampled for roughly a fixed amount of time. Fast operations are
//! grouped into buckets so every reading spans many calls.
//!
//! The report line shows the 10th percentile and the mean, each as time per
//! operation and as operations per second.
//!
//! ```text
//! Sum: simd                     : 4.104 us/op, 243.6 kop/s | 4.388 us/op, 227.8 kop/s
//! ```
//!
//! # Features
//! - `serde-support`: Implements `serde::Serialize` for [`Measurement`]
//!
//! # Example
//! ```no_run
//! use pixbench_harness::{Harness, HarnessOptions};
//!
//! let options = HarnessOptions::default().set_execute_time(0.25);
//! let mut harness = Harness::stdout().set_options(options);
//!
//! let data = vec![1.0_f32; 4096];
//! let mut total = 0.0;
//! harness.run_default(|| total = data.iter().sum::<f32>(), "Sum 4096")?;
//! # Ok::<(), pixbench_harness::errors::HarnessErrors>(())
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
    clippy::module_name_repetitions,
    clippy::missing_panics_doc,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::doc_markdown,
    clippy::new_without_default
)]

pub use harness::{Harness, Measurement};
pub use options::HarnessOptions;

pub mod clock;
pub mod errors;
pub mod format;
pub mod harness;
pub mod options;
pub mod probe;
mod serde;
pub mod stats;
