/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The benchmark runner
use std::io::{Stdout, Write};
use std::num::NonZeroU32;

use log::{debug, trace};

use crate::clock::{Clock, MonotonicClock};
use crate::errors::HarnessErrors;
use crate::format::format_report;
use crate::options::HarnessOptions;
use crate::probe::{iteration_count, probe, SamplingPlan};
use crate::stats::Statistics;

/// Result of one benchmark, times in seconds per operation
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    /// Display name, as passed to [`Harness::run`]
    pub name:        String,
    /// 10th percentile of the samples
    pub best:        f64,
    /// Mean of the samples
    pub mean:        f64,
    /// Number of timed samples
    pub samples:     usize,
    /// Calls the execute time was planned for
    pub iterations:  u64,
    /// Calls per timed sample
    pub bucket_size: u64
}

impl Measurement {
    /// Operations per second at the best time
    pub fn best_throughput(&self) -> f64 {
        1.0 / self.best
    }
    /// Operations per second at the mean time
    pub fn mean_throughput(&self) -> f64 {
        1.0 / self.mean
    }
}

/// Runs benchmarks and writes one report line per benchmark to a sink
///
/// # Example
/// ```no_run
/// use pixbench_harness::Harness;
///
/// let mut harness = Harness::stdout();
/// let mut total = 0_u64;
///
/// let measurement = harness.run_default(|| total = total.wrapping_add(1), "Increment")?;
/// println!("{:e}", measurement.best);
/// # Ok::<(), pixbench_harness::errors::HarnessErrors>(())
/// ```
pub struct Harness<C: Clock, W: Write> {
    clock:   C,
    sink:    W,
    options: HarnessOptions
}

impl Harness<MonotonicClock, Stdout> {
    /// A harness timing with the wall clock and reporting to standard output
    pub fn stdout() -> Harness<MonotonicClock, Stdout> {
        Harness::new(MonotonicClock::new(), std::io::stdout(), HarnessOptions::default())
    }
}

impl<C: Clock, W: Write> Harness<C, W> {
    pub fn new(clock: C, sink: W, options: HarnessOptions) -> Harness<C, W> {
        Harness { clock, sink, options }
    }

    pub const fn get_options(&self) -> &HarnessOptions {
        &self.options
    }

    #[must_use]
    pub fn set_options(mut self, options: HarnessOptions) -> Self {
        self.options = options;
        self
    }

    pub fn sink(&self) -> &W {
        &self.sink
    }

    /// Consume the harness, returning the sink
    pub fn into_sink(self) -> W {
        self.sink
    }

    /// Measure `op` with a batch factor of one
    ///
    /// # Errors
    /// See [`run`](Self::run)
    pub fn run_default<F: FnMut()>(&mut self, op: F, name: &str) -> Result<Measurement, HarnessErrors> {
        self.run(op, name, NonZeroU32::MIN)
    }

    /// Measure `op` and report it under `name`
    ///
    /// `batch_factor` is the number of logical operations one call of `op`
    /// performs, samples are divided by it.
    ///
    /// Runs `op` once to warm up, probes it, then times the planned number of
    /// calls, either one call per sample or in equal buckets, see [`SamplingPlan`].
    ///
    /// # Errors
    /// - [`HarnessErrors::UnrepresentableMagnitude`] if a time or rate cannot be formatted
    /// - [`HarnessErrors::Io`] if writing the report line fails
    pub fn run<F: FnMut()>(
        &mut self, mut op: F, name: &str, batch_factor: NonZeroU32
    ) -> Result<Measurement, HarnessErrors> {
        // warm up caches and branch predictors
        op();

        let approx = probe(&mut op, &self.clock, self.options.get_probe_time());
        let iterations = iteration_count(approx, &self.options);
        let plan = SamplingPlan::new(iterations, &self.options);

        debug!(
            "{name}: {iterations} iterations as {} samples of {} calls",
            plan.sample_count, plan.bucket_size
        );

        let mut samples = plan.collect(&mut op, &self.clock, batch_factor);
        let stats = Statistics::from_samples(&mut samples)?;

        let line = format_report(name, &stats, self.options.get_max_name_length())?;
        writeln!(self.sink, "{line}")?;
        self.sink.flush()?;

        trace!("{name}: best {:e}s, mean {:e}s", stats.best, stats.mean);

        Ok(Measurement {
            name: name.to_string(),
            best: stats.best,
            mean: stats.mean,
            samples: stats.samples,
            iterations,
            bucket_size: plan.bucket_size
        })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::num::NonZeroU32;
    use std::rc::Rc;
    use std::time::Duration;

    use crate::clock::{Clock, MonotonicClock};
    use crate::errors::HarnessErrors;
    use crate::harness::Harness;
    use crate::options::HarnessOptions;

    /// A clock only the measured operation moves
    #[derive(Clone, Default)]
    struct FakeClock {
        time: Rc<Cell<Duration>>
    }

    impl FakeClock {
        fn advance(&self, by: Duration) {
            self.time.set(self.time.get() + by);
        }
    }

    impl Clock for FakeClock {
        fn now(&self) -> Duration {
            self.time.get()
        }
    }

    fn harness(clock: &FakeClock) -> Harness<FakeClock, Vec<u8>> {
        Harness::new(clock.clone(), Vec::new(), HarnessOptions::default())
    }

    #[test]
    fn fast_operations_are_bucketed() {
        let clock = FakeClock::default();
        let mut harness = harness(&clock);

        let ticker = clock.clone();
        let measurement = harness
            .run_default(move || ticker.advance(Duration::from_micros(2)), "Tick")
            .unwrap();

        assert_eq!(measurement.iterations, 500_000);
        assert_eq!(measurement.bucket_size, 500);
        assert_eq!(measurement.samples, 1000);
        assert!((measurement.best - 2e-6).abs() < 1e-12);
        assert!(measurement.best <= measurement.mean);

        let report = String::from_utf8(harness.into_sink()).unwrap();
        assert_eq!(
            report,
            "Tick                          : 2.000 us/op, 500.0 kop/s | 2.000 us/op, 500.0 kop/s\n"
        );
    }

    #[test]
    fn slow_operations_are_sampled_individually() {
        let clock = FakeClock::default();
        let mut harness = harness(&clock);

        let ticker = clock.clone();
        let mut calls = 0_u32;
        let measurement = harness
            .run_default(
                move || {
                    calls += 1;
                    // every fourth call is slow
                    let micros = if calls % 4 == 0 { 2000 } else { 1000 };
                    ticker.advance(Duration::from_micros(micros));
                },
                "Sleepy"
            )
            .unwrap();

        assert_eq!(measurement.bucket_size, 1);
        assert!(measurement.samples <= 5000);
        assert_eq!(measurement.samples as u64, measurement.iterations);
        assert!((measurement.best - 1e-3).abs() < 1e-12);
        assert!(measurement.mean > measurement.best);
    }

    #[test]
    fn batch_factor_divides_samples() {
        let clock = FakeClock::default();
        let mut harness = harness(&clock);

        let ticker = clock.clone();
        let measurement = harness
            .run(
                move || ticker.advance(Duration::from_millis(4)),
                "Batched",
                NonZeroU32::new(4).unwrap()
            )
            .unwrap();

        assert!((measurement.best - 1e-3).abs() < 1e-12);
        assert!((measurement.best_throughput() - 1000.0).abs() < 1e-6);
    }

    #[test]
    fn operations_slower_than_execute_time_run_once() {
        let clock = FakeClock::default();
        let mut harness = harness(&clock);

        let ticker = clock.clone();
        let measurement = harness
            .run_default(move || ticker.advance(Duration::from_secs(3)), "Glacial")
            .unwrap();

        assert_eq!(measurement.iterations, 1);
        assert_eq!(measurement.samples, 1);
        assert_eq!(measurement.best, 3.0);
    }

    #[test]
    fn empty_operation_on_the_wall_clock() {
        let options = HarnessOptions::default()
            .set_execute_time(0.02)
            .set_probe_time(0.005);
        let mut harness = Harness::new(MonotonicClock::new(), Vec::new(), options);

        let measurement = harness.run_default(|| {}, "Empty action").unwrap();

        assert!(measurement.best > 1e-12);
        assert!(measurement.best <= measurement.mean);
        let report = String::from_utf8(harness.into_sink()).unwrap();
        assert!(report.starts_with("Empty action"));
    }

    #[test]
    fn instant_operations_cannot_be_reported() {
        let clock = FakeClock::default();
        let options = HarnessOptions::default()
            .set_max_iteration_count(10)
            .set_probe_time(0.0);
        let mut harness = Harness::new(clock, Vec::new(), options);

        let result = harness.run_default(|| {}, "Frozen");

        assert!(matches!(result, Err(HarnessErrors::UnrepresentableMagnitude(_))));
        assert!(harness.sink().is_empty());
    }
}
