/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use pixbench_harness::Measurement;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Everything a run measured, plus the setup it measured it on
pub struct Report<'a> {
    size:         usize,
    kernel:       usize,
    backend:      String,
    measurements: &'a [Measurement]
}

impl<'a> Report<'a> {
    pub fn new(size: usize, kernel: usize, backend: String, measurements: &'a [Measurement]) -> Report<'a> {
        Report {
            size,
            kernel,
            backend,
            measurements
        }
    }
}

impl Serialize for Report<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        let mut state = serializer.serialize_struct("Report", 4)?;

        state.serialize_field("size", &self.size)?;
        state.serialize_field("kernel", &self.kernel)?;
        state.serialize_field("backend", &self.backend)?;
        state.serialize_field("measurements", &self.measurements)?;

        state.end()
    }
}

#[cfg(test)]
mod tests {
    use pixbench_harness::Measurement;

    use crate::serde::Report;

    #[test]
    fn report_lists_measurements_in_order() {
        let measurements = [
            Measurement {
                name:        "Empty action".to_string(),
                best:        1e-9,
                mean:        2e-9,
                samples:     1000,
                iterations:  1_000_000_000,
                bucket_size: 1_000_000
            },
            Measurement {
                name:        "Median 3x3".to_string(),
                best:        1e-3,
                mean:        1e-3,
                samples:     1000,
                iterations:  1000,
                bucket_size: 1
            }
        ];
        let report = Report::new(256, 7, "Avx".to_string(), &measurements);
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["size"], 256);
        assert_eq!(value["backend"], "Avx");
        assert_eq!(value["measurements"][0]["name"], "Empty action");
        assert_eq!(value["measurements"][1]["bucket_size"], 1);
    }
}
