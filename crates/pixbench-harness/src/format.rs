/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Fixed width rendering of times and rates
//!
//! Values are scaled by a power of 1000 into `[1, 1000)` and printed as
//! five characters, a space and an SI suffix, so report columns line up.
//!
//! ```text
//! 1.5e-9   -> "1.500 n"
//! 12.3456  -> "12.34  "
//! 4.2e7    -> "42.00 M"
//! ```
use crate::errors::HarnessErrors;
use crate::stats::Statistics;

/// Smallest magnitude that can be rendered, exclusive
pub const MIN_MAGNITUDE: f64 = 1e-12;
/// Largest magnitude that can be rendered, exclusive
pub const MAX_MAGNITUDE: f64 = 1e12;

/// Width of the numeric part
const DIGITS: usize = 5;

/// `(lower bound, scale, suffix)`, checked top to bottom
const SCALES: [(f64, f64, char); 7] = [
    (1e9, 1e-9, 'G'),
    (1e6, 1e-6, 'M'),
    (1e3, 1e-3, 'k'),
    (1e0, 1e0, ' '),
    (1e-3, 1e3, 'm'),
    (1e-6, 1e6, 'u'),
    (1e-9, 1e9, 'n')
];

/// Render `value` as five characters, a space and a suffix
///
/// # Errors
/// [`HarnessErrors::UnrepresentableMagnitude`] unless `|value|` lies in
/// `(1e-12, 1e12)`
pub fn format_scaled(value: f64) -> Result<String, HarnessErrors> {
    let magnitude = value.abs();

    if magnitude.is_nan() || magnitude <= MIN_MAGNITUDE || magnitude >= MAX_MAGNITUDE {
        return Err(HarnessErrors::UnrepresentableMagnitude(value));
    }
    let (scale, suffix) = SCALES
        .iter()
        .find(|(lower, _, _)| magnitude >= *lower)
        .map_or((1e12, 'p'), |(_, scale, suffix)| (*scale, *suffix));

    let mut digits = format!("{:.3}", value * scale);
    digits.truncate(DIGITS);

    Ok(format!("{digits} {suffix}"))
}

/// Render one report line
///
/// `name` is padded with spaces or cut to `name_length` characters, followed
/// by the best and mean time per operation and their throughputs
///
/// # Errors
/// [`HarnessErrors::UnrepresentableMagnitude`] if any time or throughput is out of range
pub fn format_report(name: &str, stats: &Statistics, name_length: usize) -> Result<String, HarnessErrors> {
    let name: String = name
        .chars()
        .chain(core::iter::repeat(' '))
        .take(name_length)
        .collect();

    Ok(format!(
        "{name}: {}s/op, {}op/s | {}s/op, {}op/s",
        format_scaled(stats.best)?,
        format_scaled(1.0 / stats.best)?,
        format_scaled(stats.mean)?,
        format_scaled(1.0 / stats.mean)?
    ))
}

#[cfg(test)]
mod tests {
    use crate::errors::HarnessErrors;
    use crate::format::{format_report, format_scaled};
    use crate::stats::Statistics;

    #[test]
    fn every_suffix() {
        let cases = [
            (2.5e9, "2.500 G"),
            (3.25e6, "3.250 M"),
            (1234.0, "1.234 k"),
            (12.3456, "12.34  "),
            (1.0, "1.000  "),
            (0.25, "250.0 m"),
            (7e-6, "7.000 u"),
            (1.5e-9, "1.500 n"),
            (4e-11, "40.00 p")
        ];
        for (value, expected) in cases {
            assert_eq!(format_scaled(value).unwrap(), expected, "{value}");
        }
    }

    #[test]
    fn negative_values_keep_their_sign() {
        assert_eq!(format_scaled(-1.5e-9).unwrap(), "-1.50 n");
    }

    #[test]
    fn out_of_range_values_fail() {
        for value in [0.0, 1e-12, 1e12, 5e13, -2e12, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                format_scaled(value),
                Err(HarnessErrors::UnrepresentableMagnitude(_))
            ));
        }
    }

    #[test]
    fn report_line_layout() {
        let stats = Statistics {
            best:    2e-6,
            mean:    4e-6,
            samples: 10
        };

        assert_eq!(
            format_report("Sum: naive", &stats, 12).unwrap(),
            "Sum: naive  : 2.000 us/op, 500.0 kop/s | 4.000 us/op, 250.0 kop/s"
        );
        assert_eq!(
            format_report("Convolution [*]: simd", &stats, 11).unwrap(),
            "Convolution: 2.000 us/op, 500.0 kop/s | 4.000 us/op, 250.0 kop/s"
        );
    }
}
