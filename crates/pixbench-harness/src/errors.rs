/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Errors possible while measuring and reporting
use std::fmt::{Debug, Display, Formatter};

use crate::format::{MAX_MAGNITUDE, MIN_MAGNITUDE};

/// All possible harness errors
pub enum HarnessErrors {
    /// A value that should be reported lies outside `(1e-12, 1e12)`
    /// or is not a number
    UnrepresentableMagnitude(f64),
    /// Statistics were requested over an empty sample set
    NoSamples,
    /// Writing the report to the sink failed
    Io(std::io::Error)
}

impl Debug for HarnessErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnrepresentableMagnitude(value) => {
                writeln!(
                    f,
                    "Cannot format {value}, expected a magnitude in ({MIN_MAGNITUDE:e}, {MAX_MAGNITUDE:e})"
                )
            }
            Self::NoSamples => {
                writeln!(f, "No samples were collected")
            }
            Self::Io(err) => {
                writeln!(f, "Could not write report: {err}")
            }
        }
    }
}

impl Display for HarnessErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl std::error::Error for HarnessErrors {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None
        }
    }
}

impl From<std::io::Error> for HarnessErrors {
    fn from(value: std::io::Error) -> Self {
        HarnessErrors::Io(value)
    }
}
