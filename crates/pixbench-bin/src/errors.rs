/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fmt::{Debug, Formatter};

use pixbench_harness::errors::HarnessErrors;
use pixbench_image::errors::ImageErrors;

/// Everything that can stop the benchmark suite
pub enum BenchErrors {
    Image(ImageErrors),
    Harness(HarnessErrors),
    /// Tiers of the named operation disagree
    TierMismatch(String),
    Json(serde_json::Error)
}

impl Debug for BenchErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Image(err) => writeln!(f, "Image error: {err:?}"),
            Self::Harness(err) => writeln!(f, "Harness error: {err:?}"),
            Self::TierMismatch(name) => {
                writeln!(f, "Tiers of {name} produce different results")
            }
            Self::Json(err) => writeln!(f, "Could not serialize measurements: {err}")
        }
    }
}

impl From<ImageErrors> for BenchErrors {
    fn from(value: ImageErrors) -> Self {
        BenchErrors::Image(value)
    }
}

impl From<HarnessErrors> for BenchErrors {
    fn from(value: HarnessErrors) -> Self {
        BenchErrors::Harness(value)
    }
}

impl From<serde_json::Error> for BenchErrors {
    fn from(value: serde_json::Error) -> Self {
        BenchErrors::Json(value)
    }
}
