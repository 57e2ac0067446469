/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Optimization tiers shared by every kernel
use core::fmt::{Display, Formatter};
use core::str::FromStr;

/// How a kernel accesses memory
///
/// All tiers of a kernel produce bit identical output,
/// only the access pattern differs.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Strategy {
    /// Checked accessors for every element
    Naive,
    /// Bounds hoisted out of inner loops, row slices and interior/border splits
    Optimized,
    /// [`LANES`](crate::simd::LANES) wide vector lanes with a scalar remainder
    Simd
}

impl Strategy {
    /// Every tier, slowest first
    pub const ALL: [Strategy; 3] = [Strategy::Naive, Strategy::Optimized, Strategy::Simd];

    pub const fn name(self) -> &'static str {
        match self {
            Strategy::Naive => "naive",
            Strategy::Optimized => "optimized",
            Strategy::Simd => "simd"
        }
    }
}

impl Display for Strategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strategy::ALL
            .into_iter()
            .find(|x| x.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown strategy {s}, expected one of naive, optimized, simd"))
    }
}
