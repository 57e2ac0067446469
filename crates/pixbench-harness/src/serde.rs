/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

#![cfg(feature = "serde-support")]

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::harness::Measurement;

impl Serialize for Measurement {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        const STRUCT_FIELDS: usize = 8;
        let mut state = serializer.serialize_struct("Measurement", STRUCT_FIELDS)?;

        state.serialize_field("name", self.name.as_str())?;
        state.serialize_field("best", &self.best)?;
        state.serialize_field("mean", &self.mean)?;
        state.serialize_field("best_throughput", &self.best_throughput())?;
        state.serialize_field("mean_throughput", &self.mean_throughput())?;
        state.serialize_field("samples", &self.samples)?;
        state.serialize_field("iterations", &self.iterations)?;
        state.serialize_field("bucket_size", &self.bucket_size)?;

        state.end()
    }
}
