/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::process::exit;

use log::error;

use crate::suite::run_suite;

mod cmd_args;
mod cmd_parsers;
mod errors;
mod serde;
mod suite;

pub fn main() {
    let cmd = cmd_args::create_cmd_args();
    let options = cmd.get_matches();

    cmd_parsers::global_options::setup_logger(&options);

    let parsed_opts = cmd_parsers::global_options::parse_options(&options);

    if let Err(reason) = run_suite(&parsed_opts) {
        println!();
        error!(" Could not complete benchmarks, reason {reason:?}");
        println!();
        exit(-1);
    }
}
