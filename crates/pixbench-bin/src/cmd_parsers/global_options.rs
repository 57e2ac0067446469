/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use clap::parser::ValueSource::CommandLine;
use clap::ArgMatches;
use log::{info, Level};
use pixbench_harness::HarnessOptions;

#[derive(Debug, Clone)]
pub struct CmdOptions {
    pub size:    usize,
    pub kernel:  usize,
    pub radii:   Vec<usize>,
    pub harness: HarnessOptions,
    pub filter:  Option<String>,
    pub json:    bool,
    pub verify:  bool
}

impl CmdOptions {
    pub fn new() -> CmdOptions {
        CmdOptions {
            size:    256,
            kernel:  7,
            radii:   vec![1, 2, 3],
            harness: HarnessOptions::default(),
            filter:  None,
            json:    false,
            verify:  true
        }
    }
}

pub fn parse_options(options: &ArgMatches) -> CmdOptions {
    let mut cmd_options = CmdOptions::new();

    if let Some(size) = options.get_one::<usize>("size") {
        cmd_options.size = *size;
    }
    if let Some(kernel) = options.get_one::<usize>("kernel") {
        cmd_options.kernel = *kernel;
    }
    if let Some(radii) = options.get_many::<usize>("radii") {
        cmd_options.radii = radii.copied().collect();
    }
    if let Some(seconds) = options.get_one::<f64>("execute-time") {
        cmd_options.harness = cmd_options.harness.set_execute_time(*seconds);
    }
    if let Some(seconds) = options.get_one::<f64>("probe-time") {
        cmd_options.harness = cmd_options.harness.set_probe_time(*seconds);
    }
    if let Some(filter) = options.get_one::<String>("filter") {
        info!("Only running benchmarks containing \"{filter}\"");
        cmd_options.filter = Some(filter.clone());
    }
    cmd_options.json = options.get_flag("json");

    if options.value_source("no-verify") == Some(CommandLine) && options.get_flag("no-verify") {
        info!("Skipping tier verification");
        cmd_options.verify = false;
    }
    info!(
        "Images {0}x{0}, kernel {1}x{1}, median radii {2:?}",
        cmd_options.size, cmd_options.kernel, cmd_options.radii
    );
    cmd_options
}

/// Set up logging options
pub fn setup_logger(options: &ArgMatches) {
    let log_level = if options.get_flag("debug") {
        Level::Debug
    } else if options.get_flag("trace") {
        Level::Trace
    } else if options.get_flag("warn") {
        Level::Warn
    } else if options.get_flag("info") {
        Level::Info
    } else {
        Level::Warn
    };

    if let Err(err) = simple_logger::init_with_level(log_level) {
        eprintln!("Could not initialize logger: {err}");
        return;
    }

    info!("Initialized logger");
    info!("Log level :{log_level}");
}
