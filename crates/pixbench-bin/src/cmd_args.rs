/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use clap::{value_parser, Arg, ArgAction, Command};

#[rustfmt::skip]
pub fn create_cmd_args() -> Command {
    Command::new("pixbench")
        .about("Time naive, optimized and vectorized image kernels against each other")
        .arg(Arg::new("size")
            .long("size")
            .help_heading("IMAGES")
            .help("Width and height of the benchmark images")
            .value_parser(value_parser!(usize))
            .default_value("256"))
        .arg(Arg::new("kernel")
            .long("kernel")
            .help_heading("IMAGES")
            .help("Width and height of the convolution kernel")
            .value_parser(value_parser!(usize))
            .default_value("7"))
        .arg(Arg::new("radii")
            .long("radii")
            .help_heading("IMAGES")
            .help("Comma separated median filter radii")
            .long_help("Comma separated median filter radii, a radius r filters with a (2r+1)x(2r+1) window")
            .value_parser(value_parser!(usize))
            .value_delimiter(',')
            .action(ArgAction::Append)
            .default_values(["1", "2", "3"]))
        .arg(Arg::new("execute-time")
            .long("execute-time")
            .help_heading("TIMING")
            .help("Seconds spent sampling each benchmark")
            .value_parser(value_parser!(f64))
            .default_value("1.0"))
        .arg(Arg::new("probe-time")
            .long("probe-time")
            .help_heading("TIMING")
            .help("Seconds spent estimating the cost of a single call")
            .value_parser(value_parser!(f64))
            .default_value("0.1"))
        .arg(Arg::new("filter")
            .long("filter")
            .short('f')
            .help_heading("OUTPUT")
            .help("Only run benchmarks whose name contains this text"))
        .arg(Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help_heading("OUTPUT")
            .help("Print all measurements as json after the report"))
        .arg(Arg::new("verify")
            .long("verify")
            .action(ArgAction::SetTrue)
            .overrides_with("no-verify")
            .help_heading("OUTPUT")
            .help("Check that all tiers agree before timing them (default)"))
        .arg(Arg::new("no-verify")
            .long("no-verify")
            .action(ArgAction::SetTrue)
            .overrides_with("verify")
            .help_heading("OUTPUT")
            .help("Skip checking that all tiers agree"))
        .arg(Arg::new("debug")
            .long("debug")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display debug information and higher"))
        .arg(Arg::new("trace")
            .long("trace")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display very verbose information"))
        .arg(Arg::new("warn")
            .long("warn")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display warnings and errors"))
        .arg(Arg::new("info")
            .long("info")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display information about the benchmark setup"))
}
