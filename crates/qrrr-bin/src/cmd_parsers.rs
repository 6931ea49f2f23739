/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::path::PathBuf;

use clap::ArgMatches;
use log::{info, Level};
use qrrr_core::ecc::EccLevel;
use qrrr_core::options::{AnimationOptions, SymbolOptions};
use qrrr_image::errors::QrrrErrors;
use qrrr_image::sequence::SequenceBuilder;

/// Set up logging options
pub fn setup_logger(options: &ArgMatches) {
    let log_level;

    if *options.get_one::<bool>("debug").unwrap() {
        log_level = Level::Debug;
    } else if *options.get_one::<bool>("trace").unwrap() {
        log_level = Level::Trace;
    } else if *options.get_one::<bool>("warn").unwrap() {
        log_level = Level::Warn
    } else if *options.get_one::<bool>("info").unwrap() {
        log_level = Level::Info;
    } else {
        log_level = Level::Warn;
    }

    simple_logger::init_with_level(log_level).unwrap();
}

/// Read the validated command line matches into option structs
pub fn parse_options(options: &ArgMatches) -> (SymbolOptions, AnimationOptions) {
    // clap restricted every value below, the unwraps read back what it
    // already validated
    let letter = options.get_one::<String>("ecc").unwrap();
    let ecc_level = EccLevel::from_letter(letter).unwrap();

    let version = *options.get_one::<u64>("version").unwrap() as usize;
    let fps = *options.get_one::<u64>("fps").unwrap() as usize;

    let symbol = SymbolOptions::default()
        .set_version(version)
        .set_ecc_level(ecc_level);
    let animation = AnimationOptions::default().set_fps(fps);

    (symbol, animation)
}

/// Build the artifact described by the command line, returning the
/// absolute path of the generated file
pub fn run_from_cmd(options: &ArgMatches) -> Result<PathBuf, QrrrErrors> {
    let (symbol, animation) = parse_options(options);
    let source = options.get_one::<String>("source").unwrap();

    info!(
        "Encoding {} at version {}, level {}, {} fps",
        source,
        symbol.version(),
        symbol.ecc_level().letter(),
        animation.fps()
    );

    let builder = SequenceBuilder::new(symbol, animation)?;

    builder.build(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd_args::create_cmd_args;

    #[test]
    fn test_parse_options_maps_cmd_line() {
        let matches = create_cmd_args()
            .try_get_matches_from([
                "qrrr", "--ecc", "H", "--fps", "20", "--version", "7", "payload.bin"
            ])
            .unwrap();

        let (symbol, animation) = parse_options(&matches);

        assert_eq!(symbol.ecc_level(), EccLevel::H);
        assert_eq!(symbol.version(), 7);
        assert_eq!(animation.fps(), 20);
        assert_eq!(animation.frame_delay_ms(), 50);
    }
}
