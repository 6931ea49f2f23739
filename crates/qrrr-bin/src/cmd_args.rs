/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use clap::builder::PossibleValuesParser;
use clap::{value_parser, Arg, ArgAction, Command};
use qrrr_core::ecc::{EccLevel, MAX_VERSION};
use qrrr_core::options::MAX_FPS;

#[rustfmt::skip]
pub fn create_cmd_args() -> Command {
    Command::new("qrrr")
        .about("Convert a file into an animated QR code")
        .arg(Arg::new("source")
            .help("File to convert to a qrrr code")
            .required(true))
        .arg(Arg::new("ecc")
            .long("ecc")
            .help("QR code error correction level")
            .value_parser(PossibleValuesParser::new(
                EccLevel::all().map(EccLevel::letter)
            ))
            .default_value(EccLevel::all()[0].letter()))
        .arg(Arg::new("fps")
            .long("fps")
            .help("Frames per second of the generated animation")
            .value_parser(value_parser!(u64).range(1..=MAX_FPS as u64))
            .default_value("5"))
        .arg(Arg::new("version")
            .long("version")
            .help("QR code version to use")
            .long_help("Change the QR code version, i.e. the symbol size class.\nHigher versions store more bytes per frame but need a better camera to capture.")
            .value_parser(value_parser!(u64).range(1..=MAX_VERSION as u64))
            .default_value("3"))
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
            .help("Display information about the encoding options"))
}
