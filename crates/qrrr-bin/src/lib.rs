/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::process::exit;

use log::error;

mod cmd_args;
mod cmd_parsers;

pub fn main() {
    let cmd = cmd_args::create_cmd_args();
    let options = cmd.get_matches();

    cmd_parsers::setup_logger(&options);

    let result = cmd_parsers::run_from_cmd(&options);

    match result {
        Ok(artifact) => {
            println!("Generated qrrr code:\t{}", artifact.display());
        }
        Err(reason) => {
            println!();
            error!(" Could not generate qrrr code, reason {:?}", reason);

            println!();
            exit(-1);
        }
    }
}
