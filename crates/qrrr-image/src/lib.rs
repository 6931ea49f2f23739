/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Frame composition and sequence assembly for animated QR codes
//!
//! This crate turns an arbitrary byte payload into an ordered series
//! of frames, each holding one QR symbol stacked above a progress bar,
//! and assembles those frames into a single looping animated GIF.
//!
//! The pipeline is
//!
//! - split the payload into chunks sized to the symbol capacity
//!     - render each chunk into one frame
//!         - write all frames, in order, as one animation
//!
//! The symbol encoding itself (bytes to module matrix) is delegated to
//! the [qrcode] crate, everything around it, rasterisation, progress
//! bar geometry, chunking and artifact assembly, lives here.
//!
//! # Example
//! ```no_run
//! use qrrr_core::options::{AnimationOptions, SymbolOptions};
//! use qrrr_image::sequence::SequenceBuilder;
//!
//! let builder =
//!     SequenceBuilder::new(SymbolOptions::default(), AnimationOptions::default()).unwrap();
//! let artifact = builder.build("payload.bin").unwrap();
//! println!("{}", artifact.display());
//! ```
pub mod errors;
pub mod frame;
pub mod pixmap;
pub mod sequence;
