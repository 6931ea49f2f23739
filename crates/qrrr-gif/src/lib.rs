/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! An animated GIF89a encoder
//!
//! Takes an ordered list of same-sized RGB frames and writes one looping
//! animation with a uniform inter-frame delay. The layout written is
//! ```text
//! ╔═══════════════╤══════════════════════════════════════════════════╗
//! ║ Block         │ Description                                      ║
//! ╠═══════════════╪══════════════════════════════════════════════════╣
//! ║ Header        │ "GIF89a" magic value                             ║
//! ╟───────────────┼──────────────────────────────────────────────────╢
//! ║ Screen desc.  │ Canvas dimensions + global color table           ║
//! ╟───────────────┼──────────────────────────────────────────────────╢
//! ║ App. ext.     │ NETSCAPE2.0 loop block, written when looping     ║
//! ╟───────────────┼──────────────────────────────────────────────────╢
//! ║ Per frame     │ Graphic control ext. (delay), image descriptor,  ║
//! ║               │ LZW compressed indexed pixel data                ║
//! ╟───────────────┼──────────────────────────────────────────────────╢
//! ║ Trailer       │ 0x3B                                             ║
//! ╚═══════════════╧══════════════════════════════════════════════════╝
//! ```
//!
//! All frames share one global color table built from the distinct
//! colors present across the whole sequence, which caps the sequence at
//! 256 distinct colors. That is a deliberate fit for the high-contrast
//! imagery this family of crates produces, not a general purpose
//! quantizer.

pub use encoder::GifEncoder;
pub use errors::GifEncoderErrors;

mod encoder;
mod errors;
