/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fmt::{Debug, Formatter};

/// Errors possible during GIF encoding
pub enum GifEncoderErrors {
    /// The frame list was empty, an animation needs at least one frame
    NoFrames,
    /// Too large dimensions for width or height, above what the
    /// screen descriptor can store
    TooLargeDimensions(&'static str, usize, usize),
    /// A frame buffer does not match the configured dimensions
    WrongFrameSize(usize, usize),
    /// More distinct colors across the frames than one global
    /// color table can hold
    TooManyColors(usize),
    /// Underlying input output errors
    IoErrors(std::io::Error)
}

impl Debug for GifEncoderErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GifEncoderErrors::NoFrames => {
                writeln!(f, "No frames to encode")
            }
            GifEncoderErrors::TooLargeDimensions(dim, max, found) => {
                writeln!(
                    f,
                    "Too large {dim}, expected at most {max} but found {found}"
                )
            }
            GifEncoderErrors::WrongFrameSize(expected, found) => {
                writeln!(
                    f,
                    "Wrong frame buffer size, expected {expected} bytes but found {found}"
                )
            }
            GifEncoderErrors::TooManyColors(found) => {
                writeln!(
                    f,
                    "Found {found} distinct colors, a global color table holds at most 256"
                )
            }
            GifEncoderErrors::IoErrors(err) => {
                writeln!(f, "I/O error {:?}", err)
            }
        }
    }
}

impl From<std::io::Error> for GifEncoderErrors {
    fn from(value: std::io::Error) -> Self {
        GifEncoderErrors::IoErrors(value)
    }
}
