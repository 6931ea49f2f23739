/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Errors possible while building a frame sequence
use std::fmt::{Debug, Formatter};
use std::path::PathBuf;

use qrrr_core::errors::CoreErrors;
use qrrr_gif::GifEncoderErrors;

/// All possible errors that can occur while turning a payload
/// into an animated artifact.
///
/// This is the top level error, it wraps configuration, rendering,
/// encoding and input output failures. Nothing in this family is
/// retried, the first error aborts the whole build.
pub enum QrrrErrors {
    /// Invalid symbol or animation configuration, rejected before
    /// any processing begins
    Configuration(CoreErrors),
    /// A chunk larger than the symbol capacity reached the renderer,
    /// `(found, capacity)`. Unreachable through the chunker, checked
    /// anyway so a bug cannot truncate data silently
    ChunkTooLarge(usize, usize),
    /// The symbol encoder rejected a payload
    SymbolEncode(qrcode::types::QrError),
    /// The artifact encoder failed
    GifEncode(GifEncoderErrors),
    /// The source path does not name an existing regular file
    SourceNotFound(PathBuf),
    /// Underlying input output errors
    IoErrors(std::io::Error)
}

impl Debug for QrrrErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            QrrrErrors::Configuration(err) => {
                writeln!(f, "{:?}", err)
            }
            QrrrErrors::ChunkTooLarge(found, capacity) => {
                writeln!(
                    f,
                    "Chunk of {} bytes exceeds the symbol capacity of {} bytes",
                    found, capacity
                )
            }
            QrrrErrors::SymbolEncode(err) => {
                writeln!(f, "Symbol encoding failed: {:?}", err)
            }
            QrrrErrors::GifEncode(err) => {
                writeln!(f, "Artifact encoding failed: {:?}", err)
            }
            QrrrErrors::SourceNotFound(path) => {
                writeln!(f, "Could not find source file {:?}", path)
            }
            QrrrErrors::IoErrors(err) => {
                writeln!(f, "I/O error {:?}", err)
            }
        }
    }
}

impl From<CoreErrors> for QrrrErrors {
    fn from(value: CoreErrors) -> Self {
        QrrrErrors::Configuration(value)
    }
}

impl From<qrcode::types::QrError> for QrrrErrors {
    fn from(value: qrcode::types::QrError) -> Self {
        QrrrErrors::SymbolEncode(value)
    }
}

impl From<GifEncoderErrors> for QrrrErrors {
    fn from(value: GifEncoderErrors) -> Self {
        QrrrErrors::GifEncode(value)
    }
}

impl From<std::io::Error> for QrrrErrors {
    fn from(value: std::io::Error) -> Self {
        QrrrErrors::IoErrors(value)
    }
}
