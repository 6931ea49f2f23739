/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Symbol, animation and encoder options
//!
//! The option structs here follow a builder pattern, `set_x` methods
//! consume the options and return a modified copy, so configuration
//! reads as one chain and the result is treated as immutable from
//! then on.

use crate::ecc::{EccLevel, MAX_VERSION};
use crate::errors::CoreErrors;

/// Number of modules per side added on top of the version scaling.
///
/// A version `v` symbol is `4 * v + 17` modules wide.
pub const BASE_MODULES: usize = 17;

/// Highest frame rate the animation options accept.
pub const MAX_FPS: usize = 20;

/// Geometry and strength of one symbol.
///
/// Fully determines the raster produced for a chunk: the version and
/// error correction level fix the module matrix and the chunk capacity,
/// the box size and border fix how the matrix is scaled to pixels.
///
/// Created once per run from validated input and never mutated.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SymbolOptions {
    version:   usize,
    ecc_level: EccLevel,
    box_size:  usize,
    border:    usize
}

impl Default for SymbolOptions {
    fn default() -> SymbolOptions {
        SymbolOptions {
            version:   3,
            ecc_level: EccLevel::L,
            box_size:  10,
            border:    4
        }
    }
}

impl SymbolOptions {
    /// Symbol version, the size class of the symbol.
    pub const fn version(&self) -> usize {
        self.version
    }
    /// Error correction level baked into every symbol.
    pub const fn ecc_level(&self) -> EccLevel {
        self.ecc_level
    }
    /// Pixels per module side.
    pub const fn box_size(&self) -> usize {
        self.box_size
    }
    /// Quiet zone width in modules, added on every edge of the symbol.
    pub const fn border(&self) -> usize {
        self.border
    }
    /// Number of data modules per side for this version.
    pub const fn modules_per_side(&self) -> usize {
        4 * self.version + BASE_MODULES
    }
    /// Number of modules per side including the quiet zone.
    pub const fn side_with_border(&self) -> usize {
        self.modules_per_side() + 2 * self.border
    }

    /// Set the symbol version
    pub fn set_version(mut self, version: usize) -> SymbolOptions {
        self.version = version;
        self
    }
    /// Set the error correction level
    pub fn set_ecc_level(mut self, ecc_level: EccLevel) -> SymbolOptions {
        self.ecc_level = ecc_level;
        self
    }
    /// Set the number of pixels one module occupies per side
    pub fn set_box_size(mut self, box_size: usize) -> SymbolOptions {
        self.box_size = box_size;
        self
    }
    /// Set the quiet zone width in modules
    pub fn set_border(mut self, border: usize) -> SymbolOptions {
        self.border = border;
        self
    }

    /// Confirm the options describe a renderable symbol.
    pub fn validate(&self) -> Result<(), CoreErrors> {
        if self.version < 1 || self.version > MAX_VERSION {
            return Err(CoreErrors::VersionOutOfRange(self.version, MAX_VERSION));
        }
        if self.box_size == 0 {
            return Err(CoreErrors::ZeroBoxSize);
        }
        Ok(())
    }
}

/// Playback configuration for the assembled artifact.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct AnimationOptions {
    fps: usize
}

impl Default for AnimationOptions {
    fn default() -> AnimationOptions {
        AnimationOptions { fps: 5 }
    }
}

impl AnimationOptions {
    /// Frames shown per second when the artifact plays.
    pub const fn fps(&self) -> usize {
        self.fps
    }
    /// Delay between successive frames in milliseconds.
    ///
    /// Integer division, the remainder of `1000 / fps` is dropped.
    pub const fn frame_delay_ms(&self) -> usize {
        1000 / self.fps
    }

    /// Set the frame rate
    pub fn set_fps(mut self, fps: usize) -> AnimationOptions {
        self.fps = fps;
        self
    }

    /// Confirm the frame rate is in the supported range.
    pub fn validate(&self) -> Result<(), CoreErrors> {
        if self.fps < 1 || self.fps > MAX_FPS {
            return Err(CoreErrors::FpsOutOfRange(self.fps, MAX_FPS));
        }
        Ok(())
    }
}

/// Options handed to an animation encoder.
///
/// Carries the raster dimensions shared by every frame plus the
/// playback metadata the container stores.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct EncoderOptions {
    width:        usize,
    height:       usize,
    delay_ms:     usize,
    loop_forever: bool
}

impl Default for EncoderOptions {
    fn default() -> EncoderOptions {
        EncoderOptions {
            width:        0,
            height:       0,
            delay_ms:     100,
            loop_forever: true
        }
    }
}

impl EncoderOptions {
    /// Width in pixels of every frame.
    pub const fn width(&self) -> usize {
        self.width
    }
    /// Height in pixels of every frame.
    pub const fn height(&self) -> usize {
        self.height
    }
    /// Uniform inter-frame delay in milliseconds.
    pub const fn delay_ms(&self) -> usize {
        self.delay_ms
    }
    /// Whether playback restarts from the first frame after the last.
    pub const fn loop_forever(&self) -> bool {
        self.loop_forever
    }

    /// Set the frame width in pixels
    pub fn set_width(mut self, width: usize) -> EncoderOptions {
        self.width = width;
        self
    }
    /// Set the frame height in pixels
    pub fn set_height(mut self, height: usize) -> EncoderOptions {
        self.height = height;
        self
    }
    /// Set the inter-frame delay in milliseconds
    pub fn set_delay_ms(mut self, delay_ms: usize) -> EncoderOptions {
        self.delay_ms = delay_ms;
        self
    }
    /// Set whether the animation loops forever
    pub fn set_loop_forever(mut self, loop_forever: bool) -> EncoderOptions {
        self.loop_forever = loop_forever;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_defaults() {
        let options = SymbolOptions::default();
        assert_eq!(options.version(), 3);
        assert_eq!(options.ecc_level(), EccLevel::L);
        assert_eq!(options.box_size(), 10);
        assert_eq!(options.border(), 4);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_symbol_geometry() {
        let options = SymbolOptions::default().set_version(1).set_border(4);
        assert_eq!(options.modules_per_side(), 21);
        assert_eq!(options.side_with_border(), 29);

        let options = options.set_version(40);
        assert_eq!(options.modules_per_side(), 177);
    }

    #[test]
    fn test_symbol_validation_rejects_bad_input() {
        assert!(SymbolOptions::default().set_version(0).validate().is_err());
        assert!(SymbolOptions::default().set_version(41).validate().is_err());
        assert!(SymbolOptions::default().set_box_size(0).validate().is_err());
    }

    #[test]
    fn test_frame_delay() {
        assert_eq!(AnimationOptions::default().fps(), 5);
        assert_eq!(AnimationOptions::default().frame_delay_ms(), 200);
        assert_eq!(
            AnimationOptions::default().set_fps(20).frame_delay_ms(),
            50
        );
        assert_eq!(AnimationOptions::default().set_fps(1).frame_delay_ms(), 1000);
        assert_eq!(AnimationOptions::default().set_fps(3).frame_delay_ms(), 333);
    }

    #[test]
    fn test_fps_validation() {
        assert!(AnimationOptions::default().set_fps(0).validate().is_err());
        assert!(AnimationOptions::default().set_fps(21).validate().is_err());
        assert!(AnimationOptions::default().set_fps(20).validate().is_ok());
    }
}
