/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Composition of single frames
//!
//! A frame is one QR symbol stacked above a progress bar. The symbol
//! carries one chunk of the payload, the bar shows how far into the
//! sequence that chunk sits, so a human pointing a camera at the
//! animation can tell at a glance how much of a full cycle they have
//! captured.
//!
//! Layout of one frame, all sizes in modules scaled by the box size:
//!
//! ```text
//! ┌───────────────────────────┐
//! │  quiet zone               │
//! │  ┌─────────────────────┐  │
//! │  │                     │  │
//! │  │    symbol modules   │  │
//! │  │                     │  │
//! │  └─────────────────────┘  │
//! │                           │ <- shared border, no extra bar top
//! │  ████████████░░░░░░░░░░   │
//! │                           │
//! └───────────────────────────┘
//! ```
use qrcode::{Color, EcLevel, QrCode, Version};
use qrrr_core::ecc::{capacity, EccLevel};
use qrrr_core::options::SymbolOptions;

use crate::errors::QrrrErrors;
use crate::pixmap::{Pixmap, BLACK, WHITE};

fn ec_level(level: EccLevel) -> EcLevel {
    match level {
        EccLevel::L => EcLevel::L,
        EccLevel::M => EcLevel::M,
        EccLevel::Q => EcLevel::Q,
        EccLevel::H => EcLevel::H
    }
}

/// Renders chunks of payload into frames.
///
/// A factory is built once per run from validated symbol options and
/// holds the derived chunk capacity for its lifetime. Rendering keeps
/// no state between calls, two frames built from the same chunk and
/// progress are identical, and distinct chunks may safely be rendered
/// from different threads.
pub struct FrameFactory {
    options:    SymbolOptions,
    chunk_size: usize
}

impl FrameFactory {
    /// Create a new factory for the given symbol geometry.
    ///
    /// # Arguments
    /// - `options`: Symbol version, error correction level, box size
    ///   and quiet zone width
    ///
    /// # Returns
    /// The factory, or a configuration error if the options do not
    /// describe a renderable symbol
    pub fn new(options: SymbolOptions) -> Result<FrameFactory, QrrrErrors> {
        options.validate()?;

        let chunk_size = capacity(options.ecc_level(), options.version())?;

        Ok(FrameFactory {
            options,
            chunk_size
        })
    }

    /// Maximum number of payload bytes one frame can carry
    pub const fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Symbol options this factory renders with
    pub const fn options(&self) -> &SymbolOptions {
        &self.options
    }

    /// Render one chunk and its progress into a complete frame,
    /// symbol on top, progress bar directly beneath, both left
    /// aligned.
    ///
    /// # Arguments
    /// - `chunk`: Payload slice, at most [`chunk_size`](Self::chunk_size) bytes
    /// - `progress`: Position of this frame in the sequence, `0.0` for
    ///   the first frame up to `1.0` for the last
    pub fn compose(&self, chunk: &[u8], progress: f64) -> Result<Pixmap, QrrrErrors> {
        let symbol = self.render_symbol(chunk)?;
        let bar = self.render_progress_bar(progress);

        let mut frame = Pixmap::new(symbol.width(), symbol.height() + bar.height(), WHITE);

        frame.paste(&symbol, 0, 0);
        frame.paste(&bar, 0, symbol.height());

        Ok(frame)
    }

    /// Encode one chunk into a symbol and rasterise it.
    ///
    /// The result is square with `box_size * (4 * version + 2 * border + 17)`
    /// pixels per side, identical for every call with the same options.
    fn render_symbol(&self, chunk: &[u8]) -> Result<Pixmap, QrrrErrors> {
        if chunk.len() > self.chunk_size {
            return Err(QrrrErrors::ChunkTooLarge(chunk.len(), self.chunk_size));
        }
        let version = self.options.version();

        let code = QrCode::with_version(
            chunk,
            Version::Normal(version as i16),
            ec_level(self.options.ecc_level())
        )?;

        let modules = code.width();
        let box_size = self.options.box_size();
        let border = self.options.border();

        let side = box_size * (modules + 2 * border);
        let mut symbol = Pixmap::new(side, side, WHITE);

        for (position, module) in code.to_colors().iter().enumerate() {
            if *module == Color::Dark {
                let mx = position % modules;
                let my = position / modules;

                symbol.fill_rect(
                    box_size * (border + mx),
                    box_size * (border + my),
                    box_size,
                    box_size,
                    BLACK
                );
            }
        }
        Ok(symbol)
    }

    /// Draw the progress bar for one frame.
    ///
    /// The bar is as wide as the symbol image and scales its height
    /// with the version. Padding sits on the left, right and bottom
    /// edges only, the top edge shares the symbol's bottom quiet zone.
    /// The filled part grows from the left and covers
    /// `floor(progress * available)` modules of the width left between
    /// the paddings, nothing is drawn at zero.
    fn render_progress_bar(&self, progress: f64) -> Pixmap {
        let options = &self.options;

        let im_width = options.side_with_border();
        let im_height = (4 * options.version() / 10).max(2) + options.border();

        let available = im_width - 2 * options.border();
        let bar_width = (progress * available as f64) as usize;
        let bar_height = im_height - options.border();

        let box_size = options.box_size();
        let mut bar = Pixmap::new(box_size * im_width, box_size * im_height, WHITE);

        if bar_width > 0 {
            bar.fill_rect(
                box_size * options.border(),
                0,
                box_size * bar_width,
                box_size * bar_height,
                BLACK
            );
        }
        bar
    }
}
