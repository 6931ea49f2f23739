/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Encoding support for animated GIF images
use std::collections::{BTreeMap, HashMap};
use std::io::Write;

use qrrr_core::options::EncoderOptions;

use crate::errors::GifEncoderErrors;

/// Largest width or height the logical screen descriptor can store.
const MAX_DIMENSION: usize = u16::MAX as usize;
/// Entries one global color table can hold.
const MAX_COLORS: usize = 256;
/// First code value that no longer fits the 12-bit LZW code limit.
const MAX_LZW_CODE: u16 = 1 << 12;

const EXTENSION_INTRODUCER: u8 = 0x21;
const GRAPHIC_CONTROL_LABEL: u8 = 0xF9;
const APPLICATION_LABEL: u8 = 0xFF;
const IMAGE_SEPARATOR: u8 = 0x2C;
const TRAILER: u8 = 0x3B;

/// An animated GIF encoder
///
/// The encoder's entry point is `new` which takes the ordered frames
/// to write, each an RGB interleaved buffer of exactly
/// `width * height * 3` bytes as configured in the options.
///
/// A single global color table is built from the distinct colors
/// across all frames, so the whole sequence may use at most 256
/// distinct colors.
///
/// # Example
/// - Encode a two frame looping animation
/// ```
/// use qrrr_core::options::EncoderOptions;
/// use qrrr_gif::GifEncoder;
///
/// let black = [0_u8; 2 * 2 * 3];
/// let white = [255_u8; 2 * 2 * 3];
/// let frames: [&[u8]; 2] = [&black, &white];
///
/// let options = EncoderOptions::default()
///     .set_width(2)
///     .set_height(2)
///     .set_delay_ms(200)
///     .set_loop_forever(true);
///
/// let mut sink = vec![];
/// GifEncoder::new(&frames, options).encode(&mut sink).unwrap();
/// assert!(sink.starts_with(b"GIF89a"));
/// ```
pub struct GifEncoder<'a> {
    frames:  &'a [&'a [u8]],
    options: EncoderOptions
}

struct Palette {
    /// Colors in index order
    table:  Vec<[u8; 3]>,
    /// Reverse lookup from color to table index
    lookup: BTreeMap<[u8; 3], u8>,
    /// Bits needed to address the table, at least 1
    bits:   u32
}

impl<'a> GifEncoder<'a> {
    /// Create a new encoder which will encode the given frames,
    /// in order, with the dimensions and playback metadata contained
    /// in options
    pub fn new(frames: &'a [&'a [u8]], options: EncoderOptions) -> GifEncoder<'a> {
        GifEncoder { frames, options }
    }

    /// Encode the frames into the sink, returning the number of
    /// bytes written or an error if anything occurs
    pub fn encode<W: Write>(&self, sink: W) -> Result<usize, GifEncoderErrors> {
        if self.frames.is_empty() {
            return Err(GifEncoderErrors::NoFrames);
        }
        let (width, height) = (self.options.width(), self.options.height());

        if width > MAX_DIMENSION {
            return Err(GifEncoderErrors::TooLargeDimensions(
                "width",
                MAX_DIMENSION,
                width
            ));
        }
        if height > MAX_DIMENSION {
            return Err(GifEncoderErrors::TooLargeDimensions(
                "height",
                MAX_DIMENSION,
                height
            ));
        }
        let expected = width * height * 3;

        for frame in self.frames {
            if frame.len() != expected {
                return Err(GifEncoderErrors::WrongFrameSize(expected, frame.len()));
            }
        }
        let palette = self.build_palette()?;

        let mut stream = CountingWriter::new(sink);

        self.encode_headers(&mut stream, &palette)?;

        for frame in self.frames {
            self.encode_frame(&mut stream, &palette, frame)?;
        }
        stream.write_all(&[TRAILER])?;

        Ok(stream.bytes_written())
    }

    /// Collect the distinct colors across all frames into one global
    /// color table, assigning indices in first-seen order
    fn build_palette(&self) -> Result<Palette, GifEncoderErrors> {
        let mut lookup: BTreeMap<[u8; 3], u8> = BTreeMap::new();
        let mut table: Vec<[u8; 3]> = Vec::new();

        for frame in self.frames {
            for pixel in frame.chunks_exact(3) {
                let color = [pixel[0], pixel[1], pixel[2]];

                if !lookup.contains_key(&color) {
                    if table.len() == MAX_COLORS {
                        return Err(GifEncoderErrors::TooManyColors(table.len() + 1));
                    }
                    lookup.insert(color, table.len() as u8);
                    table.push(color);
                }
            }
        }
        let mut bits = 1;

        while (1 << bits) < table.len() {
            bits += 1;
        }
        Ok(Palette {
            table,
            lookup,
            bits
        })
    }

    fn encode_headers<W: Write>(
        &self, stream: &mut CountingWriter<W>, palette: &Palette
    ) -> Result<(), GifEncoderErrors> {
        stream.write_all(b"GIF89a")?;

        // logical screen descriptor
        stream.write_all(&(self.options.width() as u16).to_le_bytes())?;
        stream.write_all(&(self.options.height() as u16).to_le_bytes())?;

        // global color table present, 8 bits per primary, table size
        // stored as the exponent minus one
        let size_field = (palette.bits - 1) as u8;
        stream.write_all(&[0x80 | 0x70 | size_field, 0, 0])?;

        // the table on disk is padded to the power of two the size
        // field promises
        let padded_len = 1_usize << palette.bits;

        for entry in 0..padded_len {
            let color = palette.table.get(entry).unwrap_or(&[0, 0, 0]);
            stream.write_all(color)?;
        }

        if self.options.loop_forever() {
            // NETSCAPE2.0 application extension, loop count zero
            // means repeat forever
            stream.write_all(&[EXTENSION_INTRODUCER, APPLICATION_LABEL, 0x0B])?;
            stream.write_all(b"NETSCAPE2.0")?;
            stream.write_all(&[0x03, 0x01, 0x00, 0x00, 0x00])?;
        }
        Ok(())
    }

    fn encode_frame<W: Write>(
        &self, stream: &mut CountingWriter<W>, palette: &Palette, frame: &[u8]
    ) -> Result<(), GifEncoderErrors> {
        // graphic control extension carrying the delay, disposal mode
        // keeps the frame in place until the next one replaces it
        let delay_cs = (self.options.delay_ms() / 10).min(MAX_DIMENSION) as u16;

        stream.write_all(&[EXTENSION_INTRODUCER, GRAPHIC_CONTROL_LABEL, 0x04, 0x04])?;
        stream.write_all(&delay_cs.to_le_bytes())?;
        stream.write_all(&[0x00, 0x00])?;

        // image descriptor, every frame covers the whole canvas
        stream.write_all(&[IMAGE_SEPARATOR])?;
        stream.write_all(&[0x00, 0x00, 0x00, 0x00])?;
        stream.write_all(&(self.options.width() as u16).to_le_bytes())?;
        stream.write_all(&(self.options.height() as u16).to_le_bytes())?;
        stream.write_all(&[0x00])?;

        // map pixels to table indices, the palette was built from
        // these exact frames so every color is present
        let indices: Vec<u8> = frame
            .chunks_exact(3)
            .map(|pixel| palette.lookup[&[pixel[0], pixel[1], pixel[2]]])
            .collect();

        let min_code_size = palette.bits.max(2) as u8;
        let compressed = lzw_compress(&indices, min_code_size);

        stream.write_all(&[min_code_size])?;

        for block in compressed.chunks(255) {
            stream.write_all(&[block.len() as u8])?;
            stream.write_all(block)?;
        }
        stream.write_all(&[0x00])?;

        Ok(())
    }
}

/// Writer wrapper tracking how many bytes passed through it
struct CountingWriter<W: Write> {
    inner:   W,
    written: usize
}

impl<W: Write> CountingWriter<W> {
    fn new(inner: W) -> CountingWriter<W> {
        CountingWriter { inner, written: 0 }
    }

    fn write_all(&mut self, buf: &[u8]) -> Result<(), GifEncoderErrors> {
        self.inner.write_all(buf)?;
        self.written += buf.len();
        Ok(())
    }

    fn bytes_written(&self) -> usize {
        self.written
    }
}

/// Bit packer for LZW codes, least significant bit first as GIF
/// requires
struct BitWriter {
    out:   Vec<u8>,
    acc:   u32,
    nbits: u32
}

impl BitWriter {
    fn new() -> BitWriter {
        BitWriter {
            out:   Vec::new(),
            acc:   0,
            nbits: 0
        }
    }

    fn write(&mut self, code: u16, width: u32) {
        self.acc |= u32::from(code) << self.nbits;
        self.nbits += width;

        while self.nbits >= 8 {
            self.out.push(self.acc as u8);
            self.acc >>= 8;
            self.nbits -= 8;
        }
    }

    fn finish(mut self) -> Vec<u8> {
        if self.nbits > 0 {
            self.out.push(self.acc as u8);
        }
        self.out
    }
}

/// Compress index data with the GIF variant of LZW.
///
/// Code widths grow from `min_code_size + 1` up to 12 bits in lockstep
/// with the table the decoder rebuilds, a clear code resets the table
/// once it is full.
fn lzw_compress(data: &[u8], min_code_size: u8) -> Vec<u8> {
    let clear = 1_u16 << min_code_size;
    let eoi = clear + 1;

    let mut writer = BitWriter::new();
    let mut code_size = u32::from(min_code_size) + 1;
    let mut table: HashMap<(u16, u8), u16> = HashMap::new();
    let mut next_code = eoi + 1;

    writer.write(clear, code_size);

    let mut iter = data.iter();

    let Some(&first) = iter.next() else {
        writer.write(eoi, code_size);
        return writer.finish();
    };
    let mut cur = u16::from(first);

    for &k in iter {
        if let Some(&code) = table.get(&(cur, k)) {
            cur = code;
            continue;
        }
        writer.write(cur, code_size);

        if next_code < MAX_LZW_CODE {
            table.insert((cur, k), next_code);
            // the decoder widens its reads one code after its table
            // reaches the current width limit, mirror that exactly
            if u32::from(next_code) == (1 << code_size) {
                code_size += 1;
            }
            next_code += 1;
        } else {
            writer.write(clear, code_size);
            table.clear();
            code_size = u32::from(min_code_size) + 1;
            next_code = eoi + 1;
        }
        cur = u16::from(k);
    }
    writer.write(cur, code_size);
    writer.write(eoi, code_size);
    writer.finish()
}
