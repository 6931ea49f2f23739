/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Chunking and sequence assembly
//!
//! The builder splits a payload into capacity sized chunks, renders
//! one frame per chunk and assembles the frames into a single looping
//! animated GIF. Chunks partition the payload exactly, concatenating
//! them in order reproduces the input byte for byte, which is what
//! makes the artifact decodable at all.
//!
//! Everything is single pass and held in memory: the whole payload is
//! read before the first frame is rendered and the whole frame list
//! exists before the first byte of the artifact is written. That keeps
//! the pipeline trivial and is a deliberate scaling limit, the tool
//! targets files small enough to survive a camera link in reasonable
//! time anyway.
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{debug, info, trace};
use qrrr_core::options::{AnimationOptions, EncoderOptions, SymbolOptions};
use qrrr_gif::GifEncoder;

use crate::errors::QrrrErrors;
use crate::frame::FrameFactory;
use crate::pixmap::Pixmap;

/// Suffix appended to the source base name to form the artifact name
pub const ARTIFACT_SUFFIX: &str = ".qrrr.gif";

/// The ordered frames of one animation plus playback metadata.
///
/// Built once by [`SequenceBuilder::build_sequence`], consumed by
/// [`SequenceBuilder::write`], then discarded.
pub struct FrameSequence {
    frames:       Vec<Pixmap>,
    delay_ms:     usize,
    loop_forever: bool
}

impl FrameSequence {
    /// The frames in playback order
    pub fn frames(&self) -> &[Pixmap] {
        &self.frames
    }
    /// Uniform delay between frames in milliseconds
    pub const fn delay_ms(&self) -> usize {
        self.delay_ms
    }
    /// Whether playback restarts after the last frame
    pub const fn loops_forever(&self) -> bool {
        self.loop_forever
    }
    /// Number of frames in the sequence
    pub fn len(&self) -> usize {
        self.frames.len()
    }
    /// True when the sequence holds no frames
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Progress shown on frame `index` of `num_chunks`.
///
/// The first frame shows `0.0` and the last exactly `1.0`. A single
/// frame sequence shows `1.0`, the lone frame carries the whole
/// payload, so the general formula's division by zero is sidestepped
/// deliberately rather than propagated.
fn progress_for(index: usize, num_chunks: usize) -> f64 {
    if num_chunks > 1 {
        index as f64 / (num_chunks - 1) as f64
    } else {
        1.0
    }
}

/// Drives the whole pipeline from payload bytes to a written artifact.
///
/// Construction validates the configuration eagerly, a builder that
/// exists can only fail on input output or on internal consistency
/// checks. There are no retries anywhere, the first error aborts the
/// build.
pub struct SequenceBuilder {
    factory:  FrameFactory,
    delay_ms: usize
}

impl SequenceBuilder {
    /// Create a new builder for the given symbol geometry and
    /// playback configuration
    pub fn new(
        symbol: SymbolOptions, animation: AnimationOptions
    ) -> Result<SequenceBuilder, QrrrErrors> {
        animation.validate()?;

        let factory = FrameFactory::new(symbol)?;

        Ok(SequenceBuilder {
            factory,
            delay_ms: animation.frame_delay_ms()
        })
    }

    /// Maximum number of payload bytes one frame can carry
    pub const fn chunk_size(&self) -> usize {
        self.factory.chunk_size()
    }

    /// Split the payload into consecutive chunks of exactly
    /// `chunk_size` bytes, the last chunk holding the remainder.
    ///
    /// Concatenating the returned slices in order reproduces `data`
    /// exactly. An empty payload still yields one empty chunk so a
    /// run always produces a playable artifact.
    pub fn chunk<'data>(&self, data: &'data [u8]) -> Vec<&'data [u8]> {
        if data.is_empty() {
            return vec![data];
        }
        data.chunks(self.factory.chunk_size()).collect()
    }

    /// Render every chunk of the payload into its frame, in order.
    pub fn build_sequence(&self, data: &[u8]) -> Result<FrameSequence, QrrrErrors> {
        let chunks = self.chunk(data);
        let num_chunks = chunks.len();

        info!(
            "Rendering {} bytes as {} frame(s) of up to {} bytes",
            data.len(),
            num_chunks,
            self.factory.chunk_size()
        );
        let mut frames = Vec::with_capacity(num_chunks);

        for (index, chunk) in chunks.iter().enumerate() {
            let progress = progress_for(index, num_chunks);

            trace!(
                "Frame {}/{}: {} bytes, progress {:.3}",
                index + 1,
                num_chunks,
                chunk.len(),
                progress
            );
            frames.push(self.factory.compose(chunk, progress)?);
        }
        Ok(FrameSequence {
            frames,
            delay_ms: self.delay_ms,
            loop_forever: true
        })
    }

    /// Serialize a sequence as one animated GIF at the destination.
    ///
    /// Frame order is preserved, every frame gets the same delay and
    /// the animation loops forever. A partially written file is not
    /// cleaned up on error.
    pub fn write<P: AsRef<Path>>(
        &self, sequence: &FrameSequence, destination: P
    ) -> Result<(), QrrrErrors> {
        let (width, height) = sequence
            .frames()
            .first()
            .map(|frame| (frame.width(), frame.height()))
            .unwrap_or((0, 0));

        let options = EncoderOptions::default()
            .set_width(width)
            .set_height(height)
            .set_delay_ms(sequence.delay_ms())
            .set_loop_forever(sequence.loops_forever());

        let views: Vec<&[u8]> = sequence.frames().iter().map(|frame| frame.data()).collect();

        let file = File::create(destination.as_ref())?;
        let mut writer = BufWriter::new(file);

        let written = GifEncoder::new(&views, options).encode(&mut writer)?;
        writer.flush()?;

        debug!(
            "Wrote {} frame(s), {} bytes, to {:?}",
            sequence.len(),
            written,
            destination.as_ref()
        );
        Ok(())
    }

    /// Convert a whole file into an animated artifact.
    ///
    /// Reads the source into memory, renders the sequence and writes
    /// `<source base name>.qrrr.gif` into the current working
    /// directory.
    ///
    /// # Returns
    /// The absolute path of the generated artifact
    pub fn build<P: AsRef<Path>>(&self, source: P) -> Result<PathBuf, QrrrErrors> {
        let source = source.as_ref();

        if !source.is_file() {
            return Err(QrrrErrors::SourceNotFound(source.to_path_buf()));
        }
        let data = std::fs::read(source)?;
        let sequence = self.build_sequence(&data)?;

        // base name with the final extension stripped, the suffix
        // makes the artifact discoverable next to the source name
        let mut name = source
            .file_stem()
            .unwrap_or_default()
            .to_os_string();
        name.push(ARTIFACT_SUFFIX);

        let outfile = PathBuf::from(name);
        self.write(&sequence, &outfile)?;

        Ok(std::path::absolute(outfile)?)
    }
}

#[cfg(test)]
mod tests {
    use qrrr_core::ecc::{capacity, EccLevel};

    use super::*;
    use crate::pixmap::{BLACK, WHITE};

    fn builder(version: usize, level: EccLevel, fps: usize) -> SequenceBuilder {
        SequenceBuilder::new(
            SymbolOptions::default().set_version(version).set_ecc_level(level),
            AnimationOptions::default().set_fps(fps)
        )
        .unwrap()
    }

    fn payload(len: usize) -> Vec<u8> {
        let mut state = 0x1234_5678_u32;
        (0..len)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                (state >> 8) as u8
            })
            .collect()
    }

    #[test]
    fn test_chunks_partition_payload() {
        let builder = builder(1, EccLevel::L, 5);
        assert_eq!(builder.chunk_size(), 17);

        let data = payload(1000);
        let chunks = builder.chunk(&data);

        assert_eq!(chunks.len(), 1000_usize.div_ceil(17));

        let rejoined: Vec<u8> = chunks.concat();
        assert_eq!(rejoined, data);
    }

    #[test]
    fn test_exact_multiple_gives_full_chunks() {
        let builder = builder(1, EccLevel::L, 5);
        let data = payload(17 * 4);

        let chunks = builder.chunk(&data);
        assert_eq!(chunks.len(), 4);
        assert!(chunks.iter().all(|chunk| chunk.len() == 17));
    }

    #[test]
    fn test_half_chunk_remainder() {
        // version 1 at level M holds 14 bytes, 2.5 chunks of payload
        // must come out as two full chunks and one half chunk
        let builder = builder(1, EccLevel::M, 5);
        assert_eq!(builder.chunk_size(), 14);

        let data = payload(35);
        let chunks = builder.chunk(&data);

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].len(), 14);
        assert_eq!(chunks[1].len(), 14);
        assert_eq!(chunks[2].len(), 7);
    }

    #[test]
    fn test_empty_payload_yields_one_chunk() {
        let builder = builder(1, EccLevel::L, 5);
        let chunks = builder.chunk(&[]);

        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].is_empty());
    }

    #[test]
    fn test_full_capacity_is_one_chunk() {
        let builder = builder(40, EccLevel::H, 5);
        let size = capacity(EccLevel::H, 40).unwrap();

        let data = payload(size);
        let chunks = builder.chunk(&data);
        assert_eq!(chunks.len(), 1);
    }

    #[test]
    fn test_progress_policy() {
        assert_eq!(progress_for(0, 1), 1.0);

        assert_eq!(progress_for(0, 2), 0.0);
        assert_eq!(progress_for(1, 2), 1.0);

        assert_eq!(progress_for(0, 3), 0.0);
        assert_eq!(progress_for(1, 3), 0.5);
        assert_eq!(progress_for(2, 3), 1.0);

        // strictly increasing across a longer run
        let steps: Vec<f64> = (0..7).map(|i| progress_for(i, 7)).collect();
        assert_eq!(steps[0], 0.0);
        assert_eq!(steps[6], 1.0);
        assert!(steps.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_sequence_frames_and_bars() {
        let builder = builder(1, EccLevel::M, 5);
        let sequence = builder.build_sequence(&payload(35)).unwrap();

        assert_eq!(sequence.len(), 3);
        assert!(sequence.loops_forever());
        assert_eq!(sequence.delay_ms(), 200);

        // all frames share one geometry
        let first = &sequence.frames()[0];
        for frame in sequence.frames() {
            assert_eq!(frame.width(), first.width());
            assert_eq!(frame.height(), first.height());
        }

        // first frame shows an empty bar, last frame a full one;
        // the bar's top row sits right below the 290 px symbol
        let bar_row = 290;
        let fill_start = 40;
        assert_eq!(first.pixel(fill_start, bar_row), Some(WHITE));

        let last = &sequence.frames()[2];
        assert_eq!(last.pixel(fill_start, bar_row), Some(BLACK));
        assert_eq!(last.pixel(fill_start + 20 * 10 + 9, bar_row), Some(BLACK));
    }

    #[test]
    fn test_single_frame_sequence_is_complete() {
        let builder = builder(1, EccLevel::L, 5);
        let sequence = builder.build_sequence(b"tiny").unwrap();

        assert_eq!(sequence.len(), 1);
        // the lone frame shows a full bar
        assert_eq!(sequence.frames()[0].pixel(40, 290), Some(BLACK));
    }

    #[test]
    fn test_empty_payload_builds_one_full_frame() {
        let builder = builder(1, EccLevel::L, 5);
        let sequence = builder.build_sequence(&[]).unwrap();

        assert_eq!(sequence.len(), 1);
        assert_eq!(sequence.frames()[0].pixel(40, 290), Some(BLACK));
    }

    #[test]
    fn test_frame_delay_follows_fps() {
        assert_eq!(builder(1, EccLevel::L, 20).delay_ms, 50);
        assert_eq!(builder(1, EccLevel::L, 1).delay_ms, 1000);
    }

    #[test]
    fn test_rejects_invalid_configuration() {
        assert!(SequenceBuilder::new(
            SymbolOptions::default().set_version(0),
            AnimationOptions::default()
        )
        .is_err());

        assert!(SequenceBuilder::new(
            SymbolOptions::default(),
            AnimationOptions::default().set_fps(0)
        )
        .is_err());
    }

    #[test]
    fn test_write_produces_gif() {
        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("artifact.qrrr.gif");

        let builder = builder(1, EccLevel::L, 5);
        let sequence = builder.build_sequence(&payload(40)).unwrap();
        builder.write(&sequence, &destination).unwrap();

        let written = std::fs::read(&destination).unwrap();
        assert!(written.starts_with(b"GIF89a"));
        assert_eq!(*written.last().unwrap(), 0x3B);
    }

    #[test]
    fn test_missing_source_is_rejected() {
        let builder = builder(1, EccLevel::L, 5);

        assert!(matches!(
            builder.build("no/such/file.bin"),
            Err(QrrrErrors::SourceNotFound(_))
        ));
    }
}
