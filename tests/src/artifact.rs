/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fs::{read, write};

use qrrr_core::ecc::EccLevel;
use qrrr_core::options::{AnimationOptions, SymbolOptions};
use qrrr_image::sequence::SequenceBuilder;

use crate::parse_artifact;

fn builder(version: usize, level: EccLevel, fps: usize) -> SequenceBuilder {
    SequenceBuilder::new(
        SymbolOptions::default().set_version(version).set_ecc_level(level),
        AnimationOptions::default().set_fps(fps)
    )
    .unwrap()
}

fn payload(len: usize) -> Vec<u8> {
    (0..len).map(|at| (at * 131 + 7) as u8).collect()
}

#[test]
fn test_artifact_has_one_frame_per_chunk() {
    let dir = tempfile::tempdir().unwrap();
    let destination = dir.path().join("three-chunks.qrrr.gif");

    // version 1 level M holds 14 bytes per frame, 35 bytes is two
    // full chunks and one half chunk
    let builder = builder(1, EccLevel::M, 5);
    let sequence = builder.build_sequence(&payload(35)).unwrap();
    builder.write(&sequence, &destination).unwrap();

    let summary = parse_artifact(&read(&destination).unwrap());

    assert_eq!(summary.frames, 3);
    assert!(summary.loops_forever);
    assert_eq!(summary.delays, vec![20, 20, 20]);

    // canvas matches the frames that went in
    assert_eq!(summary.width, sequence.frames()[0].width());
    assert_eq!(summary.height, sequence.frames()[0].height());
}

#[test]
fn test_single_chunk_artifact_still_loops() {
    let dir = tempfile::tempdir().unwrap();
    let destination = dir.path().join("single.qrrr.gif");

    let builder = builder(1, EccLevel::L, 5);
    let sequence = builder.build_sequence(b"one frame").unwrap();
    builder.write(&sequence, &destination).unwrap();

    let summary = parse_artifact(&read(&destination).unwrap());

    assert_eq!(summary.frames, 1);
    assert!(summary.loops_forever);
}

#[test]
fn test_delay_tracks_frame_rate() {
    let dir = tempfile::tempdir().unwrap();

    for (fps, expected_cs) in [(20, 5), (1, 100)] {
        let destination = dir.path().join(format!("fps-{fps}.qrrr.gif"));

        let builder = builder(1, EccLevel::L, fps);
        let sequence = builder.build_sequence(&payload(40)).unwrap();
        builder.write(&sequence, &destination).unwrap();

        let summary = parse_artifact(&read(&destination).unwrap());
        assert!(summary.delays.iter().all(|&delay| delay == expected_cs));
    }
}

#[test]
fn test_output_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first.qrrr.gif");
    let second = dir.path().join("second.qrrr.gif");

    let builder = builder(2, EccLevel::Q, 10);
    let sequence = builder.build_sequence(&payload(100)).unwrap();

    builder.write(&sequence, &first).unwrap();
    builder.write(&sequence, &second).unwrap();

    assert_eq!(read(&first).unwrap(), read(&second).unwrap());
}

#[test]
fn test_build_names_artifact_after_source() {
    let dir = tempfile::tempdir().unwrap();

    let source = dir.path().join("sample.bin");
    write(&source, payload(100)).unwrap();

    // build drops the artifact into the working directory
    std::env::set_current_dir(dir.path()).unwrap();

    let builder = builder(1, EccLevel::L, 5);
    let artifact = builder.build(&source).unwrap();

    assert!(artifact.is_absolute());
    assert!(artifact
        .file_name()
        .unwrap()
        .to_string_lossy()
        .ends_with("sample.qrrr.gif"));

    // 100 bytes over 17 byte chunks is six frames
    let summary = parse_artifact(&read(&artifact).unwrap());
    assert_eq!(summary.frames, 6);
}
