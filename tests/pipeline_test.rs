//! End-to-end checks through the public API.
//!
//! Each test writes real files into a temp dir and runs the full
//! stat → plan → mode → score → write pipeline.

use std::path::Path;

use papercheck::io::{ChunkReader, FileChunkReader};
use papercheck::memory::{FixedUsage, MIB};
use papercheck::mode::Mode;
use papercheck::plan::ChunkPlan;
use papercheck::stream::{FilePair, stream_similarity};
use papercheck::{CheckConfig, CheckError, CheckRequest};

const ORIGINAL: &str = "今天是星期天，天气晴，今天晚上我要去看电影。";
const PLAGIARIZED: &str = "今天是周天，天气晴朗，我晚上要去看电影。";

fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("write fixture");
    path
}

fn request(dir: &Path, a: &str, b: &str) -> CheckRequest {
    CheckRequest {
        original: write(dir, "orig.txt", a),
        suspect: write(dir, "copy.txt", b),
        result: dir.join("ans.txt"),
    }
}

/// Budget small enough that any non-empty file streams.
fn streaming_config(chunk: u64) -> CheckConfig {
    CheckConfig {
        memory_limit_bytes: 4 * chunk,
        chunk_size_override: chunk,
    }
}

#[test]
fn test_whole_file_plagiarism_pair() {
    let dir = tempfile::tempdir().expect("tempdir");
    let req = request(dir.path(), ORIGINAL, PLAGIARIZED);

    let report = papercheck::run(&req, &CheckConfig::default(), &FixedUsage(0)).expect("run");

    assert_eq!(report.mode, Mode::WholeFile);
    assert!(report.similarity > 0.5 && report.similarity < 1.0);

    let written = std::fs::read_to_string(&req.result).expect("read result");
    assert_eq!(written, report.percentage());
    assert!(!written.ends_with('\n'));
}

#[test]
fn test_identical_files_agree_across_modes() {
    let dir = tempfile::tempdir().expect("tempdir");
    let text = "abcdefgh".repeat(64);
    let req = request(dir.path(), &text, &text);

    let whole = papercheck::run(&req, &CheckConfig::default(), &FixedUsage(0)).expect("whole");
    let streamed = papercheck::run(&req, &streaming_config(64), &FixedUsage(0)).expect("stream");

    assert_eq!(whole.mode, Mode::WholeFile);
    assert_eq!(streamed.mode, Mode::Streaming);
    assert_eq!(streamed.chunks_compared, 8);
    assert!((whole.similarity - streamed.similarity).abs() <= 0.02);
    assert_eq!(std::fs::read_to_string(&req.result).expect("read"), "100.00");
}

#[test]
fn test_streaming_close_to_whole_file_for_aligned_edits() {
    let dir = tempfile::tempdir().expect("tempdir");
    // One substitution per 100-byte block in both modes.
    let block_a = "x".repeat(99) + "a";
    let block_b = "x".repeat(99) + "b";
    let req = request(dir.path(), &block_a.repeat(20), &block_b.repeat(20));

    let whole = papercheck::run(&req, &CheckConfig::default(), &FixedUsage(0)).expect("whole");
    let streamed = papercheck::run(&req, &streaming_config(100), &FixedUsage(0)).expect("stream");

    assert!((whole.similarity - 0.99).abs() < 1e-9);
    assert!((streamed.similarity - 0.99).abs() < 1e-9);
}

#[test]
fn test_empty_files_are_identical() {
    let dir = tempfile::tempdir().expect("tempdir");
    let req = request(dir.path(), "", "");

    let report = papercheck::run(&req, &CheckConfig::default(), &FixedUsage(0)).expect("run");

    assert!((report.similarity - 1.0).abs() < f64::EPSILON);
    assert_eq!(std::fs::read_to_string(&req.result).expect("read"), "100.00");
}

#[test]
fn test_one_empty_file_scores_zero_in_both_modes() {
    let dir = tempfile::tempdir().expect("tempdir");
    let req = request(dir.path(), "some text", "");

    let whole = papercheck::run(&req, &CheckConfig::default(), &FixedUsage(0)).expect("whole");
    assert_eq!(whole.percentage(), "0.00");

    let streamed = papercheck::run(&req, &streaming_config(4), &FixedUsage(0)).expect("stream");
    assert_eq!(streamed.mode, Mode::Streaming);
    assert_eq!(streamed.percentage(), "0.00");
}

#[test]
fn test_missing_file_aborts_without_result() {
    let dir = tempfile::tempdir().expect("tempdir");
    let req = CheckRequest {
        original: write(dir.path(), "orig.txt", ORIGINAL),
        suspect: dir.path().join("missing.txt"),
        result: dir.path().join("ans.txt"),
    };

    let err = papercheck::run(&req, &CheckConfig::default(), &FixedUsage(0))
        .expect_err("missing input should fail");

    assert!(matches!(err, CheckError::Io { .. }));
    assert!(err.to_string().contains("missing.txt"));
    assert!(!req.result.exists());
}

#[test]
fn test_high_usage_forces_streaming() {
    let dir = tempfile::tempdir().expect("tempdir");
    let req = request(dir.path(), ORIGINAL, ORIGINAL);
    let config = CheckConfig::default();

    // Usage at the limit leaves nothing available.
    let report = papercheck::run(&req, &config, &FixedUsage(2048 * MIB)).expect("run");

    assert_eq!(report.mode, Mode::Streaming);
    assert_eq!(report.plan.chunk_size_bytes, 256 * 1024);
    assert_eq!(report.plan.batch_size, 1);
    assert_eq!(report.percentage(), "100.00");
}

#[test]
fn test_streaming_multibyte_text_never_splits_chars() {
    let dir = tempfile::tempdir().expect("tempdir");
    let a = write(dir.path(), "a.txt", ORIGINAL);
    let b = write(dir.path(), "b.txt", PLAGIARIZED);
    let pair = FilePair::stat(&a, &b).expect("stat");
    let plan = ChunkPlan {
        chunk_size_bytes: 7,
        batch_size: 3,
    };

    let out = stream_similarity(&FileChunkReader, &pair, plan).expect("stream");
    assert!(out.similarity > 0.0 && out.similarity < 1.0);

    let offsets: Vec<u64> = (0..pair.size1).step_by(7).collect();
    let chunks = FileChunkReader.read_chunks(&a, &offsets, 7).expect("read");
    assert_eq!(chunks.concat(), ORIGINAL);
}

#[test]
fn test_huge_chunk_override_on_tiny_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let req = request(dir.path(), "Hello World", "Hello World");
    let tib = 1024 * 1024 * MIB;
    let config = CheckConfig {
        memory_limit_bytes: 4 * tib,
        chunk_size_override: tib,
    };

    // Usage at the limit forces streaming with a 1 TiB window over 11 bytes.
    let report = papercheck::run(&req, &config, &FixedUsage(4 * tib)).expect("run");

    assert_eq!(report.mode, Mode::Streaming);
    assert_eq!(report.plan.chunk_size_bytes, tib);
    assert_eq!(report.chunks_compared, 1);
    assert_eq!(std::fs::read_to_string(&req.result).expect("read"), "100.00");
}
