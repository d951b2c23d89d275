//! Chunked similarity for file pairs too large to load whole.
//!
//! Both files are cut at the same byte offsets and each aligned pair of
//! windows is scored independently. The overall figure is the unweighted
//! mean of those scores, so it approximates rather than reproduces the
//! whole-file edit distance.
//!
//! ```text
//! round r:   file1  [c0][c1]..[c(b-1)]      offsets shared by both files,
//!            file2  [c0][c1]..[c(b-1)]      clamped to each file's end
//!                     |   |       |
//!                  similarity per pair  ->  ScoreAccumulator
//! ```

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::error::CheckResult;
use crate::io::{ChunkReader, file_size};
use crate::plan::ChunkPlan;
use crate::similarity::{ScoreAccumulator, similarity};

/// Two files and the sizes they had when the run started.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilePair {
    pub path1: PathBuf,
    pub path2: PathBuf,
    pub size1: u64,
    pub size2: u64,
}

impl FilePair {
    /// Stat both paths once.
    pub fn stat(path1: &Path, path2: &Path) -> CheckResult<Self> {
        Ok(Self {
            path1: path1.to_path_buf(),
            path2: path2.to_path_buf(),
            size1: file_size(path1)?,
            size2: file_size(path2)?,
        })
    }

    pub fn max_size(&self) -> u64 {
        self.size1.max(self.size2)
    }
}

/// Result of a streaming comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StreamOutcome {
    pub similarity: f64,
    pub chunks_compared: u64,
    pub rounds: u64,
}

/// Compare `pair` chunk by chunk according to `plan`.
///
/// Rounds run strictly in sequence: all reads for a round finish before its
/// scoring, and scoring finishes before the next round's reads. Pairs where
/// both windows are empty are skipped. Progress is logged after each round
/// and never feeds back into the score.
pub fn stream_similarity<R: ChunkReader + ?Sized>(
    reader: &R,
    pair: &FilePair,
    plan: ChunkPlan,
) -> CheckResult<StreamOutcome> {
    stream_similarity_with_progress(reader, pair, plan, |_| {})
}

/// Like [`stream_similarity`], calling `on_round` with the completed
/// percentage (0..=100, non-decreasing) after every round.
pub fn stream_similarity_with_progress<R, F>(
    reader: &R,
    pair: &FilePair,
    plan: ChunkPlan,
    mut on_round: F,
) -> CheckResult<StreamOutcome>
where
    R: ChunkReader + ?Sized,
    F: FnMut(u64),
{
    let max_size = pair.max_size();
    if max_size == 0 {
        return Ok(StreamOutcome {
            similarity: 1.0,
            chunks_compared: 0,
            rounds: 0,
        });
    }

    let chunk = plan.chunk_size_bytes.max(1);
    let chunk_len = usize::try_from(chunk).unwrap_or(usize::MAX);
    let mut scores = ScoreAccumulator::new();
    let mut processed: u64 = 0;
    let mut rounds: u64 = 0;

    while processed < max_size {
        let remaining_chunks = (max_size - processed).div_ceil(chunk);
        let per_round = plan.batch_size.max(1).min(remaining_chunks);

        let offsets1 = round_offsets(processed, chunk, per_round, pair.size1);
        let offsets2 = round_offsets(processed, chunk, per_round, pair.size2);

        let chunks1 = reader.read_chunks(&pair.path1, &offsets1, chunk_len)?;
        let chunks2 = reader.read_chunks(&pair.path2, &offsets2, chunk_len)?;

        for (a, b) in chunks1.iter().zip(&chunks2) {
            if a.is_empty() && b.is_empty() {
                continue;
            }
            scores.push(similarity(a, b));
        }

        processed = processed.saturating_add(per_round.saturating_mul(chunk));
        rounds += 1;

        let percent = progress_percent(processed, max_size);
        info!(round = rounds, percent, chunks = scores.count(), "streaming progress");
        on_round(percent);
    }

    let outcome = StreamOutcome {
        similarity: scores.mean(),
        chunks_compared: scores.count(),
        rounds,
    };
    debug!(?outcome, "streaming finished");
    Ok(outcome)
}

/// Offsets of the `count` chunks starting at `processed`, clamped to `size`.
fn round_offsets(processed: u64, chunk: u64, count: u64, size: u64) -> Vec<u64> {
    (0..count)
        .map(|k| processed.saturating_add(k.saturating_mul(chunk)).min(size))
        .collect()
}

fn progress_percent(processed: u64, max_size: u64) -> u64 {
    (u128::from(processed.min(max_size)) * 100 / u128::from(max_size)) as u64
}
