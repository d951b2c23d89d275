//! Top-level similarity check: stat, plan, pick a mode, score, write.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::error::CheckResult;
use crate::io::{self, FileChunkReader};
use crate::memory::{DEFAULT_MEMORY_LIMIT_BYTES, MemoryBudget, MemorySampler};
use crate::mode::{Mode, select_mode};
use crate::plan::{ChunkPlan, plan};
use crate::similarity::similarity;
use crate::stream::{FilePair, stream_similarity_with_progress};

/// Tunables for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckConfig {
    /// Memory the comparison may approach, in bytes.
    pub memory_limit_bytes: u64,
    /// Forced chunk size in bytes; 0 picks one from the budget.
    pub chunk_size_override: u64,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            memory_limit_bytes: DEFAULT_MEMORY_LIMIT_BYTES,
            chunk_size_override: 0,
        }
    }
}

/// The two documents to compare and where to put the percentage.
#[derive(Debug, Clone)]
pub struct CheckRequest {
    pub original: PathBuf,
    pub suspect: PathBuf,
    pub result: PathBuf,
}

/// Summary of a finished run.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub files: FilePair,
    pub budget: MemoryBudget,
    pub plan: ChunkPlan,
    pub mode: Mode,
    pub similarity: f64,
    pub chunks_compared: u64,
    pub rounds: u64,
    pub result_path: PathBuf,
}

impl CheckReport {
    /// Similarity as written to the result file.
    pub fn percentage(&self) -> String {
        io::format_percentage(self.similarity)
    }
}

/// Everything decided before any content is read.
#[derive(Debug, Clone)]
pub struct PreparedCheck {
    pub files: FilePair,
    pub budget: MemoryBudget,
    pub plan: ChunkPlan,
    pub mode: Mode,
}

/// Stat both inputs, sample memory once, and fix the plan and mode.
pub fn prepare(
    request: &CheckRequest,
    config: &CheckConfig,
    sampler: &dyn MemorySampler,
) -> CheckResult<PreparedCheck> {
    let files = FilePair::stat(&request.original, &request.suspect)?;
    let budget = MemoryBudget::new(config.memory_limit_bytes, sampler.current_usage());
    let plan = plan(files.max_size(), config.chunk_size_override, budget);
    let mode = select_mode(files.size1, files.size2, budget);

    info!(
        size1 = files.size1,
        size2 = files.size2,
        chunk_size_bytes = plan.chunk_size_bytes,
        batch_size = plan.batch_size,
        available = budget.available(),
        %mode,
        "check prepared"
    );

    Ok(PreparedCheck {
        files,
        budget,
        plan,
        mode,
    })
}

/// Score a prepared check and write the result file.
///
/// `on_progress` receives the streaming percentage after each round; it is
/// never called in whole-file mode. The result file is written only after
/// scoring succeeds.
pub fn execute(
    request: &CheckRequest,
    prepared: PreparedCheck,
    on_progress: impl FnMut(u64),
) -> CheckResult<CheckReport> {
    let PreparedCheck {
        files,
        budget,
        plan,
        mode,
    } = prepared;

    let (similarity, chunks_compared, rounds) = match mode {
        Mode::WholeFile => (compare_whole(&files.path1, &files.path2)?, 1, 0),
        Mode::Streaming => {
            let out =
                stream_similarity_with_progress(&FileChunkReader, &files, plan, on_progress)?;
            (out.similarity, out.chunks_compared, out.rounds)
        }
    };

    io::write_result(&request.result, similarity)?;
    info!(similarity, result = %request.result.display(), "check complete");

    Ok(CheckReport {
        files,
        budget,
        plan,
        mode,
        similarity,
        chunks_compared,
        rounds,
        result_path: request.result.clone(),
    })
}

/// Run one check end to end.
///
/// Any error leaves the result file untouched.
pub fn run(
    request: &CheckRequest,
    config: &CheckConfig,
    sampler: &dyn MemorySampler,
) -> CheckResult<CheckReport> {
    let prepared = prepare(request, config, sampler)?;
    execute(request, prepared, |_| {})
}

fn compare_whole(path1: &Path, path2: &Path) -> CheckResult<f64> {
    let text1 = io::read_whole_file(path1)?;
    let text2 = io::read_whole_file(path2)?;
    Ok(similarity(&text1, &text2))
}
