//! Choice between whole-file and streaming comparison.

use std::fmt;

use serde::Serialize;

use crate::memory::MemoryBudget;

/// How a file pair gets compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Load both files and score them once.
    WholeFile,
    /// Score aligned chunks and average them.
    Streaming,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WholeFile => f.write_str("whole-file"),
            Self::Streaming => f.write_str("streaming"),
        }
    }
}

/// Stream when the larger file exceeds half the available memory.
///
/// The usage figure inside `budget` is a single sample, so this is a
/// heuristic: whole-file mode does no accounting after it is chosen.
pub const fn select_mode(size1: u64, size2: u64, budget: MemoryBudget) -> Mode {
    let threshold = budget.available() / 2;
    let max_size = if size1 > size2 { size1 } else { size2 };
    if max_size > threshold {
        Mode::Streaming
    } else {
        Mode::WholeFile
    }
}
