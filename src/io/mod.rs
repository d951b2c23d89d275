//! File access for the checker: sizes, whole-file reads, chunked reads and
//! the result file.

pub mod chunk;

use std::path::Path;

use tracing::debug;

use crate::error::{CheckError, CheckResult};
use crate::util::atomic::atomic_write;

pub use chunk::{ChunkReader, FileChunkReader};

/// Size of the file at `path` in bytes.
pub fn file_size(path: &Path) -> CheckResult<u64> {
    let meta = std::fs::metadata(path).map_err(|e| CheckError::io(path, e))?;
    Ok(meta.len())
}

/// Read a whole file as text with surrounding whitespace trimmed.
///
/// Invalid UTF-8 is replaced with U+FFFD rather than rejected.
pub fn read_whole_file(path: &Path) -> CheckResult<String> {
    let bytes = std::fs::read(path).map_err(|e| CheckError::io(path, e))?;
    let text = String::from_utf8_lossy(&bytes);
    Ok(text.trim().to_owned())
}

/// Render a similarity in `[0, 1]` as a percentage with two decimals.
pub fn format_percentage(similarity: f64) -> String {
    format!("{:.2}", similarity * 100.0)
}

/// Overwrite `path` with the formatted percentage (no trailing newline).
pub fn write_result(path: &Path, similarity: f64) -> CheckResult<()> {
    let content = format_percentage(similarity);
    debug!(path = %path.display(), %content, "writing result");
    atomic_write(path, &content)
}
