//! Atomic file writing via tempfile + rename.
//!
//! The result file is written to a [`tempfile::NamedTempFile`] next to the
//! target and then persisted over it, so a killed run never leaves a
//! half-written percentage behind.

use std::io::Write;
use std::path::Path;

use crate::error::{CheckError, CheckResult};

/// Atomically write `content` to `path`, replacing any previous content.
///
/// # Errors
///
/// Returns [`CheckError::Io`] if the temp file cannot be created or written,
/// and [`CheckError::Persist`] if the final rename fails (e.g., cross-device).
pub fn atomic_write(path: &Path, content: &str) -> CheckResult<()> {
    // A bare file name has an empty parent; the temp file goes in the cwd.
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp =
        tempfile::NamedTempFile::new_in(parent).map_err(|e| CheckError::io(parent, e))?;

    tmp.write_all(content.as_bytes())
        .map_err(|e| CheckError::io(path, e))?;
    tmp.flush().map_err(|e| CheckError::io(path, e))?;

    tmp.persist(path).map_err(|source| CheckError::Persist {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(())
}
