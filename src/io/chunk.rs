//! Random-access chunk reads.
//!
//! A chunk is the byte window `[offset, offset + len)` of a file decoded as
//! UTF-8. Window edges are snapped to character boundaries: a window starting
//! on a continuation byte skips forward to the next character, and a window
//! ending inside a character extends to finish it. Every character therefore
//! lands in exactly one of a run of adjacent windows, namely the one holding
//! its first byte.

use std::fs::File;
use std::io::{Read as _, Seek as _, SeekFrom};
use std::path::Path;

use crate::error::{CheckError, CheckResult};

/// Longest run of continuation bytes a valid UTF-8 character carries.
const MAX_CONTINUATION: usize = 3;

/// Source of decoded byte windows.
pub trait ChunkReader {
    /// Read one window per offset, each at most `len` bytes (plus the tail of
    /// a character straddling the end).
    ///
    /// Offsets at or past the end of the file produce an empty string.
    fn read_chunks(&self, path: &Path, offsets: &[u64], len: usize) -> CheckResult<Vec<String>>;

    fn read_chunk(&self, path: &Path, offset: u64, len: usize) -> CheckResult<String> {
        let mut chunks = self.read_chunks(path, &[offset], len)?;
        Ok(chunks.pop().unwrap_or_default())
    }
}

/// Reads windows straight from disk, opening the file once per batch.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileChunkReader;

impl ChunkReader for FileChunkReader {
    fn read_chunks(&self, path: &Path, offsets: &[u64], len: usize) -> CheckResult<Vec<String>> {
        let mut file = File::open(path).map_err(|e| CheckError::io(path, e))?;
        let file_len = file
            .metadata()
            .map_err(|e| CheckError::io(path, e))?
            .len();

        let window = len.saturating_add(MAX_CONTINUATION);
        let mut buf = Vec::new();
        let mut chunks = Vec::with_capacity(offsets.len());

        for &offset in offsets {
            if offset >= file_len || len == 0 {
                chunks.push(String::new());
                continue;
            }

            // Grow only to what the file can still return, not the planned length.
            let readable = usize::try_from(file_len - offset).unwrap_or(usize::MAX);
            buf.clear();
            buf.reserve(window.min(readable));
            file.seek(SeekFrom::Start(offset))
                .map_err(|e| CheckError::io(path, e))?;
            (&mut file)
                .take(window as u64)
                .read_to_end(&mut buf)
                .map_err(|e| CheckError::io(path, e))?;

            chunks.push(decode_window(&buf, offset == 0, len));
        }

        Ok(chunks)
    }
}

/// Decode `len` bytes of `raw` with both edges snapped to character starts.
///
/// `raw` may carry up to [`MAX_CONTINUATION`] bytes of lookahead past `len`.
/// Invalid sequences decode to U+FFFD.
pub fn decode_window(raw: &[u8], at_file_start: bool, len: usize) -> String {
    let start = if at_file_start {
        0
    } else {
        raw.iter()
            .take(MAX_CONTINUATION)
            .take_while(|&&b| is_continuation(b))
            .count()
    };

    let mut end = len.min(raw.len());
    let limit = len.saturating_add(MAX_CONTINUATION).min(raw.len());
    while end < limit && is_continuation(raw[end]) {
        end += 1;
    }

    if start >= end {
        return String::new();
    }
    String::from_utf8_lossy(&raw[start..end]).into_owned()
}

const fn is_continuation(byte: u8) -> bool {
    byte & 0b1100_0000 == 0b1000_0000
}
