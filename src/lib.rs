//! `papercheck`: memory-bounded document similarity.
//!
//! Scores how alike two text files are with a normalized Levenshtein
//! distance and writes the result as a percentage. Files that fit the memory
//! budget are compared whole; larger ones are cut into aligned byte windows,
//! scored window by window and averaged.
//!
//! # Modules
//!
//! - `similarity`: edit distance, similarity ratio, running mean
//! - `plan`: chunk and batch sizing under a memory budget
//! - `mode`: whole-file vs streaming decision
//! - `stream`: chunked comparison loop
//! - `io`: file sizes, whole-file and chunked reads, result writing
//! - `memory`: memory budget and process usage sampling
//! - `check`: end-to-end run
//!
//! # Architecture
//!
//! ```text
//! prepare:  FilePair::stat → plan → select_mode
//! execute:  ┬→ read_whole_file ×2 → similarity
//!           └→ stream_similarity → ChunkReader × N → similarity × N → mean
//!                      ↓
//!                write_result
//! ```

pub mod check;
pub mod error;
pub mod io;
pub mod memory;
pub mod mode;
pub mod plan;
pub mod similarity;
pub mod stream;
pub mod util;

pub use check::{CheckConfig, CheckReport, CheckRequest, PreparedCheck, execute, prepare, run};
pub use error::{CheckError, CheckResult};
