//! Chunk sizing under a memory budget.
//!
//! Streaming mode reads `batch_size` chunks of `chunk_size_bytes` from each
//! file per round. Both numbers are derived here so that two decoded copies
//! of every in-flight chunk plus the DP row stay below the budget.

use serde::Serialize;
use tracing::debug;

use crate::memory::{KIB, MIB, MemoryBudget};

/// Smallest automatically chosen chunk.
pub const MIN_CHUNK_BYTES: u64 = 256 * KIB;
/// Largest automatically chosen chunk.
pub const MAX_CHUNK_BYTES: u64 = 16 * MIB;
/// Upper bound on chunks read per round.
pub const MAX_BATCH_SIZE: u64 = 100;

/// How a streaming comparison slices its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChunkPlan {
    pub chunk_size_bytes: u64,
    pub batch_size: u64,
}

/// Derive a [`ChunkPlan`].
///
/// A non-zero `override_bytes` wins over the automatic size but is still
/// capped at a quarter of the budget limit. Otherwise the chunk is an eighth
/// of the available memory, clamped to
/// [`MIN_CHUNK_BYTES`]..=[`MAX_CHUNK_BYTES`].
///
/// `max_file_size` does not influence the result; it is only logged.
pub fn plan(max_file_size: u64, override_bytes: u64, budget: MemoryBudget) -> ChunkPlan {
    let requested = if override_bytes > 0 {
        override_bytes.min(budget.limit_bytes / 4)
    } else {
        (budget.available() / 8).clamp(MIN_CHUNK_BYTES, MAX_CHUNK_BYTES)
    };
    // A zero-byte chunk would never advance the stream.
    let chunk_size_bytes = requested.max(1);

    let batch_size = batch_size(chunk_size_bytes, budget.available());

    debug!(
        max_file_size,
        override_bytes,
        available = budget.available(),
        chunk_size_bytes,
        batch_size,
        "chunk plan"
    );

    ChunkPlan {
        chunk_size_bytes,
        batch_size,
    }
}

/// Number of chunks per round that fit in `available` bytes.
///
/// Each chunk is costed at two 2-byte-per-char copies plus a quadratic
/// margin of `chunk² / 10`.
fn batch_size(chunk_size_bytes: u64, available: u64) -> u64 {
    let chunk = u128::from(chunk_size_bytes);
    let per_chunk = (2 * 2 * chunk + chunk * chunk / 10).max(1);
    let fits = u128::from(available) / per_chunk;
    u64::try_from(fits)
        .unwrap_or(u64::MAX)
        .clamp(1, MAX_BATCH_SIZE)
}
