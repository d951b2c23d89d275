//! Memory budget and process memory sampling.
//!
//! The budget is an explicit value: a configured limit plus one usage sample
//! taken at startup. Chunk sizing and mode selection only ever see the
//! [`MemoryBudget`], never the live process.

use serde::Serialize;
use sysinfo::System;
use tracing::debug;

/// Default memory limit (2048 MiB).
pub const DEFAULT_MEMORY_LIMIT_BYTES: u64 = 2048 * MIB;

pub const KIB: u64 = 1024;
pub const MIB: u64 = 1024 * KIB;

/// A memory limit together with the usage already consumed against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MemoryBudget {
    pub limit_bytes: u64,
    pub used_bytes: u64,
}

impl MemoryBudget {
    pub const fn new(limit_bytes: u64, used_bytes: u64) -> Self {
        Self {
            limit_bytes,
            used_bytes,
        }
    }

    /// Memory still available under the limit.
    pub const fn available(&self) -> u64 {
        self.limit_bytes.saturating_sub(self.used_bytes)
    }
}

impl Default for MemoryBudget {
    fn default() -> Self {
        Self::new(DEFAULT_MEMORY_LIMIT_BYTES, 0)
    }
}

/// Best-effort source of the current process memory usage.
pub trait MemorySampler {
    fn current_usage(&self) -> u64;
}

/// Samples resident memory of the running process through `sysinfo`.
///
/// Only the current pid is refreshed. If the pid or its process entry
/// cannot be found, usage is reported as 0.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessMemory;

impl MemorySampler for ProcessMemory {
    fn current_usage(&self) -> u64 {
        let pid = match sysinfo::get_current_pid() {
            Ok(pid) => pid,
            Err(e) => {
                debug!(error = e, "current pid unavailable, assuming 0 usage");
                return 0;
            }
        };

        let mut system = System::new();
        if !system.refresh_process(pid) {
            debug!(%pid, "process refresh failed, assuming 0 usage");
            return 0;
        }

        // sysinfo reports process memory in bytes.
        system.process(pid).map_or(0, sysinfo::Process::memory)
    }
}

/// A sampler that always reports the same usage.
#[derive(Debug, Clone, Copy)]
pub struct FixedUsage(pub u64);

impl MemorySampler for FixedUsage {
    fn current_usage(&self) -> u64 {
        self.0
    }
}
