//! Host sharding strategies.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::Error;

/// How a client spreads image paths across its hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShardStrategy {
    /// Round robin in configured order; depends on call order.
    #[default]
    Cycle,
    /// `CRC32(path) mod hosts`; the same path always lands on the same host.
    Crc,
}

impl ShardStrategy {
    /// Name used in configuration files.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShardStrategy::Cycle => "cycle",
            ShardStrategy::Crc => "crc",
        }
    }
}

impl fmt::Display for ShardStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts `crc` / `cycle`, with or without a leading `:`.
impl FromStr for ShardStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.strip_prefix(':').unwrap_or(s) {
            "cycle" => Ok(ShardStrategy::Cycle),
            "crc" => Ok(ShardStrategy::Crc),
            _ => Err(Error::UnsupportedStrategy(s.to_string())),
        }
    }
}

/// Index for `path` under the CRC strategy. `len` must be non-zero.
pub(super) fn crc_index(path: &str, len: usize) -> usize {
    (crc32fast::hash(path.as_bytes()) as usize) % len
}

/// Returns the current rotation index and advances it, wrapping at `len`.
///
/// The read-increment-wrap is one atomic step, so concurrent callers never
/// observe the same slot twice within a rotation. `len` must be non-zero.
pub(super) fn next_cycle_index(counter: &AtomicUsize, len: usize) -> usize {
    counter
        .fetch_update(Ordering::AcqRel, Ordering::Acquire, |i| Some((i + 1) % len))
        .unwrap_or_else(|prev| prev)
}
