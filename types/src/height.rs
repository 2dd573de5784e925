//! Block height type used throughout the core.
//!
//! All time semantics (vote locks, quorum deadlines) are expressed as
//! block-height comparisons against a caller-supplied current height.
//! The core never reads a clock of its own.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A chain block height.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BlockHeight(u64);

impl BlockHeight {
    /// The genesis height.
    pub const ZERO: Self = Self(0);

    pub fn new(height: u64) -> Self {
        Self(height)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// The height `blocks` after this one, saturating at the maximum.
    pub fn saturating_add(&self, blocks: u64) -> Self {
        Self(self.0.saturating_add(blocks))
    }

    /// Whether the chain has reached this height at `now`.
    pub fn is_reached(&self, now: BlockHeight) -> bool {
        now.0 >= self.0
    }
}

impl fmt::Display for BlockHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
