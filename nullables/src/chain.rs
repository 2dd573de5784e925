//! Nullable chain — deterministic block heights for testing.

use charter_types::BlockHeight;
use std::cell::Cell;

/// A deterministic chain-height source for testing.
///
/// The height only advances when you tell it to.
pub struct NullChain {
    current: Cell<u64>,
}

impl NullChain {
    pub fn new(initial_height: u64) -> Self {
        Self {
            current: Cell::new(initial_height),
        }
    }

    /// Get the current height.
    pub fn height(&self) -> BlockHeight {
        BlockHeight::new(self.current.get())
    }

    /// Advance the chain by a number of blocks.
    pub fn advance(&self, blocks: u64) {
        self.current.set(self.current.get() + blocks);
    }

    /// Set the height to a specific value.
    pub fn set(&self, height: u64) {
        self.current.set(height);
    }
}
