// src/acquisition/slot.rs
//! Single most-recent-block exchange between capture and processing
//!
//! The producer (device callback) and consumer (display tick) run on
//! independent schedules, so there is no queue: each publish supersedes the
//! previous block, and blocks the consumer never gets to are silently
//! dropped. Acceptable for a live visualization; not acceptable where exact
//! sample accounting matters.

use parking_lot::Mutex;

/// Synchronized single-slot cell holding the latest capture block
///
/// The mutex guarantees a snapshot never observes a partially written block.
/// The generation counter lets the consumer tell "no new block since last
/// time" apart from "new data arrived".
pub struct BlockSlot {
    inner: Mutex<SlotInner>,
}

struct SlotInner {
    block: Option<Vec<f32>>,
    generation: u64,
}

impl BlockSlot {
    /// Create an empty slot
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(SlotInner {
                block: None,
                generation: 0,
            }),
        }
    }

    /// Replace the slot contents with a fresh block
    ///
    /// Never blocks on the consumer beyond the swap itself.
    pub fn publish(&self, block: Vec<f32>) {
        let mut inner = self.inner.lock();
        inner.block = Some(block);
        inner.generation += 1;
    }

    /// Copy out the latest block together with its generation
    ///
    /// Reading does not consume: two snapshots without an intervening
    /// publish return identical data. `None` until the first publish.
    pub fn snapshot(&self) -> Option<(u64, Vec<f32>)> {
        let inner = self.inner.lock();
        inner
            .block
            .as_ref()
            .map(|block| (inner.generation, block.clone()))
    }

    /// Number of publishes so far
    pub fn generation(&self) -> u64 {
        self.inner.lock().generation
    }
}

impl Default for BlockSlot {
    fn default() -> Self {
        Self::new()
    }
}
