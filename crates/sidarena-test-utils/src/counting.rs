//! Allocation-counting allocator with failure injection.

use std::sync::atomic::{AtomicUsize, Ordering};

use sidarena_arena::{Allocator, SystemAllocator};

/// Counts requests, live blocks, and bytes; optionally refuses one request.
///
/// Uses atomics so it satisfies `Send + Sync` and can sit behind an `Arc`.
/// Pass it by reference (`&CountingAllocator`) to the `_in` entry points
/// and inspect the counters afterwards.
#[derive(Debug, Default)]
pub struct CountingAllocator {
    fail_at: Option<usize>,
    requests: AtomicUsize,
    outstanding: AtomicUsize,
    peak: AtomicUsize,
    releases: AtomicUsize,
    outstanding_bytes: AtomicUsize,
}

impl CountingAllocator {
    /// An allocator that never refuses.
    pub fn new() -> Self {
        Self::default()
    }

    /// An allocator that refuses the `nth` request (0-based) and serves the rest.
    pub fn failing_at(nth: usize) -> Self {
        Self {
            fail_at: Some(nth),
            ..Self::default()
        }
    }

    /// Total allocation requests seen, refused ones included.
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::Relaxed)
    }

    /// Blocks handed out and not yet released.
    pub fn outstanding(&self) -> usize {
        self.outstanding.load(Ordering::Relaxed)
    }

    /// Highest value `outstanding` ever reached.
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::Relaxed)
    }

    /// Blocks released.
    pub fn releases(&self) -> usize {
        self.releases.load(Ordering::Relaxed)
    }

    /// Bytes handed out and not yet released.
    pub fn outstanding_bytes(&self) -> usize {
        self.outstanding_bytes.load(Ordering::Relaxed)
    }
}

impl Allocator for CountingAllocator {
    fn allocate_zeroed(&self, size: usize) -> Option<Box<[u8]>> {
        let n = self.requests.fetch_add(1, Ordering::Relaxed);
        if self.fail_at == Some(n) {
            return None;
        }
        let block = SystemAllocator.allocate_zeroed(size)?;
        let live = self.outstanding.fetch_add(1, Ordering::Relaxed) + 1;
        self.peak.fetch_max(live, Ordering::Relaxed);
        self.outstanding_bytes.fetch_add(block.len(), Ordering::Relaxed);
        Some(block)
    }

    fn release(&self, block: Box<[u8]>) {
        let prev = self.outstanding.fetch_sub(1, Ordering::Relaxed);
        assert!(prev > 0, "release without a matching allocation");
        self.releases.fetch_add(1, Ordering::Relaxed);
        self.outstanding_bytes.fetch_sub(block.len(), Ordering::Relaxed);
        SystemAllocator.release(block);
    }
}
