//! Allocator capability and the RAII block it hands out.
//!
//! Duplication never touches the global allocator directly. Every byte
//! comes from an [`Allocator`] passed in by the caller, so construction can
//! be exercised against a counting or failure-injecting allocator. A
//! [`Block`] owns exactly one allocation and returns it on drop, which is
//! what makes rollback on failure automatic.

use std::sync::Arc;

use tracing::debug;

use crate::error::ArenaError;

/// Source of zero-initialised byte buffers.
///
/// Implementations take `&self`, so any bookkeeping they do must use
/// interior mutability.
pub trait Allocator {
    /// Allocate `size` zeroed bytes, or `None` if the request is refused.
    fn allocate_zeroed(&self, size: usize) -> Option<Box<[u8]>>;

    /// Return a buffer previously obtained from [`Allocator::allocate_zeroed`].
    ///
    /// Called exactly once per successful allocation.
    fn release(&self, block: Box<[u8]>);
}

impl<A: Allocator + ?Sized> Allocator for &A {
    fn allocate_zeroed(&self, size: usize) -> Option<Box<[u8]>> {
        (**self).allocate_zeroed(size)
    }

    fn release(&self, block: Box<[u8]>) {
        (**self).release(block)
    }
}

impl<A: Allocator + ?Sized> Allocator for Arc<A> {
    fn allocate_zeroed(&self, size: usize) -> Option<Box<[u8]>> {
        (**self).allocate_zeroed(size)
    }

    fn release(&self, block: Box<[u8]>) {
        (**self).release(block)
    }
}

/// The global heap, with fallible reservation.
///
/// Reports exhaustion as `None` instead of aborting the process.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemAllocator;

impl Allocator for SystemAllocator {
    fn allocate_zeroed(&self, size: usize) -> Option<Box<[u8]>> {
        let mut data = Vec::new();
        data.try_reserve_exact(size).ok()?;
        data.resize(size, 0);
        Some(data.into_boxed_slice())
    }

    fn release(&self, block: Box<[u8]>) {
        drop(block);
    }
}

/// One allocation obtained from an [`Allocator`].
///
/// The block is zeroed at creation regardless of what the allocator
/// returned, and released back to its allocator exactly once on drop.
pub struct Block<A: Allocator> {
    data: Box<[u8]>,
    allocator: A,
}

impl<A: Allocator> Block<A> {
    /// Allocate a zero-initialised block of exactly `size` bytes.
    ///
    /// Returns [`ArenaError::AllocationFailed`] if the allocator refuses
    /// or hands back a buffer of the wrong length.
    pub fn zeroed(size: usize, allocator: A) -> Result<Self, ArenaError> {
        let Some(mut data) = allocator.allocate_zeroed(size) else {
            debug!(requested = size, "allocator refused block");
            return Err(ArenaError::AllocationFailed { requested: size });
        };
        if data.len() != size {
            debug!(
                requested = size,
                returned = data.len(),
                "allocator returned wrong-sized block"
            );
            allocator.release(data);
            return Err(ArenaError::AllocationFailed { requested: size });
        }
        data.fill(0);
        Ok(Self { data, allocator })
    }

    /// The block's bytes.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// The block's bytes, mutably.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Mutable bytes alongside the allocator that owns them.
    ///
    /// Lets a caller write into the block while allocating scratch buffers
    /// from the same allocator.
    pub fn split_mut(&mut self) -> (&mut [u8], &A) {
        (&mut self.data, &self.allocator)
    }

    /// The allocator this block will be released to.
    pub fn allocator(&self) -> &A {
        &self.allocator
    }

    /// Size in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the block holds zero bytes.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<A: Allocator> Drop for Block<A> {
    fn drop(&mut self) {
        let data = std::mem::take(&mut self.data);
        self.allocator.release(data);
    }
}

impl<A: Allocator> std::fmt::Debug for Block<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Block").field("len", &self.data.len()).finish()
    }
}
