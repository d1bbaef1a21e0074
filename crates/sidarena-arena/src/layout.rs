//! Size and offset arithmetic for a duplicated array.
//!
//! ```text
//! 0                    entry_region_len                      total_len
//! ├── entry 0 ── … ── entry N-1 ─┼── slot 0 ── … ── slot N-1 ──┤
//!    ENTRY_SIZE each                 slot_size each
//! ```

use std::ops::Range;

use sidarena_core::layout::ENTRY_SIZE;

use crate::config::ArenaConfig;
use crate::error::ArenaError;

/// Byte layout of an arena holding `count` entries.
///
/// All arithmetic is checked once in [`ArrayLayout::new`]; the offset
/// accessors cannot overflow afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArrayLayout {
    count: usize,
    slot_size: usize,
    entry_region_len: usize,
    identity_region_len: usize,
}

impl ArrayLayout {
    /// Compute the layout for `count` entries under `config`.
    pub fn new(count: usize, config: &ArenaConfig) -> Result<Self, ArenaError> {
        let slot_size = config.slot_size()?;
        let overflow = ArenaError::LayoutOverflow { count };
        let entry_region_len = count.checked_mul(ENTRY_SIZE).ok_or(overflow.clone())?;
        let identity_region_len = count.checked_mul(slot_size).ok_or(overflow.clone())?;
        let total = entry_region_len
            .checked_add(identity_region_len)
            .ok_or(overflow.clone())?;
        // References are stored as u64.
        if u64::try_from(total).is_err() {
            return Err(overflow);
        }
        Ok(Self {
            count,
            slot_size,
            entry_region_len,
            identity_region_len,
        })
    }

    /// Number of entries.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Size of one identifier slot.
    pub fn slot_size(&self) -> usize {
        self.slot_size
    }

    /// Total arena size in bytes.
    pub fn total_len(&self) -> usize {
        self.entry_region_len + self.identity_region_len
    }

    /// Byte range of the entry region.
    pub fn entry_region(&self) -> Range<usize> {
        0..self.entry_region_len
    }

    /// Byte range of the identifier region.
    pub fn identity_region(&self) -> Range<usize> {
        self.entry_region_len..self.total_len()
    }

    /// Offset of entry `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= count`.
    pub fn entry_offset(&self, index: usize) -> usize {
        assert!(index < self.count, "entry index {index} out of range");
        index * ENTRY_SIZE
    }

    /// Offset of the identifier slot for entry `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= count`.
    pub fn slot_offset(&self, index: usize) -> usize {
        assert!(index < self.count, "slot index {index} out of range");
        self.entry_region_len + index * self.slot_size
    }

    /// Byte range of the identifier slot for entry `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= count`.
    pub fn slot_range(&self, index: usize) -> Range<usize> {
        let start = self.slot_offset(index);
        start..start + self.slot_size
    }
}
