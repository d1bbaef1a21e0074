//! Construction of a [`DuplicatedArray`] from borrowed source entries.
//!
//! One pass, one arena allocation, one scratch allocation per entry:
//!
//! 1. lay out `count` entries followed by `count` aligned slots;
//! 2. allocate the arena zeroed;
//! 3. for each entry, duplicate its identifier, copy the duplicate into the
//!    entry's slot, record the slot offset and attributes, and release the
//!    duplicate.
//!
//! Any failure returns early. The arena and any live scratch copy are
//! released by their drops, so nothing allocated during the call survives
//! and no partially fixed-up array is ever returned.

use sidarena_core::layout::write_entry;
use sidarena_core::{EntryRecord, SidAndAttributes};
use tracing::{debug, trace, warn};

use crate::allocator::{Allocator, Block, SystemAllocator};
use crate::array::DuplicatedArray;
use crate::config::ArenaConfig;
use crate::error::ArenaError;
use crate::identifier::duplicate_identifier_in;
use crate::layout::ArrayLayout;

/// Duplicate `entries` into a single arena obtained from `allocator`.
///
/// Returns [`ArenaError::NullInput`] without allocating when `entries` is
/// empty. The source entries and identifiers are only read.
pub fn duplicate_entry_array_in<A: Allocator>(
    entries: &[SidAndAttributes<'_>],
    config: &ArenaConfig,
    allocator: A,
) -> Result<DuplicatedArray<A>, ArenaError> {
    if entries.is_empty() {
        return Err(ArenaError::NullInput);
    }
    let layout = ArrayLayout::new(entries.len(), config)?;
    let mut arena = Block::zeroed(layout.total_len(), allocator)?;

    {
        let (bytes, allocator) = arena.split_mut();
        for (index, entry) in entries.iter().enumerate() {
            let copy = duplicate_identifier_in(entry.sid, config, allocator).inspect_err(|e| {
                warn!(
                    index,
                    count = entries.len(),
                    error = %e,
                    "identifier duplication failed, rolling back arena"
                );
            })?;

            let slot = layout.slot_range(index);
            let src = copy.as_bytes();
            bytes[slot.start..slot.start + src.len()].copy_from_slice(src);

            write_entry(
                &mut bytes[layout.entry_offset(index)..],
                EntryRecord {
                    reference: slot.start as u64,
                    attributes: entry.attributes,
                },
            )?;
            drop(copy);
            trace!(index, slot_offset = slot.start, sid = %entry.sid, "slot filled");
        }
    }

    debug!(
        count = layout.count(),
        bytes = layout.total_len(),
        slot_size = layout.slot_size(),
        "entry array duplicated"
    );
    Ok(DuplicatedArray::from_parts(arena, layout))
}

/// Duplicate `entries` using the system allocator and default configuration.
pub fn duplicate_entry_array(
    entries: &[SidAndAttributes<'_>],
) -> Result<DuplicatedArray, ArenaError> {
    duplicate_entry_array_in(entries, &ArenaConfig::default(), SystemAllocator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sidarena_core::{IdentifierAuthority, Sid, ENTRY_SIZE};
    use std::cell::Cell;

    /// Refuses the `fail_at`-th request (0-based) and tracks live blocks.
    struct Flaky {
        fail_at: usize,
        requests: Cell<usize>,
        live: Cell<isize>,
    }

    impl Flaky {
        fn new(fail_at: usize) -> Self {
            Self {
                fail_at,
                requests: Cell::new(0),
                live: Cell::new(0),
            }
        }
    }

    impl Allocator for Flaky {
        fn allocate_zeroed(&self, size: usize) -> Option<Box<[u8]>> {
            let n = self.requests.get();
            self.requests.set(n + 1);
            if n == self.fail_at {
                return None;
            }
            self.live.set(self.live.get() + 1);
            Some(vec![0; size].into_boxed_slice())
        }

        fn release(&self, _block: Box<[u8]>) {
            self.live.set(self.live.get() - 1);
        }
    }

    fn sid(authority: u8, tail: &[u32]) -> Sid {
        Sid::try_new(1, IdentifierAuthority([0, 0, 0, 0, 0, authority]), tail.iter().copied())
            .unwrap()
    }

    #[test]
    fn empty_input_is_null_input() {
        let alloc = Flaky::new(usize::MAX);
        let result = duplicate_entry_array_in(&[], &ArenaConfig::default(), &alloc);
        assert!(matches!(result, Err(ArenaError::NullInput)));
        assert_eq!(alloc.requests.get(), 0);
    }

    #[test]
    fn references_point_at_own_slots() {
        let sids = [sid(1, &[0]), sid(5, &[32, 544]), sid(16, &[12288])];
        let entries: Vec<_> = sids
            .iter()
            .enumerate()
            .map(|(i, s)| SidAndAttributes::new(s, i as u32 * 7))
            .collect();
        let array = duplicate_entry_array(&entries).unwrap();
        let slot_size = array.layout().slot_size();
        for i in 0..3 {
            let entry = array.entry(i).unwrap();
            assert_eq!(entry.reference, (3 * ENTRY_SIZE + i * slot_size) as u64);
            assert_eq!(entry.attributes, i as u32 * 7);
            assert_eq!(array.sid(i).unwrap(), sids[i]);
        }
    }

    #[test]
    fn scratch_copies_are_released_during_construction() {
        let sids = [sid(1, &[0]), sid(2, &[0])];
        let entries: Vec<_> = sids.iter().map(|s| SidAndAttributes::new(s, 0)).collect();
        let alloc = Flaky::new(usize::MAX);
        let array = duplicate_entry_array_in(&entries, &ArenaConfig::default(), &alloc).unwrap();
        assert_eq!(alloc.requests.get(), 3);
        assert_eq!(alloc.live.get(), 1);
        array.release();
        assert_eq!(alloc.live.get(), 0);
    }

    #[test]
    fn arena_allocation_failure_allocates_nothing() {
        let s = sid(5, &[18]);
        let alloc = Flaky::new(0);
        let result =
            duplicate_entry_array_in(&[SidAndAttributes::new(&s, 0)], &ArenaConfig::default(), &alloc);
        assert!(matches!(
            result,
            Err(ArenaError::AllocationFailed { requested: 88 })
        ));
        assert_eq!(alloc.live.get(), 0);
    }

    #[test]
    fn second_item_failure_rolls_back_everything() {
        let sids = [sid(1, &[1]), sid(2, &[1, 2]), sid(3, &[1, 2, 3])];
        let entries: Vec<_> = sids.iter().map(|s| SidAndAttributes::new(s, 0)).collect();
        // Request 0 is the arena, 1 is item 0's copy, 2 is item 1's copy.
        let alloc = Flaky::new(2);
        let result = duplicate_entry_array_in(&entries, &ArenaConfig::default(), &alloc);
        assert!(matches!(result, Err(ArenaError::AllocationFailed { .. })));
        assert_eq!(alloc.live.get(), 0);
        assert_eq!(alloc.requests.get(), 3);
    }

    #[test]
    fn padding_between_capacity_and_slot_is_zero() {
        let s = sid(5, &[1; 15]);
        let array = duplicate_entry_array(&[SidAndAttributes::new(&s, 0)]).unwrap();
        let slot = array.slot_bytes(0).unwrap();
        assert!(slot[68..72].iter().all(|&b| b == 0));
        assert_eq!(&array.as_bytes()[12..16], &[0, 0, 0, 0]);
    }
}
