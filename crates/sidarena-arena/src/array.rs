//! The duplicated array: one owned arena holding entries and their
//! identifier slots.

use sidarena_core::layout::write_entry;
use sidarena_core::{EntryRecord, Sid};

use crate::allocator::{Allocator, Block, SystemAllocator};
use crate::error::ArenaError;
use crate::layout::ArrayLayout;
use crate::view::ArenaView;

/// A self-contained copy of an entry array.
///
/// The arena is a single allocation: `count` entries followed by `count`
/// identifier slots. Entry `i` stores the arena offset of slot `i`, so the
/// structure is self-referential without holding any pointers and can be
/// moved freely. Dropping it (or calling [`DuplicatedArray::release`])
/// returns the whole arena to its allocator in one call.
pub struct DuplicatedArray<A: Allocator = SystemAllocator> {
    arena: Block<A>,
    layout: ArrayLayout,
}

impl<A: Allocator> DuplicatedArray<A> {
    pub(crate) fn from_parts(arena: Block<A>, layout: ArrayLayout) -> Self {
        debug_assert_eq!(arena.len(), layout.total_len());
        Self { arena, layout }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.layout.count()
    }

    /// Always `false`: construction rejects empty input.
    pub fn is_empty(&self) -> bool {
        self.layout.count() == 0
    }

    /// Byte layout of the arena.
    pub fn layout(&self) -> ArrayLayout {
        self.layout
    }

    /// The raw arena bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.arena.as_slice()
    }

    /// Arena size in bytes.
    pub fn byte_len(&self) -> usize {
        self.arena.len()
    }

    /// Decoding view over the arena.
    pub fn view(&self) -> ArenaView<'_> {
        ArenaView::new(self.arena.as_slice(), self.layout)
            .expect("arena length matches its layout")
    }

    /// Entry `index`, or `None` past the end.
    pub fn entry(&self, index: usize) -> Option<EntryRecord> {
        self.view().entry(index)
    }

    /// All entries in order.
    pub fn entries(&self) -> impl Iterator<Item = EntryRecord> + '_ {
        self.view().entries()
    }

    /// Bytes of the slot entry `index` refers to, padding included.
    pub fn slot_bytes(&self, index: usize) -> Result<&[u8], ArenaError> {
        self.view().slot_bytes(index)
    }

    /// Decode the identifier entry `index` refers to.
    pub fn sid(&self, index: usize) -> Result<Sid, ArenaError> {
        self.view().sid(index)
    }

    /// Check that every entry references its own slot and every slot decodes.
    pub fn validate(&self) -> Result<(), ArenaError> {
        self.view().validate()
    }

    /// Copy the arena into `dst`, rewriting each reference to `base + offset`.
    ///
    /// `base` is the address `dst` will be read from, so the copy carries
    /// absolute references the way an in-memory consumer expects. The arena
    /// itself is not modified.
    pub fn relocate_into(&self, dst: &mut [u8], base: u64) -> Result<(), ArenaError> {
        let total = self.layout.total_len();
        if dst.len() < total {
            return Err(ArenaError::BufferTooSmall {
                required: total,
                provided: dst.len(),
            });
        }
        dst[..total].copy_from_slice(self.arena.as_slice());
        for (index, entry) in self.entries().enumerate() {
            let reference =
                base.checked_add(entry.reference)
                    .ok_or(ArenaError::LayoutOverflow {
                        count: self.layout.count(),
                    })?;
            write_entry(
                &mut dst[self.layout.entry_offset(index)..],
                EntryRecord {
                    reference,
                    attributes: entry.attributes,
                },
            )?;
        }
        Ok(())
    }

    /// Release the arena back to its allocator.
    pub fn release(self) {
        drop(self);
    }
}

impl<A: Allocator> std::fmt::Debug for DuplicatedArray<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DuplicatedArray")
            .field("len", &self.len())
            .field("byte_len", &self.byte_len())
            .field("slot_size", &self.layout.slot_size())
            .finish()
    }
}
