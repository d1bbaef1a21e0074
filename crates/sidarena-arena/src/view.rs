//! Read-only decoding of arena bytes.
//!
//! [`ArenaView`] reads entries and identifier slots out of any byte slice
//! laid out per [`ArrayLayout`]: an arena owned by a
//! [`DuplicatedArray`](crate::DuplicatedArray), or a relocated copy whose
//! references are absolute addresses for a known base.

use sidarena_core::layout::{decode_sid, read_entry};
use sidarena_core::{EntryRecord, Sid};

use crate::error::ArenaError;
use crate::layout::ArrayLayout;

/// Borrowed view over arena bytes.
#[derive(Clone, Copy, Debug)]
pub struct ArenaView<'a> {
    bytes: &'a [u8],
    layout: ArrayLayout,
    base: u64,
}

impl<'a> ArenaView<'a> {
    /// View `bytes` whose references are offsets from the arena start.
    pub fn new(bytes: &'a [u8], layout: ArrayLayout) -> Result<Self, ArenaError> {
        Self::relocated(bytes, layout, 0)
    }

    /// View `bytes` whose references are absolute addresses, with the arena
    /// placed at `base`.
    pub fn relocated(bytes: &'a [u8], layout: ArrayLayout, base: u64) -> Result<Self, ArenaError> {
        if bytes.len() < layout.total_len() {
            return Err(ArenaError::BufferTooSmall {
                required: layout.total_len(),
                provided: bytes.len(),
            });
        }
        Ok(Self {
            bytes: &bytes[..layout.total_len()],
            layout,
            base,
        })
    }

    /// Layout the bytes are read with.
    pub fn layout(&self) -> ArrayLayout {
        self.layout
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.layout.count()
    }

    /// Whether the view holds no entries.
    pub fn is_empty(&self) -> bool {
        self.layout.count() == 0
    }

    /// Entry `index` as stored, or `None` past the end.
    pub fn entry(&self, index: usize) -> Option<EntryRecord> {
        if index >= self.layout.count() {
            return None;
        }
        read_entry(&self.bytes[self.layout.entry_offset(index)..]).ok()
    }

    /// All entries in order.
    pub fn entries(&self) -> impl Iterator<Item = EntryRecord> + 'a {
        let view = *self;
        (0..view.len()).filter_map(move |i| view.entry(i))
    }

    /// Arena offset entry `index` refers to, checked against its slot.
    ///
    /// A reference must point exactly at the start of the entry's own slot;
    /// anything else is [`ArenaError::ReferenceOutOfBounds`].
    pub fn slot_reference(&self, index: usize) -> Result<usize, ArenaError> {
        let entry = self.entry(index).ok_or(ArenaError::IndexOutOfRange {
            index,
            len: self.layout.count(),
        })?;
        let out_of_bounds = ArenaError::ReferenceOutOfBounds {
            index,
            reference: entry.reference,
        };
        let offset = entry
            .reference
            .checked_sub(self.base)
            .and_then(|o| usize::try_from(o).ok())
            .ok_or(out_of_bounds.clone())?;
        if offset != self.layout.slot_offset(index) {
            return Err(out_of_bounds);
        }
        Ok(offset)
    }

    /// Bytes of the slot entry `index` refers to.
    pub fn slot_bytes(&self, index: usize) -> Result<&'a [u8], ArenaError> {
        let offset = self.slot_reference(index)?;
        Ok(&self.bytes[offset..offset + self.layout.slot_size()])
    }

    /// Decode the identifier entry `index` refers to.
    pub fn sid(&self, index: usize) -> Result<Sid, ArenaError> {
        Ok(decode_sid(self.slot_bytes(index)?)?)
    }

    /// Check every entry references its own slot and every slot decodes.
    pub fn validate(&self) -> Result<(), ArenaError> {
        for index in 0..self.len() {
            self.sid(index)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ArenaConfig;
    use sidarena_core::layout::{encode_sid, write_entry};
    use sidarena_core::IdentifierAuthority;

    fn build(base: u64) -> (Vec<u8>, ArrayLayout, Sid) {
        let layout = ArrayLayout::new(2, &ArenaConfig::default()).unwrap();
        let sid = Sid::try_new(1, IdentifierAuthority::WORLD, [0]).unwrap();
        let mut bytes = vec![0u8; layout.total_len()];
        for i in 0..2 {
            let slot = layout.slot_offset(i);
            encode_sid(&sid, &mut bytes[slot..]).unwrap();
            let entry = EntryRecord {
                reference: base + slot as u64,
                attributes: i as u32,
            };
            write_entry(&mut bytes[layout.entry_offset(i)..], entry).unwrap();
        }
        (bytes, layout, sid)
    }

    #[test]
    fn decodes_offset_references() {
        let (bytes, layout, sid) = build(0);
        let view = ArenaView::new(&bytes, layout).unwrap();
        assert_eq!(view.len(), 2);
        assert_eq!(view.sid(1).unwrap(), sid);
        assert_eq!(view.entry(1).unwrap().attributes, 1);
        view.validate().unwrap();
    }

    #[test]
    fn decodes_relocated_references() {
        let base = 0x7FFF_0000_1000;
        let (bytes, layout, sid) = build(base);
        let view = ArenaView::relocated(&bytes, layout, base).unwrap();
        assert_eq!(view.sid(0).unwrap(), sid);
        view.validate().unwrap();
        // Read without the base, the references point nowhere valid.
        let wrong = ArenaView::new(&bytes, layout).unwrap();
        assert!(matches!(
            wrong.sid(0),
            Err(ArenaError::ReferenceOutOfBounds { index: 0, .. })
        ));
    }

    #[test]
    fn reference_to_wrong_slot_is_rejected() {
        let (mut bytes, layout, _) = build(0);
        let swapped = EntryRecord {
            reference: layout.slot_offset(1) as u64,
            attributes: 0,
        };
        write_entry(&mut bytes[layout.entry_offset(0)..], swapped).unwrap();
        let view = ArenaView::new(&bytes, layout).unwrap();
        assert!(matches!(
            view.validate(),
            Err(ArenaError::ReferenceOutOfBounds { index: 0, .. })
        ));
    }

    #[test]
    fn short_buffer_is_rejected() {
        let (bytes, layout, _) = build(0);
        assert!(matches!(
            ArenaView::new(&bytes[..bytes.len() - 1], layout),
            Err(ArenaError::BufferTooSmall { .. })
        ));
    }

    #[test]
    fn index_past_end() {
        let (bytes, layout, _) = build(0);
        let view = ArenaView::new(&bytes, layout).unwrap();
        assert!(view.entry(2).is_none());
        assert_eq!(
            view.sid(2),
            Err(ArenaError::IndexOutOfRange { index: 2, len: 2 })
        );
    }

    #[test]
    fn entries_iterates_in_order() {
        let (bytes, layout, _) = build(0);
        let view = ArenaView::new(&bytes, layout).unwrap();
        let attrs: Vec<u32> = view.entries().map(|e| e.attributes).collect();
        assert_eq!(attrs, vec![0, 1]);
    }
}
