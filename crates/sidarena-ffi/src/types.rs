//! C-compatible input records.

/// One source entry: a pointer to an encoded identifier and its attributes.
///
/// `sid` must point at an identifier in the arena's encoded layout
/// (8-byte header followed by `sub_authority_count` little-endian `u32`s).
/// Only the header and the tail it announces are read.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct SidAndAttributesRaw {
    /// Encoded source identifier.
    pub sid: *const u8,
    /// Attribute mask copied verbatim into the output entry.
    pub attributes: u32,
}
