//! Explicit byte layouts for identifiers and entries.
//!
//! All integers are little-endian. Offsets and sizes are spelled out here
//! instead of relying on `repr(C)`, so an arena produced on one target
//! decodes identically on any other.
//!
//! ```text
//! offset  size  identifier field
//! 0       1     revision
//! 1       1     sub_authority_count
//! 2       6     identifier authority (most significant byte first)
//! 8+4i    4     sub_authority[i]
//!
//! offset  size  entry field
//! 0       8     reference (arena offset, or absolute address once relocated)
//! 8       4     attributes
//! 12      4     padding (zero)
//! ```

use crate::error::SidError;
use crate::sid::{IdentifierAuthority, Sid, SubAuthorities, MAX_SUB_AUTHORITIES};

/// Byte offset of the revision field.
pub const REVISION_OFFSET: usize = 0;
/// Byte offset of the sub-authority count.
pub const COUNT_OFFSET: usize = 1;
/// Byte offset of the 6-byte authority.
pub const AUTHORITY_OFFSET: usize = 2;
/// Byte offset of the first sub-authority.
pub const SUB_AUTHORITY_OFFSET: usize = 8;
/// Size of one sub-authority.
pub const SUB_AUTHORITY_SIZE: usize = 4;
/// Size of the fixed identifier header.
pub const SID_HEADER_SIZE: usize = SUB_AUTHORITY_OFFSET;
/// Largest possible encoded identifier: header plus 15 sub-authorities.
pub const MAX_SID_SIZE: usize = SID_HEADER_SIZE + SUB_AUTHORITY_SIZE * MAX_SUB_AUTHORITIES;

/// Byte offset of the reference within an entry.
pub const ENTRY_REFERENCE_OFFSET: usize = 0;
/// Byte offset of the attributes within an entry.
pub const ENTRY_ATTRIBUTES_OFFSET: usize = 8;
/// Size of one encoded entry, padding included.
pub const ENTRY_SIZE: usize = 16;

/// Round `value` up to the next multiple of `alignment`.
///
/// Returns `None` if `alignment` is not a power of two or the result
/// overflows `usize`.
pub const fn align_up(value: usize, alignment: usize) -> Option<usize> {
    if !alignment.is_power_of_two() {
        return None;
    }
    let mask = alignment - 1;
    match value.checked_add(mask) {
        Some(v) => Some(v & !mask),
        None => None,
    }
}

/// Encoded size of an identifier with `count` sub-authorities.
pub const fn encoded_len(count: usize) -> usize {
    SID_HEADER_SIZE + SUB_AUTHORITY_SIZE * count
}

/// Encoded size of the identifier whose header starts `header`.
///
/// Reads only the header, so callers holding a raw identifier can learn how
/// many bytes to read next. Validates the count against the maximum.
pub fn encoded_len_from_header(header: &[u8]) -> Result<usize, SidError> {
    if header.len() < SID_HEADER_SIZE {
        return Err(SidError::Truncated {
            needed: SID_HEADER_SIZE,
            available: header.len(),
        });
    }
    let count = header[COUNT_OFFSET] as usize;
    if count > MAX_SUB_AUTHORITIES {
        return Err(SidError::TooManySubAuthorities { count });
    }
    Ok(encoded_len(count))
}

/// Write `sid` into the front of `dst`.
///
/// Bytes past [`Sid::encoded_len`] are left untouched; callers that need
/// deterministic padding hand in a zeroed buffer. Returns the number of
/// bytes written.
pub fn encode_sid(sid: &Sid, dst: &mut [u8]) -> Result<usize, SidError> {
    let len = sid.encoded_len();
    if dst.len() < len {
        return Err(SidError::Truncated {
            needed: len,
            available: dst.len(),
        });
    }
    dst[REVISION_OFFSET] = sid.revision();
    dst[COUNT_OFFSET] = sid.sub_authority_count();
    dst[AUTHORITY_OFFSET..SUB_AUTHORITY_OFFSET].copy_from_slice(sid.authority().as_bytes());
    let tail = &mut dst[SUB_AUTHORITY_OFFSET..len];
    for (chunk, value) in tail
        .chunks_exact_mut(SUB_AUTHORITY_SIZE)
        .zip(sid.sub_authorities())
    {
        chunk.copy_from_slice(&value.to_le_bytes());
    }
    Ok(len)
}

/// Decode an identifier from the front of `src`.
///
/// Trailing bytes beyond the encoded length are ignored.
pub fn decode_sid(src: &[u8]) -> Result<Sid, SidError> {
    let len = encoded_len_from_header(src)?;
    if src.len() < len {
        return Err(SidError::Truncated {
            needed: len,
            available: src.len(),
        });
    }
    let mut authority = [0u8; 6];
    authority.copy_from_slice(&src[AUTHORITY_OFFSET..SUB_AUTHORITY_OFFSET]);
    let tail: SubAuthorities = src[SUB_AUTHORITY_OFFSET..len]
        .chunks_exact(SUB_AUTHORITY_SIZE)
        .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();
    Sid::try_new(
        src[REVISION_OFFSET],
        IdentifierAuthority(authority),
        tail,
    )
}

/// Decoded form of one encoded entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntryRecord {
    /// Arena offset of the identifier slot, or an absolute address once
    /// the arena has been relocated.
    pub reference: u64,
    /// Attribute bitmask.
    pub attributes: u32,
}

/// Write `entry` into the front of `dst`, zeroing the padding.
pub fn write_entry(dst: &mut [u8], entry: EntryRecord) -> Result<(), SidError> {
    if dst.len() < ENTRY_SIZE {
        return Err(SidError::Truncated {
            needed: ENTRY_SIZE,
            available: dst.len(),
        });
    }
    dst[ENTRY_REFERENCE_OFFSET..ENTRY_ATTRIBUTES_OFFSET]
        .copy_from_slice(&entry.reference.to_le_bytes());
    dst[ENTRY_ATTRIBUTES_OFFSET..ENTRY_ATTRIBUTES_OFFSET + 4]
        .copy_from_slice(&entry.attributes.to_le_bytes());
    dst[ENTRY_ATTRIBUTES_OFFSET + 4..ENTRY_SIZE].fill(0);
    Ok(())
}

/// Read one entry from the front of `src`.
pub fn read_entry(src: &[u8]) -> Result<EntryRecord, SidError> {
    if src.len() < ENTRY_SIZE {
        return Err(SidError::Truncated {
            needed: ENTRY_SIZE,
            available: src.len(),
        });
    }
    let mut reference = [0u8; 8];
    reference.copy_from_slice(&src[ENTRY_REFERENCE_OFFSET..ENTRY_ATTRIBUTES_OFFSET]);
    let mut attributes = [0u8; 4];
    attributes.copy_from_slice(&src[ENTRY_ATTRIBUTES_OFFSET..ENTRY_ATTRIBUTES_OFFSET + 4]);
    Ok(EntryRecord {
        reference: u64::from_le_bytes(reference),
        attributes: u32::from_le_bytes(attributes),
    })
}
