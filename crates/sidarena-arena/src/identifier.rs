//! Deep copy of a single identifier into a fixed-capacity buffer.
//!
//! Every copy is `max_sid_size` bytes regardless of how many
//! sub-authorities the source has, so the array builder can treat slots
//! uniformly. Bytes past the encoded identifier are always zero.

use sidarena_core::layout::{decode_sid, encode_sid};
use sidarena_core::Sid;
use tracing::trace;

use crate::allocator::{Allocator, Block, SystemAllocator};
use crate::config::ArenaConfig;
use crate::error::ArenaError;

/// An owned, zero-padded copy of one identifier.
///
/// Released to its allocator on drop.
#[derive(Debug)]
pub struct SidBuffer<A: Allocator = SystemAllocator> {
    block: Block<A>,
}

impl<A: Allocator> SidBuffer<A> {
    /// The full buffer, padding included.
    pub fn as_bytes(&self) -> &[u8] {
        self.block.as_slice()
    }

    /// Buffer capacity (the configured `max_sid_size`).
    pub fn capacity(&self) -> usize {
        self.block.len()
    }

    /// Decode the copied identifier.
    pub fn sid(&self) -> Result<Sid, ArenaError> {
        Ok(decode_sid(self.block.as_slice())?)
    }
}

/// Copy `src` into a freshly allocated buffer from `allocator`.
///
/// The buffer is `config.max_sid_size` bytes. Revision, count, authority,
/// and exactly `sub_authority_count` sub-authorities are copied; the rest
/// stays zero. On failure nothing remains allocated.
pub fn duplicate_identifier_in<A: Allocator>(
    src: &Sid,
    config: &ArenaConfig,
    allocator: A,
) -> Result<SidBuffer<A>, ArenaError> {
    config.validate()?;
    let mut block = Block::zeroed(config.max_sid_size, allocator)?;
    let written = encode_sid(src, block.as_mut_slice())?;
    trace!(sid = %src, written, capacity = block.len(), "identifier duplicated");
    Ok(SidBuffer { block })
}

/// Copy `src` using the system allocator and default configuration.
pub fn duplicate_identifier(src: &Sid) -> Result<SidBuffer, ArenaError> {
    duplicate_identifier_in(src, &ArenaConfig::default(), SystemAllocator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sidarena_core::{IdentifierAuthority, MAX_SID_SIZE};

    fn sample() -> Sid {
        Sid::try_new(1, IdentifierAuthority::NT, [21, 1004336348, 1177238915, 682003330, 512])
            .unwrap()
    }

    #[test]
    fn copy_matches_source() {
        let src = sample();
        let copy = duplicate_identifier(&src).unwrap();
        let decoded = copy.sid().unwrap();
        assert_eq!(decoded, src);
        assert_eq!(decoded.revision(), src.revision());
        assert_eq!(decoded.sub_authority_count(), 5);
        assert_eq!(decoded.authority(), src.authority());
        assert_eq!(decoded.sub_authorities(), src.sub_authorities());
    }

    #[test]
    fn buffer_is_full_capacity_with_zero_tail() {
        let copy = duplicate_identifier(&sample()).unwrap();
        assert_eq!(copy.capacity(), MAX_SID_SIZE);
        let used = sample().encoded_len();
        assert!(copy.as_bytes()[used..].iter().all(|&b| b == 0));
    }

    #[test]
    fn copy_does_not_alias_source() {
        let src = sample();
        let copy = duplicate_identifier(&src).unwrap();
        let copy_range = copy.as_bytes().as_ptr_range();
        let src_start = src.sub_authorities().as_ptr() as *const u8;
        assert!(!copy_range.contains(&src_start));
        assert_ne!(copy_range.start, &src as *const Sid as *const u8);
    }

    #[test]
    fn larger_capacity_is_honoured() {
        let config = ArenaConfig::new().with_max_sid_size(96);
        let copy = duplicate_identifier_in(&sample(), &config, SystemAllocator).unwrap();
        assert_eq!(copy.capacity(), 96);
        assert_eq!(copy.sid().unwrap(), sample());
    }

    #[test]
    fn invalid_config_allocates_nothing() {
        let config = ArenaConfig::new().with_max_sid_size(8);
        assert!(matches!(
            duplicate_identifier_in(&sample(), &config, SystemAllocator),
            Err(ArenaError::InvalidConfig { .. })
        ));
    }
}
