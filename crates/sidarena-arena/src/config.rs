//! Arena configuration parameters.

use sidarena_core::layout::{align_up, ENTRY_SIZE, MAX_SID_SIZE};

use crate::error::ArenaError;

/// Configuration for identifier slots in a duplicated array.
///
/// Controls how large each identifier copy is and how slots are padded.
/// Validated by every operation that consumes it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Alignment of each identifier slot, in bytes.
    ///
    /// Default: 8 (natural word size). Must be a power of two no larger
    /// than the entry size (16), so the identifier region, which starts
    /// right after `count` entries, is itself aligned.
    pub alignment: usize,

    /// Capacity of each identifier copy, in bytes.
    ///
    /// Default: 68, the encoded size of an identifier with the maximum
    /// 15 sub-authorities. Must be at least that, so every valid
    /// identifier fits.
    pub max_sid_size: usize,
}

impl ArenaConfig {
    /// Default slot alignment.
    pub const DEFAULT_ALIGNMENT: usize = 8;

    /// Default identifier capacity.
    pub const DEFAULT_MAX_SID_SIZE: usize = MAX_SID_SIZE;

    /// Create a config with default values.
    pub fn new() -> Self {
        Self {
            alignment: Self::DEFAULT_ALIGNMENT,
            max_sid_size: Self::DEFAULT_MAX_SID_SIZE,
        }
    }

    /// Override the slot alignment.
    pub fn with_alignment(mut self, alignment: usize) -> Self {
        self.alignment = alignment;
        self
    }

    /// Override the identifier capacity.
    pub fn with_max_sid_size(mut self, max_sid_size: usize) -> Self {
        self.max_sid_size = max_sid_size;
        self
    }

    /// Check the invariants documented on each field.
    pub fn validate(&self) -> Result<(), ArenaError> {
        if !self.alignment.is_power_of_two() {
            return Err(ArenaError::InvalidConfig {
                reason: "alignment must be a power of two",
            });
        }
        if self.alignment > ENTRY_SIZE {
            return Err(ArenaError::InvalidConfig {
                reason: "alignment must not exceed the entry size",
            });
        }
        if self.max_sid_size < MAX_SID_SIZE {
            return Err(ArenaError::InvalidConfig {
                reason: "max_sid_size must hold a maximum-length identifier",
            });
        }
        Ok(())
    }

    /// Size of one identifier slot: `max_sid_size` rounded up to `alignment`.
    pub fn slot_size(&self) -> Result<usize, ArenaError> {
        self.validate()?;
        align_up(self.max_sid_size, self.alignment).ok_or(ArenaError::InvalidConfig {
            reason: "slot size overflows usize",
        })
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new()
    }
}
