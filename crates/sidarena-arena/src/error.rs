//! Arena-specific error types.

use std::error::Error;
use std::fmt;

use sidarena_core::SidError;

/// Errors that can occur while duplicating identifiers or reading an arena.
///
/// Every failure from [`duplicate_entry_array`](crate::duplicate_entry_array)
/// leaves nothing allocated behind; callers have nothing to clean up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// No entries were supplied, or a required pointer was null.
    NullInput,
    /// The allocator refused a request.
    AllocationFailed {
        /// Number of bytes requested.
        requested: usize,
    },
    /// Computing the arena size for `count` entries overflowed.
    LayoutOverflow {
        /// Number of entries requested.
        count: usize,
    },
    /// An [`ArenaConfig`](crate::ArenaConfig) failed validation.
    InvalidConfig {
        /// Which invariant was violated.
        reason: &'static str,
    },
    /// An entry index past the end of the array.
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// Number of entries in the array.
        len: usize,
    },
    /// An entry's reference does not point at its own slot.
    ReferenceOutOfBounds {
        /// Index of the offending entry.
        index: usize,
        /// The reference value found in the entry.
        reference: u64,
    },
    /// A destination buffer is smaller than the arena.
    BufferTooSmall {
        /// Bytes needed.
        required: usize,
        /// Bytes provided.
        provided: usize,
    },
    /// An identifier could not be encoded or decoded.
    Sid(SidError),
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NullInput => write!(f, "no input entries"),
            Self::AllocationFailed { requested } => {
                write!(f, "allocation of {requested} bytes failed")
            }
            Self::LayoutOverflow { count } => {
                write!(f, "arena size for {count} entries overflows")
            }
            Self::InvalidConfig { reason } => write!(f, "invalid arena config: {reason}"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "entry index {index} out of range for {len} entries")
            }
            Self::ReferenceOutOfBounds { index, reference } => {
                write!(
                    f,
                    "entry {index} references {reference:#x}, outside its slot"
                )
            }
            Self::BufferTooSmall { required, provided } => {
                write!(
                    f,
                    "buffer too small: need {required} bytes, have {provided}"
                )
            }
            Self::Sid(e) => write!(f, "identifier error: {e}"),
        }
    }
}

impl Error for ArenaError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SidError> for ArenaError {
    fn from(e: SidError) -> Self {
        Self::Sid(e)
    }
}
