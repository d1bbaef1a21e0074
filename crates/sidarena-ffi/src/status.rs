//! C-compatible status codes.
//!
//! [`SidStatus`] is a `repr(i32)` enum returned by every exported function.
//! Conversions from [`ArenaError`] and [`SidError`] are provided.

use sidarena_arena::ArenaError;
use sidarena_core::SidError;

/// C-compatible status code returned by all FFI functions.
///
/// `Ok` = 0, all errors are negative. Values are ABI-stable.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SidStatus {
    /// Success.
    Ok = 0,
    /// A required input pointer was null, or the entry count was zero.
    NullInput = -1,
    /// The allocator refused a request. Nothing was written.
    AllocationFailed = -2,
    /// A source identifier is malformed (e.g. more than 15 sub-authorities).
    InvalidIdentifier = -3,
    /// Caller-provided buffer is too small.
    BufferTooSmall = -4,
    /// The arena size for the requested count does not fit in memory.
    LayoutOverflow = -5,
    /// An output pointer is null or an argument is otherwise invalid.
    InvalidArgument = -6,
    /// A Rust panic was caught at the FFI boundary.
    Panicked = -128,
}

impl From<&ArenaError> for SidStatus {
    fn from(e: &ArenaError) -> Self {
        match e {
            ArenaError::NullInput => SidStatus::NullInput,
            ArenaError::AllocationFailed { .. } => SidStatus::AllocationFailed,
            ArenaError::LayoutOverflow { .. } => SidStatus::LayoutOverflow,
            ArenaError::BufferTooSmall { .. } => SidStatus::BufferTooSmall,
            ArenaError::Sid(e) => SidStatus::from(e),
            ArenaError::InvalidConfig { .. }
            | ArenaError::IndexOutOfRange { .. }
            | ArenaError::ReferenceOutOfBounds { .. } => SidStatus::InvalidArgument,
        }
    }
}

impl From<&SidError> for SidStatus {
    fn from(_e: &SidError) -> Self {
        SidStatus::InvalidIdentifier
    }
}
