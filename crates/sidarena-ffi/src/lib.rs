//! C ABI for identifier and entry-array duplication.
//!
//! Callers hand in identifiers in their encoded byte layout and receive a
//! relocated arena in a buffer they own. This is the only crate in the
//! workspace that contains `unsafe` code; every raw read is confined to
//! [`arena`] and carries a `SAFETY` note.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

/// Run `$body`, converting a panic into [`SidStatus::Panicked`](status::SidStatus).
///
/// `return` inside the body returns from the guarded closure, so early
/// exits yield their status code as usual.
macro_rules! ffi_guard {
    ($body:block) => {
        match ::std::panic::catch_unwind(::std::panic::AssertUnwindSafe(|| -> i32 { $body })) {
            Ok(code) => code,
            Err(_) => {
                ::tracing::error!("panic caught at FFI boundary");
                $crate::status::SidStatus::Panicked as i32
            }
        }
    };
}

pub mod arena;
pub mod status;
pub mod types;

pub use arena::{
    sidarena_duplicate_entry_array, sidarena_duplicate_identifier, sidarena_required_size,
};
pub use status::SidStatus;
pub use types::SidAndAttributesRaw;

#[cfg(test)]
mod tests {
    use crate::status::SidStatus;

    #[test]
    fn guard_passes_through_status() {
        let rc = ffi_guard!({ SidStatus::BufferTooSmall as i32 });
        assert_eq!(rc, SidStatus::BufferTooSmall as i32);
    }

    #[test]
    fn guard_converts_panic() {
        let rc = ffi_guard!({ panic!("boom") });
        assert_eq!(rc, SidStatus::Panicked as i32);
    }
}
