//! sidarena: duplicate arrays of security identifiers into one allocation.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the sidarena sub-crates. For most users, adding `sidarena` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use sidarena::prelude::*;
//!
//! let everyone: Sid = "S-1-1-0".parse().unwrap();
//! let admins: Sid = "S-1-5-32-544".parse().unwrap();
//! let entries = [
//!     SidAndAttributes::new(&everyone, attributes::ENABLED | attributes::MANDATORY),
//!     SidAndAttributes::new(&admins, attributes::USE_FOR_DENY_ONLY),
//! ];
//!
//! let array = duplicate_entry_array(&entries).unwrap();
//! assert_eq!(array.len(), 2);
//! // Entry i refers to slot i, directly after the entry region.
//! assert_eq!(array.entry(0).unwrap().reference, 2 * 16);
//! assert_eq!(array.sid(1).unwrap(), admins);
//!
//! // One release frees everything.
//! drop(array);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `sidarena-core` | `Sid`, attributes, byte layouts |
//! | [`arena`] | `sidarena-arena` | Duplication, allocator capability, arena views |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Identifier types and encoded byte layouts (`sidarena-core`).
pub use sidarena_core as types;

/// Duplication entry points, the allocator capability, and arena readers
/// (`sidarena-arena`).
///
/// Use [`arena::duplicate_entry_array_in`] with a custom
/// [`arena::Allocator`] or [`arena::ArenaConfig`].
pub use sidarena_arena as arena;

/// Common imports for typical sidarena usage.
///
/// ```rust
/// use sidarena::prelude::*;
/// ```
pub mod prelude {
    // Identifiers
    pub use sidarena_core::{attributes, IdentifierAuthority, Sid, SidAndAttributes};

    // Duplication
    pub use sidarena_arena::{
        duplicate_entry_array, duplicate_entry_array_in, duplicate_identifier,
        duplicate_identifier_in, ArenaConfig, DuplicatedArray, SidBuffer,
    };

    // Allocation
    pub use sidarena_arena::{Allocator, SystemAllocator};

    // Errors
    pub use sidarena_arena::ArenaError;
    pub use sidarena_core::SidError;
}
