//! Single-allocation duplication of security identifier arrays.
//!
//! Given borrowed `(identifier, attributes)` entries, builds one contiguous
//! arena holding a copy of every entry followed by a copy of every
//! identifier, with each entry referring to its identifier by offset within
//! the same arena.
//!
//! # Architecture
//!
//! ```text
//! duplicate_entry_array_in (builder)
//! ├── ArrayLayout          (entry region + aligned slot region, checked math)
//! ├── Block<A>             (the arena: one zeroed allocation, released on drop)
//! └── per entry:
//!     duplicate_identifier_in → SidBuffer<&A> (scratch, max_sid_size bytes)
//!     copy into slot, write EntryRecord { reference: slot offset, attributes }
//! ```
//!
//! The result is a [`DuplicatedArray`], read through [`ArenaView`] and
//! optionally relocated into a caller buffer with absolute references.
//!
//! # Failure
//!
//! Construction either completes or leaves nothing allocated. Allocation
//! goes through the [`Allocator`] capability, so rollback can be checked
//! with an instrumented allocator.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod allocator;
pub mod array;
pub mod builder;
pub mod config;
pub mod error;
pub mod identifier;
pub mod layout;
pub mod view;

// Public re-exports for the primary API surface.
pub use allocator::{Allocator, Block, SystemAllocator};
pub use array::DuplicatedArray;
pub use builder::{duplicate_entry_array, duplicate_entry_array_in};
pub use config::ArenaConfig;
pub use error::ArenaError;
pub use identifier::{duplicate_identifier, duplicate_identifier_in, SidBuffer};
pub use layout::ArrayLayout;
pub use view::ArenaView;
