//! Core types for the sidarena workspace.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! security identifiers ([`Sid`]), the (identifier, attributes) pairing
//! ([`SidAndAttributes`]), and the explicit byte layouts both are stored
//! in once they are copied into an arena.
//!
//! # Layout
//!
//! Byte layouts are written out field by field in [`layout`] rather than
//! derived from Rust struct layout, so the encoded shapes are identical
//! on every target:
//!
//! ```text
//! Sid (8 + 4*n bytes, n <= 15):
//! [revision u8][count u8][authority 6 bytes][sub_authority u32 LE × n]
//!
//! Entry (16 bytes):
//! [reference u64 LE][attributes u32 LE][padding 4 bytes]
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod entry;
pub mod error;
pub mod layout;
pub mod sid;

pub use entry::{attributes, SidAndAttributes};
pub use error::SidError;
pub use layout::{EntryRecord, ENTRY_SIZE, MAX_SID_SIZE, SID_HEADER_SIZE};
pub use sid::{IdentifierAuthority, Sid, SubAuthorities, MAX_SUB_AUTHORITIES, SID_REVISION};
