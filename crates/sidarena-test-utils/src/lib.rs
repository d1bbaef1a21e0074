//! Test utilities for sidarena development.
//!
//! Provides an instrumented [`Allocator`](sidarena_arena::Allocator) that
//! counts outstanding allocations and can refuse a chosen request, plus
//! identifier fixtures in [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

mod counting;

pub use counting::CountingAllocator;
pub use fixtures::{entries_for, sid_with, well_known};
