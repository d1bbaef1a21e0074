//! Benchmark inputs for sidarena.
//!
//! - [`identifier_set`]: a seeded, reproducible mix of identifiers
//! - [`entry_attributes`]: matching attribute masks

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sidarena_core::{attributes, IdentifierAuthority, Sid, MAX_SUB_AUTHORITIES, SID_REVISION};

/// Generate `n` identifiers with random authorities and 0-15 sub-authorities.
///
/// The same `seed` always yields the same set.
pub fn identifier_set(n: usize, seed: u64) -> Vec<Sid> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let mut authority = [0u8; 6];
            authority[5] = rng.next_u32() as u8;
            let count = rng.next_u32() as usize % (MAX_SUB_AUTHORITIES + 1);
            let tail: Vec<u32> = (0..count).map(|_| rng.next_u32()).collect();
            Sid::try_new(SID_REVISION, IdentifierAuthority(authority), tail)
                .expect("sub-authority count within maximum")
        })
        .collect()
}

/// Attribute masks for `n` entries, alternating group and logon-id flags.
pub fn entry_attributes(n: usize) -> Vec<u32> {
    (0..n)
        .map(|i| {
            let base = attributes::ENABLED | attributes::ENABLED_BY_DEFAULT;
            if i % 2 == 0 {
                base | attributes::MANDATORY
            } else {
                base | attributes::LOGON_ID
            }
        })
        .collect()
}
