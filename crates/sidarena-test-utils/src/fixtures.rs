//! Identifier fixtures.
//!
//! - [`well_known`]: a handful of well-known SIDs covering 1-5
//!   sub-authorities and several authorities.
//! - [`sid_with`]: a synthetic SID with a chosen authority byte and count.
//! - [`entries_for`]: pair a slice of SIDs with attributes.

use sidarena_core::{attributes, IdentifierAuthority, Sid, SidAndAttributes, SID_REVISION};

/// Well-known identifiers, in a fixed order.
///
/// `Everyone`, `LocalSystem`, `BUILTIN\Administrators`, the high
/// mandatory label, and a domain-style account SID.
pub fn well_known() -> Vec<Sid> {
    [
        "S-1-1-0",
        "S-1-5-18",
        "S-1-5-32-544",
        "S-1-16-12288",
        "S-1-5-21-1004336348-1177238915-682003330-512",
    ]
    .iter()
    .map(|s| s.parse().expect("fixture SIDs parse"))
    .collect()
}

/// A SID whose authority ends in `authority_byte` with `count`
/// sub-authorities `1000, 1001, ...`.
///
/// # Panics
///
/// Panics if `count` exceeds the sub-authority maximum.
pub fn sid_with(authority_byte: u8, count: u32) -> Sid {
    Sid::try_new(
        SID_REVISION,
        IdentifierAuthority([0, 0, 0, 0, 0, authority_byte]),
        (0..count).map(|i| 1000 + i),
    )
    .expect("count within maximum")
}

/// Pair each SID with a distinct attribute mask.
///
/// Entry `i` gets `ENABLED | MANDATORY | (i << 8)`, so positional mix-ups
/// show up as attribute mismatches.
pub fn entries_for(sids: &[Sid]) -> Vec<SidAndAttributes<'_>> {
    sids.iter()
        .enumerate()
        .map(|(i, sid)| {
            SidAndAttributes::new(
                sid,
                attributes::ENABLED | attributes::MANDATORY | ((i as u32) << 8),
            )
        })
        .collect()
}
