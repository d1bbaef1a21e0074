//! Security identifiers and their 6-byte identifier authority.

use std::fmt;
use std::str::FromStr;

use smallvec::SmallVec;

use crate::error::SidError;

/// Protocol maximum number of sub-authorities in one identifier.
pub const MAX_SUB_AUTHORITIES: usize = 15;

/// Revision carried by every well-formed identifier.
///
/// Other values are preserved verbatim by the duplicator; they are not
/// rejected.
pub const SID_REVISION: u8 = 1;

/// Inline storage for sub-authorities.
///
/// Sized to the protocol maximum so an identifier never spills to the heap.
pub type SubAuthorities = SmallVec<[u32; MAX_SUB_AUTHORITIES]>;

/// The 6-byte identifier authority of a [`Sid`].
///
/// Stored most significant byte first, so `[0, 0, 0, 0, 0, 5]` is the NT
/// authority (value 5).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IdentifierAuthority(pub [u8; 6]);

impl IdentifierAuthority {
    /// Largest value a 6-byte authority can hold.
    pub const MAX_VALUE: u64 = 0xFFFF_FFFF_FFFF;

    /// `S-1-0`: the null authority.
    pub const NULL: Self = Self([0, 0, 0, 0, 0, 0]);
    /// `S-1-1`: the world authority (`Everyone`).
    pub const WORLD: Self = Self([0, 0, 0, 0, 0, 1]);
    /// `S-1-2`: the local authority.
    pub const LOCAL: Self = Self([0, 0, 0, 0, 0, 2]);
    /// `S-1-3`: the creator authority.
    pub const CREATOR: Self = Self([0, 0, 0, 0, 0, 3]);
    /// `S-1-5`: the NT authority.
    pub const NT: Self = Self([0, 0, 0, 0, 0, 5]);
    /// `S-1-16`: the mandatory label authority.
    pub const MANDATORY_LABEL: Self = Self([0, 0, 0, 0, 0, 16]);

    /// Build an authority from its numeric value.
    ///
    /// Returns `None` if `value` does not fit in 48 bits.
    pub const fn from_value(value: u64) -> Option<Self> {
        if value > Self::MAX_VALUE {
            return None;
        }
        let b = value.to_be_bytes();
        Some(Self([b[2], b[3], b[4], b[5], b[6], b[7]]))
    }

    /// Numeric value of the authority.
    pub const fn value(&self) -> u64 {
        let a = self.0;
        u64::from_be_bytes([0, 0, a[0], a[1], a[2], a[3], a[4], a[5]])
    }

    /// Raw bytes, most significant first.
    pub const fn as_bytes(&self) -> &[u8; 6] {
        &self.0
    }
}

impl fmt::Display for IdentifierAuthority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.value();
        if value <= u64::from(u32::MAX) {
            write!(f, "{value}")
        } else {
            write!(f, "0x{value:012X}")
        }
    }
}

impl From<[u8; 6]> for IdentifierAuthority {
    fn from(bytes: [u8; 6]) -> Self {
        Self(bytes)
    }
}

/// A security identifier: fixed header plus up to 15 sub-authorities.
///
/// The sub-authority count is derived from the stored tail, so it can
/// never disagree with it. [`Sid::try_new`] is the only constructor and
/// enforces the protocol maximum.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Sid {
    revision: u8,
    authority: IdentifierAuthority,
    sub_authorities: SubAuthorities,
}

impl Sid {
    /// Build an identifier from its parts.
    ///
    /// Returns [`SidError::TooManySubAuthorities`] if more than
    /// [`MAX_SUB_AUTHORITIES`] values are supplied.
    pub fn try_new(
        revision: u8,
        authority: IdentifierAuthority,
        sub_authorities: impl IntoIterator<Item = u32>,
    ) -> Result<Self, SidError> {
        let mut tail = SubAuthorities::new();
        for (i, value) in sub_authorities.into_iter().enumerate() {
            if i == MAX_SUB_AUTHORITIES {
                return Err(SidError::TooManySubAuthorities { count: i + 1 });
            }
            tail.push(value);
        }
        Ok(Self {
            revision,
            authority,
            sub_authorities: tail,
        })
    }

    /// Revision tag.
    pub fn revision(&self) -> u8 {
        self.revision
    }

    /// Number of sub-authorities (always `<= 15`).
    pub fn sub_authority_count(&self) -> u8 {
        self.sub_authorities.len() as u8
    }

    /// The 6-byte identifier authority.
    pub fn authority(&self) -> IdentifierAuthority {
        self.authority
    }

    /// Sub-authorities in order.
    pub fn sub_authorities(&self) -> &[u32] {
        &self.sub_authorities
    }

    /// The relative identifier: the last sub-authority, if any.
    pub fn rid(&self) -> Option<u32> {
        self.sub_authorities.last().copied()
    }

    /// Encoded size of this identifier in bytes (header plus tail).
    pub fn encoded_len(&self) -> usize {
        crate::layout::encoded_len(self.sub_authorities.len())
    }
}

impl fmt::Display for Sid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S-{}-{}", self.revision, self.authority)?;
        for sub in &self.sub_authorities {
            write!(f, "-{sub}")?;
        }
        Ok(())
    }
}

impl FromStr for Sid {
    type Err = SidError;

    /// Parse the `S-R-A-S1-...-Sn` form.
    ///
    /// The authority may be decimal or `0x`-prefixed hex.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fail = |reason| SidError::Parse {
            input: s.to_string(),
            reason,
        };

        let body = s
            .strip_prefix("S-")
            .or_else(|| s.strip_prefix("s-"))
            .ok_or_else(|| fail("missing 'S-' prefix"))?;
        let mut parts = body.split('-');

        let revision = parts
            .next()
            .and_then(|p| p.parse::<u8>().ok())
            .ok_or_else(|| fail("invalid revision"))?;

        let authority_str = parts.next().ok_or_else(|| fail("missing authority"))?;
        let authority_value = match authority_str
            .strip_prefix("0x")
            .or_else(|| authority_str.strip_prefix("0X"))
        {
            Some(hex) => u64::from_str_radix(hex, 16).ok(),
            None => authority_str.parse::<u64>().ok(),
        };
        let authority = authority_value
            .and_then(IdentifierAuthority::from_value)
            .ok_or_else(|| fail("invalid authority"))?;

        let mut tail = SubAuthorities::new();
        for part in parts {
            if tail.len() == MAX_SUB_AUTHORITIES {
                return Err(SidError::TooManySubAuthorities {
                    count: MAX_SUB_AUTHORITIES + 1,
                });
            }
            let value = part
                .parse::<u32>()
                .map_err(|_| fail("invalid sub-authority"))?;
            tail.push(value);
        }

        Ok(Self {
            revision,
            authority,
            sub_authorities: tail,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_administrators_display() {
        let sid = Sid::try_new(SID_REVISION, IdentifierAuthority::NT, [32, 544]).unwrap();
        assert_eq!(sid.to_string(), "S-1-5-32-544");
        assert_eq!(sid.sub_authority_count(), 2);
        assert_eq!(sid.rid(), Some(544));
    }

    #[test]
    fn try_new_rejects_sixteen_sub_authorities() {
        let result = Sid::try_new(1, IdentifierAuthority::NT, 0..16);
        assert_eq!(result, Err(SidError::TooManySubAuthorities { count: 16 }));
    }

    #[test]
    fn try_new_accepts_maximum() {
        let sid = Sid::try_new(1, IdentifierAuthority::NT, 0..15).unwrap();
        assert_eq!(sid.sub_authority_count(), 15);
        assert_eq!(sid.encoded_len(), 68);
    }

    #[test]
    fn zero_sub_authorities_is_valid() {
        let sid: Sid = "S-1-5".parse().unwrap();
        assert_eq!(sid.sub_authority_count(), 0);
        assert_eq!(sid.rid(), None);
        assert_eq!(sid.to_string(), "S-1-5");
    }

    #[test]
    fn parse_round_trips_well_known_sids() {
        for text in ["S-1-1-0", "S-1-5-18", "S-1-5-32-544", "S-1-16-12288"] {
            let sid: Sid = text.parse().unwrap();
            assert_eq!(sid.to_string(), text);
        }
    }

    #[test]
    fn parse_accepts_hex_authority() {
        let sid: Sid = "S-1-0x010203040506-7".parse().unwrap();
        assert_eq!(sid.authority().0, [1, 2, 3, 4, 5, 6]);
        assert_eq!(sid.to_string(), "S-1-0x010203040506-7");
    }

    #[test]
    fn large_authority_displays_as_hex() {
        let auth = IdentifierAuthority::from_value(0x1_0000_0000).unwrap();
        assert_eq!(auth.to_string(), "0x000100000000");
    }

    #[test]
    fn authority_value_round_trip() {
        let auth = IdentifierAuthority::from_value(0xAB_CDEF_0123).unwrap();
        assert_eq!(auth.value(), 0xAB_CDEF_0123);
        assert!(IdentifierAuthority::from_value(1 << 48).is_none());
    }

    #[test]
    fn parse_rejects_malformed_input() {
        for bad in ["", "S-", "X-1-5", "S-1", "S-256-5", "S-1-5-x", "S-1-5-4294967296"] {
            assert!(
                matches!(bad.parse::<Sid>(), Err(SidError::Parse { .. })),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn parse_rejects_too_many_sub_authorities() {
        let text = format!("S-1-5{}", "-1".repeat(16));
        assert_eq!(
            text.parse::<Sid>(),
            Err(SidError::TooManySubAuthorities { count: 16 })
        );
    }
}
