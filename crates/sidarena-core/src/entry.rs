//! Source entries: a borrowed identifier paired with an attribute mask.

use crate::sid::Sid;

/// Conventional group-attribute bits.
///
/// Named for readability only. Attribute masks are copied verbatim and
/// never validated against these values.
pub mod attributes {
    /// The group cannot be disabled.
    pub const MANDATORY: u32 = 0x0000_0001;
    /// The group is enabled by default.
    pub const ENABLED_BY_DEFAULT: u32 = 0x0000_0002;
    /// The group is enabled.
    pub const ENABLED: u32 = 0x0000_0004;
    /// The group may be assigned as an owner.
    pub const OWNER: u32 = 0x0000_0008;
    /// The group is only used for deny checks.
    pub const USE_FOR_DENY_ONLY: u32 = 0x0000_0010;
    /// The identifier is a mandatory integrity label.
    pub const INTEGRITY: u32 = 0x0000_0020;
    /// The integrity label is enforced.
    pub const INTEGRITY_ENABLED: u32 = 0x0000_0040;
    /// Domain-local group.
    pub const RESOURCE: u32 = 0x2000_0000;
    /// Logon session identifier.
    pub const LOGON_ID: u32 = 0xC000_0000;
}

/// One source entry: a reference to an identifier owned elsewhere plus
/// its 32-bit attribute mask.
///
/// Position within a slice of entries is significant and is preserved by
/// duplication.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SidAndAttributes<'a> {
    /// The identifier this entry refers to.
    pub sid: &'a Sid,
    /// Attribute bitmask, carried verbatim.
    pub attributes: u32,
}

impl<'a> SidAndAttributes<'a> {
    /// Pair an identifier with its attributes.
    pub fn new(sid: &'a Sid, attributes: u32) -> Self {
        Self { sid, attributes }
    }
}
