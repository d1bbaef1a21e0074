//! Error types for identifier construction and byte-layout decoding.

use std::error::Error;
use std::fmt;

/// Errors from building, parsing, encoding, or decoding a [`Sid`](crate::Sid).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SidError {
    /// More sub-authorities than the protocol maximum of 15.
    TooManySubAuthorities {
        /// The count that was supplied or found in the header.
        count: usize,
    },
    /// A buffer is shorter than the layout requires.
    Truncated {
        /// Bytes the layout needs.
        needed: usize,
        /// Bytes actually available.
        available: usize,
    },
    /// Textual `S-R-A-...` form could not be parsed.
    Parse {
        /// The rejected input.
        input: String,
        /// What was wrong with it.
        reason: &'static str,
    },
}

impl fmt::Display for SidError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooManySubAuthorities { count } => {
                write!(
                    f,
                    "too many sub-authorities: {count} (maximum {})",
                    crate::MAX_SUB_AUTHORITIES
                )
            }
            Self::Truncated { needed, available } => {
                write!(
                    f,
                    "buffer truncated: need {needed} bytes, have {available}"
                )
            }
            Self::Parse { input, reason } => {
                write!(f, "invalid SID string '{input}': {reason}")
            }
        }
    }
}

impl Error for SidError {}
