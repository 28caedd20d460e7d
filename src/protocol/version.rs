//! Protocol version identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An AMQP protocol version, `major-minor[-revision]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProtocolVersion {
    /// Major version.
    pub major: u8,
    /// Minor version.
    pub minor: u8,
    /// Revision, 0 when the version has none.
    pub revision: u8,
}

impl ProtocolVersion {
    /// AMQP 0-8.
    pub const V0_8: Self = Self::new(0, 8, 0);

    /// AMQP 0-9-1.
    pub const V0_9_1: Self = Self::new(0, 9, 1);

    /// Versions with a method table in this crate.
    pub const SUPPORTED: &'static [Self] = &[Self::V0_8, Self::V0_9_1];

    /// Create a version.
    pub const fn new(major: u8, minor: u8, revision: u8) -> Self {
        Self {
            major,
            minor,
            revision,
        }
    }

    /// Check if this crate has a method table for the version.
    pub fn is_supported(&self) -> bool {
        Self::SUPPORTED.contains(self)
    }
}

impl Default for ProtocolVersion {
    fn default() -> Self {
        Self::V0_9_1
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.revision == 0 {
            write!(f, "{}-{}", self.major, self.minor)
        } else {
            write!(f, "{}-{}-{}", self.major, self.minor, self.revision)
        }
    }
}
