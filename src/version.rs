//! RINEX revision
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// RINEX revision, as declared in the header
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Version {
    /// Version major number
    pub major: u8,
    /// Version minor number
    pub minor: u8,
}

impl Default for Version {
    fn default() -> Self {
        Self::V3
    }
}

impl Version {
    /// RINEX 2.11, the last RINEX-2 revision
    pub const V2: Self = Self { major: 2, minor: 11 };
    /// RINEX 3.04
    pub const V3: Self = Self { major: 3, minor: 4 };

    pub fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }
    /// True if this revision uses 2 character observation codes
    pub fn is_rinex2(&self) -> bool {
        self.major < 3
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}.{:02}", self.major, self.minor)
    }
}
