//! Privilege levels
//!
//! Access levels are totally ordered; a higher level may run every command a
//! lower one may.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Access level of an account or of the active session
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Privilege {
    /// No active session
    Anonymous,
    /// Registered customer
    Customer,
    /// Shop staff
    Staff,
    /// Store owner
    Owner,
}

impl Privilege {
    /// Numeric level as used on the command line and in storage
    pub const fn level(&self) -> u8 {
        match self {
            Self::Anonymous => 0,
            Self::Customer => 1,
            Self::Staff => 3,
            Self::Owner => 7,
        }
    }

    /// Map a numeric level back to a privilege
    pub const fn from_level(level: u8) -> Option<Self> {
        match level {
            0 => Some(Self::Anonymous),
            1 => Some(Self::Customer),
            3 => Some(Self::Staff),
            7 => Some(Self::Owner),
            _ => None,
        }
    }

    /// Parse an account privilege from a single-digit token
    ///
    /// Only `1`, `3` and `7` name assignable levels; `0` is reserved for
    /// the anonymous state.
    pub fn parse_assignable(s: &str) -> Option<Self> {
        match s {
            "1" => Some(Self::Customer),
            "3" => Some(Self::Staff),
            "7" => Some(Self::Owner),
            _ => None,
        }
    }
}

impl Default for Privilege {
    fn default() -> Self {
        Self::Anonymous
    }
}

impl fmt::Display for Privilege {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.level())
    }
}

impl From<Privilege> for u8 {
    fn from(privilege: Privilege) -> Self {
        privilege.level()
    }
}

impl TryFrom<u8> for Privilege {
    type Error = String;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Self::from_level(level).ok_or_else(|| format!("invalid privilege level: {}", level))
    }
}
