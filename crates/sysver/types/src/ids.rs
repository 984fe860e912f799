//! Strongly-typed identifiers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a system version snapshot
///
/// Ids are assigned by the system version store only, starting at 1.
/// The value 0 means "no deployment has happened yet" and never names a
/// stored snapshot.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SystemVersionId(u64);

impl SystemVersionId {
    /// Pointer value before the first snapshot exists
    pub const NONE: Self = Self(0);

    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u64 {
        self.0
    }

    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    /// The id that follows this one
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl From<u64> for SystemVersionId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for SystemVersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
