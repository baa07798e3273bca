//! Core trait and identifier definitions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Associative combine operation with a neutral element.
///
/// Internal nodes cache `combine(left, right)` of their children, and range
/// queries fold the cached aggregates of the covering nodes. Both rely on
/// `combine` being associative and on `identity` being neutral for it.
pub trait Monoid {
    type Value: Clone;

    fn identity(&self) -> Self::Value;
    fn combine(&self, a: &Self::Value, b: &Self::Value) -> Self::Value;
}

/// Identifier of a registered version.
///
/// Ids are dense and assigned in registration order: the built tree is
/// version 0 and every successful update takes the next id.
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionId(u64);

impl VersionId {
    /// The version registered by the initial build.
    pub const INITIAL: VersionId = VersionId(0);

    pub fn from_u64(id: u64) -> VersionId {
        VersionId(id)
    }

    pub fn to_u64(&self) -> u64 {
        self.0
    }

    /// Signed form used in error reports, saturating at `i64::MAX`.
    pub fn to_i64(&self) -> i64 {
        i64::try_from(self.0).unwrap_or(i64::MAX)
    }

    pub(crate) fn from_slot(slot: usize) -> VersionId {
        VersionId(slot as u64)
    }

    pub(crate) fn slot(&self) -> Option<usize> {
        usize::try_from(self.0).ok()
    }
}

impl From<u64> for VersionId {
    fn from(id: u64) -> Self {
        VersionId(id)
    }
}

impl fmt::Display for VersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
