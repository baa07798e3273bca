use thiserror::Error;

use crate::types::VersionId;

/// Errors reported by tree construction, updates and queries.
///
/// Index and version fields carry the caller-supplied value in signed form so
/// that negative arguments coming from text front ends report faithfully.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("cannot build a tree from an empty sequence")]
    EmptyInput,
    #[error("index range [{lo}, {hi}] out of bounds for length {len}")]
    IndexOutOfRange { lo: i64, hi: i64, len: usize },
    #[error("version {0} not found")]
    VersionNotFound(i64),
    #[error("no versions registered")]
    NoVersions,
    #[error("tree already built")]
    AlreadyBuilt,
    #[error("version limit of {limit} reached")]
    VersionLimitReached { limit: usize },
}

impl TreeError {
    pub(crate) fn index(index: usize, len: usize) -> Self {
        Self::range(index, index, len)
    }

    pub(crate) fn range(lo: usize, hi: usize, len: usize) -> Self {
        TreeError::IndexOutOfRange {
            lo: i64::try_from(lo).unwrap_or(i64::MAX),
            hi: i64::try_from(hi).unwrap_or(i64::MAX),
            len,
        }
    }

    pub(crate) fn missing(version: VersionId) -> Self {
        TreeError::VersionNotFound(version.to_i64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            TreeError::index(4, 4).to_string(),
            "index range [4, 4] out of bounds for length 4"
        );
        assert_eq!(
            TreeError::missing(VersionId::from_u64(99)).to_string(),
            "version 99 not found"
        );
        assert_eq!(
            TreeError::VersionLimitReached { limit: 2 }.to_string(),
            "version limit of 2 reached"
        );
    }

    #[test]
    fn oversized_indices_saturate() {
        assert_eq!(
            TreeError::range(usize::MAX, usize::MAX, 1),
            TreeError::IndexOutOfRange {
                lo: i64::MAX,
                hi: i64::MAX,
                len: 1
            }
        );
    }
}
