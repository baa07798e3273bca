//! Tree configuration.

use serde::{Deserialize, Serialize};

/// Configuration for a [`PersistentTree`](crate::PersistentTree).
///
/// Missing fields fall back to [`TreeConfig::default`] when deserializing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Version-table slots reserved up front.
    /// Default: 16
    pub version_capacity: usize,

    /// Upper bound on registered versions, the built version included.
    /// Default: unbounded
    pub max_versions: Option<usize>,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            version_capacity: 16,
            max_versions: None,
        }
    }
}

impl TreeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_version_capacity(mut self, version_capacity: usize) -> Self {
        self.version_capacity = version_capacity;
        self
    }

    pub fn with_max_versions(mut self, max_versions: usize) -> Self {
        self.max_versions = Some(max_versions);
        self
    }

    /// Parses a JSON document such as `{"max_versions": 1000}`.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
