//! The persistent tree context object.

use std::fmt;
use std::sync::Arc;

use crate::builder::build_tree;
use crate::config::TreeConfig;
use crate::error::TreeError;
use crate::query::{self, check_index, check_range};
use crate::snapshot::Snapshot;
use crate::types::{Monoid, VersionId};
use crate::updater::path_copy;
use crate::version::{VersionRoot, VersionTable};

/// A persistent array of `M::Value` with cached `M` aggregates.
///
/// A tree starts empty. [`build`](Self::build) registers version 0; every
/// successful [`apply`](Self::apply) registers one more version derived from
/// any existing one. All operations take `&self`: reads run concurrently
/// without contention, and concurrent updates serialize only on the final
/// registration step.
pub struct PersistentTree<M: Monoid> {
    monoid: Arc<M>,
    versions: VersionTable<M::Value>,
    config: TreeConfig,
}

impl<M> fmt::Debug for PersistentTree<M>
where
    M: Monoid + fmt::Debug,
    M::Value: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersistentTree")
            .field("monoid", &self.monoid)
            .field("versions", &self.versions)
            .field("config", &self.config)
            .finish()
    }
}

impl<M: Monoid + Default> Default for PersistentTree<M> {
    fn default() -> Self {
        Self::new(M::default())
    }
}

impl<M: Monoid> PersistentTree<M> {
    pub fn new(monoid: M) -> Self {
        Self::with_config(monoid, TreeConfig::default())
    }

    pub fn with_config(monoid: M, config: TreeConfig) -> Self {
        Self {
            monoid: Arc::new(monoid),
            versions: VersionTable::with_config(&config),
            config,
        }
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    pub fn monoid(&self) -> &M {
        &self.monoid
    }

    pub fn versions(&self) -> &VersionTable<M::Value> {
        &self.versions
    }

    /// Builds the tree over `values` and registers it as version 0.
    pub fn build(&self, values: &[M::Value]) -> Result<VersionId, TreeError> {
        if !self.versions.is_empty() {
            return Err(TreeError::AlreadyBuilt);
        }
        let root = build_tree(self.monoid.as_ref(), values)?;
        let version = self.versions.register_initial(root, values.len())?;
        tracing::debug!(len = values.len(), version = %version, "built initial version");
        Ok(version)
    }

    /// Registers a new version equal to `base` except that `index` holds
    /// `value`, and returns its id. `base` itself is left untouched.
    pub fn apply(&self, base: VersionId, index: usize, value: M::Value) -> Result<VersionId, TreeError> {
        let result = self.try_apply(base, index, value);
        if let Err(err) = &result {
            tracing::debug!(base = %base, index, error = %err, "update rejected");
        }
        result
    }

    fn try_apply(&self, base: VersionId, index: usize, value: M::Value) -> Result<VersionId, TreeError> {
        let root = self.versions.root(base)?;
        let copy = path_copy(self.monoid.as_ref(), &root.node, root.len, index, value)?;
        let version = self.versions.append(copy.root, base)?;
        tracing::debug!(
            base = %base,
            index,
            version = %version,
            allocated = copy.allocated,
            "registered version"
        );
        Ok(version)
    }

    /// [`apply`](Self::apply) against the latest version, for callers that
    /// keep a linear history.
    pub fn apply_latest(&self, index: usize, value: M::Value) -> Result<VersionId, TreeError> {
        let base = self.versions.latest()?;
        self.apply(base, index, value)
    }

    pub fn query_point(&self, version: VersionId, index: usize) -> Result<M::Value, TreeError> {
        let root = self.versions.root(version)?;
        check_index(index, root.len)?;
        tracing::trace!(version = %version, index, "point query");
        Ok(query::point(&root.node, root.len, index).clone())
    }

    /// Aggregate of the inclusive range `[lo, hi]`.
    pub fn query_range(&self, version: VersionId, lo: usize, hi: usize) -> Result<M::Value, TreeError> {
        let root = self.versions.root(version)?;
        check_range(lo, hi, root.len)?;
        tracing::trace!(version = %version, lo, hi, "range query");
        Ok(query::range(self.monoid.as_ref(), &root.node, root.len, lo, hi))
    }

    pub fn latest_version(&self) -> Result<VersionId, TreeError> {
        self.versions.latest()
    }

    pub fn version_count(&self) -> usize {
        self.versions.len()
    }

    /// Array length, once built.
    pub fn array_len(&self) -> Option<usize> {
        self.versions.array_len()
    }

    pub fn base_of(&self, version: VersionId) -> Result<Option<VersionId>, TreeError> {
        self.require_built()?;
        self.versions.base(version)
    }

    /// `version` and its chain of bases back to version 0.
    pub fn lineage(&self, version: VersionId) -> Result<Vec<VersionId>, TreeError> {
        self.require_built()?;
        self.versions.lineage(version)
    }

    /// Read handle pinning the root of `version`.
    pub fn snapshot(&self, version: VersionId) -> Result<Snapshot<M>, TreeError> {
        let VersionRoot { version, node, len } = self.versions.root(version)?;
        Ok(Snapshot::new(version, node, len, Arc::clone(&self.monoid)))
    }

    fn require_built(&self) -> Result<(), TreeError> {
        if self.versions.is_empty() {
            Err(TreeError::NoVersions)
        } else {
            Ok(())
        }
    }
}
