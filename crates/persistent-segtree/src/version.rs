//! Append-only version registry.
//!
//! The table is the only shared mutable state of a tree. Readers take the
//! read lock just long enough to clone a root `Arc`; writers take the write
//! lock only to push a finished root. Entries are never removed or
//! reordered, so a poisoned lock still guards a consistent table and is
//! recovered rather than propagated.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::config::TreeConfig;
use crate::error::TreeError;
use crate::node::NodeRef;
use crate::types::VersionId;

/// Root of one registered version.
#[derive(Debug)]
pub struct VersionRoot<T> {
    pub version: VersionId,
    pub node: NodeRef<T>,
    /// Length of the array every root of this table covers.
    pub len: usize,
}

impl<T> Clone for VersionRoot<T> {
    fn clone(&self) -> Self {
        Self {
            version: self.version,
            node: NodeRef::clone(&self.node),
            len: self.len,
        }
    }
}

#[derive(Debug)]
struct Entry<T> {
    root: NodeRef<T>,
    base: Option<VersionId>,
}

#[derive(Debug)]
struct Entries<T> {
    array_len: usize,
    slots: Vec<Entry<T>>,
}

/// Registry of every version of one tree, reached through
/// [`PersistentTree::versions`](crate::PersistentTree::versions).
#[derive(Debug)]
pub struct VersionTable<T> {
    entries: RwLock<Entries<T>>,
    max_versions: Option<usize>,
}

impl<T> VersionTable<T> {
    pub(crate) fn with_config(config: &TreeConfig) -> Self {
        Self {
            entries: RwLock::new(Entries {
                array_len: 0,
                slots: Vec::with_capacity(config.version_capacity),
            }),
            max_versions: config.max_versions,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Entries<T>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Entries<T>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of registered versions.
    pub fn len(&self) -> usize {
        self.read().slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().slots.is_empty()
    }

    /// Array length covered by the roots, once version 0 exists.
    pub fn array_len(&self) -> Option<usize> {
        let entries = self.read();
        (!entries.slots.is_empty()).then_some(entries.array_len)
    }

    /// Greatest registered id.
    pub fn latest(&self) -> Result<VersionId, TreeError> {
        match self.read().slots.len() {
            0 => Err(TreeError::NoVersions),
            n => Ok(VersionId::from_slot(n - 1)),
        }
    }

    /// Root of `version`. Fails [`TreeError::NoVersions`] on an empty table.
    pub fn root(&self, version: VersionId) -> Result<VersionRoot<T>, TreeError> {
        let entries = self.read();
        if entries.slots.is_empty() {
            return Err(TreeError::NoVersions);
        }
        let entry = lookup(&entries, version)?;
        Ok(VersionRoot {
            version,
            node: NodeRef::clone(&entry.root),
            len: entries.array_len,
        })
    }

    /// Version `version` was derived from; `None` for version 0.
    pub fn base(&self, version: VersionId) -> Result<Option<VersionId>, TreeError> {
        let entries = self.read();
        Ok(lookup(&entries, version)?.base)
    }

    /// `version` followed by its base, the base's base, and so on down to
    /// version 0.
    pub fn lineage(&self, version: VersionId) -> Result<Vec<VersionId>, TreeError> {
        let entries = self.read();
        let mut chain = vec![version];
        let mut curr = lookup(&entries, version)?.base;
        while let Some(base) = curr {
            chain.push(base);
            curr = lookup(&entries, base)?.base;
        }
        Ok(chain)
    }

    /// Registers the built tree as version 0.
    pub(crate) fn register_initial(&self, root: NodeRef<T>, len: usize) -> Result<VersionId, TreeError> {
        let mut entries = self.write();
        if !entries.slots.is_empty() {
            return Err(TreeError::AlreadyBuilt);
        }
        self.check_limit(&entries)?;
        entries.array_len = len;
        entries.slots.push(Entry { root, base: None });
        Ok(VersionId::INITIAL)
    }

    /// Registers `root` as a new version derived from `base` and returns
    /// its id.
    pub(crate) fn append(&self, root: NodeRef<T>, base: VersionId) -> Result<VersionId, TreeError> {
        let mut entries = self.write();
        lookup(&entries, base)?;
        self.check_limit(&entries)?;
        let id = VersionId::from_slot(entries.slots.len());
        entries.slots.push(Entry {
            root,
            base: Some(base),
        });
        Ok(id)
    }

    fn check_limit(&self, entries: &Entries<T>) -> Result<(), TreeError> {
        match self.max_versions {
            Some(limit) if entries.slots.len() >= limit => Err(TreeError::VersionLimitReached { limit }),
            _ => Ok(()),
        }
    }
}

fn lookup<T>(entries: &Entries<T>, version: VersionId) -> Result<&Entry<T>, TreeError> {
    version
        .slot()
        .and_then(|slot| entries.slots.get(slot))
        .ok_or_else(|| TreeError::missing(version))
}
