//! Read handle on a single version.
//!
//! A [`Snapshot`] owns a clone of the version's root `Arc`, so it keeps the
//! whole version alive and answers queries without touching the version
//! table again.

use std::fmt;
use std::sync::Arc;

use crate::error::TreeError;
use crate::node::{count_unshared, split, Node, NodeRef};
use crate::print::dump_node;
use crate::query::{self, check_index, check_range};
use crate::types::{Monoid, VersionId};

pub struct Snapshot<M: Monoid> {
    version: VersionId,
    root: NodeRef<M::Value>,
    len: usize,
    monoid: Arc<M>,
}

impl<M: Monoid> Clone for Snapshot<M> {
    fn clone(&self) -> Self {
        Self {
            version: self.version,
            root: Arc::clone(&self.root),
            len: self.len,
            monoid: Arc::clone(&self.monoid),
        }
    }
}

impl<M> fmt::Debug for Snapshot<M>
where
    M: Monoid,
    M::Value: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snapshot")
            .field("version", &self.version)
            .field("len", &self.len)
            .field("total", self.root.aggregate())
            .finish_non_exhaustive()
    }
}

impl<M: Monoid> Snapshot<M> {
    pub(crate) fn new(version: VersionId, root: NodeRef<M::Value>, len: usize, monoid: Arc<M>) -> Self {
        Self {
            version,
            root,
            len,
            monoid,
        }
    }

    pub fn version(&self) -> VersionId {
        self.version
    }

    pub fn root(&self) -> &NodeRef<M::Value> {
        &self.root
    }

    /// Array length.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always `false`: a built tree holds at least one value.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn get(&self, index: usize) -> Result<M::Value, TreeError> {
        check_index(index, self.len)?;
        Ok(query::point(&self.root, self.len, index).clone())
    }

    /// Aggregate of the inclusive range `[lo, hi]`.
    pub fn range(&self, lo: usize, hi: usize) -> Result<M::Value, TreeError> {
        check_range(lo, hi, self.len)?;
        Ok(query::range(self.monoid.as_ref(), &self.root, self.len, lo, hi))
    }

    /// Aggregate of the whole array.
    pub fn total(&self) -> M::Value {
        self.root.aggregate().clone()
    }

    /// Values in index order.
    pub fn iter(&self) -> Leaves<'_, M::Value> {
        Leaves {
            stack: vec![&self.root],
        }
    }

    pub fn to_vec(&self) -> Vec<M::Value> {
        self.iter().cloned().collect()
    }

    /// Whether `index` resolves to the very same leaf allocation in both
    /// snapshots.
    pub fn shares_leaf_with(&self, other: &Snapshot<M>, index: usize) -> Result<bool, TreeError> {
        check_index(index, self.len)?;
        check_index(index, other.len)?;
        Ok(Arc::ptr_eq(
            query::leaf(&self.root, self.len, index),
            query::leaf(&other.root, other.len, index),
        ))
    }

    /// Nodes of this snapshot that are not shared with `base`. For a version
    /// produced by one update of `base` this is the length of the copied
    /// path.
    pub fn fresh_nodes_since(&self, base: &Snapshot<M>) -> usize {
        count_unshared(&self.root, &base.root)
    }

    /// Checks that every internal node caches `combine(left, right)` of its
    /// children and that the shape matches the midpoint split of `[0, len)`.
    pub fn assert_valid(&self) -> Result<(), String>
    where
        M::Value: PartialEq + fmt::Debug,
    {
        validate(self.monoid.as_ref(), &self.root, 0, self.len - 1)
    }

    /// Box-drawing dump of the whole version.
    pub fn dump(&self) -> String
    where
        M::Value: fmt::Display,
    {
        dump_node(&self.root, 0, self.len - 1, "")
    }
}

fn validate<M>(monoid: &M, node: &NodeRef<M::Value>, lo: usize, hi: usize) -> Result<(), String>
where
    M: Monoid,
    M::Value: PartialEq + fmt::Debug,
{
    match node.as_ref() {
        Node::Leaf { .. } if lo == hi => Ok(()),
        Node::Leaf { .. } => Err(format!("leaf covers [{lo}, {hi}]")),
        Node::Internal { .. } if lo == hi => Err(format!("internal node at leaf position {lo}")),
        Node::Internal {
            aggregate,
            left,
            right,
        } => {
            let mid = split(lo, hi);
            validate(monoid, left, lo, mid)?;
            validate(monoid, right, mid + 1, hi)?;
            let expected = monoid.combine(left.aggregate(), right.aggregate());
            if *aggregate != expected {
                return Err(format!(
                    "aggregate mismatch at [{lo}, {hi}]: cached {aggregate:?}, children give {expected:?}"
                ));
            }
            Ok(())
        }
    }
}

/// In-order iterator over the values of a snapshot.
pub struct Leaves<'a, T> {
    stack: Vec<&'a NodeRef<T>>,
}

impl<'a, T> Iterator for Leaves<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        while let Some(node) = self.stack.pop() {
            match node.as_ref() {
                Node::Leaf { value } => return Some(value),
                Node::Internal { left, right, .. } => {
                    self.stack.push(right);
                    self.stack.push(left);
                }
            }
        }
        None
    }
}
