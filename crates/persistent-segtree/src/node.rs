//! Immutable tree cells.
//!
//! A node covers a contiguous index range `[lo, hi]`. Ranges are not stored;
//! they are recomputed on the way down from the root with [`split`], which
//! keeps nodes small and guarantees that build, update and query agree on
//! the shape.

use std::sync::Arc;

use crate::types::Monoid;

/// Shared handle to a node. One node may be reachable from many version
/// roots and many parents at once.
pub type NodeRef<T> = Arc<Node<T>>;

#[derive(Debug)]
pub enum Node<T> {
    /// Covers a single index.
    Leaf { value: T },
    /// Covers `[lo, hi]` with `left` on `[lo, mid]` and `right` on
    /// `[mid + 1, hi]`. `aggregate` is fixed at construction.
    Internal {
        aggregate: T,
        left: NodeRef<T>,
        right: NodeRef<T>,
    },
}

impl<T> Node<T> {
    pub fn leaf(value: T) -> NodeRef<T> {
        Arc::new(Node::Leaf { value })
    }

    pub fn internal<M>(monoid: &M, left: NodeRef<T>, right: NodeRef<T>) -> NodeRef<T>
    where
        M: Monoid<Value = T>,
    {
        let aggregate = monoid.combine(left.aggregate(), right.aggregate());
        Arc::new(Node::Internal {
            aggregate,
            left,
            right,
        })
    }

    /// Combination of every value in the covered range. A leaf's aggregate
    /// is its own value.
    pub fn aggregate(&self) -> &T {
        match self {
            Node::Leaf { value } => value,
            Node::Internal { aggregate, .. } => aggregate,
        }
    }

    pub fn children(&self) -> Option<(&NodeRef<T>, &NodeRef<T>)> {
        match self {
            Node::Leaf { .. } => None,
            Node::Internal { left, right, .. } => Some((left, right)),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }
}

/// Last index of the left half of `[lo, hi]`. Odd-length ranges put the
/// extra element on the left.
#[inline]
pub(crate) fn split(lo: usize, hi: usize) -> usize {
    lo + (hi - lo) / 2
}

/// Number of nodes reachable from `fresh` that are not the very same
/// allocation as the node in the corresponding position under `base`.
///
/// Both roots must cover the same range, which holds for any two versions of
/// one tree.
pub(crate) fn count_unshared<T>(fresh: &NodeRef<T>, base: &NodeRef<T>) -> usize {
    if Arc::ptr_eq(fresh, base) {
        return 0;
    }
    match (fresh.children(), base.children()) {
        (Some((fl, fr)), Some((bl, br))) => 1 + count_unshared(fl, bl) + count_unshared(fr, br),
        _ => 1,
    }
}
