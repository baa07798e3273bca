//! Point and range lookups. Nothing here allocates nodes.

use crate::error::TreeError;
use crate::node::{split, Node, NodeRef};
use crate::types::Monoid;

pub(crate) fn check_index(index: usize, len: usize) -> Result<(), TreeError> {
    if index < len {
        Ok(())
    } else {
        Err(TreeError::index(index, len))
    }
}

/// Inclusive bounds; `lo > hi` is rejected like an out-of-range bound.
pub(crate) fn check_range(lo: usize, hi: usize, len: usize) -> Result<(), TreeError> {
    if lo <= hi && hi < len {
        Ok(())
    } else {
        Err(TreeError::range(lo, hi, len))
    }
}

/// Leaf covering `index`. Callers check `index` with [`check_index`] first.
pub(crate) fn leaf<T>(root: &NodeRef<T>, len: usize, index: usize) -> &NodeRef<T> {
    debug_assert!(index < len, "index {index} out of bounds for length {len}");
    let mut node = root;
    let (mut lo, mut hi) = (0, len - 1);
    while let Node::Internal { left, right, .. } = node.as_ref() {
        let mid = split(lo, hi);
        if index <= mid {
            node = left;
            hi = mid;
        } else {
            node = right;
            lo = mid + 1;
        }
    }
    node
}

/// Value stored at `index`. `index` must be below `len`.
pub(crate) fn point<T>(root: &NodeRef<T>, len: usize, index: usize) -> &T {
    leaf(root, len, index).aggregate()
}

/// Aggregate of `[lo, hi]`. Callers check the bounds with [`check_range`]
/// first.
pub(crate) fn range<M: Monoid>(monoid: &M, root: &NodeRef<M::Value>, len: usize, lo: usize, hi: usize) -> M::Value {
    debug_assert!(lo <= hi && hi < len, "range [{lo}, {hi}] out of bounds for length {len}");
    fold_range(monoid, root, 0, len - 1, lo, hi)
}

fn fold_range<M: Monoid>(
    monoid: &M,
    node: &NodeRef<M::Value>,
    node_lo: usize,
    node_hi: usize,
    lo: usize,
    hi: usize,
) -> M::Value {
    if hi < node_lo || node_hi < lo {
        return monoid.identity();
    }
    if lo <= node_lo && node_hi <= hi {
        return node.aggregate().clone();
    }
    match node.as_ref() {
        Node::Internal { left, right, .. } => {
            let mid = split(node_lo, node_hi);
            monoid.combine(
                &fold_range(monoid, left, node_lo, mid, lo, hi),
                &fold_range(monoid, right, mid + 1, node_hi, lo, hi),
            )
        }
        // A leaf is either fully inside or fully outside.
        Node::Leaf { value } => value.clone(),
    }
}
