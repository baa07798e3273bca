//! Initial tree construction.

use crate::error::TreeError;
use crate::node::{split, Node, NodeRef};
use crate::types::Monoid;

/// Builds a balanced tree over `values`, bottom-up.
///
/// The shape depends only on `values.len()`: ranges are split at the
/// midpoint with the extra element of odd-length ranges going left, and leaf
/// `i` holds `values[i]`.
pub(crate) fn build_tree<M: Monoid>(monoid: &M, values: &[M::Value]) -> Result<NodeRef<M::Value>, TreeError> {
    if values.is_empty() {
        return Err(TreeError::EmptyInput);
    }
    Ok(build_range(monoid, values, 0, values.len() - 1))
}

fn build_range<M: Monoid>(monoid: &M, values: &[M::Value], lo: usize, hi: usize) -> NodeRef<M::Value> {
    if lo == hi {
        return Node::leaf(values[lo].clone());
    }
    let mid = split(lo, hi);
    let left = build_range(monoid, values, lo, mid);
    let right = build_range(monoid, values, mid + 1, hi);
    Node::internal(monoid, left, right)
}
