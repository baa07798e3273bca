//! Path-copying point update.
//!
//! An update never touches an existing node. It allocates one replacement
//! node per level on the way to the target leaf; each replacement keeps the
//! untouched sibling as the very same `Arc` and points at the freshly copied
//! child instead of the old one.

use std::sync::Arc;

use crate::error::TreeError;
use crate::node::{split, Node, NodeRef};
use crate::types::Monoid;

/// Result of one path copy.
#[derive(Debug)]
pub(crate) struct PathCopy<T> {
    pub(crate) root: NodeRef<T>,
    /// Nodes allocated for the new root-to-leaf path.
    pub(crate) allocated: usize,
}

/// Returns a new root equal to `root` except that leaf `index` holds
/// `value`. `len` is the array length `root` covers.
pub(crate) fn path_copy<M: Monoid>(
    monoid: &M,
    root: &NodeRef<M::Value>,
    len: usize,
    index: usize,
    value: M::Value,
) -> Result<PathCopy<M::Value>, TreeError> {
    if index >= len {
        return Err(TreeError::index(index, len));
    }
    let mut allocated = 0;
    let root = copy_path(monoid, root, 0, len - 1, index, value, &mut allocated);
    Ok(PathCopy { root, allocated })
}

fn copy_path<M: Monoid>(
    monoid: &M,
    node: &NodeRef<M::Value>,
    lo: usize,
    hi: usize,
    index: usize,
    value: M::Value,
    allocated: &mut usize,
) -> NodeRef<M::Value> {
    *allocated += 1;
    match node.as_ref() {
        Node::Leaf { .. } => Node::leaf(value),
        Node::Internal { left, right, .. } => {
            let mid = split(lo, hi);
            if index <= mid {
                let left = copy_path(monoid, left, lo, mid, index, value, allocated);
                Node::internal(monoid, left, Arc::clone(right))
            } else {
                let right = copy_path(monoid, right, mid + 1, hi, index, value, allocated);
                Node::internal(monoid, Arc::clone(left), right)
            }
        }
    }
}
