//! Box-drawing tree dumps.

use std::fmt::Display;

use crate::node::{split, Node, NodeRef};

/// Dumps the subtree `node` covering `[lo, hi]`: internal nodes as
/// `[lo..hi] = aggregate`, leaves as `[i] = value`. `tab` prefixes every
/// line below the first.
pub(crate) fn dump_node<T: Display>(node: &NodeRef<T>, lo: usize, hi: usize, tab: &str) -> String {
    match node.as_ref() {
        Node::Leaf { value } => format!("[{lo}] = {value}"),
        Node::Internal {
            aggregate,
            left,
            right,
        } => {
            let mid = split(lo, hi);
            let left = dump_node(left, lo, mid, &format!("{tab}│  "));
            let right = dump_node(right, mid + 1, hi, &format!("{tab}   "));
            format!("[{lo}..{hi}] = {aggregate}\n{tab}├─ {left}\n{tab}└─ {right}")
        }
    }
}
