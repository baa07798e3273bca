//! Persistent segment tree with path-copying updates.
//!
//! Every point update produces a new immutable *version* instead of mutating
//! the tree. Only the nodes on the root-to-leaf path of the updated index are
//! reallocated; all other subtrees are shared by reference (`Arc`) between
//! the base version and the new one. Any version ever registered can be
//! queried in O(log n), and any version can serve as the base of a further
//! update, so history forms a branching version tree.
//!
//! ```
//! use persistent_segtree::{PersistentTree, Sum, VersionId};
//!
//! let tree = PersistentTree::new(Sum::<i64>::new());
//! let v0 = tree.build(&[5, 3, 7, 2]).unwrap();
//! let v1 = tree.apply(v0, 1, 6).unwrap();
//!
//! assert_eq!(tree.query_point(v0, 1).unwrap(), 3);
//! assert_eq!(tree.query_point(v1, 1).unwrap(), 6);
//! assert_eq!(tree.query_range(v1, 0, 3).unwrap(), 20);
//! assert_eq!(tree.latest_version().unwrap(), VersionId::from_u64(1));
//! ```
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`types`] | [`Monoid`] trait and [`VersionId`] |
//! | [`monoid`] | [`Sum`], [`Min`], [`Max`], [`FnMonoid`] |
//! | [`node`] | immutable [`Node`] cells and [`NodeRef`] |
//! | `builder` | initial tree construction |
//! | `updater` | path-copying point update |
//! | `query` | point and range lookups |
//! | [`version`] | append-only [`VersionTable`] |
//! | [`tree`] | [`PersistentTree`] context object |
//! | [`snapshot`] | [`Snapshot`] read handle on one version |
//! | `print` | box-drawing tree dumps |
//! | [`script`] | line-oriented command interpreter behind the `pst` binary |
//! | [`config`] | [`TreeConfig`] |
//! | [`error`] | [`TreeError`] |

mod builder;
pub mod config;
pub mod error;
pub mod monoid;
pub mod node;
mod print;
mod query;
pub mod script;
pub mod snapshot;
pub mod tree;
pub mod types;
mod updater;
pub mod version;

pub use config::TreeConfig;
pub use error::TreeError;
pub use monoid::{FnMonoid, Max, Min, Sum};
pub use node::{Node, NodeRef};
pub use script::{Script, ScriptError};
pub use snapshot::{Leaves, Snapshot};
pub use tree::PersistentTree;
pub use types::{Monoid, VersionId};
pub use version::{VersionRoot, VersionTable};
