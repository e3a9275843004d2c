//! Arena-backed multi-way tree with generation-tagged node handles.
//!
//! A [`Tree`] owns a single root node and any number of descendants,
//! with no restriction on children per node. All navigation and
//! mutation happens through [`NodeHandle`] cursors minted by the tree:
//! append a child, walk to the i-th child or the parent, read or write
//! a node's value, or prune a node's entire subtree of descendants.
//!
//! Nodes live in a generational arena, so a handle whose node was
//! pruned away is detected and rejected with a recoverable error
//! rather than touching freed storage. Handles are additionally tagged
//! with the identity of the tree that minted them; using one against a
//! different tree (a clone included) is rejected the same way.
//!
//! Cloning a tree is a deep copy: structure and values are duplicated,
//! and the two trees share nothing afterwards. Traversals, copies,
//! and prunes all run on explicit stacks, so pathologically deep trees
//! do not overflow the call stack.
//!
//! ```
//! use polytree::Tree;
//!
//! let mut tree = Tree::new('m');
//! let root = tree.root_handle();
//! for value in ['a', 'r', 'k'] {
//!     tree.add_child(root, value)?;
//! }
//! assert_eq!(tree.len(), 4);
//! assert_eq!(tree.render(), "[m a r k ]");
//!
//! let first = tree.child(root, 0)?;
//! assert_eq!(tree.value(first)?, &'a');
//! assert_eq!(tree.parent(first)?, root);
//! # Ok::<(), polytree::TreeError>(())
//! ```

mod arena;
mod display;
pub mod error;
mod tree;

pub use error::{TreeError, TreeResult};
pub use tree::{NodeHandle, Tree};
