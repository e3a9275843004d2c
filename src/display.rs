//! Textual rendering of trees.
//!
//! Two forms: the compact bracketed preorder dump (the `Display` impl)
//! and an ASCII-art view via `termtree` for human inspection. Neither
//! format is meant to be re-parsed.

use std::fmt;

use generational_arena::{Arena, Index};

use crate::arena::Node;
use crate::tree::Tree;

impl<T: fmt::Display> fmt::Display for Tree<T> {
    /// Bracketed preorder dump: `[`, then every node's value in
    /// preorder followed by one space, then `]`. A root `m` with
    /// children `a`, `r`, `k` renders as `[m a r k ]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (_, node) in self.preorder() {
            write!(f, "{} ", node.value)?;
        }
        f.write_str("]")
    }
}

impl<T: fmt::Display> Tree<T> {
    /// The bracketed preorder dump as an owned string.
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// ASCII-art rendering of the tree, one node per line.
    pub fn to_termtree(&self) -> termtree::Tree<String> {
        fn build<T: fmt::Display>(arena: &Arena<Node<T>>, idx: Index) -> termtree::Tree<String> {
            let node = &arena[idx];
            let leaves: Vec<_> = node
                .children
                .iter()
                .map(|&child| build(arena, child))
                .collect();
            termtree::Tree::new(node.value.to_string()).with_leaves(leaves)
        }

        build(self.arena(), self.root_index())
    }
}
