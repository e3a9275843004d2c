//! Node storage and traversal primitives.
//!
//! Nodes live in a generational arena and are addressed by `Index`.
//! Slots freed by pruning fail the generation check afterwards, which
//! is what lets the tree reject stale handles instead of walking into
//! freed memory.

use generational_arena::{Arena, Index};

/// A single node in the arena.
///
/// Never exposed outside the crate; callers address nodes through
/// [`NodeHandle`](crate::NodeHandle) values minted by the owning tree.
#[derive(Debug, Clone)]
pub(crate) struct Node<T> {
    /// Payload of this node
    pub value: T,
    /// Arena index of the parent node, None for the root
    pub parent: Option<Index>,
    /// Arena indices of the children, in insertion order
    pub children: Vec<Index>,
}

impl<T> Node<T> {
    pub fn new(value: T, parent: Option<Index>) -> Self {
        Self {
            value,
            parent,
            children: Vec::new(),
        }
    }
}

/// Depth-first preorder walk driven by an explicit stack, so traversal
/// depth never translates into call-stack depth.
pub(crate) struct Preorder<'a, T> {
    arena: &'a Arena<Node<T>>,
    stack: Vec<Index>,
}

impl<'a, T> Preorder<'a, T> {
    pub fn new(arena: &'a Arena<Node<T>>, start: Index) -> Self {
        Self {
            arena,
            stack: vec![start],
        }
    }
}

impl<'a, T> Iterator for Preorder<'a, T> {
    type Item = (Index, &'a Node<T>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.arena.get(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}
