//! The tree container and its handle-based operation surface.

use generational_arena::{Arena, Index};
use tracing::instrument;
use uuid::Uuid;

use crate::arena::{Node, Preorder};
use crate::error::{TreeError, TreeResult};

/// A cursor naming one node inside the [`Tree`] that minted it.
///
/// Handles are plain `Copy` values: reassignment is ordinary `=`, and
/// any number of handles may alias the same node. A handle owns
/// nothing. Every operation goes through the tree, which validates the
/// handle first:
///
/// * a handle whose node was removed by [`Tree::prune`] fails with
///   [`TreeError::StaleHandle`],
/// * a handle applied to a tree other than the one that minted it
///   (including clones of that tree) fails with
///   [`TreeError::ForeignHandle`].
///
/// Either way the tree is left untouched; there is no way to corrupt a
/// tree through an outdated handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle {
    tree: Uuid,
    node: Index,
}

/// A general-purpose multi-way tree: one root, any number of children
/// per node, insertion order preserved.
///
/// The tree owns every node. Nodes are stored in a generational arena,
/// addressed by [`NodeHandle`] cursors obtained from
/// [`root_handle`](Tree::root_handle) and the navigation operations.
/// The node count is maintained incrementally and queried in O(1).
#[derive(Debug)]
pub struct Tree<T> {
    /// Provenance tag baked into every handle this tree mints
    id: Uuid,
    /// Arena storage for all nodes
    arena: Arena<Node<T>>,
    /// Index of the root node
    root: Index,
    /// Live node count, kept in step with every mutation
    len: usize,
}

impl<T> Tree<T> {
    /// Create a tree holding a single root node with the given value.
    pub fn new(value: T) -> Self {
        let mut arena = Arena::new();
        let root = arena.insert(Node::new(value, None));
        Self {
            id: Uuid::new_v4(),
            arena,
            root,
            len: 1,
        }
    }

    /// Number of nodes currently in the tree, root included. O(1).
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no nodes.
    ///
    /// Kept for API completeness: the root cannot be pruned away, so a
    /// tree built through the public API always has at least one node
    /// and this returns `false`.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Handle on the root node.
    pub fn root_handle(&self) -> NodeHandle {
        NodeHandle {
            tree: self.id,
            node: self.root,
        }
    }

    /// Whether `handle` refers to a live node of this tree.
    pub fn contains(&self, handle: NodeHandle) -> bool {
        handle.tree == self.id && self.arena.contains(handle.node)
    }

    /// Resolve a handle to its node, rejecting foreign and stale ones.
    fn node(&self, handle: NodeHandle) -> TreeResult<&Node<T>> {
        if handle.tree != self.id {
            return Err(TreeError::ForeignHandle);
        }
        self.arena.get(handle.node).ok_or(TreeError::StaleHandle)
    }

    /// Append a new leaf holding `value` as the last child of `handle`.
    ///
    /// Returns a handle on the new node. The node count grows by one.
    #[instrument(level = "trace", skip(self, value))]
    pub fn add_child(&mut self, handle: NodeHandle, value: T) -> TreeResult<NodeHandle> {
        self.node(handle)?;
        let child = self.arena.insert(Node::new(value, Some(handle.node)));
        self.arena[handle.node].children.push(child);
        self.len += 1;
        Ok(NodeHandle {
            tree: self.id,
            node: child,
        })
    }

    /// Handle on the `index`-th child (0-based, insertion order) of
    /// `handle`.
    #[instrument(level = "trace", skip(self))]
    pub fn child(&self, handle: NodeHandle, index: usize) -> TreeResult<NodeHandle> {
        let node = self.node(handle)?;
        node.children
            .get(index)
            .map(|&idx| NodeHandle {
                tree: self.id,
                node: idx,
            })
            .ok_or(TreeError::ChildOutOfRange {
                index,
                len: node.children.len(),
            })
    }

    /// Handle on the parent of `handle`. The root has none.
    #[instrument(level = "trace", skip(self))]
    pub fn parent(&self, handle: NodeHandle) -> TreeResult<NodeHandle> {
        self.node(handle)?
            .parent
            .map(|idx| NodeHandle {
                tree: self.id,
                node: idx,
            })
            .ok_or(TreeError::RootHasNoParent)
    }

    /// Number of direct children of `handle`. O(1).
    pub fn num_children(&self, handle: NodeHandle) -> TreeResult<usize> {
        Ok(self.node(handle)?.children.len())
    }

    /// Read access to the value stored at `handle`.
    pub fn value(&self, handle: NodeHandle) -> TreeResult<&T> {
        Ok(&self.node(handle)?.value)
    }

    /// Write access to the value stored at `handle`.
    pub fn value_mut(&mut self, handle: NodeHandle) -> TreeResult<&mut T> {
        if handle.tree != self.id {
            return Err(TreeError::ForeignHandle);
        }
        self.arena
            .get_mut(handle.node)
            .map(|node| &mut node.value)
            .ok_or(TreeError::StaleHandle)
    }

    /// Remove every descendant of `handle`, leaving the node itself as
    /// a leaf. Returns the number of nodes removed (0 for a leaf).
    ///
    /// Handles captured on removed nodes become stale and are rejected
    /// by all subsequent operations. Runs on an explicit stack, so
    /// subtree depth is not limited by the call stack.
    #[instrument(level = "debug", skip(self))]
    pub fn prune(&mut self, handle: NodeHandle) -> TreeResult<usize> {
        let mut stack = self.node(handle)?.children.clone();
        let mut removed = 0;
        while let Some(idx) = stack.pop() {
            if let Some(node) = self.arena.remove(idx) {
                stack.extend(node.children);
                removed += 1;
            }
        }
        self.arena[handle.node].children.clear();
        self.len -= removed;
        Ok(removed)
    }

    /// Number of nodes on the longest root-to-leaf path.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(self.root, 1usize)];
        while let Some((idx, depth)) = stack.pop() {
            if let Some(node) = self.arena.get(idx) {
                max_depth = max_depth.max(depth);
                for &child in &node.children {
                    stack.push((child, depth + 1));
                }
            }
        }
        max_depth
    }

    /// Values of all leaf nodes, in preorder.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_values(&self) -> Vec<&T> {
        self.preorder()
            .filter(|(_, node)| node.children.is_empty())
            .map(|(_, node)| &node.value)
            .collect()
    }

    pub(crate) fn preorder(&self) -> Preorder<'_, T> {
        Preorder::new(&self.arena, self.root)
    }

    pub(crate) fn arena(&self) -> &Arena<Node<T>> {
        &self.arena
    }

    pub(crate) fn root_index(&self) -> Index {
        self.root
    }
}

impl<T: Clone> Clone for Tree<T> {
    /// Deep copy: every node is duplicated, nothing is shared with the
    /// source. The copy gets a fresh provenance id, so handles minted
    /// by the source are foreign to it. Iterative, safe on deep trees.
    fn clone(&self) -> Self {
        let mut arena = Arena::with_capacity(self.len);
        let root = arena.insert(Node::new(self.arena[self.root].value.clone(), None));
        let mut stack = vec![(self.root, root)];
        while let Some((src, dst)) = stack.pop() {
            for &child_src in &self.arena[src].children {
                let child_dst =
                    arena.insert(Node::new(self.arena[child_src].value.clone(), Some(dst)));
                arena[dst].children.push(child_dst);
                stack.push((child_src, child_dst));
            }
        }
        Self {
            id: Uuid::new_v4(),
            arena,
            root,
            len: self.len,
        }
    }

    /// Assignment builds the complete copy before the current node
    /// graph is released, so the destination's data can never be torn
    /// down while it is still being read from.
    fn clone_from(&mut self, source: &Self) {
        *self = source.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    // root 'r' with children 'a', 'b', 'c'; 'a' has children 'x', 'y'
    //
    //        r
    //      / | \
    //     a  b  c
    //    / \
    //   x   y
    #[fixture]
    fn sample() -> Tree<char> {
        let mut tree = Tree::new('r');
        let root = tree.root_handle();
        let a = tree.add_child(root, 'a').unwrap();
        tree.add_child(root, 'b').unwrap();
        tree.add_child(root, 'c').unwrap();
        tree.add_child(a, 'x').unwrap();
        tree.add_child(a, 'y').unwrap();
        tree
    }

    #[test]
    fn test_new_tree_has_single_root() {
        let tree = Tree::new(42);
        assert_eq!(tree.len(), 1);
        assert!(!tree.is_empty());
        assert_eq!(tree.value(tree.root_handle()).unwrap(), &42);
        assert_eq!(tree.num_children(tree.root_handle()).unwrap(), 0);
    }

    #[test]
    fn test_add_child_round_trip() {
        let mut tree = Tree::new("root");
        let root = tree.root_handle();
        tree.add_child(root, "first").unwrap();
        let last = tree
            .child(root, tree.num_children(root).unwrap() - 1)
            .unwrap();
        assert_eq!(tree.value(last).unwrap(), &"first");
        assert_eq!(tree.parent(last).unwrap(), root);
    }

    #[rstest]
    fn test_children_in_insertion_order(sample: Tree<char>) {
        let root = sample.root_handle();
        let values: Vec<char> = (0..3)
            .map(|i| *sample.value(sample.child(root, i).unwrap()).unwrap())
            .collect();
        assert_eq!(values, vec!['a', 'b', 'c']);
    }

    #[rstest]
    #[case(3)]
    #[case(100)]
    fn test_child_out_of_range(sample: Tree<char>, #[case] index: usize) {
        let root = sample.root_handle();
        let err = sample.child(root, index).unwrap_err();
        assert_eq!(err, TreeError::ChildOutOfRange { index, len: 3 });
        assert_eq!(sample.len(), 6);
    }

    #[rstest]
    fn test_parent_of_root_errors(sample: Tree<char>) {
        let err = sample.parent(sample.root_handle()).unwrap_err();
        assert_eq!(err, TreeError::RootHasNoParent);
        assert_eq!(sample.len(), 6);
    }

    #[rstest]
    fn test_prune_known_shape(sample: Tree<char>) {
        let mut tree = sample;
        let root = tree.root_handle();
        let a = tree.child(root, 0).unwrap();

        let removed = tree.prune(a).unwrap();
        assert_eq!(removed, 2);
        assert_eq!(tree.len(), 4);
        assert_eq!(tree.num_children(a).unwrap(), 0);

        let removed = tree.prune(root).unwrap();
        assert_eq!(removed, 3);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.num_children(root).unwrap(), 0);
    }

    #[test]
    fn test_prune_leaf_is_noop() {
        let mut tree = Tree::new('x');
        let removed = tree.prune(tree.root_handle()).unwrap();
        assert_eq!(removed, 0);
        assert_eq!(tree.len(), 1);
    }

    #[rstest]
    fn test_stale_handle_rejected_after_prune(sample: Tree<char>) {
        let mut tree = sample;
        let root = tree.root_handle();
        let a = tree.child(root, 0).unwrap();
        let x = tree.child(a, 0).unwrap();

        tree.prune(a).unwrap();

        assert_eq!(tree.value(x).unwrap_err(), TreeError::StaleHandle);
        assert_eq!(tree.num_children(x).unwrap_err(), TreeError::StaleHandle);
        assert_eq!(tree.add_child(x, 'z').unwrap_err(), TreeError::StaleHandle);
        assert!(!tree.contains(x));
        // the pruned-at node itself survives
        assert!(tree.contains(a));
    }

    #[rstest]
    fn test_foreign_handle_rejected(sample: Tree<char>) {
        let mut other = Tree::new('q');
        let foreign = sample.root_handle();
        assert_eq!(other.value(foreign).unwrap_err(), TreeError::ForeignHandle);
        assert_eq!(
            other.add_child(foreign, 'z').unwrap_err(),
            TreeError::ForeignHandle
        );
        assert_eq!(other.len(), 1);
    }

    #[rstest]
    fn test_clone_is_independent(sample: Tree<char>) {
        let original = sample;
        let mut copy = original.clone();
        assert_eq!(copy.len(), original.len());

        // handles do not transfer to the copy
        assert_eq!(
            copy.value(original.root_handle()).unwrap_err(),
            TreeError::ForeignHandle
        );

        let copy_root = copy.root_handle();
        copy.add_child(copy_root, 'z').unwrap();
        copy.prune(copy.child(copy_root, 0).unwrap()).unwrap();
        assert_eq!(copy.len(), 5);
        assert_eq!(original.len(), 6);
    }

    #[rstest]
    fn test_clone_from_identical_tree_is_unchanged(sample: Tree<char>) {
        let mut tree = sample;
        let before = (tree.len(), tree.render());
        let snapshot = tree.clone();
        tree.clone_from(&snapshot);
        assert_eq!((tree.len(), tree.render()), before);
    }

    #[rstest]
    fn test_depth_and_leaves(sample: Tree<char>) {
        assert_eq!(sample.depth(), 3);
        assert_eq!(sample.leaf_values(), vec![&'x', &'y', &'b', &'c']);
    }
}
