//! Arena backed n-ary tree.
//!
//! Every intermediate representation of the compiler is stored in a
//! [`Tree`]. Nodes are allocated in a flat arena and refer to each other
//! by [`NodeId`], so parent links are plain indices rather than shared
//! pointers.
//!
//! The tree maintains these invariants:
//!
//! - It has either no member nodes, or exactly one root.
//! - Every non-root member has exactly one parent, which is also a member.
//! - A node is never its own ancestor.
//!
//! Mutating operations validate before they write. When an operation
//! returns an error, the tree is left exactly as it was.
mod error;
mod nodes;
mod traverse;

pub use self::{
    error::{TreeError, TreeResult},
    nodes::NodeId,
    traverse::{Ancestors, TraversalMode, Traverse},
};

use self::nodes::Node;
use std::ops::{Index, IndexMut};

#[derive(Debug)]
pub struct Tree<T> {
    /// Vacated slots stay `None` so ids are never reused.
    nodes: Vec<Option<Node<T>>>,
    root: Option<NodeId>,
    /// Number of member nodes.
    len: usize,
}

impl<T> Tree<T> {
    #[inline]
    pub fn new() -> Self {
        Self {
            nodes: vec![],
            root: None,
            len: 0,
        }
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            root: None,
            len: 0,
        }
    }

    /// Number of nodes that are members of the tree.
    ///
    /// Allocated nodes that were never added are not counted.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Indicates whether the node is a member of this tree.
    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        self.slot(id).map(|node| node.member).unwrap_or(false)
    }

    /// Payload of an allocated node, whether or not it has been added.
    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.slot(id).map(|node| &node.data)
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.slot_mut(id).map(|node| &mut node.data)
    }

    /// Parent of the node. `None` for the root and for detached nodes.
    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.slot(id).and_then(|node| node.parent)
    }

    /// Children of a member node, in insertion order.
    pub fn children(&self, id: NodeId) -> TreeResult<&[NodeId]> {
        self.member(id).map(|node| node.children.as_slice())
    }

    pub fn is_leaf(&self, id: NodeId) -> TreeResult<bool> {
        self.member(id).map(|node| node.children.is_empty())
    }

    /// Allocate a node in the arena.
    ///
    /// The node is not attached to anything, and is not a member until
    /// it is passed to [`Tree::add_node`].
    pub fn create_node(&mut self, data: T) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Some(Node::new(data)));
        id
    }

    /// Make an allocated node a member of the tree.
    ///
    /// Without a parent, the node becomes the root. With a parent, the node
    /// is appended as the parent's last child.
    ///
    /// # Errors
    ///
    /// - [`TreeError::AlreadyMember`] if the node was already added.
    /// - [`TreeError::NotMember`] if the id was not allocated by this tree.
    /// - [`TreeError::RootExists`] if no parent is given and the tree has a root.
    /// - [`TreeError::ParentNotFound`] if the parent is not a member.
    pub fn add_node(&mut self, id: NodeId, parent: Option<NodeId>) -> TreeResult<()> {
        match self.slot(id) {
            Some(node) if node.member => return Err(TreeError::AlreadyMember(id)),
            Some(_) => {}
            None => return Err(TreeError::NotMember(id)),
        }
        self.check_attach(parent)?;

        // Non-members never have children, so attaching can't close a loop.
        debug_assert!(self.slot(id).map(|n| n.children.is_empty()).unwrap_or(true));

        self.attach(id, parent);
        Ok(())
    }

    /// Allocate a node and add it to the tree in one step.
    ///
    /// Preconditions are checked before allocating, so a failed insert
    /// leaves no orphan slot behind.
    pub fn insert(&mut self, data: T, parent: Option<NodeId>) -> TreeResult<NodeId> {
        self.check_attach(parent)?;
        let id = self.create_node(data);
        self.attach(id, parent);
        Ok(id)
    }

    /// Move a member node, with its subtree, under a new parent.
    ///
    /// The node is detached from its old parent before it is appended to
    /// the new parent's children.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::Cycle`] if the node is the new parent, or one of
    /// its ancestors. The tree is left unchanged.
    pub fn set_parent(&mut self, id: NodeId, parent: NodeId) -> TreeResult<()> {
        self.member(id)?;
        if !self.contains(parent) {
            return Err(TreeError::ParentNotFound(parent));
        }
        if self.ancestors(parent)?.any(|ancestor| ancestor == id) {
            return Err(TreeError::Cycle { node: id, parent });
        }

        // The root is an ancestor of every member, so the node must have a parent here.
        if let Some(old) = self.parent(id) {
            if let Some(old_node) = self.slot_mut(old) {
                old_node.remove_child(id);
            }
        }
        if let Some(node) = self.slot_mut(id) {
            node.parent = Some(parent);
        }
        if let Some(parent_node) = self.slot_mut(parent) {
            parent_node.children.push(id);
        }

        Ok(())
    }

    /// Remove a node and all of its descendants.
    ///
    /// Returns the number of nodes removed. Removing the root empties the tree.
    pub fn remove_node(&mut self, id: NodeId) -> TreeResult<usize> {
        let removed: Vec<NodeId> = self.traverse(Some(id), TraversalMode::DepthFirst)?.collect();

        if let Some(parent) = self.parent(id) {
            if let Some(parent_node) = self.slot_mut(parent) {
                parent_node.remove_child(id);
            }
        }

        for node in &removed {
            self.nodes[node.0] = None;
            if self.root == Some(*node) {
                self.root = None;
            }
        }
        self.len -= removed.len();

        Ok(removed.len())
    }

    /// Lazily walk the subtree rooted at `start`, or the whole tree when
    /// no start is given.
    ///
    /// Each call returns a fresh, independent iterator. An empty tree
    /// yields nothing.
    pub fn traverse(&self, start: Option<NodeId>, mode: TraversalMode) -> TreeResult<Traverse<'_, T>> {
        if let Some(id) = start {
            self.member(id)?;
        }
        Ok(Traverse::new(self, start.or(self.root), mode))
    }

    /// Walk from a member node up to the root, including the node itself.
    pub fn ancestors(&self, id: NodeId) -> TreeResult<Ancestors<'_, T>> {
        self.member(id)?;
        Ok(Ancestors::new(self, id))
    }
}

/// Internal slot access.
impl<T> Tree<T> {
    #[inline]
    fn slot(&self, id: NodeId) -> Option<&Node<T>> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    #[inline]
    fn slot_mut(&mut self, id: NodeId) -> Option<&mut Node<T>> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    fn member(&self, id: NodeId) -> TreeResult<&Node<T>> {
        match self.slot(id) {
            Some(node) if node.member => Ok(node),
            _ => Err(TreeError::NotMember(id)),
        }
    }

    fn check_attach(&self, parent: Option<NodeId>) -> TreeResult<()> {
        match parent {
            None if self.root.is_some() => Err(TreeError::RootExists),
            Some(parent) if !self.contains(parent) => Err(TreeError::ParentNotFound(parent)),
            _ => Ok(()),
        }
    }

    /// Link a validated node into the tree.
    fn attach(&mut self, id: NodeId, parent: Option<NodeId>) {
        match parent {
            Some(parent) => {
                if let Some(parent_node) = self.slot_mut(parent) {
                    parent_node.children.push(id);
                }
            }
            None => self.root = Some(id),
        }

        if let Some(node) = self.slot_mut(id) {
            node.parent = parent;
            node.member = true;
        }
        self.len += 1;
    }
}

impl<T> Default for Tree<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Panics if the node is not allocated, like slice indexing.
impl<T> Index<NodeId> for Tree<T> {
    type Output = T;

    fn index(&self, id: NodeId) -> &Self::Output {
        match self.get(id) {
            Some(data) => data,
            None => panic!("node {} is not allocated in the tree", id),
        }
    }
}

impl<T> IndexMut<NodeId> for Tree<T> {
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        match self.get_mut(id) {
            Some(data) => data,
            None => panic!("node {} is not allocated in the tree", id),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_add_root() {
        let mut tree = Tree::new();
        let root = tree.create_node("r");
        assert!(!tree.contains(root));
        assert_eq!(tree.len(), 0);

        tree.add_node(root, None).unwrap();
        assert!(tree.contains(root));
        assert_eq!(tree.root(), Some(root));
        assert_eq!(tree.len(), 1);

        let other = tree.create_node("x");
        assert_eq!(tree.add_node(other, None), Err(TreeError::RootExists));
        assert!(!tree.contains(other));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_add_child_order() {
        let mut tree = Tree::new();
        let root = tree.insert(0, None).unwrap();
        let a = tree.insert(1, Some(root)).unwrap();
        let b = tree.insert(2, Some(root)).unwrap();

        assert_eq!(tree.children(root).unwrap(), &[a, b]);
        assert_eq!(tree.parent(a), Some(root));
        assert_eq!(tree.parent(root), None);
        assert!(tree.is_leaf(a).unwrap());
        assert!(!tree.is_leaf(root).unwrap());
    }

    #[test]
    fn test_parent_not_member() {
        let mut tree = Tree::new();
        tree.insert('r', None).unwrap();
        let stray = tree.create_node('s');
        let node = tree.create_node('n');

        assert_eq!(tree.add_node(node, Some(stray)), Err(TreeError::ParentNotFound(stray)));
        assert_eq!(tree.insert('m', Some(stray)), Err(TreeError::ParentNotFound(stray)));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_ancestors() {
        let mut tree = Tree::new();
        let root = tree.insert("r", None).unwrap();
        let a = tree.insert("a", Some(root)).unwrap();
        let b = tree.insert("b", Some(a)).unwrap();

        let path: Vec<_> = tree.ancestors(b).unwrap().map(|id| tree[id]).collect();
        assert_eq!(path, vec!["b", "a", "r"]);
    }

    #[test]
    fn test_set_parent_moves_subtree() {
        let mut tree = Tree::new();
        let root = tree.insert("r", None).unwrap();
        let a = tree.insert("a", Some(root)).unwrap();
        let b = tree.insert("b", Some(root)).unwrap();
        let c = tree.insert("c", Some(a)).unwrap();

        tree.set_parent(a, b).unwrap();

        assert_eq!(tree.children(root).unwrap(), &[b]);
        assert_eq!(tree.children(b).unwrap(), &[a]);
        assert_eq!(tree.parent(a), Some(b));
        assert_eq!(tree.parent(c), Some(a));
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn test_set_parent_to_self() {
        let mut tree = Tree::new();
        let root = tree.insert("r", None).unwrap();
        let a = tree.insert("a", Some(root)).unwrap();

        assert_eq!(tree.set_parent(a, a), Err(TreeError::Cycle { node: a, parent: a }));
        assert_eq!(tree.parent(a), Some(root));
    }

    #[test]
    fn test_removed_ids_are_not_reused() {
        let mut tree = Tree::new();
        let root = tree.insert("r", None).unwrap();
        let a = tree.insert("a", Some(root)).unwrap();
        assert_eq!(tree.remove_node(a), Ok(1));

        let b = tree.insert("b", Some(root)).unwrap();
        assert_ne!(a, b);
        assert!(!tree.contains(a));
        assert_eq!(tree.get(a), None);
        assert_eq!(tree.remove_node(a), Err(TreeError::NotMember(a)));
    }
}
