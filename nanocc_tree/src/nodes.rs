//! Arena slots.
use std::fmt;

/// Stable handle to a node stored in a [`Tree`](crate::Tree) arena.
///
/// Handles are only meaningful for the tree that issued them. Once a
/// node is removed its slot is vacated, and the index is never handed
/// out again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Index of the node's slot in the arena.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Node storage inside the arena.
#[derive(Debug)]
pub(crate) struct Node<T> {
    pub(crate) data: T,
    /// Back reference used for upward walks. Never owns.
    pub(crate) parent: Option<NodeId>,
    /// Owned children in insertion order.
    pub(crate) children: Vec<NodeId>,
    /// Allocated nodes only become members once they are added.
    pub(crate) member: bool,
}

impl<T> Node<T> {
    #[inline]
    pub(crate) fn new(data: T) -> Self {
        Self {
            data,
            parent: None,
            children: vec![],
            member: false,
        }
    }

    /// Detach the given child from this node's child list.
    ///
    /// Returns true when the child was found.
    pub(crate) fn remove_child(&mut self, child: NodeId) -> bool {
        match self.children.iter().position(|c| *c == child) {
            Some(index) => {
                self.children.remove(index);
                true
            }
            None => false,
        }
    }
}
