//! Lazy tree walks.
use crate::{NodeId, Tree};
use std::collections::VecDeque;

/// Order in which [`Tree::traverse`] visits a subtree.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TraversalMode {
    /// Pre-order. A node is visited before its children, and each
    /// child's subtree is exhausted before the next sibling.
    #[default]
    DepthFirst,
    /// Level by level, left to right.
    BreadthFirst,
}

/// Iterator over the node ids of a subtree.
///
/// Borrows the tree immutably, so the structure can't change while
/// a walk is in progress. Dropping it early is fine.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Traverse<'a, T> {
    tree: &'a Tree<T>,
    mode: TraversalMode,
    queue: VecDeque<NodeId>,
}

impl<'a, T> Traverse<'a, T> {
    pub(crate) fn new(tree: &'a Tree<T>, start: Option<NodeId>, mode: TraversalMode) -> Self {
        Self {
            tree,
            mode,
            queue: start.into_iter().collect(),
        }
    }
}

impl<'a, T> Iterator for Traverse<'a, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.queue.pop_front()?;
        let tree = self.tree;
        let children = tree.children(id).unwrap_or(&[]);

        match self.mode {
            TraversalMode::DepthFirst => {
                // Front of the queue, keeping sibling order.
                for child in children.iter().rev() {
                    self.queue.push_front(*child);
                }
            }
            TraversalMode::BreadthFirst => self.queue.extend(children.iter().copied()),
        }

        Some(id)
    }
}

/// Walk from a node up to the root, starting with the node itself.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Ancestors<'a, T> {
    tree: &'a Tree<T>,
    next: Option<NodeId>,
}

impl<'a, T> Ancestors<'a, T> {
    pub(crate) fn new(tree: &'a Tree<T>, start: NodeId) -> Self {
        Self {
            tree,
            next: Some(start),
        }
    }
}

impl<'a, T> Iterator for Ancestors<'a, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        self.next = self.tree.parent(id);
        Some(id)
    }
}
