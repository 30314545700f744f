//! Indented tree rendering.
use nanocc_tree::{NodeId, Tree};
use std::fmt;

/// Indentation for each level of depth.
const FILL: &str = "   ";

/// Describes how a tree payload is rendered by [`pretty`].
pub trait NodeRepr {
    /// Text of the node itself, without its children.
    fn fmt_label(&self, f: &mut fmt::Formatter) -> fmt::Result;

    /// Optional field name printed in front of the child at `index`,
    /// as in `name=Identifier(main)`.
    #[inline]
    fn child_field(&self, _index: usize) -> Option<&'static str> {
        None
    }
}

/// Render a tree with one node per line, nesting children in parentheses.
///
/// ```text
/// Program(
///    Function(
///       name=Identifier(main),
///       body=Return(
///          Constant(2)
///       )
///    )
/// )
/// ```
///
/// Leaf nodes don't open parentheses. An empty tree renders as nothing.
#[inline]
pub fn pretty<T: NodeRepr>(tree: &Tree<T>) -> Pretty<'_, T> {
    Pretty(tree)
}

pub struct Pretty<'a, T>(&'a Tree<T>);

impl<'a, T: NodeRepr> fmt::Display for Pretty<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0.root() {
            Some(root) => write_node(f, self.0, root, 0, None, ""),
            None => Ok(()),
        }
    }
}

fn write_node<T: NodeRepr>(
    f: &mut fmt::Formatter,
    tree: &Tree<T>,
    id: NodeId,
    level: usize,
    field: Option<&str>,
    end: &str,
) -> fmt::Result {
    let indent = FILL.repeat(level);
    let data = &tree[id];
    let children = tree.children(id).map_err(|_| fmt::Error)?;

    write!(f, "{indent}")?;
    if let Some(field) = field {
        write!(f, "{field}=")?;
    }
    data.fmt_label(f)?;

    if children.is_empty() {
        return write!(f, "{end}");
    }

    writeln!(f, "(")?;
    for (index, child) in children.iter().enumerate() {
        let child_end = if index + 1 < children.len() { ",\n" } else { "" };
        write_node(f, tree, *child, level + 1, data.child_field(index), child_end)?;
    }
    write!(f, "\n{indent}){end}")
}
