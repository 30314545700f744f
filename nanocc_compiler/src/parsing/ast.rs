//! Syntax tree node payloads.
use crate::pretty::NodeRepr;

use nanocc_tree::{NodeId, Tree};
use smol_str::SmolStr;
use std::fmt;

/// Tree produced by the parser, rooted at a [`SyntaxNode::Program`].
pub type SyntaxTree = Tree<SyntaxNode>;

/// Payload of a syntax tree node.
///
/// The shape of the children is fixed per variant:
///
/// | Node        | Children                        |
/// |-------------|---------------------------------|
/// | `Program`   | one `Function`                  |
/// | `Function`  | name `Identifier`, body `Statement` |
/// | `Return`    | one `Exp`                       |
/// | `Constant`  | none                            |
/// | `Identifier`| none                            |
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxNode {
    Program,
    Function,
    Statement(Statement),
    Exp(Exp),
    Identifier(SmolStr),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statement {
    Return,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exp {
    /// Integer literal, kept as the decimal digits that were written so
    /// no value is out of range.
    Constant(SmolStr),
}

impl NodeRepr for SyntaxNode {
    fn fmt_label(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Program => write!(f, "Program"),
            Self::Function => write!(f, "Function"),
            Self::Statement(Statement::Return) => write!(f, "Return"),
            Self::Exp(Exp::Constant(value)) => write!(f, "Constant({value})"),
            Self::Identifier(name) => write!(f, "Identifier({name})"),
        }
    }

    #[rustfmt::skip]
    fn child_field(&self, index: usize) -> Option<&'static str> {
        match (self, index) {
            (Self::Function, 0) => Some("name"),
            (Self::Function, 1) => Some("body"),
            _                   => None,
        }
    }
}

/// Name of a function node, taken from its first child.
pub fn function_name(tree: &SyntaxTree, function: NodeId) -> Option<&SmolStr> {
    let first = *tree.children(function).ok()?.first()?;
    match tree.get(first)? {
        SyntaxNode::Identifier(name) => Some(name),
        _ => None,
    }
}
