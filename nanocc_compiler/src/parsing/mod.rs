//! Recursive descent parser.
//!
//! Each grammar rule implements [`Parse`]. A rule consumes exactly the
//! tokens it expects, in grammar order, and attaches its node to the
//! given parent before descending into its children.
//!
//! ```text
//! Program    := Function
//! Function   := "int" Identifier "(" "void" ")" "{" Statement "}"
//! Statement  := "return" Exp ";"
//! Exp        := Constant
//! ```
mod ast;
mod expr;
mod func;
mod ident;
mod prog;
mod stmts;

pub use ast::*;
pub use func::FuncDef;
pub use ident::Ident;
pub use prog::Prog;

use crate::{
    token_stream::{TokenError, TokenStream},
    tokens::Token,
};
use log::debug;
use nanocc_tree::{NodeId, TreeError};
use smol_str::SmolStr;
use thiserror::Error;

/// Parse a full program from lexed tokens.
///
/// Fails on the first violated expectation. No partial tree is returned.
pub fn parse(tokens: &[Token]) -> Result<SyntaxTree, ParseError> {
    let mut parser = Parser::new(tokens);
    Prog::parse(&mut parser, None)?;
    let tree = parser.into_tree();

    debug!("parsed syntax tree with {} nodes", tree.len());
    Ok(tree)
}

/// A grammar rule.
pub trait Parse {
    /// Consume the tokens of this rule and insert its node under `parent`.
    ///
    /// Returns the identifier of the inserted node.
    fn parse(parser: &mut Parser, parent: Option<NodeId>) -> Result<NodeId, ParseError>;
}

/// Parsing state shared by the grammar rules.
pub struct Parser<'a> {
    input: TokenStream<'a>,
    tree: SyntaxTree,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            input: TokenStream::new(tokens),
            tree: SyntaxTree::new(),
        }
    }

    #[inline]
    pub fn input(&self) -> &TokenStream<'a> {
        &self.input
    }

    #[inline]
    pub fn tree(&self) -> &SyntaxTree {
        &self.tree
    }

    #[inline]
    pub fn into_tree(self) -> SyntaxTree {
        self.tree
    }

    /// Insert a node under the given parent, or as the root.
    #[inline]
    fn push(&mut self, node: SyntaxNode, parent: Option<NodeId>) -> Result<NodeId, ParseError> {
        Ok(self.tree.insert(node, parent)?)
    }
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("syntax error: {0}")]
    Token(#[from] TokenError),

    #[error("syntax error: junk after function '{function}': {found}")]
    JunkAfterFunction { function: SmolStr, found: Token },

    #[error("malformed syntax tree: {0}")]
    Tree(#[from] TreeError),
}
