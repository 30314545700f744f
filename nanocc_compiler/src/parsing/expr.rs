//! Expression parsing.
use super::{Exp, Parse, ParseError, Parser, SyntaxNode};
use crate::tokens::TokenKind;
use nanocc_tree::NodeId;

impl Parse for Exp {
    fn parse(parser: &mut Parser, parent: Option<NodeId>) -> Result<NodeId, ParseError> {
        let token = parser.input.expect(TokenKind::Constant)?;
        parser.push(SyntaxNode::Exp(Exp::Constant(token.lexeme.clone())), parent)
    }
}
