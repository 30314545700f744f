use super::{Parse, ParseError, Parser, SyntaxNode};
use crate::tokens::TokenKind;
use nanocc_tree::NodeId;

pub struct Ident;

impl Parse for Ident {
    #[inline]
    fn parse(parser: &mut Parser, parent: Option<NodeId>) -> Result<NodeId, ParseError> {
        let token = parser.input.expect(TokenKind::Identifier)?;
        parser.push(SyntaxNode::Identifier(token.lexeme.clone()), parent)
    }
}
