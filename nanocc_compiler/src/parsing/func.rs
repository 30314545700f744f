use super::{Ident, Parse, ParseError, Parser, Statement, SyntaxNode};
use crate::tokens::TokenKind;
use nanocc_tree::NodeId;

/// Function definition.
///
/// Only `int name(void)` signatures with a single statement body.
pub struct FuncDef;

impl Parse for FuncDef {
    fn parse(parser: &mut Parser, parent: Option<NodeId>) -> Result<NodeId, ParseError> {
        use TokenKind as T;

        parser.input.expect(T::IntKeyword)?;
        let function = parser.push(SyntaxNode::Function, parent)?;

        // name
        Ident::parse(parser, Some(function))?;

        parser.input.expect(T::OpenParenthesis)?;
        parser.input.expect(T::VoidKeyword)?;
        parser.input.expect(T::CloseParenthesis)?;

        // body
        parser.input.expect(T::OpenBrace)?;
        Statement::parse(parser, Some(function))?;
        parser.input.expect(T::CloseBrace)?;

        Ok(function)
    }
}
