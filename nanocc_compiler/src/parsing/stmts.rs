//! Statement parsing.
use super::{Exp, Parse, ParseError, Parser, Statement, SyntaxNode};
use crate::tokens::TokenKind;
use nanocc_tree::NodeId;

impl Parse for Statement {
    fn parse(parser: &mut Parser, parent: Option<NodeId>) -> Result<NodeId, ParseError> {
        use TokenKind as T;

        parser.input.expect(T::ReturnKeyword)?;
        let statement = parser.push(SyntaxNode::Statement(Statement::Return), parent)?;
        Exp::parse(parser, Some(statement))?;
        parser.input.expect(T::Semicolon)?;

        Ok(statement)
    }
}
