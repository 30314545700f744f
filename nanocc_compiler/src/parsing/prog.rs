use super::{function_name, FuncDef, Parse, ParseError, Parser, SyntaxNode};
use nanocc_tree::NodeId;

/// Root rule: a single function definition, and nothing after it.
pub struct Prog;

impl Parse for Prog {
    fn parse(parser: &mut Parser, parent: Option<NodeId>) -> Result<NodeId, ParseError> {
        let program = parser.push(SyntaxNode::Program, parent)?;
        let function = FuncDef::parse(parser, Some(program))?;

        if let Some(token) = parser.input.peek() {
            return Err(ParseError::JunkAfterFunction {
                function: function_name(&parser.tree, function).cloned().unwrap_or_default(),
                found: token.clone(),
            });
        }

        Ok(program)
    }
}
