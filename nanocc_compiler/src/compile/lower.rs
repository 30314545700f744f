//! Lowering from the syntax tree to the assembly tree.
use super::{
    ir::{AsmNode, AsmTree, Instruction, Operand},
    register::Register,
};
use crate::parsing::{Exp, Statement, SyntaxNode, SyntaxTree};

use itertools::Itertools;
use log::debug;
use nanocc_tree::{NodeId, TreeError};
use thiserror::Error;

/// Translate a syntax tree into an assembly tree.
///
/// The root must be a [`SyntaxNode::Program`].
pub fn lower(tree: &SyntaxTree) -> Result<AsmTree, LowerError> {
    let root = tree.root().ok_or(LowerError::EmptyTree)?;

    let mut lowering = Lowering::new(tree);
    lowering.lower_program(root)?;

    debug!("lowered assembly tree with {} nodes", lowering.out.len());
    Ok(lowering.out)
}

/// Tree-to-tree translator.
struct Lowering<'a> {
    src: &'a SyntaxTree,
    out: AsmTree,
}

impl<'a> Lowering<'a> {
    fn new(src: &'a SyntaxTree) -> Self {
        Self {
            src,
            out: AsmTree::with_capacity(src.len() + 2),
        }
    }

    #[inline]
    fn node(&self, id: NodeId) -> Result<&'a SyntaxNode, LowerError> {
        self.src.get(id).ok_or(LowerError::Tree(TreeError::NotMember(id)))
    }

    fn unexpected(&self, expected: &'static str, id: NodeId) -> LowerError {
        match self.src.get(id) {
            Some(found) => LowerError::Unexpected {
                expected,
                found: found.clone(),
            },
            None => LowerError::Tree(TreeError::NotMember(id)),
        }
    }

    fn malformed(&self, id: NodeId) -> LowerError {
        match self.src.get(id) {
            Some(node) => LowerError::Malformed { node: node.clone() },
            None => LowerError::Tree(TreeError::NotMember(id)),
        }
    }

    #[inline]
    fn push(&mut self, node: AsmNode, parent: Option<NodeId>) -> Result<NodeId, LowerError> {
        Ok(self.out.insert(node, parent)?)
    }
}

/// Recursive visitor
impl<'a> Lowering<'a> {
    fn lower_program(&mut self, id: NodeId) -> Result<NodeId, LowerError> {
        if !matches!(self.node(id)?, SyntaxNode::Program) {
            return Err(self.unexpected("Program", id));
        }

        let (function,) = self
            .src
            .children(id)?
            .iter()
            .copied()
            .collect_tuple()
            .ok_or_else(|| self.malformed(id))?;

        let program = self.push(AsmNode::Program, None)?;
        self.lower_function(function, program)?;

        Ok(program)
    }

    fn lower_function(&mut self, id: NodeId, parent: NodeId) -> Result<NodeId, LowerError> {
        if !matches!(self.node(id)?, SyntaxNode::Function) {
            return Err(self.unexpected("Function", id));
        }

        let (name, body) = self
            .src
            .children(id)?
            .iter()
            .copied()
            .collect_tuple()
            .ok_or_else(|| self.malformed(id))?;

        let function = self.push(AsmNode::Function, Some(parent))?;
        self.lower_identifier(name, function)?;
        self.lower_statement(body, function)?;

        Ok(function)
    }

    fn lower_identifier(&mut self, id: NodeId, parent: NodeId) -> Result<NodeId, LowerError> {
        match self.node(id)? {
            SyntaxNode::Identifier(name) => self.push(AsmNode::Identifier(name.clone()), Some(parent)),
            _ => Err(self.unexpected("Identifier", id)),
        }
    }

    /// Appends the statement's instructions to the function.
    fn lower_statement(&mut self, id: NodeId, function: NodeId) -> Result<(), LowerError> {
        match self.node(id)? {
            SyntaxNode::Statement(Statement::Return) => {
                let (exp,) = self
                    .src
                    .children(id)?
                    .iter()
                    .copied()
                    .collect_tuple()
                    .ok_or_else(|| self.malformed(id))?;

                // Return value goes through eax.
                let mov = self.push(AsmNode::Instruction(Instruction::Mov), Some(function))?;
                self.lower_exp(exp, mov)?;
                self.push(AsmNode::Operand(Operand::Register(Register::Eax)), Some(mov))?;

                self.push(AsmNode::Instruction(Instruction::Ret), Some(function))?;
                Ok(())
            }
            _ => Err(self.unexpected("Statement", id)),
        }
    }

    fn lower_exp(&mut self, id: NodeId, parent: NodeId) -> Result<NodeId, LowerError> {
        match self.node(id)? {
            SyntaxNode::Exp(Exp::Constant(value)) => {
                self.push(AsmNode::Operand(Operand::Immediate(value.clone())), Some(parent))
            }
            other => Err(LowerError::NotAnOperand { found: other.clone() }),
        }
    }
}

#[derive(Debug, Error)]
pub enum LowerError {
    #[error("cannot lower an empty syntax tree")]
    EmptyTree,

    #[error("expected {expected} node, found {found:?}")]
    Unexpected { expected: &'static str, found: SyntaxNode },

    #[error("{node:?} node has malformed children")]
    Malformed { node: SyntaxNode },

    #[error("cannot lower {found:?} to an operand")]
    NotAnOperand { found: SyntaxNode },

    #[error("malformed syntax tree: {0}")]
    Tree(#[from] TreeError),
}

#[cfg(test)]
mod test {
    use super::*;
    use smol_str::SmolStr;

    #[test]
    fn test_root_must_be_program() {
        let mut tree = SyntaxTree::new();
        tree.insert(SyntaxNode::Function, None).unwrap();

        assert!(matches!(
            lower(&tree),
            Err(LowerError::Unexpected {
                expected: "Program",
                found: SyntaxNode::Function
            })
        ));
    }

    #[test]
    fn test_empty_tree() {
        assert!(matches!(lower(&SyntaxTree::new()), Err(LowerError::EmptyTree)));
    }

    #[test]
    fn test_operand_must_be_expression() {
        let mut tree = SyntaxTree::new();
        let program = tree.insert(SyntaxNode::Program, None).unwrap();
        let function = tree.insert(SyntaxNode::Function, Some(program)).unwrap();
        tree.insert(SyntaxNode::Identifier(SmolStr::new("main")), Some(function))
            .unwrap();
        let ret = tree
            .insert(SyntaxNode::Statement(Statement::Return), Some(function))
            .unwrap();
        tree.insert(SyntaxNode::Identifier(SmolStr::new("x")), Some(ret))
            .unwrap();

        assert!(matches!(lower(&tree), Err(LowerError::NotAnOperand { .. })));
    }

    #[test]
    fn test_function_missing_body() {
        let mut tree = SyntaxTree::new();
        let program = tree.insert(SyntaxNode::Program, None).unwrap();
        let function = tree.insert(SyntaxNode::Function, Some(program)).unwrap();
        tree.insert(SyntaxNode::Identifier(SmolStr::new("main")), Some(function))
            .unwrap();

        assert!(matches!(
            lower(&tree),
            Err(LowerError::Malformed {
                node: SyntaxNode::Function
            })
        ));
    }
}
