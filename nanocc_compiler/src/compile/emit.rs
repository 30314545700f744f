//! Assembly text emission.
use super::{
    ir::{AsmNode, AsmTree, Instruction, Operand},
    Dialect,
};

use log::debug;
use nanocc_tree::{NodeId, TreeError};
use smol_str::SmolStr;
use std::fmt::{self, Write as FmtWrite};
use thiserror::Error;

/// Marks the stack as non-executable for the linker.
pub const STACK_NOTE: &str = "\t.section .note.GNU-stack,\"\",@progbits";

/// Writes an assembly tree out as assembler source text.
pub struct Emitter {
    dialect: Dialect,
    buf: String,
}

impl Emitter {
    #[inline]
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            buf: String::new(),
        }
    }

    #[inline]
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Translate the whole tree. The root must be an [`AsmNode::Program`].
    ///
    /// The emitter can be reused; every call starts from an empty buffer.
    pub fn emit(&mut self, tree: &AsmTree) -> Result<String, EmitError> {
        self.buf.clear();

        let root = tree.root().ok_or(EmitError::EmptyTree)?;
        self.emit_program(tree, root)?;

        debug!("emitted {} lines of {:?} assembly", self.buf.lines().count(), self.dialect);
        Ok(std::mem::take(&mut self.buf))
    }
}

/// Recursive visitor
impl Emitter {
    fn emit_program(&mut self, tree: &AsmTree, id: NodeId) -> Result<(), EmitError> {
        match node(tree, id)? {
            AsmNode::Program => {}
            other => return Err(EmitError::NotAProgram(other.clone())),
        }

        if let Some(header) = self.dialect.header() {
            writeln!(self.buf, "{header}")?;
        }

        for function in tree.children(id)? {
            self.emit_function(tree, *function)?;
        }

        writeln!(self.buf, "{STACK_NOTE}")?;
        Ok(())
    }

    fn emit_function(&mut self, tree: &AsmTree, id: NodeId) -> Result<(), EmitError> {
        match node(tree, id)? {
            AsmNode::Function => {}
            other => return Err(EmitError::Unsupported(other.clone())),
        }

        let (name, body) = match tree.children(id)?.split_first() {
            Some((first, rest)) => (*first, rest),
            None => return Err(EmitError::Malformed(AsmNode::Function)),
        };
        let name = identifier(tree, name)?;

        writeln!(self.buf, "\t.globl {name}")?;
        writeln!(self.buf, "{name}:")?;

        for instruction in body {
            self.emit_instruction(tree, *instruction)?;
        }

        Ok(())
    }

    fn emit_instruction(&mut self, tree: &AsmTree, id: NodeId) -> Result<(), EmitError> {
        match node(tree, id)? {
            AsmNode::Instruction(Instruction::Mov) => {
                let (src, dst) = match tree.children(id)? {
                    &[src, dst] => (operand(tree, src)?, operand(tree, dst)?),
                    _ => return Err(EmitError::Malformed(AsmNode::Instruction(Instruction::Mov))),
                };
                self.emit_mov(src, dst)
            }
            AsmNode::Instruction(Instruction::Ret) => {
                writeln!(self.buf, "\tret")?;
                Ok(())
            }
            other => Err(EmitError::Unsupported(other.clone())),
        }
    }

    fn emit_mov(&mut self, src: Operand, dst: Operand) -> Result<(), EmitError> {
        let dst = match dst {
            Operand::Register(register) => register,
            Operand::Immediate(value) => return Err(EmitError::ImmediateDestination(value)),
        };

        let src = self.fmt_operand(src);
        let dst = dst.display(self.dialect);

        match self.dialect {
            Dialect::Intel => writeln!(self.buf, "\tmov\t{dst}, {src}")?,
            Dialect::Att => writeln!(self.buf, "\tmovl\t{src}, {dst}")?,
        }

        Ok(())
    }

    fn fmt_operand(&self, operand: Operand) -> String {
        match operand {
            Operand::Immediate(value) => format!("{}{value}", self.dialect.immediate_marker()),
            Operand::Register(register) => register.display(self.dialect).to_string(),
        }
    }
}

#[inline]
fn node(tree: &AsmTree, id: NodeId) -> Result<&AsmNode, EmitError> {
    tree.get(id).ok_or(EmitError::Tree(TreeError::NotMember(id)))
}

fn identifier(tree: &AsmTree, id: NodeId) -> Result<&SmolStr, EmitError> {
    match node(tree, id)? {
        AsmNode::Identifier(name) => Ok(name),
        other => Err(EmitError::Unsupported(other.clone())),
    }
}

fn operand(tree: &AsmTree, id: NodeId) -> Result<Operand, EmitError> {
    match node(tree, id)? {
        AsmNode::Operand(operand) => Ok(operand.clone()),
        other => Err(EmitError::Unsupported(other.clone())),
    }
}

#[derive(Debug, Error)]
pub enum EmitError {
    #[error("cannot emit an empty assembly tree")]
    EmptyTree,

    #[error("root of the assembly tree is not a program: {0:?}")]
    NotAProgram(AsmNode),

    #[error("cannot translate {0:?} into assembly")]
    Unsupported(AsmNode),

    #[error("{0:?} node has malformed children")]
    Malformed(AsmNode),

    #[error("cannot use immediate {0} as the destination of a move")]
    ImmediateDestination(SmolStr),

    #[error("malformed assembly tree: {0}")]
    Tree(#[from] TreeError),

    #[error("formatting assembly: {0}")]
    Fmt(#[from] fmt::Error),
}
