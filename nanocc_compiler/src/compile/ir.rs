//! Assembly tree.
use super::register::Register;
use crate::pretty::NodeRepr;

use nanocc_tree::Tree;
use smol_str::SmolStr;
use std::fmt;

/// Tree produced by lowering, rooted at an [`AsmNode::Program`].
pub type AsmTree = Tree<AsmNode>;

/// Payload of an assembly tree node.
///
/// A `Function` has its name `Identifier` as the first child, followed
/// by its instructions in program order. A `Mov` has exactly two
/// `Operand` children, source then destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AsmNode {
    Program,
    Function,
    Instruction(Instruction),
    Operand(Operand),
    Identifier(SmolStr),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// Copy `src` into `dst`.
    Mov,
    /// Return from the function.
    Ret,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    /// Decimal digits of an integer constant.
    Immediate(SmolStr),
    Register(Register),
}

impl NodeRepr for AsmNode {
    #[rustfmt::skip]
    fn fmt_label(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Program                           => write!(f, "Program"),
            Self::Function                          => write!(f, "Function"),
            Self::Instruction(Instruction::Mov)     => write!(f, "Mov"),
            Self::Instruction(Instruction::Ret)     => write!(f, "Return"),
            Self::Operand(Operand::Immediate(value)) => write!(f, "Immediate({value})"),
            Self::Operand(Operand::Register(reg))   => write!(f, "Register({reg})"),
            Self::Identifier(name)                  => write!(f, "Identifier({name})"),
        }
    }

    #[rustfmt::skip]
    fn child_field(&self, index: usize) -> Option<&'static str> {
        match (self, index) {
            (Self::Function, 0)                      => Some("name"),
            (Self::Instruction(Instruction::Mov), 0) => Some("src"),
            (Self::Instruction(Instruction::Mov), 1) => Some("dst"),
            _                                        => None,
        }
    }
}
