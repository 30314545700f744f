//! Code generation: lowering to an assembly tree, and emitting assembly text.
mod emit;
mod ir;
mod lower;
mod register;

pub use emit::{EmitError, Emitter, STACK_NOTE};
pub use ir::{AsmNode, AsmTree, Instruction, Operand};
pub use lower::{lower, LowerError};
pub use register::Register;

use std::{fmt, str::FromStr};

/// Options that affect generated code.
#[derive(Debug, Clone, Default)]
pub struct CompileConf {
    pub dialect: Dialect,
}

impl CompileConf {
    #[inline]
    pub fn with_dialect(dialect: Dialect) -> Self {
        Self { dialect }
    }
}

/// Assembler syntax of the emitted code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    /// Destination first, bare registers and immediates.
    #[default]
    Intel,
    /// Source first, `%` registers and `$` immediates.
    Att,
}

impl Dialect {
    /// Directive that must open the file so the assembler accepts the syntax.
    #[inline]
    pub fn header(&self) -> Option<&'static str> {
        match self {
            Dialect::Intel => Some("\t.intel_syntax noprefix"),
            Dialect::Att => None,
        }
    }

    #[inline]
    pub fn immediate_marker(&self) -> &'static str {
        match self {
            Dialect::Intel => "",
            Dialect::Att => "$",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Dialect::Intel => write!(f, "intel"),
            Dialect::Att => write!(f, "att"),
        }
    }
}

impl FromStr for Dialect {
    type Err = UnknownDialect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "intel" => Ok(Dialect::Intel),
            "att" | "at&t" => Ok(Dialect::Att),
            _ => Err(UnknownDialect(s.to_owned())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown assembly dialect '{0}', expected 'intel' or 'att'")]
pub struct UnknownDialect(pub String);
