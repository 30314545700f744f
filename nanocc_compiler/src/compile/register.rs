use super::Dialect;
use std::fmt;

/// Hardware register.
///
/// Only the 32-bit return value register is needed so far.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Register {
    Eax,
}

impl Register {
    /// Bare register name, as used in the assembly tree.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Register::Eax => "eax",
        }
    }

    /// Register name as written by the assembler dialect.
    pub fn display(&self, dialect: Dialect) -> RegisterDisplay {
        RegisterDisplay {
            register: *self,
            dialect,
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

pub struct RegisterDisplay {
    register: Register,
    dialect: Dialect,
}

impl fmt::Display for RegisterDisplay {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.dialect {
            Dialect::Intel => write!(f, "{}", self.register.name()),
            Dialect::Att => write!(f, "%{}", self.register.name()),
        }
    }
}
