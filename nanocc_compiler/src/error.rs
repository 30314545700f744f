use crate::{
    compile::{EmitError, LowerError},
    lex::LexError,
    parsing::ParseError,
};
use thiserror::Error;

pub type CompileResult<T> = Result<T, CompileError>;

/// Failure of any stage of the pipeline.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("lex error: {0}")]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("lowering error: {0}")]
    Lower(#[from] LowerError),

    #[error("emission error: {0}")]
    Emit(#[from] EmitError),
}
