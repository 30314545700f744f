//! Compiler for a tiny subset of C, targeting x86-64 assembly.
//!
//! The pipeline runs in four stages, each producing a new artifact:
//!
//! 1. [`lex::tokenize`] turns preprocessed source into tokens.
//! 2. [`parsing::parse`] builds a syntax tree.
//! 3. [`compile::lower`] translates it into an assembly tree.
//! 4. [`compile::Emitter`] writes the assembly tree out as text.
pub mod compile;
pub mod error;
pub mod lex;
pub mod parsing;
pub mod pretty;
pub mod token_stream;
pub mod tokens;

pub use compile::{CompileConf, Dialect};
pub use error::{CompileError, CompileResult};

use compile::{AsmTree, Emitter};
use log::debug;
use parsing::SyntaxTree;
use pretty::pretty;
use std::fmt;
use tokens::Token;

/// Compile source to assembly text with the default configuration.
#[inline]
pub fn compile_str(source: &str) -> CompileResult<String> {
    compile_str_with(source, &CompileConf::default())
}

pub fn compile_str_with(source: &str, conf: &CompileConf) -> CompileResult<String> {
    // Lexical analysis
    let tokens = lex::tokenize(source)?;

    // Syntactic analysis
    let syntax = parsing::parse(&tokens)?;

    // Code generation
    let asm = compile::lower(&syntax)?;
    let text = Emitter::new(conf.dialect).emit(&asm)?;

    Ok(text)
}

/// Last stage to run in [`run_stages`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Lex,
    Parse,
    Codegen,
    Emit,
}

/// Artifact of the last stage that was run.
#[derive(Debug)]
pub enum StageOutput {
    Tokens(Vec<Token>),
    Syntax(SyntaxTree),
    Asm(AsmTree),
    Assembly(String),
}

/// Run the pipeline up to and including the given stage.
///
/// Intermediate trees are logged at debug level.
pub fn run_stages(source: &str, stage: Stage, conf: &CompileConf) -> CompileResult<StageOutput> {
    let tokens = lex::tokenize(source)?;
    if stage == Stage::Lex {
        return Ok(StageOutput::Tokens(tokens));
    }

    let syntax = parsing::parse(&tokens)?;
    debug!("syntax tree:\n{}", pretty(&syntax));
    if stage == Stage::Parse {
        return Ok(StageOutput::Syntax(syntax));
    }

    let asm = compile::lower(&syntax)?;
    debug!("assembly tree:\n{}", pretty(&asm));
    if stage == Stage::Codegen {
        return Ok(StageOutput::Asm(asm));
    }

    let text = Emitter::new(conf.dialect).emit(&asm)?;
    Ok(StageOutput::Assembly(text))
}

/// Human readable rendering: a token table, a pretty tree, or the assembly text.
impl fmt::Display for StageOutput {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StageOutput::Tokens(tokens) => write!(f, "{}", lex::dump_tokens(tokens)?),
            StageOutput::Syntax(tree) => write!(f, "{}", pretty(tree)),
            StageOutput::Asm(tree) => write!(f, "{}", pretty(tree)),
            StageOutput::Assembly(text) => write!(f, "{text}"),
        }
    }
}
