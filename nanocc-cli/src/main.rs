//! Entrypoint for CLI
mod driver;

use clap::{ArgGroup, Parser};
use driver::DriverError;
use log::{error, LevelFilter};
use nanocc_compiler::{CompileConf, Dialect, Stage};
use std::{path::PathBuf, process::ExitCode};

/// Compiler for a tiny subset of C.
#[derive(Parser, Debug)]
#[command(name = "nanocc", version)]
#[command(group(ArgGroup::new("stage").multiple(false)))]
struct Args {
    /// Path to the C source file
    #[arg(value_parser = driver::c_source_file)]
    input: PathBuf,

    /// Run the lexer, but stop before parsing
    #[arg(long, group = "stage")]
    lex: bool,

    /// Run the lexer and parser, but stop before assembly generation
    #[arg(long, group = "stage")]
    parse: bool,

    /// Perform lexing, parsing, and assembly generation, but stop before code emission
    #[arg(long, group = "stage")]
    codegen: bool,

    /// Emit an assembly file, but don't assemble or link
    #[arg(short = 'S', group = "stage")]
    emit_asm: bool,

    /// Assembler syntax of the emitted code
    #[arg(long, default_value_t = Dialect::Intel)]
    syntax: Dialect,

    /// Output path. Defaults to the input path without its extension,
    /// or with a `.s` extension when combined with `-S`.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log each compiler stage
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn stage(&self) -> Option<Stage> {
        if self.lex {
            Some(Stage::Lex)
        } else if self.parse {
            Some(Stage::Parse)
        } else if self.codegen {
            Some(Stage::Codegen)
        } else {
            None
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if let Err(err) = simple_logger::SimpleLogger::new().with_level(level).env().init() {
        eprintln!("failed to initialize logger: {err}");
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::from(u8::try_from(err.exit_code()).unwrap_or(1))
        }
    }
}

fn run(args: &Args) -> Result<(), DriverError> {
    let conf = CompileConf::with_dialect(args.syntax);

    if let Some(stage) = args.stage() {
        let output = driver::run_stages(&args.input, stage, &conf)?;
        println!("{output}");
        return Ok(());
    }

    if args.emit_asm {
        let assembly = args
            .output
            .clone()
            .unwrap_or_else(|| args.input.with_extension("s"));
        return driver::compile_to_assembly(&args.input, &assembly, &conf);
    }

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| args.input.with_extension(""));
    driver::compile_and_link(&args.input, &output, &conf)
}
