//! Glue between the compiler and the system toolchain.
//!
//! Preprocessing, assembling and linking are delegated to `gcc`.
use log::{debug, info};
use nanocc_compiler::{compile_str_with, CompileConf, CompileError, Stage, StageOutput};
use std::{
    ffi::OsStr,
    fs, io,
    path::{Path, PathBuf},
    process::Command,
};
use thiserror::Error;

const GCC: &str = "gcc";

/// Accepts only paths to C source files.
pub fn c_source_file(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);
    match path.extension() {
        Some(ext) if ext == "c" => Ok(path),
        _ => Err(format!("not a valid C source file: '{s}'")),
    }
}

/// Run `gcc -E -P` and return the preprocessed text.
pub fn preprocess(input: &Path) -> Result<String, DriverError> {
    let preprocessed = tempfile::Builder::new()
        .prefix("nanocc")
        .suffix(".i")
        .tempfile()?;

    info!("preprocessing C source file '{}'", input.display());
    run_tool(
        GCC,
        [
            OsStr::new("-E"),
            OsStr::new("-P"),
            input.as_os_str(),
            OsStr::new("-o"),
            preprocessed.path().as_os_str(),
        ],
    )?;

    Ok(fs::read_to_string(preprocessed.path())?)
}

/// Preprocess, then run the compiler up to the given stage.
pub fn run_stages(input: &Path, stage: Stage, conf: &CompileConf) -> Result<StageOutput, DriverError> {
    let source = preprocess(input)?;
    debug!("running compiler up to {stage:?}");
    Ok(nanocc_compiler::run_stages(&source, stage, conf)?)
}

/// Preprocess and compile the source file into an assembly file.
pub fn compile_to_assembly(input: &Path, assembly: &Path, conf: &CompileConf) -> Result<(), DriverError> {
    let source = preprocess(input)?;

    info!("compiling '{}'", input.display());
    let text = compile_str_with(&source, conf)?;
    fs::write(assembly, text)?;

    info!("wrote assembly to '{}'", assembly.display());
    Ok(())
}

/// Build an executable from the source file.
///
/// The intermediate assembly is written to a temporary file which is
/// removed afterwards.
pub fn compile_and_link(input: &Path, output: &Path, conf: &CompileConf) -> Result<(), DriverError> {
    let assembly = tempfile::Builder::new()
        .prefix("nanocc")
        .suffix(".s")
        .tempfile()?;

    compile_to_assembly(input, assembly.path(), conf)?;

    info!("assembling and linking '{}'", output.display());
    run_tool(
        GCC,
        [assembly.path().as_os_str(), OsStr::new("-o"), output.as_os_str()],
    )
}

/// Spawn an external tool and wait for it.
///
/// A non-zero exit status is reported as [`DriverError::Tool`].
fn run_tool<'a>(tool: &'static str, args: impl IntoIterator<Item = &'a OsStr>) -> Result<(), DriverError> {
    let mut command = Command::new(tool);
    command.args(args);
    debug!("{command:?}");

    let status = command.status().map_err(|err| DriverError::Spawn { tool, source: err })?;
    if status.success() {
        Ok(())
    } else {
        Err(DriverError::Tool {
            tool,
            // Killed by a signal.
            code: status.code().unwrap_or(1),
        })
    }
}

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("{0}")]
    Compile(#[from] CompileError),

    #[error("failed to run {tool}: {source}")]
    Spawn {
        tool: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("{tool} exited with status {code}")]
    Tool { tool: &'static str, code: i32 },

    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

impl DriverError {
    /// Process exit code to report for this error.
    ///
    /// External tool failures pass their own status through.
    pub fn exit_code(&self) -> i32 {
        match self {
            DriverError::Tool { code, .. } => *code,
            _ => 1,
        }
    }
}
