use miette::Diagnostic;
use shapegen_core::CompileError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced to the user by the command line front end.
#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error("no shapegen.toml or shapegen.json found in {} or any parent directory", .0.display())]
    #[diagnostic(
        code(shapegen::config::not_found),
        help("pass --config, or --input together with --root")
    )]
    ConfigNotFound(PathBuf),

    #[error("no type universe given")]
    #[diagnostic(
        code(shapegen::input::missing_universe),
        help("set `universe` in the [input] section or pass --input")
    )]
    MissingUniverse,

    #[error("no root types given")]
    #[diagnostic(
        code(shapegen::input::missing_roots),
        help("set `roots` in the [input] section or pass --root")
    )]
    MissingRoots,

    #[error(transparent)]
    #[diagnostic(code(shapegen::compile))]
    Compile(#[from] CompileError),

    /// Context chain from the loading layer, flattened into one message.
    #[error("{0:#}")]
    #[diagnostic(code(shapegen::io))]
    Other(anyhow::Error),
}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::Other(err)
    }
}
