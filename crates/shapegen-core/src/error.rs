//! Error types for the compiler core.
//!
//! Per-declaration problems (an unsupported property type, a failed parse) are
//! not errors: they become [`Diagnostic`](crate::diagnostics::Diagnostic)s and
//! compilation continues. The types here abort a compilation.

use crate::naming::GenericNameError;
use crate::universe::TypeId;
use thiserror::Error;

/// The settings cannot be used as given.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed generic name in type mapping `{key}`: {source}")]
    MalformedMapping {
        key: String,
        #[source]
        source: GenericNameError,
    },

    #[error("type mapping `{source_name}` -> `{target}` uses parameter `{parameter}` that the source does not declare")]
    UnboundMappingParameter {
        source_name: String,
        target: String,
        parameter: String,
    },

    #[error("invalid exclusion pattern `{pattern}`: {source}")]
    InvalidExcludePattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("unknown primitive `{name}` for alias `{alias}`")]
    UnknownPrimitive { alias: String, name: String },
}

#[derive(Debug, Error)]
pub enum NamingError {
    #[error("types {} all map to the output name `{name}`", .types.join(", "))]
    Collision { name: String, types: Vec<String> },
}

/// No resolver stage produced a type.
#[derive(Debug, Clone, Error)]
pub enum ResolveError {
    #[error("no resolver handles type `{raw}`")]
    Unsupported { raw: String },

    #[error("resolver `{stage}` failed on `{raw}`: {message}")]
    Stage {
        stage: String,
        raw: String,
        message: String,
    },
}

/// A declaration could not be parsed. Recorded as a diagnostic; the symbol
/// becomes external.
#[derive(Debug, Clone, Error)]
pub enum ParseError {
    #[error("type `{0}` is not present in the source universe")]
    UnknownType(TypeId),

    #[error("`{raw}` does not name a declared type")]
    NotADeclaration { raw: String },

    #[error("{0}")]
    Resolve(#[from] ResolveError),
}

/// A structural invariant of the finished model does not hold.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("symbol `{name}` is declared {count} times")]
    DuplicateSymbol { name: String, count: usize },

    #[error("`{owner}` references `{target}`, which is neither declared nor external")]
    DanglingReference { owner: String, target: String },
}

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("invalid settings: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Naming(#[from] NamingError),

    #[error("model invariant violated: {0}")]
    Invariant(#[from] InvariantViolation),

    #[error("transformer `{name}` failed: {message}")]
    Transformer { name: String, message: String },
}

pub type Result<T, E = CompileError> = std::result::Result<T, E>;
