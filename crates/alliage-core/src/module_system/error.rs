//! # Alliage Core Module System Errors
//!
//! Defines [`ModuleSystemError`], covering module registration and the
//! loading of module definitions files.
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModuleSystemError {
    #[error("Module '{name}' is already registered")]
    DuplicateModule { name: String },

    #[error("A module factory is already registered under reference '{reference}'")]
    DuplicateFactory { reference: String },

    #[error("Module '{module}' references unknown module factory '{reference}'")]
    UnknownFactory { module: String, reference: String },

    #[error("Module definitions file not found: {0}")]
    DefinitionsNotFound(PathBuf),

    #[error("Unsupported module definitions format: {0}")]
    UnsupportedDefinitionsFormat(PathBuf),

    #[error("I/O error while reading module definitions '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Deserialization of module definitions from '{format}' failed: {source}")]
    DeserializationError {
        format: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    #[error("Invalid definition for module '{module}': {reason}")]
    InvalidDefinition { module: String, reason: String },
}
