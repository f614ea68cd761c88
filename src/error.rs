// src/error.rs

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// What a resolved path is expected to be on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    File,
    Directory,
}

impl fmt::Display for PathKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathKind::File => f.write_str("file"),
            PathKind::Directory => f.write_str("directory"),
        }
    }
}

/// Core error types for aptshim
#[derive(Error, Debug)]
pub enum Error {
    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An external tool could not be spawned at all
    #[error("Failed to run {program}: {source}")]
    CommandUnavailable {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// An external tool ran but exited unsuccessfully
    #[error("Command `{command}` failed with {status}")]
    CommandFailed { command: String, status: String },

    /// Output of an external tool or a file on disk could not be parsed
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The local (OS, machine) pair has no dpkg architecture mapping
    #[error("No dpkg architecture known for system '{system}' on machine '{machine}'")]
    UnknownArchitecture { system: String, machine: String },

    /// A resolved path is missing or has the wrong type
    #[error("{what} not found: {} is not an existing {kind}", path.display())]
    NotFound {
        what: &'static str,
        path: PathBuf,
        kind: PathKind,
    },

    /// The caller asked for an operation with nothing to operate on
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Result type alias using aptshim's Error type
pub type Result<T> = std::result::Result<T, Error>;
