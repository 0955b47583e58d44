// Fri Oct 16 2026 - Alex

use crate::context::ContextError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("lexical error at byte {offset}: {message}")]
    Lex { offset: usize, message: String },
    #[error("{position}: {message}")]
    Syntax { position: String, message: String },
    #[error("{position}: invalid recursive type {name}")]
    RecursiveType { name: String, position: String },
    #[error("{position}: {name} redeclared in this block")]
    Redeclared { name: String, position: String },
    #[error("package directory {0} not found")]
    NotFound(PathBuf),
    #[error("no source files found in {0}")]
    NoFiles(PathBuf),
    #[error("{path}: found packages {expected} and {found}")]
    PackageMismatch {
        path: PathBuf,
        expected: String,
        found: String,
    },
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Context(#[from] ContextError),
}

impl SourceError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
