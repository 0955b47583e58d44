// Fri Oct 16 2026 - Alex

use crate::context::ContextError;
use crate::locator::Identity;
use crate::reconcile::ReconcileError;
use crate::source::SourceError;
use crate::strategy::StrategyError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WalkerError {
    #[error("walker {0:?} wasn't found")]
    UnknownWalker(String),
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error("struct {name} ({id}) can't be curated: {source}")]
    Strategy {
        name: String,
        id: Identity,
        #[source]
        source: StrategyError,
    },
    #[error(transparent)]
    Reconcile(#[from] ReconcileError),
    #[error("can't serialize results: {0}")]
    Json(#[from] serde_json::Error),
    #[error("can't write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Context(#[from] ContextError),
}

impl WalkerError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
