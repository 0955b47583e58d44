// Fri Oct 16 2026 - Alex

use crate::context::ContextError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReconcileError {
    #[error(transparent)]
    Context(#[from] ContextError),
    #[error("declaration {0:?} is not a struct type")]
    NotStruct(String),
    #[error("struct {name:?} has a field that can't be flattened: {field}")]
    NotFlat { name: String, field: String },
    #[error("struct {name:?} has unexpected pad type expression {ty:?}")]
    UnexpectedPad { name: String, ty: String },
    #[error("struct {name:?} has {found} fields after sync, expected {expected}")]
    LengthMismatch {
        name: String,
        expected: usize,
        found: usize,
    },
}
