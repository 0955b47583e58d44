// Fri Oct 16 2026 - Alex

use crate::context::ContextError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StrategyError {
    #[error(transparent)]
    Context(#[from] ContextError),
    #[error("strategy {0:?} wasn't found")]
    UnknownStrategy(String),
    #[error("strategy {0:?} can't be used inside a tag group")]
    NestedGroup(String),
    #[error("tag {tag:?} of field {field:?} can't be parsed: {reason}")]
    MalformedTag {
        field: String,
        tag: String,
        reason: String,
    },
    #[error("inconsistent strategies list {found:?} for field {field:?} in group {group}")]
    InconsistentGroup {
        group: String,
        field: String,
        found: String,
    },
    #[error("field {field:?} is claimed by both group {first} and group {second}")]
    OverlappingGroups {
        field: String,
        first: String,
        second: String,
    },
}
