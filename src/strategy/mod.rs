// Fri Oct 16 2026 - Alex

pub mod builder;
pub mod cache;
pub mod error;
pub mod filter;
pub mod group;
pub mod ignore;
pub mod note;
pub mod pack;
pub mod pad;
pub mod pipe;
pub mod separate;
pub mod sort;
pub mod tag;

pub use builder::Builder;
pub use cache::{CacheRounding, FalseSharing};
pub use error::StrategyError;
pub use filter::{Filter, FilterKind};
pub use group::{Group, GroupKey};
pub use ignore::{Ignore, Void};
pub use note::{Annotate, NoteKind, NoteTarget, Stamp, STAMP};
pub use pack::{Pack, Unpack};
pub use pad::ExplicitPadding;
pub use pipe::Pipe;
pub use separate::Separate;
pub use sort::{Sort, SortKey};
pub use tag::{TagAnnotation, TagMode, TagWriter, TAG_KEY};

use crate::context::Context;
use crate::structure::Struct;

/// Pure transformation of a structure model.
///
/// Implementations never touch `origin`; they return a new value and check
/// the context at least once.
pub trait Strategy: Send + Sync {
    fn apply(&self, ctx: &Context, origin: &Struct) -> Result<Struct, StrategyError>;
}
