// Fri Oct 16 2026 - Alex

pub mod object;
pub mod tree;
pub mod types;

pub use object::TypeName;
pub use tree::{Scope, ScopeKind};
pub use types::{BasicKind, NamedType, StructType, Type, TypeField};
