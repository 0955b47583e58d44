// Fri Oct 16 2026 - Alex

use crate::scope::Type;
use crate::source::Pos;

/// Type declaration as seen by the checker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeName {
    pub name: String,
    pub pos: Pos,
    pub alias: bool,
    pub ty: Type,
}

impl TypeName {
    pub fn new(name: impl Into<String>, pos: Pos, ty: Type) -> Self {
        Self {
            name: name.into(),
            pos,
            alias: false,
            ty,
        }
    }

    pub fn alias(name: impl Into<String>, pos: Pos, ty: Type) -> Self {
        Self {
            alias: true,
            ..Self::new(name, pos, ty)
        }
    }

    /// Defined type with a struct underlying type, the only kind of
    /// declaration whose layout gets curated.
    pub fn is_struct_decl(&self) -> bool {
        !self.alias && self.ty.as_named().is_some() && self.ty.is_struct()
    }

    pub fn is_exported(&self) -> bool {
        self.name.chars().next().map_or(false, char::is_uppercase)
    }
}
