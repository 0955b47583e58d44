// Fri Oct 16 2026 - Alex

use crate::source::Pos;
use std::fmt;
use std::sync::Arc;

/// Resolved type of a declaration or field.
///
/// Reference-like types only keep the spelled name of what they point to, so
/// the graph stays acyclic: only by-value edges (struct fields, array
/// elements, named underlying types) hold resolved types.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Basic(BasicKind),
    Pointer(String),
    Slice(String),
    Map(String, String),
    Chan(String),
    Func(String),
    Interface(String),
    Array(u64, Box<Type>),
    Struct(StructType),
    Named(Arc<NamedType>),
    /// Qualified type from another package, sized as one word.
    Foreign(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BasicKind {
    Bool,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Uintptr,
    Byte,
    Rune,
    Float32,
    Float64,
    Complex64,
    Complex128,
    String,
    UnsafePointer,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct StructType {
    pub fields: Vec<TypeField>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeField {
    pub name: String,
    pub ty: Type,
    pub tag: String,
    pub embedded: bool,
    pub exported: bool,
}

/// Defined (non-alias) type with its declaration position.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct NamedType {
    pub name: String,
    pub pos: Pos,
    pub underlying: Type,
}

impl BasicKind {
    pub fn from_name(name: &str) -> Option<Self> {
        let kind = match name {
            "bool" => Self::Bool,
            "int" => Self::Int,
            "int8" => Self::Int8,
            "int16" => Self::Int16,
            "int32" => Self::Int32,
            "int64" => Self::Int64,
            "uint" => Self::Uint,
            "uint8" => Self::Uint8,
            "uint16" => Self::Uint16,
            "uint32" => Self::Uint32,
            "uint64" => Self::Uint64,
            "uintptr" => Self::Uintptr,
            "byte" => Self::Byte,
            "rune" => Self::Rune,
            "float32" => Self::Float32,
            "float64" => Self::Float64,
            "complex64" => Self::Complex64,
            "complex128" => Self::Complex128,
            "string" => Self::String,
            _ => return None,
        };
        Some(kind)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Uint => "uint",
            Self::Uint8 => "uint8",
            Self::Uint16 => "uint16",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Uintptr => "uintptr",
            Self::Byte => "byte",
            Self::Rune => "rune",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::Complex64 => "complex64",
            Self::Complex128 => "complex128",
            Self::String => "string",
            Self::UnsafePointer => "unsafe.Pointer",
        }
    }

    /// Fixed size in bytes, `None` for word sized kinds.
    pub fn fixed_size(self) -> Option<u64> {
        match self {
            Self::Bool | Self::Int8 | Self::Uint8 | Self::Byte => Some(1),
            Self::Int16 | Self::Uint16 => Some(2),
            Self::Int32 | Self::Uint32 | Self::Rune | Self::Float32 => Some(4),
            Self::Int64 | Self::Uint64 | Self::Float64 | Self::Complex64 => Some(8),
            Self::Complex128 => Some(16),
            Self::Int | Self::Uint | Self::Uintptr | Self::UnsafePointer | Self::String => None,
        }
    }

    pub fn is_complex(self) -> bool {
        matches!(self, Self::Complex64 | Self::Complex128)
    }
}

impl Type {
    pub fn underlying(&self) -> &Type {
        match self {
            Self::Named(named) => named.underlying.underlying(),
            other => other,
        }
    }

    pub fn as_struct(&self) -> Option<&StructType> {
        match self.underlying() {
            Self::Struct(st) => Some(st),
            _ => None,
        }
    }

    pub fn as_named(&self) -> Option<&Arc<NamedType>> {
        match self {
            Self::Named(named) => Some(named),
            _ => None,
        }
    }

    pub fn is_struct(&self) -> bool {
        self.as_struct().is_some()
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic(kind) => write!(f, "{}", kind.name()),
            Self::Pointer(elem) => write!(f, "*{}", elem),
            Self::Slice(elem) => write!(f, "[]{}", elem),
            Self::Map(key, value) => write!(f, "map[{}]{}", key, value),
            Self::Chan(text) | Self::Func(text) | Self::Interface(text) | Self::Foreign(text) => {
                write!(f, "{}", text)
            }
            Self::Array(len, elem) => write!(f, "[{}]{}", len, elem),
            Self::Struct(st) => {
                write!(f, "struct{{")?;
                for (i, field) in st.fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    if field.embedded {
                        write!(f, "{}", field.ty)?;
                    } else {
                        write!(f, "{} {}", field.name, field.ty)?;
                    }
                    if !field.tag.is_empty() {
                        write!(f, " {:?}", field.tag)?;
                    }
                }
                write!(f, "}}")
            }
            Self::Named(named) => write!(f, "{}", named.name),
        }
    }
}
