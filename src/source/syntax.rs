// Fri Oct 16 2026 - Alex

use crate::source::position::{FileInfo, Pos};
use std::fmt;
use std::ops::Range;
use std::path::PathBuf;
use std::sync::Arc;

/// Parsed source file.
///
/// Only type declarations, constants and block nesting are modelled; the
/// original text is kept so everything else can be printed byte for byte.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub package: String,
    pub content: String,
    pub info: Arc<FileInfo>,
    pub root: Block,
}

/// Lexical block: the file itself, a function body or a nested brace block.
#[derive(Debug, Clone, Default)]
pub struct Block {
    pub span: Range<usize>,
    pub specs: Vec<TypeSpec>,
    pub consts: Vec<ConstSpec>,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstSpec {
    pub name: String,
    pub value: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct TypeSpec {
    pub name: String,
    pub pos: Pos,
    pub alias: bool,
    pub generic: bool,
    pub ty: TypeExpr,
    pub ty_span: Range<usize>,
    pub doc: Vec<String>,
    /// From the first doc line start to the start of the declaration line.
    pub doc_span: Range<usize>,
    pub comment: Vec<String>,
    /// From the end of the type to the end of the trailing comment.
    pub comment_span: Range<usize>,
    /// Leading whitespace of the declaration line.
    pub indent: String,
    pub modified: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    Name { pkg: Option<String>, name: String },
    Pointer(Box<TypeExpr>),
    Array { len: ArrayLen, elem: Box<TypeExpr> },
    Slice(Box<TypeExpr>),
    Map(Box<TypeExpr>, Box<TypeExpr>),
    Chan(String),
    Func(String),
    Interface(String),
    Struct(StructExpr),
    /// Instantiated generic type, kept as text.
    Generic { base: String, text: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArrayLen {
    Literal(u64),
    Const(String),
    Expr(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructExpr {
    /// From the `struct` keyword to the closing brace inclusive.
    pub span: Range<usize>,
    pub fields: Vec<FieldDecl>,
    /// Comments after the last field.
    pub trailing: Vec<String>,
    /// Leading whitespace of the line holding the closing brace.
    pub close_indent: String,
    /// Leading whitespace of the first body line, `None` for bodies written
    /// on the keyword line.
    pub field_indent: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    /// Declared names, empty for embedded fields.
    pub names: Vec<String>,
    pub pos: Pos,
    pub ty: TypeExpr,
    pub ty_text: String,
    /// Raw tag literal including its quotes.
    pub tag: Option<String>,
    pub doc: Vec<String>,
    pub comment: Vec<String>,
}

impl SourceFile {
    pub fn name(&self) -> &str {
        self.info.name()
    }

    pub fn specs(&self) -> Vec<&TypeSpec> {
        fn collect<'a>(block: &'a Block, out: &mut Vec<&'a TypeSpec>) {
            out.extend(block.specs.iter());
            for child in &block.blocks {
                collect(child, out);
            }
        }
        let mut out = Vec::new();
        collect(&self.root, &mut out);
        out
    }

    pub fn specs_mut(&mut self) -> Vec<&mut TypeSpec> {
        fn collect<'a>(block: &'a mut Block, out: &mut Vec<&'a mut TypeSpec>) {
            out.extend(block.specs.iter_mut());
            for child in block.blocks.iter_mut() {
                collect(child, out);
            }
        }
        let mut out = Vec::new();
        collect(&mut self.root, &mut out);
        out
    }

    pub fn is_modified(&self) -> bool {
        self.specs().iter().any(|spec| spec.modified)
    }
}

impl TypeSpec {
    pub fn struct_expr(&self) -> Option<&StructExpr> {
        match &self.ty {
            TypeExpr::Struct(st) => Some(st),
            _ => None,
        }
    }

    pub fn struct_expr_mut(&mut self) -> Option<&mut StructExpr> {
        match &mut self.ty {
            TypeExpr::Struct(st) => Some(st),
            _ => None,
        }
    }
}

impl TypeExpr {
    /// Name an embedded field of this type gets.
    pub fn embedded_name(&self) -> Option<&str> {
        match self {
            Self::Name { name, .. } => Some(name),
            Self::Pointer(inner) => inner.embedded_name(),
            Self::Generic { base, .. } => base.rsplit('.').next(),
            _ => None,
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name { pkg: Some(pkg), name } => write!(f, "{}.{}", pkg, name),
            Self::Name { pkg: None, name } => write!(f, "{}", name),
            Self::Pointer(inner) => write!(f, "*{}", inner),
            Self::Array { len, elem } => match len {
                ArrayLen::Literal(n) => write!(f, "[{}]{}", n, elem),
                ArrayLen::Const(name) | ArrayLen::Expr(name) => write!(f, "[{}]{}", name, elem),
            },
            Self::Slice(elem) => write!(f, "[]{}", elem),
            Self::Map(key, value) => write!(f, "map[{}]{}", key, value),
            Self::Chan(text) | Self::Func(text) | Self::Interface(text) => write!(f, "{}", text),
            Self::Struct(st) => {
                write!(f, "struct{{")?;
                for (i, field) in st.fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    if field.names.is_empty() {
                        write!(f, "{}", field.ty)?;
                    } else {
                        write!(f, "{} {}", field.names.join(", "), field.ty)?;
                    }
                }
                write!(f, "}}")
            }
            Self::Generic { text, .. } => write!(f, "{}", text),
        }
    }
}

impl FieldDecl {
    /// Synthetic `_ [size]byte` padding declaration.
    pub fn pad(size: u64) -> Self {
        let ty = TypeExpr::Array {
            len: ArrayLen::Literal(size),
            elem: Box::new(TypeExpr::Name {
                pkg: None,
                name: "byte".to_string(),
            }),
        };
        Self {
            names: vec![crate::structure::PAD_NAME.to_string()],
            pos: Pos::NONE,
            ty_text: ty.to_string(),
            ty,
            tag: None,
            doc: Vec::new(),
            comment: Vec::new(),
        }
    }

    pub fn is_embedded(&self) -> bool {
        self.names.is_empty()
    }

    /// Single name of a flat field, the type name for embedded ones.
    pub fn name(&self) -> Option<&str> {
        match self.names.as_slice() {
            [] => self.ty.embedded_name(),
            [name] => Some(name),
            _ => None,
        }
    }

    pub fn is_flat(&self) -> bool {
        self.names.len() <= 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_decl() {
        let pad = FieldDecl::pad(6);
        assert_eq!(pad.ty_text, "[6]byte");
        assert_eq!(pad.name(), Some("_"));
        assert!(pad.is_flat());
    }

    #[test]
    fn test_embedded_name() {
        let ty = TypeExpr::Pointer(Box::new(TypeExpr::Name {
            pkg: Some("sync".into()),
            name: "Mutex".into(),
        }));
        assert_eq!(ty.to_string(), "*sync.Mutex");
        assert_eq!(ty.embedded_name(), Some("Mutex"));
    }
}
