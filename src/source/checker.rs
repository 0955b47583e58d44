// Fri Oct 16 2026 - Alex

use crate::scope::{BasicKind, NamedType, Scope, StructType, Type, TypeField, TypeName};
use crate::source::lexer::unquote;
use crate::source::syntax::{ArrayLen, Block, SourceFile, TypeExpr, TypeSpec};
use crate::source::{Pos, SourceError};
use log::{debug, warn};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Declarations visible in one block.
#[derive(Clone, Default)]
struct Frame<'a> {
    types: HashMap<&'a str, (&'a TypeSpec, &'a SourceFile)>,
    consts: HashMap<&'a str, Option<u64>>,
}

enum Unresolved {
    Recursive { name: String, position: String },
    Skip(String),
}

/// Resolves the type declarations of one package into a scope tree.
///
/// Only what layout needs is checked: declared types, field types and
/// constant array lengths. Declarations that cannot be sized (generics,
/// unknown identifiers, computed lengths) are left out with a warning, while
/// invalid recursive types fail the package.
pub struct Checker<'a> {
    files: &'a [SourceFile],
    cache: HashMap<Pos, Type>,
    resolving: HashSet<Pos>,
}

impl<'a> Checker<'a> {
    pub fn new(files: &'a [SourceFile]) -> Self {
        Self {
            files,
            cache: HashMap::new(),
            resolving: HashSet::new(),
        }
    }

    pub fn check(mut self, name: &str, path: &str) -> Result<Scope, SourceError> {
        let mut frame = Frame::default();
        for file in self.files {
            for spec in &file.root.specs {
                if spec.name == "_" {
                    continue;
                }
                if frame.types.insert(spec.name.as_str(), (spec, file)).is_some() {
                    return Err(SourceError::Redeclared {
                        name: spec.name.clone(),
                        position: file.info.position(spec.pos).to_string(),
                    });
                }
            }
            for constant in &file.root.consts {
                frame.consts.insert(constant.name.as_str(), constant.value);
            }
        }
        let env = vec![frame];

        let mut scope = Scope::package(name, path);
        for file in self.files {
            for spec in &file.root.specs {
                if let Some(obj) = self.object(spec, file, &env)? {
                    scope.insert(obj);
                }
            }
        }
        for file in self.files {
            for block in &file.root.blocks {
                if let Some(child) = self.check_block(block, file, &env)? {
                    scope.add_child(child);
                }
            }
        }
        debug!("checked package {} with {} declarations", name, scope.len());
        Ok(scope)
    }

    fn check_block(
        &mut self,
        block: &'a Block,
        file: &'a SourceFile,
        env: &[Frame<'a>],
    ) -> Result<Option<Scope>, SourceError> {
        let mut frame = Frame::default();
        for spec in &block.specs {
            if spec.name != "_" {
                frame.types.insert(spec.name.as_str(), (spec, file));
            }
        }
        for constant in &block.consts {
            frame.consts.insert(constant.name.as_str(), constant.value);
        }
        let mut inner = env.to_vec();
        inner.push(frame);

        let mut scope = Scope::block();
        for spec in &block.specs {
            if let Some(obj) = self.object(spec, file, &inner)? {
                scope.insert(obj);
            }
        }
        for child in &block.blocks {
            if let Some(child) = self.check_block(child, file, &inner)? {
                scope.add_child(child);
            }
        }
        if scope.is_empty() && scope.children().is_empty() {
            return Ok(None);
        }
        Ok(Some(scope))
    }

    fn object(
        &mut self,
        spec: &'a TypeSpec,
        file: &'a SourceFile,
        env: &[Frame<'a>],
    ) -> Result<Option<TypeName>, SourceError> {
        if spec.generic {
            debug!("skipping generic type {}", spec.name);
            return Ok(None);
        }
        match self.resolve_spec(spec, file, env) {
            Ok(ty) if spec.alias => Ok(Some(TypeName::alias(&spec.name, spec.pos, ty))),
            Ok(ty) => Ok(Some(TypeName::new(&spec.name, spec.pos, ty))),
            Err(Unresolved::Recursive { name, position }) => {
                Err(SourceError::RecursiveType { name, position })
            }
            Err(Unresolved::Skip(reason)) => {
                warn!(
                    "{}: skipping type {}: {}",
                    file.info.position(spec.pos),
                    spec.name,
                    reason
                );
                Ok(None)
            }
        }
    }

    fn resolve_spec(
        &mut self,
        spec: &'a TypeSpec,
        file: &'a SourceFile,
        env: &[Frame<'a>],
    ) -> Result<Type, Unresolved> {
        if let Some(ty) = self.cache.get(&spec.pos) {
            return Ok(ty.clone());
        }
        if spec.generic {
            return Err(Unresolved::Skip(format!("generic type {}", spec.name)));
        }
        if !self.resolving.insert(spec.pos) {
            return Err(Unresolved::Recursive {
                name: spec.name.clone(),
                position: file.info.position(spec.pos).to_string(),
            });
        }
        let resolved = self.resolve_expr(&spec.ty, env);
        self.resolving.remove(&spec.pos);
        let ty = resolved?;

        let ty = if spec.alias {
            ty
        } else {
            Type::Named(Arc::new(NamedType {
                name: spec.name.clone(),
                pos: spec.pos,
                underlying: ty.underlying().clone(),
            }))
        };
        self.cache.insert(spec.pos, ty.clone());
        Ok(ty)
    }

    fn resolve_name(&mut self, name: &str, env: &[Frame<'a>]) -> Result<Type, Unresolved> {
        for depth in (0..env.len()).rev() {
            if let Some(&(spec, file)) = env[depth].types.get(name) {
                return self.resolve_spec(spec, file, &env[..=depth]);
            }
        }
        if let Some(kind) = BasicKind::from_name(name) {
            return Ok(Type::Basic(kind));
        }
        match name {
            "error" | "any" | "comparable" => Ok(Type::Interface(name.to_string())),
            _ => Err(Unresolved::Skip(format!("undefined type {}", name))),
        }
    }

    fn const_value(name: &str, env: &[Frame<'a>]) -> Option<u64> {
        env.iter()
            .rev()
            .find_map(|frame| frame.consts.get(name).copied())
            .flatten()
    }

    fn resolve_expr(&mut self, expr: &'a TypeExpr, env: &[Frame<'a>]) -> Result<Type, Unresolved> {
        match expr {
            TypeExpr::Name { pkg: Some(pkg), name } if pkg == "unsafe" && name == "Pointer" => {
                Ok(Type::Basic(BasicKind::UnsafePointer))
            }
            TypeExpr::Name { pkg: Some(pkg), name } => Ok(Type::Foreign(format!("{}.{}", pkg, name))),
            TypeExpr::Name { pkg: None, name } => self.resolve_name(name, env),
            TypeExpr::Pointer(inner) => Ok(Type::Pointer(inner.to_string())),
            TypeExpr::Slice(elem) => Ok(Type::Slice(elem.to_string())),
            TypeExpr::Map(key, value) => Ok(Type::Map(key.to_string(), value.to_string())),
            TypeExpr::Chan(text) => Ok(Type::Chan(text.clone())),
            TypeExpr::Func(text) => Ok(Type::Func(text.clone())),
            TypeExpr::Interface(text) => Ok(Type::Interface(text.clone())),
            TypeExpr::Array { len, elem } => {
                let len = match len {
                    ArrayLen::Literal(n) => *n,
                    ArrayLen::Const(name) => Self::const_value(name, env)
                        .ok_or_else(|| Unresolved::Skip(format!("unknown array length {}", name)))?,
                    ArrayLen::Expr(text) => {
                        return Err(Unresolved::Skip(format!("unsupported array length {}", text)))
                    }
                };
                let elem = self.resolve_expr(elem, env)?;
                Ok(Type::Array(len, Box::new(elem)))
            }
            TypeExpr::Struct(st) => {
                let mut fields = Vec::with_capacity(st.fields.len());
                for decl in &st.fields {
                    let ty = self.resolve_expr(&decl.ty, env)?;
                    let tag = decl
                        .tag
                        .as_deref()
                        .and_then(unquote)
                        .unwrap_or_default();
                    if decl.is_embedded() {
                        let name = decl.ty.embedded_name().unwrap_or_default().to_string();
                        fields.push(TypeField {
                            exported: is_exported(&name),
                            name,
                            ty,
                            tag,
                            embedded: true,
                        });
                        continue;
                    }
                    for name in &decl.names {
                        fields.push(TypeField {
                            name: name.clone(),
                            ty: ty.clone(),
                            tag: tag.clone(),
                            embedded: false,
                            exported: is_exported(name),
                        });
                    }
                }
                Ok(Type::Struct(StructType { fields }))
            }
            TypeExpr::Generic { text, .. } => {
                Err(Unresolved::Skip(format!("generic instantiation {}", text)))
            }
        }
    }
}

fn is_exported(name: &str) -> bool {
    name.chars().next().map_or(false, char::is_uppercase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::parser::parse_file;
    use crate::source::FileSet;
    use std::path::PathBuf;

    fn check(src: &str) -> Result<Scope, SourceError> {
        let mut fset = FileSet::new();
        let file = parse_file(&mut fset, &PathBuf::from("/pkg/a.go"), src.to_string())?;
        let files = vec![file];
        Checker::new(&files).check("demo", "/pkg")
    }

    #[test]
    fn test_resolves_struct_fields() {
        let scope = check(
            "package demo\nconst N = 3\ntype Inner struct { a int8 }\ntype Outer struct {\n\tInner\n\tarr [N]Inner\n\tp *Outer\n\ts string `json:\"s\"`\n}\n",
        )
        .unwrap();
        let outer = scope.lookup("Outer").unwrap();
        assert!(outer.is_struct_decl());
        let st = outer.ty.as_struct().unwrap();
        assert_eq!(st.fields.len(), 4);
        assert!(st.fields[0].embedded);
        assert!(st.fields[0].exported);
        assert_eq!(st.fields[1].ty.to_string(), "[3]Inner");
        assert_eq!(st.fields[2].ty, Type::Pointer("Outer".into()));
        assert_eq!(st.fields[3].tag, "json:\"s\"");
    }

    #[test]
    fn test_alias_and_defined_from_named() {
        let scope = check("package demo\ntype A struct{ x int }\ntype B = A\ntype C A\n").unwrap();
        assert!(scope.lookup("A").unwrap().is_struct_decl());
        let b = scope.lookup("B").unwrap();
        assert!(b.alias);
        assert!(!b.is_struct_decl());
        let c = scope.lookup("C").unwrap();
        assert!(c.is_struct_decl());
        assert_eq!(c.ty.to_string(), "C");
    }

    #[test]
    fn test_local_scopes() {
        let scope = check(
            "package demo\ntype T struct{ a int }\nfunc f() {\n\ttype T struct{ b bool }\n\tif true {\n\t\ttype U struct{ t T }\n\t}\n}\nfunc g() {}\n",
        )
        .unwrap();
        assert_eq!(scope.children().len(), 1);
        let local = &scope.children()[0];
        let t = local.lookup("T").unwrap();
        assert_eq!(t.ty.as_struct().unwrap().fields[0].name, "b");
        let nested = &local.children()[0];
        let u = nested.lookup("U").unwrap();
        let field_ty = &u.ty.as_struct().unwrap().fields[0].ty;
        assert_eq!(field_ty.as_named().unwrap().pos, t.pos);
    }

    #[test]
    fn test_recursive_by_value_fails() {
        let err = check("package demo\ntype A struct{ b B }\ntype B struct{ a A }\n").unwrap_err();
        assert!(matches!(err, SourceError::RecursiveType { .. }));
    }

    #[test]
    fn test_unsizable_types_are_skipped() {
        let scope = check(
            "package demo\ntype G[T any] struct{ v T }\ntype U struct{ g G[int] }\ntype M struct{ m Missing }\ntype Ok struct{ e error }\n",
        )
        .unwrap();
        assert!(scope.lookup("G").is_none());
        assert!(scope.lookup("U").is_none());
        assert!(scope.lookup("M").is_none());
        assert!(scope.lookup("Ok").is_some());
    }

    #[test]
    fn test_redeclared() {
        let err = check("package demo\ntype A int\ntype A string\n").unwrap_err();
        assert!(matches!(err, SourceError::Redeclared { .. }));
    }
}
