// Fri Oct 16 2026 - Alex

use crate::scope::TypeName;
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeKind {
    Package { name: String, path: String },
    Block,
}

/// Lexical scope holding type declarations only.
///
/// Names iterate in sorted order. Children are package sub-scopes (function
/// bodies and nested blocks) and, for recursive loads, sub-package scopes.
#[derive(Debug, Clone)]
pub struct Scope {
    kind: ScopeKind,
    names: BTreeMap<String, Arc<TypeName>>,
    children: Vec<Arc<Scope>>,
}

impl Scope {
    pub fn package(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self::with_kind(ScopeKind::Package {
            name: name.into(),
            path: path.into(),
        })
    }

    pub fn block() -> Self {
        Self::with_kind(ScopeKind::Block)
    }

    fn with_kind(kind: ScopeKind) -> Self {
        Self {
            kind,
            names: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn kind(&self) -> &ScopeKind {
        &self.kind
    }

    /// Inserts an object, returning the one previously bound to the name.
    pub fn insert(&mut self, obj: TypeName) -> Option<Arc<TypeName>> {
        self.names.insert(obj.name.clone(), Arc::new(obj))
    }

    pub fn lookup(&self, name: &str) -> Option<&Arc<TypeName>> {
        self.names.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.keys().map(String::as_str)
    }

    pub fn objects(&self) -> impl Iterator<Item = &Arc<TypeName>> {
        self.names.values()
    }

    pub fn add_child(&mut self, child: Scope) {
        self.children.push(Arc::new(child));
    }

    pub fn children(&self) -> &[Arc<Scope>] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Number of struct declarations in this scope and all its descendants.
    pub fn count_structs(&self) -> usize {
        let own = self.objects().filter(|obj| obj.is_struct_decl()).count();
        own + self.children.iter().map(|c| c.count_structs()).sum::<usize>()
    }
}
