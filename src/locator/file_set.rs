// Fri Oct 16 2026 - Alex

use crate::locator::{Identity, Locator};
use crate::source::{FileSet, Pos, Position};
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::path::Path;
use std::sync::Arc;

/// Locator backed by a root file set plus one child file set per
/// discovered sub-package.
pub struct FileSetLocator {
    root: Arc<FileSet>,
    children: RwLock<IndexMap<String, Arc<FileSet>>>,
}

impl FileSetLocator {
    pub fn new(root: Arc<FileSet>) -> Self {
        Self {
            root,
            children: RwLock::new(IndexMap::new()),
        }
    }

    fn resolve(&self, pos: Pos) -> Option<Position> {
        if let Some(position) = self.root.position(pos) {
            return Some(position);
        }
        self.children
            .read()
            .values()
            .find_map(|fset| fset.position(pos))
    }
}

impl Locator for FileSetLocator {
    fn identity(&self, pos: Pos) -> Identity {
        match self.resolve(pos) {
            Some(position) if position.filename.is_empty() => Identity::from_line(position.line),
            Some(position) => Identity::hashed(&position.filename, position.line, position.column),
            None => Identity::default(),
        }
    }

    fn location(&self, pos: Pos) -> String {
        self.resolve(pos)
            .and_then(|position| {
                Path::new(&position.filename)
                    .parent()
                    .map(|dir| dir.to_string_lossy().into_owned())
            })
            .unwrap_or_default()
    }

    fn file(&self, pos: Pos) -> String {
        self.resolve(pos)
            .map(|position| position.filename)
            .unwrap_or_default()
    }

    fn child_locator(&self, location: &str) -> Option<Arc<dyn Locator>> {
        let fset = self.children.read().get(location).cloned()?;
        Some(Arc::new(FileSetLocator::new(fset)))
    }

    fn set_child_file_set(&self, location: &str, fset: Arc<FileSet>) {
        self.children.write().insert(location.to_string(), fset);
    }

    fn root_file_set(&self) -> Arc<FileSet> {
        Arc::clone(&self.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_and_location() {
        let mut fset = FileSet::new();
        let file = fset.add_file("/pkg/a.go", "package a\ntype T struct{}\n");
        let locator = FileSetLocator::new(Arc::new(fset));
        let pos = file.pos(15);

        let id = locator.identity(pos);
        assert_eq!(id.line(), Some(2));
        assert_eq!(id, Identity::hashed("/pkg/a.go", 2, 6));
        assert_eq!(locator.location(pos), "/pkg");
        assert_eq!(locator.file(pos), "/pkg/a.go");
    }

    #[test]
    fn test_unnamed_file_uses_line() {
        let mut fset = FileSet::new();
        let file = fset.add_file("", "package a\n\ntype T struct{}\n");
        let locator = FileSetLocator::new(Arc::new(fset));
        assert_eq!(locator.identity(file.pos(16)).as_str(), "3");
    }

    #[test]
    fn test_unknown_position_is_empty() {
        let locator = FileSetLocator::new(Arc::new(FileSet::new()));
        assert!(locator.identity(Pos(99)).is_empty());
        assert_eq!(locator.location(Pos(99)), "");
    }

    #[test]
    fn test_child_file_sets() {
        let mut root = FileSet::new();
        root.add_file("/pkg/a.go", "package a\n");
        let mut child = FileSet::with_base(root.base());
        let sub = child.add_file("/pkg/sub/b.go", "package sub\ntype U struct{}\n");
        let locator = FileSetLocator::new(Arc::new(root));
        let pos = sub.pos(17);

        assert!(locator.identity(pos).is_empty());
        locator.set_child_file_set("/pkg/sub", Arc::new(child));
        assert_eq!(locator.location(pos), "/pkg/sub");
        assert_eq!(locator.identity(pos).line(), Some(2));
        let child = locator.child_locator("/pkg/sub").unwrap();
        assert_eq!(child.file(pos), "/pkg/sub/b.go");
        assert!(locator.child_locator("/nope").is_none());
    }
}
