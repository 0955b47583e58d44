// Fri Oct 16 2026 - Alex

use crate::context::Context;
use crate::locator::{FileSetLocator, Locator};
use crate::scope::Scope;
use crate::source::checker::Checker;
use crate::source::parser::parse_file;
use crate::source::syntax::SourceFile;
use crate::source::{FileSet, SourceError};
use log::{debug, info};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Type checked package: its scope tree, sub-packages included as children
/// for recursive loads.
#[derive(Debug, Clone)]
pub struct Package {
    pub name: String,
    pub path: PathBuf,
    pub scope: Arc<Scope>,
}

/// Syntax of a package and, for recursive loads, of its sub-packages.
#[derive(Debug, Clone)]
pub struct PackageSyntax {
    pub name: String,
    pub path: PathBuf,
    pub files: Vec<SourceFile>,
    pub children: Vec<PackageSyntax>,
}

impl PackageSyntax {
    pub fn all_files(&self) -> Vec<&SourceFile> {
        let mut out: Vec<&SourceFile> = self.files.iter().collect();
        for child in &self.children {
            out.extend(child.all_files());
        }
        out
    }

    pub fn all_files_mut(&mut self) -> Vec<&mut SourceFile> {
        let mut out: Vec<&mut SourceFile> = self.files.iter_mut().collect();
        for child in self.children.iter_mut() {
            out.extend(child.all_files_mut());
        }
        out
    }
}

/// Loads packages of the struct language. Every call of one parser yields
/// the same identity space.
pub trait PackageParser: Send + Sync {
    fn parse_types(&self, ctx: &Context) -> Result<(Arc<Package>, Arc<dyn Locator>), SourceError>;
    fn parse_syntax(&self, ctx: &Context) -> Result<(PackageSyntax, Arc<dyn Locator>), SourceError>;
}

struct Loaded {
    package: Arc<Package>,
    syntax: PackageSyntax,
    locator: Arc<FileSetLocator>,
}

static CACHE: Lazy<Mutex<HashMap<(PathBuf, bool), Arc<Loaded>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Parser for a package directory on disk, cached per canonical path for
/// the lifetime of the process.
#[derive(Debug, Clone)]
pub struct DirParser {
    root: PathBuf,
    recursive: bool,
}

impl DirParser {
    pub fn new(root: impl Into<PathBuf>, recursive: bool) -> Self {
        Self {
            root: root.into(),
            recursive,
        }
    }

    fn loaded(&self, ctx: &Context) -> Result<Arc<Loaded>, SourceError> {
        ctx.check()?;
        let dir = self
            .root
            .canonicalize()
            .map_err(|_| SourceError::NotFound(self.root.clone()))?;
        if !dir.is_dir() {
            return Err(SourceError::NotFound(self.root.clone()));
        }
        let key = (dir.clone(), self.recursive);
        let mut cache = CACHE.lock();
        if let Some(loaded) = cache.get(&key) {
            debug!("using cached package {}", dir.display());
            return Ok(Arc::clone(loaded));
        }
        let loaded = Arc::new(load(&dir, self.recursive, ctx)?);
        cache.insert(key, Arc::clone(&loaded));
        Ok(loaded)
    }
}

impl PackageParser for DirParser {
    fn parse_types(&self, ctx: &Context) -> Result<(Arc<Package>, Arc<dyn Locator>), SourceError> {
        let loaded = self.loaded(ctx)?;
        let locator: Arc<dyn Locator> = loaded.locator.clone();
        Ok((Arc::clone(&loaded.package), locator))
    }

    fn parse_syntax(&self, ctx: &Context) -> Result<(PackageSyntax, Arc<dyn Locator>), SourceError> {
        let loaded = self.loaded(ctx)?;
        let locator: Arc<dyn Locator> = loaded.locator.clone();
        Ok((loaded.syntax.clone(), locator))
    }
}

fn load(dir: &Path, recursive: bool, ctx: &Context) -> Result<Loaded, SourceError> {
    let mut fset = FileSet::new();
    let files = read_files(dir, &mut fset)?;
    let mut base = fset.base();
    let locator = Arc::new(FileSetLocator::new(Arc::new(fset)));

    let (mut scope, mut syntax) = check(dir, files)?;
    if recursive {
        for sub in sub_dirs(dir)? {
            if let Some((child_scope, child_syntax)) = load_child(&sub, &mut base, &locator, ctx)? {
                scope.add_child(child_scope);
                syntax.children.push(child_syntax);
            }
        }
    }
    if syntax.files.is_empty() && syntax.children.is_empty() {
        return Err(SourceError::NoFiles(dir.to_path_buf()));
    }
    info!(
        "loaded package {} from {} with {} struct declarations",
        syntax.name,
        dir.display(),
        scope.count_structs()
    );
    let package = Arc::new(Package {
        name: syntax.name.clone(),
        path: dir.to_path_buf(),
        scope: Arc::new(scope),
    });
    Ok(Loaded {
        package,
        syntax,
        locator,
    })
}

fn load_child(
    dir: &Path,
    base: &mut usize,
    locator: &FileSetLocator,
    ctx: &Context,
) -> Result<Option<(Scope, PackageSyntax)>, SourceError> {
    ctx.check()?;
    let mut fset = FileSet::with_base(*base);
    let files = read_files(dir, &mut fset)?;
    *base = fset.base();
    if !files.is_empty() {
        locator.set_child_file_set(&dir.to_string_lossy(), Arc::new(fset));
    }
    let (mut scope, mut syntax) = check(dir, files)?;
    for sub in sub_dirs(dir)? {
        if let Some((child_scope, child_syntax)) = load_child(&sub, base, locator, ctx)? {
            scope.add_child(child_scope);
            syntax.children.push(child_syntax);
        }
    }
    if syntax.files.is_empty() && syntax.children.is_empty() {
        return Ok(None);
    }
    debug!("loaded sub-package {}", dir.display());
    Ok(Some((scope, syntax)))
}

fn check(dir: &Path, files: Vec<SourceFile>) -> Result<(Scope, PackageSyntax), SourceError> {
    let name = match files.first() {
        Some(first) => first.package.clone(),
        None => dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
    };
    if let Some(other) = files.iter().find(|f| f.package != name) {
        return Err(SourceError::PackageMismatch {
            path: dir.to_path_buf(),
            expected: name,
            found: other.package.clone(),
        });
    }
    let path = dir.to_string_lossy();
    let scope = Checker::new(&files).check(&name, &path)?;
    Ok((
        scope,
        PackageSyntax {
            name,
            path: dir.to_path_buf(),
            files,
            children: Vec::new(),
        },
    ))
}

fn read_files(dir: &Path, fset: &mut FileSet) -> Result<Vec<SourceFile>, SourceError> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(|err| SourceError::io(dir, err))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_file()
                && path.extension().map_or(false, |ext| ext == "go")
                && !path.to_string_lossy().ends_with("_test.go")
        })
        .collect();
    paths.sort();

    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let content = fs::read_to_string(&path).map_err(|err| SourceError::io(&path, err))?;
        files.push(parse_file(fset, &path, content)?);
    }
    Ok(files)
}

fn sub_dirs(dir: &Path) -> Result<Vec<PathBuf>, SourceError> {
    let mut dirs: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(|err| SourceError::io(dir, err))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            path.is_dir()
                && !name.starts_with('.')
                && !name.starts_with('_')
                && name != "testdata"
                && name != "vendor"
        })
        .collect();
    dirs.sort();
    Ok(dirs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_loads_package_and_caches() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "a.go", "package demo\ntype A struct{ x int }\n");
        write(tmp.path(), "b.go", "package demo\ntype B struct{ a A }\n");
        write(tmp.path(), "b_test.go", "package demo\ntype T struct{}\n");
        write(tmp.path(), "notes.txt", "type X struct{}");

        let parser = DirParser::new(tmp.path(), false);
        let ctx = Context::background();
        let (pkg, loc) = parser.parse_types(&ctx).unwrap();
        assert_eq!(pkg.name, "demo");
        assert_eq!(pkg.scope.names().collect::<Vec<_>>(), vec!["A", "B"]);

        let (syntax, loc2) = parser.parse_syntax(&ctx).unwrap();
        assert_eq!(syntax.files.len(), 2);
        let pos = pkg.scope.lookup("B").unwrap().pos;
        assert_eq!(loc.identity(pos), loc2.identity(pos));
        assert_eq!(syntax.files[1].specs()[0].pos, pos);
    }

    #[test]
    fn test_recursive_sub_packages() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "a.go", "package demo\ntype A struct{ x int }\n");
        let sub = tmp.path().join("sub");
        fs::create_dir(&sub).unwrap();
        write(&sub, "s.go", "package sub\ntype S struct{ y bool }\n");

        let flat = DirParser::new(tmp.path(), false);
        let (pkg, _) = flat.parse_types(&Context::background()).unwrap();
        assert!(pkg.scope.children().is_empty());

        let deep = DirParser::new(tmp.path(), true);
        let (pkg, loc) = deep.parse_types(&Context::background()).unwrap();
        assert_eq!(pkg.scope.children().len(), 1);
        let child = &pkg.scope.children()[0];
        let s = child.lookup("S").unwrap();
        let canonical = sub.canonicalize().unwrap();
        assert_eq!(loc.location(s.pos), canonical.to_string_lossy());
        assert!(loc.child_locator(&canonical.to_string_lossy()).is_some());
        assert!(!loc.identity(s.pos).is_empty());
    }

    #[test]
    fn test_errors() {
        let tmp = TempDir::new().unwrap();
        let ctx = Context::background();
        let missing = DirParser::new(tmp.path().join("missing"), false);
        assert!(matches!(missing.parse_types(&ctx), Err(SourceError::NotFound(_))));

        let empty = DirParser::new(tmp.path(), false);
        assert!(matches!(empty.parse_types(&ctx), Err(SourceError::NoFiles(_))));

        let mixed = TempDir::new().unwrap();
        write(mixed.path(), "a.go", "package one\n");
        write(mixed.path(), "b.go", "package two\n");
        let parser = DirParser::new(mixed.path(), false);
        assert!(matches!(parser.parse_types(&ctx), Err(SourceError::PackageMismatch { .. })));

        let cancelled = Context::background();
        cancelled.cancel();
        assert!(matches!(parser.parse_types(&cancelled), Err(SourceError::Context(_))));
    }
}
