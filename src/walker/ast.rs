// Fri Oct 16 2026 - Alex

use crate::context::Context;
use crate::reconcile::reconcile;
use crate::source::{print_file, PrintOptions};
use crate::strategy::Strategy;
use crate::walker::{Curation, Walker, WalkerError, Writer};
use log::{debug, info};
use rayon::prelude::*;
use regex::Regex;
use std::path::PathBuf;
use std::sync::Arc;

/// Rewrites the package sources so that declarations follow their curated
/// layouts. Only files holding a rewritten declaration are emitted.
pub struct AstWalker {
    curation: Curation,
    print: PrintOptions,
    writer: Writer,
}

impl AstWalker {
    pub fn new(curation: Curation, print: PrintOptions, writer: Writer) -> Self {
        Self {
            curation,
            print,
            writer,
        }
    }

    fn persist(&self, ctx: &Context, rendered: Vec<(PathBuf, String)>) -> Result<(), WalkerError> {
        if self.writer.is_stream() {
            for (path, content) in &rendered {
                ctx.check()?;
                self.writer.write(path, content)?;
            }
            return Ok(());
        }
        let pctx = ctx.child();
        rendered.par_iter().try_for_each(|(path, content)| {
            pctx.check()?;
            debug!("writing {}", path.display());
            self.writer.write(path, content).map_err(|err| {
                pctx.cancel();
                err
            })
        })
    }
}

impl Walker for AstWalker {
    fn visit(&self, ctx: &Context, regex: &Regex, strategy: Arc<dyn Strategy>) -> Result<(), WalkerError> {
        let (_, locator, results) = self.curation.curate(ctx, regex, strategy)?;
        let (mut syntax, _) = self.curation.parser.parse_syntax(ctx)?;
        let count = reconcile(ctx, &mut syntax, &results.flat(), locator.as_ref())?;

        let rendered: Vec<(PathBuf, String)> = syntax
            .all_files()
            .into_iter()
            .filter(|file| file.is_modified())
            .map(|file| (file.path.clone(), print_file(file, &self.print)))
            .collect();
        info!("{} declarations rewritten in {} files", count, rendered.len());
        ctx.check()?;
        self.persist(ctx, rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{Oracle, Platform};
    use crate::source::{DirParser, PackageParser};
    use crate::strategy::Builder;
    use crate::walker::writer::tests::Buffer;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn curation(dir: &Path, recursive: bool) -> Curation {
        let parser: Arc<dyn PackageParser> = Arc::new(DirParser::new(dir, recursive));
        let oracle: Arc<dyn Oracle> = Arc::new(Platform::new("gc", "amd64", &[]).unwrap());
        Curation {
            parser,
            oracle,
            deep: recursive,
            backref: false,
        }
    }

    fn pipe(names: &[&str]) -> Arc<dyn Strategy> {
        let oracle: Arc<dyn Oracle> = Arc::new(Platform::new("gc", "amd64", &[]).unwrap());
        Arc::new(Builder::new(oracle, "").build(names).unwrap())
    }

    fn any() -> Regex {
        Regex::new(".*").unwrap()
    }

    #[test]
    fn test_ast_std_prints_modified_files_only() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.go"), "package demo\n\ntype A struct {\n\ta bool\n\tb int64\n}\n").unwrap();
        fs::write(tmp.path().join("b.go"), "package demo\n\nvar x = 1\n").unwrap();
        let buffer = Buffer::default();
        let walker = AstWalker::new(curation(tmp.path(), false), PrintOptions::default(), buffer.writer());
        walker
            .visit(&Context::background(), &any(), pipe(&["memory_pack", "struct_annotate_comment"]))
            .unwrap();
        assert_eq!(
            buffer.text(),
            "package demo\n\ntype A struct {\n\tb int64\n\ta bool\n} // struct size: 9 bytes; struct align: 8 bytes; struct aligned size: 16 bytes; - layout-curator\n"
        );
    }

    #[test]
    fn test_ast_copy_and_ast_go() {
        let tmp = TempDir::new().unwrap();
        let src = "package demo\n\ntype A struct {\n\ta bool\n\tb int64\n\tc bool\n}\n";
        fs::write(tmp.path().join("a.go"), src).unwrap();
        let sub = tmp.path().join("sub");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("s.go"), "package sub\n\ntype S struct {\n\ta int8\n}\n").unwrap();

        let copy = AstWalker::new(
            curation(tmp.path(), true),
            PrintOptions::default(),
            Writer::Suffix("curated".into()),
        );
        copy.visit(&Context::background(), &any(), pipe(&["memory_pack", "explicit_paddings_system_alignment"]))
            .unwrap();
        assert_eq!(fs::read_to_string(tmp.path().join("a.go")).unwrap(), src);
        assert_eq!(
            fs::read_to_string(tmp.path().join("a.curated.go")).unwrap(),
            "package demo\n\ntype A struct {\n\tb int64\n\ta bool\n\tc bool\n\t_ [6]byte\n}\n"
        );
        assert!(sub.join("s.curated.go").exists());

        // a fresh directory, the copy above is itself a source file now
        let other = TempDir::new().unwrap();
        fs::write(other.path().join("a.go"), src).unwrap();
        let origin = AstWalker::new(curation(other.path(), false), PrintOptions::default(), Writer::Origin);
        origin.visit(&Context::background(), &any(), pipe(&["memory_pack"])).unwrap();
        assert_eq!(
            fs::read_to_string(other.path().join("a.go")).unwrap(),
            "package demo\n\ntype A struct {\n\tb int64\n\ta bool\n\tc bool\n}\n"
        );
    }

    #[test]
    fn test_ast_go_keeps_space_indentation() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("a.go"),
            "package demo\n\ntype A struct {\n    a bool\n    b int64\n}\n",
        )
        .unwrap();
        let walker = AstWalker::new(curation(tmp.path(), false), PrintOptions::default(), Writer::Origin);
        walker.visit(&Context::background(), &any(), pipe(&["memory_pack"])).unwrap();
        assert_eq!(
            fs::read_to_string(tmp.path().join("a.go")).unwrap(),
            "package demo\n\ntype A struct {\n    b int64\n    a bool\n}\n"
        );
    }

    #[test]
    fn test_pipeline_error_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let src = "package demo\n\ntype A struct {\n\ta bool `curator:\"nope\"`\n}\n";
        fs::write(tmp.path().join("a.go"), src).unwrap();
        let walker = AstWalker::new(curation(tmp.path(), false), PrintOptions::default(), Writer::Origin);
        let err = walker
            .visit(&Context::background(), &any(), pipe(&["process_tag_group"]))
            .unwrap_err();
        assert!(matches!(err, WalkerError::Strategy { .. }));
        assert_eq!(fs::read_to_string(tmp.path().join("a.go")).unwrap(), src);
    }
}
