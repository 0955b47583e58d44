// Fri Oct 16 2026 - Alex

pub mod checker;
pub mod error;
pub mod lexer;
pub mod package;
pub mod parser;
pub mod position;
pub mod printer;
pub mod syntax;

pub use checker::Checker;
pub use error::SourceError;
pub use package::{DirParser, Package, PackageParser, PackageSyntax};
pub use parser::parse_file;
pub use position::{FileInfo, FileSet, Pos, Position};
pub use printer::{print_file, PrintOptions};
pub use syntax::{ArrayLen, Block, FieldDecl, SourceFile, StructExpr, TypeExpr, TypeSpec};
