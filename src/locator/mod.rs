// Fri Oct 16 2026 - Alex

pub mod file_set;
pub mod identity;

pub use file_set::FileSetLocator;
pub use identity::Identity;

use crate::source::{FileSet, Pos};
use std::sync::Arc;

/// Maps positions of a run to stable identities and locations.
pub trait Locator: Send + Sync {
    fn identity(&self, pos: Pos) -> Identity;
    /// Directory of the file holding `pos`.
    fn location(&self, pos: Pos) -> String;
    fn file(&self, pos: Pos) -> String;
    fn child_locator(&self, location: &str) -> Option<Arc<dyn Locator>>;
    fn set_child_file_set(&self, location: &str, fset: Arc<FileSet>);
    fn root_file_set(&self) -> Arc<FileSet>;
}
