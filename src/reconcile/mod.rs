// Fri Oct 16 2026 - Alex

pub mod error;
pub mod sync;

pub use error::ReconcileError;
pub use sync::sync_spec;

use crate::context::Context;
use crate::locator::{Identity, Locator};
use crate::source::PackageSyntax;
use crate::structure::Struct;
use log::debug;
use std::collections::BTreeMap;

/// Applies curated results to the syntax of a package, returning the number
/// of rewritten declarations. Declarations without a result are untouched.
///
/// Any error leaves the package partially rewritten, so callers must drop it
/// instead of printing it.
pub fn reconcile(
    ctx: &Context,
    pkg: &mut PackageSyntax,
    results: &BTreeMap<Identity, Struct>,
    locator: &dyn Locator,
) -> Result<usize, ReconcileError> {
    let mut count = 0;
    for file in pkg.all_files_mut() {
        ctx.check()?;
        for spec in file.specs_mut() {
            let id = locator.identity(spec.pos);
            if let Some(st) = results.get(&id) {
                sync_spec(spec, st)?;
                count += 1;
            }
        }
        if file.is_modified() {
            debug!("reconciled {}", file.path.display());
        }
    }
    Ok(count)
}
