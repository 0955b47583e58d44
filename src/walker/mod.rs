// Fri Oct 16 2026 - Alex

pub mod ast;
pub mod builder;
pub mod error;
pub mod json;
pub mod writer;

pub use ast::AstWalker;
pub use builder::{WalkerBuilder, WALKER_NAMES};
pub use error::WalkerError;
pub use json::JsonWalker;
pub use writer::Writer;

use crate::context::Context;
use crate::locator::Locator;
use crate::platform::Oracle;
use crate::source::{Package, PackageParser};
use crate::strategy::Strategy;
use crate::structure::Hierarchic;
use crate::visitor::Visitor;
use log::info;
use regex::Regex;
use std::sync::Arc;

/// Runs a strategy over a package and persists the outcome.
pub trait Walker: Send + Sync {
    fn visit(&self, ctx: &Context, regex: &Regex, strategy: Arc<dyn Strategy>) -> Result<(), WalkerError>;
}

/// Parts every walker shares: how to load the package and how to visit it.
#[derive(Clone)]
pub struct Curation {
    pub parser: Arc<dyn PackageParser>,
    pub oracle: Arc<dyn Oracle>,
    pub deep: bool,
    pub backref: bool,
}

impl Curation {
    /// Visits the package, failing on the first structure whose pipeline
    /// failed, in declaration order.
    pub fn curate(
        &self,
        ctx: &Context,
        regex: &Regex,
        strategy: Arc<dyn Strategy>,
    ) -> Result<(Arc<Package>, Arc<dyn Locator>, Hierarchic), WalkerError> {
        let (pkg, locator) = self.parser.parse_types(ctx)?;
        let mut applied = Visitor::new(Arc::clone(&self.oracle), strategy, regex.clone())
            .deep(self.deep)
            .backref(self.backref)
            .visit(ctx, &pkg.scope, locator.as_ref());
        applied.sort_by(|a, b| (&a.loc, &a.id).cmp(&(&b.loc, &b.id)));

        let mut results = Hierarchic::new();
        for done in applied {
            match done.result {
                Ok(st) => results.push(done.id, done.loc, st),
                Err(source) => {
                    return Err(WalkerError::Strategy {
                        name: done.origin.name,
                        id: done.id,
                        source,
                    })
                }
            }
        }
        ctx.check()?;
        info!("curated {} structures of package {}", results.len(), pkg.name);
        Ok((pkg, locator, results))
    }
}
