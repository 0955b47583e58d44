// Fri Oct 16 2026 - Alex

use crate::context::Context;
use crate::locator::{Identity, Locator};
use crate::platform::Oracle;
use crate::scope::{Scope, TypeName};
use crate::strategy::{Strategy, StrategyError};
use crate::structure::Struct;
use crate::visitor::{convert, Backref};
use log::{debug, info};
use parking_lot::Mutex;
use regex::Regex;
use std::collections::HashSet;
use std::sync::mpsc::{self, Sender};
use std::sync::Arc;
use std::thread;

/// Outcome of curating one structure.
#[derive(Debug, Clone)]
pub struct Applied {
    pub id: Identity,
    /// Directory of the declaring file.
    pub loc: String,
    pub origin: Struct,
    pub result: Result<Struct, StrategyError>,
}

/// Shared state of one traversal.
struct Run<'a> {
    ctx: &'a Context,
    locator: &'a dyn Locator,
    visited: Mutex<HashSet<Identity>>,
    backref: Backref,
}

impl Run<'_> {
    /// Atomically marks an identity as taken, false when already taken.
    fn claim(&self, id: &Identity) -> bool {
        self.visited.lock().insert(id.clone())
    }
}

/// Applies one strategy to every matching struct declaration of a scope
/// tree, one thread per structure.
pub struct Visitor {
    oracle: Arc<dyn Oracle>,
    strategy: Arc<dyn Strategy>,
    regex: Regex,
    deep: bool,
    backref: bool,
}

impl Visitor {
    pub fn new(oracle: Arc<dyn Oracle>, strategy: Arc<dyn Strategy>, regex: Regex) -> Self {
        Self {
            oracle,
            strategy,
            regex,
            deep: false,
            backref: false,
        }
    }

    /// Also visit nested and sub-package scopes.
    pub fn deep(mut self, deep: bool) -> Self {
        self.deep = deep;
        self
    }

    /// Size embedded structs by their curated layout.
    pub fn backref(mut self, backref: bool) -> Self {
        self.backref = backref;
        self
    }

    /// Visits the tree and returns once every dispatched structure is done.
    /// Each identity is curated at most once.
    pub fn visit(&self, ctx: &Context, scope: &Scope, locator: &dyn Locator) -> Vec<Applied> {
        let run = Run {
            ctx,
            locator,
            visited: Mutex::new(HashSet::new()),
            backref: Backref::new(self.backref),
        };
        let (tx, rx) = mpsc::channel();
        thread::scope(|s| self.visit_scope(s, &run, scope, tx));
        run.backref.prune();

        let results: Vec<Applied> = rx.into_iter().collect();
        info!(
            "visited {} structures, {} failed",
            results.len(),
            results.iter().filter(|a| a.result.is_err()).count()
        );
        results
    }

    fn visit_scope<'scope, 'env>(
        &'env self,
        s: &'scope thread::Scope<'scope, 'env>,
        run: &'env Run<'env>,
        scope: &'env Scope,
        tx: Sender<Applied>,
    ) {
        let mut claimed: Vec<(Identity, &'env TypeName)> = Vec::new();
        for obj in scope.objects() {
            if run.ctx.is_done() {
                debug!("visiting stopped, context is done");
                break;
            }
            if !obj.is_struct_decl() || !self.regex.is_match(&obj.name) {
                continue;
            }
            let id = run.locator.identity(obj.pos);
            if !run.claim(&id) {
                continue;
            }
            run.backref.alloc(&id);
            claimed.push((id, obj.as_ref()));
        }

        for (id, obj) in claimed {
            let tx = tx.clone();
            s.spawn(move || {
                let applied = self.curate(run, id, obj);
                let _ = tx.send(applied);
            });
        }
        if self.deep && !run.ctx.is_done() {
            for child in scope.children() {
                let tx = tx.clone();
                s.spawn(move || self.visit_scope(s, run, child, tx));
            }
        }
    }

    fn curate(&self, run: &Run<'_>, id: Identity, obj: &TypeName) -> Applied {
        let loc = run.locator.location(obj.pos);
        let origin = match obj.ty.as_struct() {
            Some(st) => convert(&obj.name, st, self.oracle.as_ref(), &run.backref, run.locator),
            None => Struct::new(obj.name.clone()),
        };
        debug!("curating struct {} ({}) in {}", obj.name, id, loc);
        let result = self.strategy.apply(run.ctx, &origin);
        match &result {
            Ok(curated) => run.backref.set(&id, curated.fields_size()),
            Err(err) => {
                debug!("struct {} failed: {}", obj.name, err);
                run.backref.release(&id);
            }
        }
        Applied {
            id,
            loc,
            origin,
            result,
        }
    }
}
