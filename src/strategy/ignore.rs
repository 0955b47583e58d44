// Fri Oct 16 2026 - Alex

use crate::context::Context;
use crate::strategy::{Strategy, StrategyError};
use crate::structure::Struct;

/// Returns the structure unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ignore;

/// Drops every field.
#[derive(Debug, Clone, Copy, Default)]
pub struct Void;

impl Strategy for Ignore {
    fn apply(&self, ctx: &Context, origin: &Struct) -> Result<Struct, StrategyError> {
        ctx.check()?;
        Ok(origin.clone())
    }
}

impl Strategy for Void {
    fn apply(&self, ctx: &Context, origin: &Struct) -> Result<Struct, StrategyError> {
        ctx.check()?;
        let mut r = origin.clone();
        r.fields.clear();
        Ok(r)
    }
}
