// Fri Oct 16 2026 - Alex

use crate::context::Context;
use crate::strategy::{Strategy, StrategyError};
use crate::structure::{pad_field, Struct};

/// Adds one separator pad at the top or bottom of a non empty structure.
#[derive(Debug, Clone, Copy)]
pub struct Separate {
    size: u64,
    top: bool,
}

impl Separate {
    pub fn top(size: u64) -> Self {
        Self { size, top: true }
    }

    pub fn bottom(size: u64) -> Self {
        Self { size, top: false }
    }
}

impl Strategy for Separate {
    fn apply(&self, ctx: &Context, origin: &Struct) -> Result<Struct, StrategyError> {
        ctx.check()?;
        let mut r = origin.clone();
        if r.fields.is_empty() || self.size == 0 {
            return Ok(r);
        }
        let pad = pad_field(self.size as i64);
        if self.top {
            r.fields.insert(0, pad);
        } else {
            r.fields.push(pad);
        }
        Ok(r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::Field;

    #[test]
    fn test_separators() {
        let st = Struct::new("S").with_fields(vec![Field::new("a", "int64", 8, 8)]);
        let ctx = Context::background();

        let top = Separate::top(64).apply(&ctx, &st).unwrap();
        assert!(top.fields[0].is_padding());
        assert_eq!(top.fields[0].size, 64);

        let bottom = Separate::bottom(8).apply(&ctx, &st).unwrap();
        assert!(bottom.fields[1].is_padding());

        let empty = Separate::top(64).apply(&ctx, &Struct::new("E")).unwrap();
        assert!(empty.fields.is_empty());
    }
}
