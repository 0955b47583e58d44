// Fri Oct 16 2026 - Alex

use crate::context::Context;
use crate::strategy::{Strategy, StrategyError};
use crate::structure::{pad_field, Struct};

/// Rounds the total field size up to a multiple of a cache line with one
/// trailing pad. A zero line disables rounding.
#[derive(Debug, Clone, Copy)]
pub struct CacheRounding {
    line: u64,
}

/// Pads every field up to a multiple of a cache line, so that no two fields
/// share one. A zero line disables padding.
#[derive(Debug, Clone, Copy)]
pub struct FalseSharing {
    line: u64,
}

impl CacheRounding {
    pub fn new(line: u64) -> Self {
        Self { line }
    }
}

impl FalseSharing {
    pub fn new(line: u64) -> Self {
        Self { line }
    }
}

fn remainder_pad(size: u64, line: u64) -> Option<u64> {
    if line == 0 {
        return None;
    }
    match size % line {
        0 => None,
        rest => Some(line - rest),
    }
}

impl Strategy for CacheRounding {
    fn apply(&self, ctx: &Context, origin: &Struct) -> Result<Struct, StrategyError> {
        ctx.check()?;
        let mut r = origin.clone();
        if let Some(pad) = remainder_pad(r.fields_size(), self.line) {
            r.fields.push(pad_field(pad as i64));
        }
        Ok(r)
    }
}

impl Strategy for FalseSharing {
    fn apply(&self, ctx: &Context, origin: &Struct) -> Result<Struct, StrategyError> {
        ctx.check()?;
        let mut r = origin.clone();
        let mut fields = Vec::with_capacity(origin.fields.len() * 2);
        for field in &origin.fields {
            fields.push(field.clone());
            if let Some(pad) = remainder_pad(field.size, self.line) {
                fields.push(pad_field(pad as i64));
            }
        }
        r.fields = fields;
        Ok(r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::Field;
    use proptest::prelude::{prop_assert_eq, proptest};

    #[test]
    fn test_cache_rounding() {
        let st = Struct::new("S").with_fields(vec![
            Field::new("a", "int64", 8, 8),
            Field::new("b", "[20]byte", 20, 1),
        ]);
        let r = CacheRounding::new(32).apply(&Context::background(), &st).unwrap();
        assert_eq!(r.fields.len(), 3);
        assert_eq!(r.fields[2].size, 4);
        assert_eq!(r.fields_size(), 32);

        let exact = CacheRounding::new(28).apply(&Context::background(), &st).unwrap();
        assert_eq!(exact.fields.len(), 2);
        let off = CacheRounding::new(0).apply(&Context::background(), &st).unwrap();
        assert_eq!(off, st);
    }

    #[test]
    fn test_cache_rounding_l1_line() {
        let st = Struct::new("S").with_fields(vec![
            Field::new("id", "int64", 8, 8),
            Field::new("buf", "[92]byte", 92, 1),
        ]);
        let r = CacheRounding::new(64).apply(&Context::background(), &st).unwrap();
        let pads: Vec<_> = r.padding_fields().map(|f| f.size).collect();
        assert_eq!(pads, vec![28]);
        assert!(r.fields[2].is_padding());
        assert_eq!(r.fields_size(), 128);
        assert_eq!(r.size_align(), (128, 8));
    }

    #[test]
    fn test_false_sharing_guard() {
        let st = Struct::new("S").with_fields(vec![
            Field::new("a", "int64", 8, 8),
            Field::new("b", "[64]byte", 64, 1),
            Field::new("c", "bool", 1, 1),
        ]);
        let r = FalseSharing::new(64).apply(&Context::background(), &st).unwrap();
        let sizes: Vec<_> = r.fields.iter().map(|f| (f.name.as_str(), f.size)).collect();
        assert_eq!(sizes, vec![("a", 8), ("_", 56), ("b", 64), ("c", 1), ("_", 63)]);
    }

    proptest! {
        #[test]
        fn prop_false_sharing_multiples(sizes in proptest::collection::vec(0u64..300, 0..10), line in 1u64..200) {
            let fields = sizes
                .iter()
                .enumerate()
                .map(|(i, &size)| Field::new(format!("f{}", i), "t", size, 1))
                .collect();
            let st = Struct::new("S").with_fields(fields);
            let r = FalseSharing::new(line).apply(&Context::background(), &st).unwrap();
            let mut iter = r.fields.iter().peekable();
            while let Some(field) = iter.next() {
                let mut block = field.size;
                if let Some(next) = iter.peek() {
                    if next.is_padding() {
                        block += next.size;
                        iter.next();
                    }
                }
                prop_assert_eq!(block % line, 0);
            }
        }

        #[test]
        fn prop_cache_rounding_multiple(sizes in proptest::collection::vec(0u64..300, 0..10), line in 1u64..200) {
            let fields = sizes
                .iter()
                .enumerate()
                .map(|(i, &size)| Field::new(format!("f{}", i), "t", size, 1))
                .collect();
            let st = Struct::new("S").with_fields(fields);
            let r = CacheRounding::new(line).apply(&Context::background(), &st).unwrap();
            prop_assert_eq!(r.fields_size() % line, 0);
        }
    }
}
