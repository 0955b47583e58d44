// Fri Oct 16 2026 - Alex

use crate::context::Context;
use crate::strategy::{Strategy, StrategyError};
use crate::structure::Struct;
use std::cmp::Reverse;

/// Stable sort by alignment then size, both descending, which removes all
/// avoidable inner padding.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pack;

/// Packed order interleaved from both ends, spreading large fields apart.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unpack;

impl Strategy for Pack {
    fn apply(&self, ctx: &Context, origin: &Struct) -> Result<Struct, StrategyError> {
        ctx.check()?;
        let mut r = origin.clone();
        r.fields.sort_by_key(|f| (Reverse(f.align), Reverse(f.size)));
        Ok(r)
    }
}

impl Strategy for Unpack {
    fn apply(&self, ctx: &Context, origin: &Struct) -> Result<Struct, StrategyError> {
        let packed = Pack.apply(ctx, origin)?;
        if packed.fields.is_empty() {
            return Ok(packed);
        }
        let mut r = packed.clone();
        let mid = (packed.fields.len() + 1) / 2;
        let (left, right) = packed.fields.split_at(mid);
        r.fields.clear();
        let mut rev = right.iter().rev();
        for field in left {
            if let Some(back) = rev.next() {
                r.fields.push(back.clone());
            }
            r.fields.push(field.clone());
        }
        Ok(r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::Field;
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};
    use proptest::strategy::Strategy as ArbStrategy;

    fn names(st: &Struct) -> Vec<&str> {
        st.fields.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn test_pack_order() {
        let st = Struct::new("S").with_fields(vec![
            Field::new("a", "bool", 1, 1),
            Field::new("b", "int64", 8, 8),
            Field::new("c", "bool", 1, 1),
            Field::new("d", "string", 16, 8),
            Field::new("e", "int32", 4, 4),
        ]);
        let packed = Pack.apply(&Context::background(), &st).unwrap();
        assert_eq!(names(&packed), vec!["d", "b", "e", "a", "c"]);
        assert_eq!(packed.size_align(), (32, 8));
        assert_eq!(names(&st), vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_unpack_interleaves() {
        let st = Struct::new("S").with_fields(vec![
            Field::new("a", "int8", 1, 1),
            Field::new("b", "int16", 2, 2),
            Field::new("c", "int32", 4, 4),
            Field::new("d", "int64", 8, 8),
            Field::new("e", "bool", 1, 1),
        ]);
        // packed: d c b a e, left d c b, right a e
        let unpacked = Unpack.apply(&Context::background(), &st).unwrap();
        assert_eq!(names(&unpacked), vec!["e", "d", "a", "c", "b"]);
        let empty = Unpack.apply(&Context::background(), &Struct::new("E")).unwrap();
        assert!(empty.fields.is_empty());
    }

    // sizes are whole multiples of the alignment, as for every sized type
    fn arb_struct() -> impl ArbStrategy<Value = Struct> {
        proptest::collection::vec((0u32..4, 0u64..8), 0..12).prop_map(|specs| {
            let fields = specs
                .into_iter()
                .enumerate()
                .map(|(i, (shift, count))| {
                    let align = 1u64 << shift;
                    Field::new(format!("f{}", i), "t", count * align, align)
                })
                .collect();
            Struct::new("S").with_fields(fields)
        })
    }

    #[test]
    fn test_pack_removes_inner_padding() {
        let st = Struct::new("S").with_fields(vec![
            Field::new("a", "bool", 1, 1),
            Field::new("b", "int64", 8, 8),
            Field::new("c", "bool", 1, 1),
            Field::new("d", "int32", 4, 4),
        ]);
        assert_eq!(st.size_align(), (24, 8));
        let packed = Pack.apply(&Context::background(), &st).unwrap();
        assert_eq!(names(&packed), vec!["b", "d", "a", "c"]);
        assert_eq!(packed.size_align(), (16, 8));
    }

    proptest! {
        #[test]
        fn prop_pack_is_idempotent(st in arb_struct()) {
            let ctx = Context::background();
            let once = Pack.apply(&ctx, &st).unwrap();
            let twice = Pack.apply(&ctx, &once).unwrap();
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_pack_never_grows(st in arb_struct()) {
            let packed = Pack.apply(&Context::background(), &st).unwrap();
            prop_assert!(packed.size_align().0 <= st.size_align().0);
        }
    }
}
