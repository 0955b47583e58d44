// Fri Oct 16 2026 - Alex

use crate::context::Context;
use crate::strategy::{Strategy, StrategyError};
use crate::structure::{pad_field, walk_struct, Struct};

/// Makes alignment padding explicit.
///
/// With a system alignment every field offset is aligned to
/// `min(field align, system)` and the tail to the system alignment; without
/// one every field sits at its natural alignment and the tail is aligned to
/// the largest field alignment.
#[derive(Debug, Clone, Copy)]
pub struct ExplicitPadding {
    system_align: Option<u64>,
}

impl ExplicitPadding {
    pub fn system(align: u64) -> Self {
        Self {
            system_align: Some(align.max(1)),
        }
    }

    pub fn type_natural() -> Self {
        Self { system_align: None }
    }
}

impl Strategy for ExplicitPadding {
    fn apply(&self, ctx: &Context, origin: &Struct) -> Result<Struct, StrategyError> {
        ctx.check()?;
        let mut r = origin.clone();
        if origin.fields.is_empty() {
            return Ok(r);
        }
        let mut fields = Vec::with_capacity(origin.fields.len() * 2);
        walk_struct(origin, self.system_align.unwrap_or(0), |pad, field| {
            if pad > 0 {
                fields.push(pad_field(pad as i64));
            }
            if let Some(field) = field {
                fields.push(field.clone());
            }
        });
        r.fields = fields;
        Ok(r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::{Pack, Pipe};
    use crate::structure::Field;
    use std::sync::Arc;

    fn describe(st: &Struct) -> Vec<(String, u64)> {
        st.fields.iter().map(|f| (f.name.clone(), f.size)).collect()
    }

    #[test]
    fn test_type_natural_padding() {
        let st = Struct::new("S").with_fields(vec![
            Field::new("a", "bool", 1, 1),
            Field::new("b", "int64", 8, 8),
            Field::new("c", "bool", 1, 1),
        ]);
        let r = ExplicitPadding::type_natural().apply(&Context::background(), &st).unwrap();
        assert_eq!(
            describe(&r),
            vec![
                ("a".into(), 1),
                ("_".into(), 7),
                ("b".into(), 8),
                ("c".into(), 1),
                ("_".into(), 7),
            ]
        );
        assert_eq!(r.fields_size(), 24);
    }

    #[test]
    fn test_system_padding_caps_field_alignment() {
        let st = Struct::new("S").with_fields(vec![
            Field::new("a", "int32", 4, 4),
            Field::new("b", "int8", 1, 1),
        ]);
        let r = ExplicitPadding::system(8).apply(&Context::background(), &st).unwrap();
        assert_eq!(describe(&r), vec![("a".into(), 4), ("b".into(), 1), ("_".into(), 3)]);
        assert_eq!(r.size_align(), (8, 4));
    }

    #[test]
    fn test_pack_then_system_padding() {
        let st = Struct::new("S").with_fields(vec![
            Field::new("a", "bool", 1, 1),
            Field::new("b", "int64", 8, 8),
            Field::new("c", "bool", 1, 1),
        ]);
        let pipe = Pipe::new()
            .then(Arc::new(Pack))
            .then(Arc::new(ExplicitPadding::system(8)));
        let r = pipe.apply(&Context::background(), &st).unwrap();
        assert_eq!(
            describe(&r),
            vec![("b".into(), 8), ("a".into(), 1), ("c".into(), 1), ("_".into(), 6)]
        );
        assert_eq!(r.size_align(), (16, 8));
        assert!(r.padding_fields().all(|f| f.align == 1));
    }

    #[test]
    fn test_empty_struct_stays_empty() {
        let r = ExplicitPadding::system(8)
            .apply(&Context::background(), &Struct::new("E"))
            .unwrap();
        assert!(r.fields.is_empty());
    }
}
