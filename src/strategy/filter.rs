// Fri Oct 16 2026 - Alex

use crate::context::Context;
use crate::strategy::{Strategy, StrategyError};
use crate::structure::{Field, Struct};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Pads,
    Embedded,
    NotEmbedded,
    Exported,
    NotExported,
}

/// Removes every field matching its kind.
#[derive(Debug, Clone, Copy)]
pub struct Filter {
    kind: FilterKind,
}

impl Filter {
    pub fn new(kind: FilterKind) -> Self {
        Self { kind }
    }

    fn drops(&self, field: &Field) -> bool {
        match self.kind {
            FilterKind::Pads => field.is_padding(),
            FilterKind::Embedded => field.embedded,
            FilterKind::NotEmbedded => !field.embedded,
            FilterKind::Exported => field.exported,
            FilterKind::NotExported => !field.exported,
        }
    }
}

impl Strategy for Filter {
    fn apply(&self, ctx: &Context, origin: &Struct) -> Result<Struct, StrategyError> {
        ctx.check()?;
        let mut r = origin.clone();
        r.fields.retain(|f| !self.drops(f));
        Ok(r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::pad_field;

    fn sample() -> Struct {
        Struct::new("S").with_fields(vec![
            Field::new("Base", "Base", 8, 8).embedded(true),
            pad_field(4),
            Field::new("Name", "string", 16, 8),
            Field::new("count", "int", 8, 8),
        ])
    }

    fn names(kind: FilterKind) -> Vec<String> {
        Filter::new(kind)
            .apply(&Context::background(), &sample())
            .unwrap()
            .fields
            .into_iter()
            .map(|f| f.name)
            .collect()
    }

    #[test]
    fn test_filters() {
        assert_eq!(names(FilterKind::Pads), vec!["Base", "Name", "count"]);
        assert_eq!(names(FilterKind::Embedded), vec!["_", "Name", "count"]);
        assert_eq!(names(FilterKind::NotEmbedded), vec!["Base"]);
        assert_eq!(names(FilterKind::Exported), vec!["_", "count"]);
        assert_eq!(names(FilterKind::NotExported), vec!["Base", "Name"]);
    }
}
