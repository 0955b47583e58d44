// Fri Oct 16 2026 - Alex

use crate::context::Context;
use crate::strategy::{Strategy, StrategyError};
use crate::structure::{Field, Struct};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    NameLexicographical,
    TypeLexicographical,
    NameLength,
    TypeLength,
    /// Embedded fields first when ascending.
    Embedded,
    /// Exported fields first when ascending.
    Exported,
}

/// Stable field sort.
#[derive(Debug, Clone, Copy)]
pub struct Sort {
    key: SortKey,
    ascending: bool,
}

impl Sort {
    pub fn ascending(key: SortKey) -> Self {
        Self {
            key,
            ascending: true,
        }
    }

    pub fn descending(key: SortKey) -> Self {
        Self {
            key,
            ascending: false,
        }
    }

    fn compare(&self, a: &Field, b: &Field) -> Ordering {
        let ord = match self.key {
            SortKey::NameLexicographical => a.name.cmp(&b.name),
            SortKey::TypeLexicographical => a.type_name.cmp(&b.type_name),
            SortKey::NameLength => a.name.len().cmp(&b.name.len()),
            SortKey::TypeLength => a.type_name.len().cmp(&b.type_name.len()),
            SortKey::Embedded => b.embedded.cmp(&a.embedded),
            SortKey::Exported => b.exported.cmp(&a.exported),
        };
        if self.ascending {
            ord
        } else {
            ord.reverse()
        }
    }
}

impl Strategy for Sort {
    fn apply(&self, ctx: &Context, origin: &Struct) -> Result<Struct, StrategyError> {
        ctx.check()?;
        let mut r = origin.clone();
        r.fields.sort_by(|a, b| self.compare(a, b));
        Ok(r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Struct {
        Struct::new("S").with_fields(vec![
            Field::new("zeta", "int8", 1, 1),
            Field::new("Alpha", "string", 16, 8),
            Field::new("mid", "int8", 1, 1),
            Field::new("Inner", "Inner", 8, 8).embedded(true),
        ])
    }

    fn names(sort: Sort) -> Vec<String> {
        sort.apply(&Context::background(), &sample())
            .unwrap()
            .fields
            .into_iter()
            .map(|f| f.name)
            .collect()
    }

    #[test]
    fn test_lexicographical() {
        assert_eq!(
            names(Sort::ascending(SortKey::NameLexicographical)),
            vec!["Alpha", "Inner", "mid", "zeta"]
        );
        assert_eq!(
            names(Sort::descending(SortKey::TypeLexicographical)),
            vec!["Alpha", "zeta", "mid", "Inner"]
        );
    }

    #[test]
    fn test_length_is_stable() {
        assert_eq!(
            names(Sort::ascending(SortKey::NameLength)),
            vec!["mid", "zeta", "Alpha", "Inner"]
        );
        assert_eq!(
            names(Sort::descending(SortKey::TypeLength)),
            vec!["Alpha", "Inner", "zeta", "mid"]
        );
    }

    #[test]
    fn test_flags() {
        assert_eq!(
            names(Sort::ascending(SortKey::Embedded)),
            vec!["Inner", "zeta", "Alpha", "mid"]
        );
        assert_eq!(
            names(Sort::descending(SortKey::Embedded)),
            vec!["zeta", "Alpha", "mid", "Inner"]
        );
        assert_eq!(
            names(Sort::ascending(SortKey::Exported)),
            vec!["Alpha", "Inner", "zeta", "mid"]
        );
        assert_eq!(
            names(Sort::descending(SortKey::Exported)),
            vec!["zeta", "mid", "Alpha", "Inner"]
        );
    }
}
