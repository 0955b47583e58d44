// Fri Oct 16 2026 - Alex

use crate::structure::alignment::walk_struct;
use crate::structure::Field;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Abstract structure model, field order is the memory layout.
///
/// `Clone` is a deep copy: every vector, including the docs and comments of
/// every field, gets its own allocation, so a transformed copy never shares
/// storage with its origin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Struct {
    pub name: String,
    pub doc: Vec<String>,
    pub comment: Vec<String>,
    pub fields: Vec<Field>,
}

impl Struct {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_fields(mut self, fields: Vec<Field>) -> Self {
        self.fields = fields;
        self
    }

    pub fn add_field(&mut self, field: Field) {
        self.fields.push(field);
    }

    pub fn get_field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Plain sum of field sizes, no padding in between.
    pub fn fields_size(&self) -> u64 {
        self.fields.iter().map(|f| f.size).sum()
    }

    /// Max natural field alignment, 1 for an empty struct.
    pub fn align(&self) -> u64 {
        self.fields.iter().map(|f| f.align).max().unwrap_or(1).max(1)
    }

    /// ABI visible size and alignment: fields are laid out in their current
    /// order at natural alignment and the tail is rounded to the struct align.
    pub fn size_align(&self) -> (u64, u64) {
        let mut size = 0u64;
        let mut align = 1u64;
        walk_struct(self, 0, |pad, field| {
            size += pad;
            if let Some(field) = field {
                size += field.size;
                align = align.max(field.align);
            }
        });
        (size, align)
    }

    pub fn padding_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| f.is_padding())
    }
}

impl fmt::Display for Struct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (size, align) = self.size_align();
        writeln!(f, "struct {} (size {}, align {}) {{", self.name, size, align)?;
        for field in &self.fields {
            writeln!(f, "    {}", field)?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::pad_field;

    fn sample() -> Struct {
        let mut a = Field::new("a", "bool", 1, 1);
        a.doc.push("// flag".to_string());
        let b = Field::new("b", "int64", 8, 8);
        let mut st = Struct::new("Sample").with_fields(vec![a, b, Field::new("c", "bool", 1, 1)]);
        st.comment.push("// sample".to_string());
        st
    }

    #[test]
    fn test_size_align_natural() {
        // a@0, b@8, c@16, tail to 24
        assert_eq!(sample().size_align(), (24, 8));
    }

    #[test]
    fn test_size_align_empty() {
        assert_eq!(Struct::new("Empty").size_align(), (0, 1));
    }

    #[test]
    fn test_size_align_with_pads() {
        let st = Struct::new("Padded").with_fields(vec![
            Field::new("a", "int32", 4, 4),
            pad_field(4),
            Field::new("b", "int64", 8, 8),
        ]);
        assert_eq!(st.size_align(), (16, 8));
        assert_eq!(st.padding_fields().count(), 1);
    }

    #[test]
    fn test_deep_copy_is_independent() {
        let origin = sample();
        let mut copy = origin.clone();
        assert_eq!(copy, origin);

        copy.doc.push("// extra".to_string());
        copy.comment.clear();
        copy.fields[0].doc.push("// changed".to_string());
        copy.fields[1].comment.push("// new".to_string());
        copy.fields.swap(0, 2);
        copy.fields.push(pad_field(3));

        assert!(origin.doc.is_empty());
        assert_eq!(origin.comment, vec!["// sample".to_string()]);
        assert_eq!(origin.fields.len(), 3);
        assert_eq!(origin.fields[0].name, "a");
        assert_eq!(origin.fields[0].doc, vec!["// flag".to_string()]);
        assert!(origin.fields[1].comment.is_empty());
    }
}
