// Fri Oct 16 2026 - Alex

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name shared by every synthetic padding field.
pub const PAD_NAME: &str = "_";

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub size: u64,
    pub align: u64,
    pub tag: String,
    pub exported: bool,
    pub embedded: bool,
    pub doc: Vec<String>,
    pub comment: Vec<String>,
}

impl Field {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>, size: u64, align: u64) -> Self {
        let name = name.into();
        let exported = name.chars().next().map_or(false, char::is_uppercase);
        Self {
            name,
            type_name: type_name.into(),
            size,
            align: align.max(1),
            exported,
            ..Self::default()
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn embedded(mut self, embedded: bool) -> Self {
        self.embedded = embedded;
        self
    }

    pub fn is_padding(&self) -> bool {
        self.name == PAD_NAME
    }
}

/// Builds a padding field of exactly `max(pad, 0)` bytes.
pub fn pad_field(pad: i64) -> Field {
    let size = pad.max(0) as u64;
    Field {
        name: PAD_NAME.to_string(),
        type_name: format!("[{}]byte", size),
        size,
        align: 1,
        ..Field::default()
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} (size {}, align {})", self.name, self.type_name, self.size, self.align)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_field_clamps_negative() {
        for pad in [-10, -1, 0] {
            let field = pad_field(pad);
            assert_eq!(field.size, 0);
            assert_eq!(field.align, 1);
            assert!(field.is_padding());
        }
    }

    #[test]
    fn test_pad_field_exact_size() {
        let field = pad_field(6);
        assert_eq!(field.size, 6);
        assert_eq!(field.align, 1);
        assert_eq!(field.name, "_");
        assert_eq!(field.type_name, "[6]byte");
    }

    #[test]
    fn test_exported_from_name() {
        assert!(Field::new("Count", "int", 8, 8).exported);
        assert!(!Field::new("count", "int", 8, 8).exported);
    }
}
