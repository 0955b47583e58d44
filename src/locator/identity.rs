// Fri Oct 16 2026 - Alex

use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};
use std::cmp::Ordering;
use std::fmt;

/// Stable key of a declaration: `"{line}-{sha1 of file/line:column}"`, or
/// just `"{line}"` for files without a name.
///
/// Ordering compares the numeric line prefix first, so identities of one
/// file sort in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn from_line(line: usize) -> Self {
        Self(line.to_string())
    }

    pub fn hashed(file: &str, line: usize, column: usize) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(format!("{}/{}:{}", file, line, column).as_bytes());
        Self(format!("{}-{:x}", line, hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn line(&self) -> Option<u64> {
        let prefix = self.0.split('-').next()?;
        prefix.parse().ok()
    }

    fn suffix(&self) -> &str {
        self.0.split_once('-').map_or("", |(_, rest)| rest)
    }
}

impl Ord for Identity {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.line(), other.line()) {
            (Some(a), Some(b)) => a
                .cmp(&b)
                .then_with(|| self.suffix().cmp(other.suffix()))
                .then_with(|| self.0.cmp(&other.0)),
            _ => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for Identity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_order() {
        let mut ids = vec![
            Identity::hashed("a.go", 100, 6),
            Identity::hashed("a.go", 9, 6),
            Identity::hashed("a.go", 20, 6),
        ];
        ids.sort();
        let lines: Vec<_> = ids.iter().filter_map(Identity::line).collect();
        assert_eq!(lines, vec![9, 20, 100]);
    }

    #[test]
    fn test_same_line_is_unique() {
        let a = Identity::hashed("a.go", 3, 6);
        let b = Identity::hashed("a.go", 3, 30);
        assert_ne!(a, b);
        assert_eq!(a, Identity::hashed("a.go", 3, 6));
        assert!(a.as_str().starts_with("3-"));
    }

    #[test]
    fn test_line_only() {
        assert_eq!(Identity::from_line(42).as_str(), "42");
        assert_eq!(Identity::from_line(42).line(), Some(42));
        assert!(Identity::default().is_empty());
    }
}
