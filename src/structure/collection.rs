// Fri Oct 16 2026 - Alex

use crate::locator::Identity;
use crate::structure::Struct;
use std::collections::BTreeMap;

/// Results grouped by location and then by identity.
///
/// Both levels are ordered maps so that iterating a location yields its
/// structures in declaration order.
#[derive(Debug, Clone, Default)]
pub struct Hierarchic {
    cats: BTreeMap<String, BTreeMap<Identity, Struct>>,
}

impl Hierarchic {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, id: Identity, loc: impl Into<String>, st: Struct) {
        self.cats.entry(loc.into()).or_default().insert(id, st);
    }

    pub fn cat(&self, loc: &str) -> Option<&BTreeMap<Identity, Struct>> {
        self.cats.get(loc)
    }

    pub fn locations(&self) -> impl Iterator<Item = &str> {
        self.cats.keys().map(String::as_str)
    }

    pub fn flat(&self) -> BTreeMap<Identity, Struct> {
        self.cats
            .values()
            .flat_map(|cat| cat.iter().map(|(id, st)| (id.clone(), st.clone())))
            .collect()
    }

    /// All structures, locations in order, each location in declaration order.
    pub fn sorted(&self) -> Vec<&Struct> {
        self.cats.values().flat_map(|cat| cat.values()).collect()
    }

    pub fn len(&self) -> usize {
        self.cats.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_follows_declaration_order() {
        let mut h = Hierarchic::new();
        h.push(Identity::from_line(12), "pkg", Struct::new("Second"));
        h.push(Identity::from_line(3), "pkg", Struct::new("First"));
        h.push(Identity::from_line(100), "pkg", Struct::new("Third"));

        let names: Vec<_> = h.sorted().iter().map(|s| s.name.clone()).collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
        assert_eq!(h.len(), 3);
        assert_eq!(h.flat().len(), 3);
    }

    #[test]
    fn test_categories_are_separate() {
        let mut h = Hierarchic::new();
        h.push(Identity::from_line(1), "a", Struct::new("A"));
        h.push(Identity::from_line(1), "b", Struct::new("B"));

        assert_eq!(h.cat("a").map(|c| c.len()), Some(1));
        assert!(h.cat("c").is_none());
        assert_eq!(h.locations().collect::<Vec<_>>(), vec!["a", "b"]);
    }
}
