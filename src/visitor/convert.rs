// Fri Oct 16 2026 - Alex

use crate::locator::Locator;
use crate::platform::Oracle;
use crate::scope::{StructType, Type};
use crate::structure::{align_up, Field, Struct};
use crate::visitor::Backref;

/// Builds the structure model of a declaration.
///
/// Fields typed by a named struct, or by arrays of them, take the curated
/// size published for that struct when back references are on.
pub fn convert(
    name: &str,
    st: &StructType,
    oracle: &dyn Oracle,
    backref: &Backref,
    locator: &dyn Locator,
) -> Struct {
    let fields = st
        .fields
        .iter()
        .map(|tf| {
            let mut field = Field::new(
                tf.name.clone(),
                oracle.type_name(&tf.ty),
                size_of(&tf.ty, oracle, backref, locator),
                oracle.type_align(&tf.ty),
            )
            .with_tag(tf.tag.clone())
            .embedded(tf.embedded);
            field.exported = tf.exported;
            field
        })
        .collect();
    Struct::new(name).with_fields(fields)
}

fn size_of(ty: &Type, oracle: &dyn Oracle, backref: &Backref, locator: &dyn Locator) -> u64 {
    match ty {
        Type::Named(named) if named.underlying.is_struct() => backref
            .get(&locator.identity(named.pos))
            .unwrap_or_else(|| oracle.type_size(ty)),
        Type::Array(0, _) => 0,
        Type::Array(len, elem) if backref.is_enabled() => {
            let size = size_of(elem, oracle, backref, locator);
            align_up(size, oracle.type_align(elem)) * (len - 1) + size
        }
        _ => oracle.type_size(ty),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::FileSetLocator;
    use crate::platform::Platform;
    use crate::source::parser::parse_file;
    use crate::source::{Checker, FileSet};
    use std::path::PathBuf;
    use std::sync::Arc;

    const SRC: &str = "package demo\n\ntype Inner struct {\n\ta int64\n\tb bool\n}\n\ntype Outer struct {\n\tInner\n\tarr [2]Inner\n\tp *Inner\n\tName string `json:\"name\"`\n}\n";

    fn load() -> (crate::scope::Scope, FileSetLocator) {
        let mut fset = FileSet::new();
        let file = parse_file(&mut fset, &PathBuf::from("/pkg/a.go"), SRC.to_string()).unwrap();
        let files = vec![file];
        let scope = Checker::new(&files).check("demo", "/pkg").unwrap();
        (scope, FileSetLocator::new(Arc::new(fset)))
    }

    #[test]
    fn test_plain_conversion() {
        let (scope, locator) = load();
        let oracle = Platform::new("gc", "amd64", &[]).unwrap();
        let outer = scope.lookup("Outer").unwrap();
        let st = convert("Outer", outer.ty.as_struct().unwrap(), &oracle, &Backref::disabled(), &locator);
        let sizes: Vec<_> = st.fields.iter().map(|f| (f.name.as_str(), f.size, f.align)).collect();
        assert_eq!(
            sizes,
            vec![("Inner", 16, 8), ("arr", 32, 8), ("p", 8, 8), ("Name", 16, 8)]
        );
        assert!(st.fields[0].embedded);
        assert!(st.fields[0].exported);
        assert!(!st.fields[1].exported);
        assert_eq!(st.fields[3].tag, "json:\"name\"");
        assert!(st.doc.is_empty());
    }

    #[test]
    fn test_backref_sizes() {
        let (scope, locator) = load();
        let oracle = Platform::new("gc", "amd64", &[]).unwrap();
        let inner = scope.lookup("Inner").unwrap();
        let backref = Backref::new(true);
        let id = locator.identity(inner.pos);
        backref.alloc(&id);
        backref.set(&id, 9);
        let outer = scope.lookup("Outer").unwrap();
        let st = convert("Outer", outer.ty.as_struct().unwrap(), &oracle, &backref, &locator);
        assert_eq!(st.fields[0].size, 9);
        assert_eq!(st.fields[1].size, 16 + 9);
        assert_eq!(st.fields[2].size, 8);
    }
}
