//! Normalized symbol and namespace names.

use std::borrow::Borrow;
use std::fmt;

use smol_str::SmolStr;

/// Separator between namespace segments (`Foo\Bar\Baz`).
pub const NAMESPACE_SEPARATOR: char = '\\';

/// Strip namespace separators from both ends of a name.
///
/// `\Foo\Bar\` and `Foo\Bar` name the same symbol.
#[inline]
pub fn normalize_name(name: &str) -> &str {
    name.trim_matches(NAMESPACE_SEPARATOR)
}

/// A fully qualified symbol or namespace name with no leading or trailing
/// separator.
///
/// Cheap to clone (`SmolStr` keeps short names inline) and usable as a map
/// key looked up by `&str`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct SymbolName(SmolStr);

impl SymbolName {
    /// Normalize and wrap a raw name.
    pub fn new(raw: &str) -> Self {
        Self(SmolStr::new(normalize_name(raw)))
    }

    /// Join a namespace prefix and a local name.
    pub fn qualified(namespace: &str, local: &str) -> Self {
        let namespace = normalize_name(namespace);
        if namespace.is_empty() {
            Self::new(local)
        } else {
            Self::new(&format!("{namespace}{NAMESPACE_SEPARATOR}{}", normalize_name(local)))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The last segment (`Baz` for `Foo\Bar\Baz`).
    pub fn local_name(&self) -> &str {
        match self.0.rfind(NAMESPACE_SEPARATOR) {
            Some(idx) => &self.0[idx + 1..],
            None => &self.0,
        }
    }

    /// Everything before the last segment, empty for global symbols.
    pub fn namespace(&self) -> &str {
        match self.0.rfind(NAMESPACE_SEPARATOR) {
            Some(idx) => &self.0[..idx],
            None => "",
        }
    }

    /// The remainder after `namespace\`, if this symbol lives under it.
    ///
    /// A symbol never lies under its own name: `Foo` is not inside `Foo`.
    pub fn strip_namespace(&self, namespace: &str) -> Option<&str> {
        self.0
            .strip_prefix(namespace)
            .and_then(|rest| rest.strip_prefix(NAMESPACE_SEPARATOR))
    }

    /// Check whether this symbol lives under `namespace` at any depth.
    pub fn is_within(&self, namespace: &str) -> bool {
        self.strip_namespace(normalize_name(namespace)).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SymbolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SymbolName({})", self.0)
    }
}

impl fmt::Display for SymbolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SymbolName {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl AsRef<str> for SymbolName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for SymbolName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_both_ends() {
        assert_eq!(normalize_name("\\Foo\\Bar\\"), "Foo\\Bar");
        assert_eq!(normalize_name("Foo"), "Foo");
        assert_eq!(normalize_name("\\\\"), "");
    }

    #[test]
    fn test_symbol_parts() {
        let name = SymbolName::new("\\Foo\\Bar\\Baz");

        assert_eq!(name.as_str(), "Foo\\Bar\\Baz");
        assert_eq!(name.local_name(), "Baz");
        assert_eq!(name.namespace(), "Foo\\Bar");
    }

    #[test]
    fn test_global_symbol_has_empty_namespace() {
        let name = SymbolName::new("Qux");

        assert_eq!(name.local_name(), "Qux");
        assert_eq!(name.namespace(), "");
    }

    #[test]
    fn test_qualified() {
        assert_eq!(SymbolName::qualified("Foo\\Bar", "Baz").as_str(), "Foo\\Bar\\Baz");
        assert_eq!(SymbolName::qualified("", "Baz").as_str(), "Baz");
        assert_eq!(SymbolName::qualified("\\Foo\\", "Baz").as_str(), "Foo\\Baz");
    }

    #[test]
    fn test_strip_namespace_requires_separator() {
        let name = SymbolName::new("Foo\\Bar\\Baz");

        assert_eq!(name.strip_namespace("Foo"), Some("Bar\\Baz"));
        assert_eq!(name.strip_namespace("Foo\\Bar"), Some("Baz"));
        assert_eq!(name.strip_namespace("Fo"), None);
        assert_eq!(name.strip_namespace("Foo\\Bar\\Baz"), None);
        assert!(name.is_within("\\Foo\\"));
        assert!(!name.is_within("Foo\\B"));
    }

    #[test]
    fn test_borrow_as_str_key() {
        use indexmap::IndexMap;

        let mut map = IndexMap::new();
        map.insert(SymbolName::new("Foo\\Bar"), 1);

        assert_eq!(map.get("Foo\\Bar"), Some(&1));
    }
}
