//! Traits for analyte name resolution.
//!
//! This module defines the [`AnalyteDirectory`] trait that must be implemented
//! by any catalogue of known analytes that the importer resolves typed names
//! against.
//!
//! # Architecture Note
//!
//! This crate intentionally does NOT depend on a storage layer. The trait is
//! defined here, but implementations for database-backed catalogues should be
//! done in the consuming crate.
//!
//! # Example: Implementing AnalyteDirectory
//!
//! ```ignore
//! use labtext_import::{AnalyteDirectory, AnalyteName};
//!
//! impl AnalyteDirectory for AnalyteTable {
//!     fn analytes(&self) -> Box<dyn Iterator<Item = &AnalyteName> + '_> {
//!         Box::new(self.rows.iter())
//!     }
//! }
//! ```

/// A known analyte with its full name and abbreviation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnalyteName {
    /// Full name, e.g. `tireotropina`.
    pub name: String,
    /// Abbreviation, e.g. `TSH`.
    pub short_name: String,
}

impl AnalyteName {
    /// Creates an analyte name.
    pub fn new(name: impl Into<String>, short_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            short_name: short_name.into(),
        }
    }

    /// Whether `token` is a case-insensitive prefix of the name or the abbreviation.
    pub fn matches_prefix(&self, token: &str) -> bool {
        let token = token.to_lowercase();
        self.name.to_lowercase().starts_with(&token)
            || self.short_name.to_lowercase().starts_with(&token)
    }
}

/// Trait for catalogues that typed analyte names are resolved against.
///
/// # Required Methods
///
/// - [`analytes`](Self::analytes) - Iterate all known analytes in catalogue order
///
/// # Optional Methods (with defaults)
///
/// - [`resolve`](Self::resolve) - First analyte whose name or abbreviation
///   starts with the token. Override it when the catalogue has an index.
pub trait AnalyteDirectory: Send + Sync {
    /// Iterate all known analytes.
    fn analytes(&self) -> Box<dyn Iterator<Item = &AnalyteName> + '_>;

    /// Resolve a typed token by prefix match on name or abbreviation.
    ///
    /// An empty token matches nothing.
    fn resolve(&self, token: &str) -> Option<AnalyteName> {
        if token.is_empty() {
            return None;
        }
        self.analytes().find(|a| a.matches_prefix(token)).cloned()
    }

    /// Number of known analytes.
    fn len(&self) -> usize {
        self.analytes().count()
    }

    /// Returns true if the directory has no analytes.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An [`AnalyteDirectory`] backed by a `Vec`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    analytes: Vec<AnalyteName>,
}

impl InMemoryDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an analyte; earlier entries win prefix ties.
    pub fn insert(&mut self, analyte: AnalyteName) {
        self.analytes.push(analyte);
    }
}

impl FromIterator<AnalyteName> for InMemoryDirectory {
    fn from_iter<T: IntoIterator<Item = AnalyteName>>(iter: T) -> Self {
        Self {
            analytes: iter.into_iter().collect(),
        }
    }
}

impl AnalyteDirectory for InMemoryDirectory {
    fn analytes(&self) -> Box<dyn Iterator<Item = &AnalyteName> + '_> {
        Box::new(self.analytes.iter())
    }

    fn len(&self) -> usize {
        self.analytes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> InMemoryDirectory {
        [
            ("testosterone", "testo"),
            ("paratormone", "PTH"),
            ("tireotropina", "TSH"),
            ("tiroxina libera", "FT4"),
            ("tironina libera", "FT3"),
        ]
        .into_iter()
        .map(|(n, s)| AnalyteName::new(n, s))
        .collect()
    }

    #[test]
    fn test_resolve_by_abbreviation() {
        let found = directory().resolve("tsh").unwrap();
        assert_eq!(found.name, "tireotropina");
    }

    #[test]
    fn test_resolve_by_name_prefix() {
        let found = directory().resolve("para").unwrap();
        assert_eq!(found.short_name, "PTH");
    }

    #[test]
    fn test_first_match_wins() {
        // "tiro" prefixes both "tiroxina" and "tironina"
        let found = directory().resolve("tiro").unwrap();
        assert_eq!(found.short_name, "FT4");
    }

    #[test]
    fn test_unknown_and_empty_tokens() {
        assert!(directory().resolve("acth").is_none());
        assert!(directory().resolve("").is_none());
    }

    #[test]
    fn test_len() {
        assert_eq!(directory().len(), 5);
        assert!(InMemoryDirectory::new().is_empty());
    }
}
