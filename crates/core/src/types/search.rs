//! Free-text catalog search term.

use core::fmt;

/// A case-insensitive substring search term.
///
/// The term is lowercased once on construction and otherwise kept as typed,
/// spaces included. Only an empty term matches everything.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SearchTerm(String);

impl SearchTerm {
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self(raw.to_lowercase())
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The normalized (lowercased) term.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether any of `fields` contains the term, ignoring case.
    #[must_use]
    pub fn matches_any(&self, fields: &[&str]) -> bool {
        self.is_empty()
            || fields
                .iter()
                .any(|field| field.to_lowercase().contains(&self.0))
    }
}

impl fmt::Display for SearchTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SearchTerm {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_matches_everything() {
        assert!(SearchTerm::new("").matches_any(&[]));
        assert!(SearchTerm::new("").matches_any(&["anything"]));
    }

    #[test]
    fn test_spaces_are_part_of_the_term() {
        assert!(!SearchTerm::new("   ").is_empty());
        assert!(!SearchTerm::new("   ").matches_any(&["anything"]));
        assert!(SearchTerm::new("   ").matches_any(&["wide   gap"]));

        let term = SearchTerm::new("pro ");
        assert!(!term.matches_any(&["Quantum Display Pro"]));
        assert!(term.matches_any(&["Pro model"]));
    }

    #[test]
    fn test_case_insensitive_substring() {
        let term = SearchTerm::new("NEURAL");
        assert!(term.matches_any(&["Headset", "Neural interface"]));
        assert!(!term.matches_any(&["Quantum Display", "hologram"]));
    }
}
