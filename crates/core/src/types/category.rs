//! Product categories and the category filter used by the catalog.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a string is not a known category.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CategoryError {
    /// The value does not name a category.
    #[error("unknown category: {0}")]
    Unknown(String),
}

/// Product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Tech,
    Innovation,
    Design,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Self; 3] = [Self::Tech, Self::Innovation, Self::Design];

    /// Stored form of the category (`tech`, `innovation`, `design`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tech => "tech",
            Self::Innovation => "innovation",
            Self::Design => "design",
        }
    }

    /// Human-facing label with the first letter capitalized.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Tech => "Tech",
            Self::Innovation => "Innovation",
            Self::Design => "Design",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "tech" => Ok(Self::Tech),
            "innovation" => Ok(Self::Innovation),
            "design" => Ok(Self::Design),
            other => Err(CategoryError::Unknown(other.to_owned())),
        }
    }
}

/// Category filter for catalog reads.
///
/// `All` is the `"all"` sentinel; `Only` keeps exact category matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// The sentinel string meaning "no category filtering".
    pub const ALL_SENTINEL: &'static str = "all";

    /// Whether a product in `category` passes this filter.
    #[must_use]
    pub fn matches(self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == category,
        }
    }

    /// String form used in query parameters.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => Self::ALL_SENTINEL,
            Self::Only(category) => category.as_str(),
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryFilter {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim() == Self::ALL_SENTINEL {
            return Ok(Self::All);
        }
        s.parse().map(Self::Only)
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        Self::Only(category)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_categories() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
        assert!(matches!(
            "gadgets".parse::<Category>(),
            Err(CategoryError::Unknown(value)) if value == "gadgets"
        ));
    }

    #[test]
    fn test_label_capitalizes() {
        assert_eq!(Category::Innovation.label(), "Innovation");
    }

    #[test]
    fn test_filter_all_matches_everything() {
        for category in Category::ALL {
            assert!(CategoryFilter::All.matches(category));
        }
    }

    #[test]
    fn test_filter_only_is_exact() {
        let filter = CategoryFilter::Only(Category::Design);
        assert!(filter.matches(Category::Design));
        assert!(!filter.matches(Category::Tech));
    }

    #[test]
    fn test_filter_parse() {
        assert_eq!("all".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "tech".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only(Category::Tech)
        );
        assert!("everything".parse::<CategoryFilter>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&Category::Innovation).unwrap(),
            "\"innovation\""
        );
    }
}
