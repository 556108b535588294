//! Site-wide settings record.

use serde::{Deserialize, Serialize};

use super::ValidationError;
use super::validation::required;

/// Title and tagline shown on every page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteSettings {
    pub site_title: String,
    pub site_description: String,
}

impl SiteSettings {
    pub const DEFAULT_TITLE: &'static str = "M5";
    pub const DEFAULT_DESCRIPTION: &'static str = "The Future of Product Discovery";

    /// Validate settings from raw input.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Required`] if the title or description is
    /// blank.
    pub fn parse(input: &SettingsInput) -> Result<Self, ValidationError> {
        Ok(Self {
            site_title: required("site title", &input.site_title)?,
            site_description: required("site description", &input.site_description)?,
        })
    }

    /// Browser title for pages, e.g. `M5 - Futuristic Product Showcase`.
    #[must_use]
    pub fn page_title(&self) -> String {
        format!("{} - Futuristic Product Showcase", self.site_title)
    }
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            site_title: Self::DEFAULT_TITLE.to_owned(),
            site_description: Self::DEFAULT_DESCRIPTION.to_owned(),
        }
    }
}

/// Raw settings form input.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsInput {
    pub site_title: String,
    pub site_description: String,
    /// Replacement admin password; blank keeps the current one.
    #[serde(default)]
    pub admin_password: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: SiteSettings = serde_json::from_str(r#"{"siteTitle":"Nova"}"#).unwrap();
        assert_eq!(settings.site_title, "Nova");
        assert_eq!(settings.site_description, SiteSettings::DEFAULT_DESCRIPTION);
    }

    #[test]
    fn test_parse_requires_title() {
        let input = SettingsInput {
            site_title: "  ".to_owned(),
            site_description: "tagline".to_owned(),
            admin_password: String::new(),
        };
        assert_eq!(
            SiteSettings::parse(&input),
            Err(ValidationError::Required {
                field: "site title"
            })
        );
    }

    #[test]
    fn test_page_title() {
        assert_eq!(
            SiteSettings::default().page_title(),
            "M5 - Futuristic Product Showcase"
        );
    }
}
