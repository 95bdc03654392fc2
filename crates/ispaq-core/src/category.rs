//! Preference file categories.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// One of the four sections of a preference file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Category {
    /// Metric set aliases.
    #[display("Metrics")]
    #[serde(rename = "Metrics")]
    Metrics,
    /// SNCL pattern aliases.
    #[display("Station_SNCLs")]
    #[serde(rename = "Station_SNCLs")]
    StationSncls,
    /// Data and metadata sources.
    #[display("Data_Access")]
    #[serde(rename = "Data_Access")]
    DataAccess,
    /// Output and formatting settings.
    #[display("Preferences")]
    #[serde(rename = "Preferences")]
    Preferences,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Metrics,
        Category::StationSncls,
        Category::DataAccess,
        Category::Preferences,
    ];

    /// Section name as written in a header line.
    pub fn name(&self) -> &'static str {
        match self {
            Category::Metrics => "Metrics",
            Category::StationSncls => "Station_SNCLs",
            Category::DataAccess => "Data_Access",
            Category::Preferences => "Preferences",
        }
    }

    /// Look up a category by its exact section name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    /// Whether entries in this category hold comma-separated token lists.
    pub fn is_alias_list(&self) -> bool {
        matches!(self, Category::Metrics | Category::StationSncls)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_exact() {
        assert_eq!(Category::from_name("Metrics"), Some(Category::Metrics));
        assert_eq!(
            Category::from_name("Station_SNCLs"),
            Some(Category::StationSncls)
        );
        assert_eq!(Category::from_name("metrics"), None);
        assert_eq!(Category::from_name("Station_SNCL"), None);
    }

    #[test]
    fn test_display_matches_header_name() {
        for category in Category::ALL {
            assert_eq!(category.to_string(), category.name());
        }
    }

    #[test]
    fn test_alias_list_categories() {
        assert!(Category::Metrics.is_alias_list());
        assert!(Category::StationSncls.is_alias_list());
        assert!(!Category::DataAccess.is_alias_list());
        assert!(!Category::Preferences.is_alias_list());
    }

    #[test]
    fn test_serializes_as_header_name() {
        let json = serde_json::to_string(&Category::DataAccess).unwrap();
        assert_eq!(json, "\"Data_Access\"");
    }
}
