//! The validated, read-only preference model handed to consumers.

use crate::data_access::{DataAccessConfig, DataAccessRole, DataAccessValue};
use crate::error::ConfigError;
use crate::preferences::PreferencesConfig;
use crate::registry::{AliasEntry, AliasRegistry};
use ispaq_core::{Category, SnclPattern};
use serde::Serialize;
use std::str::FromStr;

/// A parsed and validated preference file.
///
/// Built once per run and passed by reference to whatever needs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Configuration {
    metrics: AliasRegistry,
    station_sncls: AliasRegistry,
    data_access: DataAccessConfig,
    preferences: PreferencesConfig,
}

impl Configuration {
    pub(crate) fn new(
        metrics: AliasRegistry,
        station_sncls: AliasRegistry,
        data_access: DataAccessConfig,
        preferences: PreferencesConfig,
    ) -> Self {
        Self {
            metrics,
            station_sncls,
            data_access,
            preferences,
        }
    }

    pub fn metrics(&self) -> &AliasRegistry {
        &self.metrics
    }

    pub fn station_sncls(&self) -> &AliasRegistry {
        &self.station_sncls
    }

    /// Alias registry of a list category; `None` for `Data_Access` and
    /// `Preferences`.
    pub fn aliases(&self, category: Category) -> Option<&AliasRegistry> {
        match category {
            Category::Metrics => Some(&self.metrics),
            Category::StationSncls => Some(&self.station_sncls),
            Category::DataAccess | Category::Preferences => None,
        }
    }

    /// Token list of an alias.
    pub fn resolve_alias(&self, category: Category, name: &str) -> Option<&[String]> {
        self.aliases(category)?.resolve(name)
    }

    /// Resolve a user-supplied metric or SNCL argument.
    ///
    /// A known alias expands to its tokens; anything else is read as a literal
    /// comma-separated list.
    pub fn resolve_or_literal(&self, category: Category, arg: &str) -> Vec<String> {
        match self.resolve_alias(category, arg.trim()) {
            Some(tokens) => tokens.to_vec(),
            None => AliasEntry::split_tokens(arg),
        }
    }

    /// Split every pattern of a `Station_SNCLs` alias using the configured
    /// `sncl_format`.
    pub fn sncl_patterns(&self, name: &str) -> Option<ispaq_core::Result<Vec<SnclPattern>>> {
        let format = self.preferences.sncl_format();
        let tokens = self.station_sncls.resolve(name)?;
        Some(tokens.iter().map(|t| format.split(t)).collect())
    }

    pub fn data_access(&self) -> &DataAccessConfig {
        &self.data_access
    }

    pub fn endpoint(&self, role: DataAccessRole) -> &DataAccessValue {
        self.data_access.endpoint(role)
    }

    pub fn preferences(&self) -> &PreferencesConfig {
        &self.preferences
    }
}

impl FromStr for Configuration {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parse_preferences(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ispaq_core::FdsnProvider;

    const PREFS: &str = "\
Metrics:
  basicStats: sample_min, sample_median, sample_mean, sample_max, sample_rms, sample_unique
Station_SNCLs:
  numSpikes: IU.RAO.10.BH?, IM.TX31..BH?
  swapped: RAO.IU.10.BHZ
Data_Access:
  dataselect_url: IRIS
  station_url: IRIS
  resp_dir:
";

    #[test]
    fn test_resolve_alias_by_category() {
        let config: Configuration = PREFS.parse().unwrap();

        assert_eq!(
            config.resolve_alias(Category::Metrics, "basicStats").unwrap(),
            [
                "sample_min",
                "sample_median",
                "sample_mean",
                "sample_max",
                "sample_rms",
                "sample_unique"
            ]
        );
        assert_eq!(
            config.resolve_alias(Category::StationSncls, "numSpikes").unwrap(),
            ["IU.RAO.10.BH?", "IM.TX31..BH?"]
        );
        assert_eq!(config.resolve_alias(Category::Metrics, "numSpikes"), None);
        assert_eq!(config.resolve_alias(Category::DataAccess, "resp_dir"), None);
    }

    #[test]
    fn test_resolve_or_literal() {
        let config: Configuration = PREFS.parse().unwrap();

        assert_eq!(
            config.resolve_or_literal(Category::StationSncls, "numSpikes"),
            vec!["IU.RAO.10.BH?", "IM.TX31..BH?"]
        );
        assert_eq!(
            config.resolve_or_literal(Category::Metrics, "sample_min, num_gaps"),
            vec!["sample_min", "num_gaps"]
        );
    }

    #[test]
    fn test_endpoints() {
        let config: Configuration = PREFS.parse().unwrap();

        assert_eq!(
            config.endpoint(DataAccessRole::Dataselect),
            &DataAccessValue::Provider(FdsnProvider::Iris)
        );
        assert_eq!(config.data_access().raw(DataAccessRole::Resp), Some(""));
        assert_eq!(config.endpoint(DataAccessRole::Event), &DataAccessValue::Default);
    }

    #[test]
    fn test_sncl_patterns_use_configured_format() {
        let config: Configuration = PREFS.parse().unwrap();
        let patterns = config.sncl_patterns("numSpikes").unwrap().unwrap();
        assert_eq!(patterns[1].station, "TX31");
        assert_eq!(patterns[1].location, "");

        let text = format!("{PREFS}Preferences:\n  sncl_format: S.N.L.C\n");
        let config: Configuration = text.parse().unwrap();
        let patterns = config.sncl_patterns("swapped").unwrap().unwrap();
        assert_eq!(patterns[0].to_string(), "IU.RAO.10.BHZ");

        assert!(config.sncl_patterns("missing").is_none());
    }

    #[test]
    fn test_serializes_to_json() {
        let config: Configuration = PREFS.parse().unwrap();
        let json = serde_json::to_value(&config).unwrap();

        assert_eq!(json["metrics"]["category"], "Metrics");
        assert_eq!(json["metrics"]["entries"][0]["name"], "basicStats");
        assert_eq!(json["data_access"]["dataselect_url"]["kind"], "provider");
        assert_eq!(json["data_access"]["dataselect_url"]["value"], "IRIS");
        assert_eq!(json["preferences"]["sncl_format"], "N.S.L.C");
    }
}
