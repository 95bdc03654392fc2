//! Section state machine: turns normalized lines into raw registries.

use crate::error::ParseError;
use crate::normalize::{LineKind, normalize_line};
use crate::registry::{AliasEntry, AliasRegistry, DuplicatePolicy, InsertOutcome, SettingsTable};
use ispaq_core::Category;
use std::collections::HashMap;
use tracing::debug;

/// Parser state. There is no closing token; whatever section is active at
/// end of input simply ends there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionState {
    NoSection,
    InMetrics,
    InStationSncls,
    InDataAccess,
    InPreferences,
}

impl SectionState {
    pub fn category(&self) -> Option<Category> {
        match self {
            SectionState::NoSection => None,
            SectionState::InMetrics => Some(Category::Metrics),
            SectionState::InStationSncls => Some(Category::StationSncls),
            SectionState::InDataAccess => Some(Category::DataAccess),
            SectionState::InPreferences => Some(Category::Preferences),
        }
    }
}

impl From<Category> for SectionState {
    fn from(category: Category) -> Self {
        match category {
            Category::Metrics => SectionState::InMetrics,
            Category::StationSncls => SectionState::InStationSncls,
            Category::DataAccess => SectionState::InDataAccess,
            Category::Preferences => SectionState::InPreferences,
        }
    }
}

/// A name defined more than once in the same category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Duplicate {
    pub category: Category,
    pub name: String,
    pub first_line: usize,
    pub line: usize,
}

/// Everything read from a document, before validation.
///
/// Alias entries may still have empty token lists here; the validator
/// rejects those.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub metrics: AliasRegistry,
    pub station_sncls: AliasRegistry,
    pub data_access: SettingsTable,
    pub preferences: SettingsTable,
    pub duplicates: Vec<Duplicate>,
    lines: HashMap<(Category, String), usize>,
}

impl RawDocument {
    fn new() -> Self {
        Self {
            metrics: AliasRegistry::new(Category::Metrics),
            station_sncls: AliasRegistry::new(Category::StationSncls),
            data_access: SettingsTable::new(),
            preferences: SettingsTable::new(),
            duplicates: Vec::new(),
            lines: HashMap::new(),
        }
    }

    /// Line of the definition currently held for `name`.
    pub fn line_of(&self, category: Category, name: &str) -> Option<usize> {
        self.lines.get(&(category, name.to_string())).copied()
    }

    fn record(
        &mut self,
        category: Category,
        name: &str,
        line: usize,
        outcome: InsertOutcome,
    ) {
        let key = (category, name.to_string());
        match outcome {
            InsertOutcome::Inserted => {
                self.lines.insert(key, line);
            }
            InsertOutcome::Replaced | InsertOutcome::Ignored => {
                let first_line = self.lines.get(&key).copied().unwrap_or(line);
                self.duplicates.push(Duplicate {
                    category,
                    name: name.to_string(),
                    first_line,
                    line,
                });
                if outcome == InsertOutcome::Replaced {
                    self.lines.insert(key, line);
                }
            }
        }
    }
}

/// Parse preference file text into raw registries.
///
/// Fails on the first structural error; nothing is validated yet.
pub fn parse_document(text: &str, duplicates: DuplicatePolicy) -> Result<RawDocument, ParseError> {
    let mut doc = RawDocument::new();
    let mut state = SectionState::NoSection;

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;

        match normalize_line(raw) {
            LineKind::Blank => {}
            LineKind::Header(text) => {
                let category = text
                    .strip_suffix(':')
                    .map(str::trim_end)
                    .and_then(Category::from_name)
                    .ok_or_else(|| ParseError::UnknownSection {
                        line,
                        text: text.to_string(),
                    })?;
                debug!(line, section = %category, "entering section");
                state = category.into();
            }
            LineKind::Entry(text) => {
                let category = state
                    .category()
                    .ok_or_else(|| ParseError::EntryOutsideSection {
                        line,
                        text: text.to_string(),
                    })?;

                let (key, value) = text
                    .split_once(':')
                    .map(|(k, v)| (k.trim(), v.trim()))
                    .filter(|(k, _)| !k.is_empty())
                    .ok_or_else(|| ParseError::MalformedEntry {
                        line,
                        text: text.to_string(),
                    })?;

                let outcome = match category {
                    Category::Metrics => doc.metrics.insert(
                        AliasEntry::new(key, AliasEntry::split_tokens(value)),
                        duplicates,
                    ),
                    Category::StationSncls => doc.station_sncls.insert(
                        AliasEntry::new(key, AliasEntry::split_tokens(value)),
                        duplicates,
                    ),
                    Category::DataAccess => doc.data_access.insert(key, value, duplicates),
                    Category::Preferences => doc.preferences.insert(key, value, duplicates),
                };
                doc.record(category, key, line, outcome);
            }
        }
    }

    debug!(
        metrics = doc.metrics.len(),
        station_sncls = doc.station_sncls.len(),
        data_access = doc.data_access.len(),
        preferences = doc.preferences.len(),
        "parsed preference document"
    );

    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<RawDocument, ParseError> {
        parse_document(text, DuplicatePolicy::LastWins)
    }

    #[test]
    fn test_parse_all_sections() {
        let text = r#"
# ISPAQ preferences
Metrics:
  basicStats: sample_min, sample_median, sample_mean, sample_max, sample_rms, sample_unique

Station_SNCLs:
  numSpikes: IU.RAO.10.BH?, IM.TX31..BH?

Data_Access:
  dataselect_url: IRIS
  resp_dir:

Preferences:
  csv_dir: ./csv
"#;
        let doc = parse(text).unwrap();

        assert_eq!(
            doc.metrics.resolve("basicStats").unwrap(),
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
            doc.station_sncls.resolve("numSpikes").unwrap(),
            ["IU.RAO.10.BH?", "IM.TX31..BH?"]
        );
        assert_eq!(doc.data_access.get("dataselect_url"), Some("IRIS"));
        assert_eq!(doc.data_access.get("resp_dir"), Some(""));
        assert_eq!(doc.preferences.get("csv_dir"), Some("./csv"));
        assert_eq!(doc.line_of(Category::Metrics, "basicStats"), Some(4));
    }

    #[test]
    fn test_scalar_values_keep_commas_and_colons() {
        let text = "Data_Access:\n  station_url: http://host:8080/a,b\n";
        let doc = parse(text).unwrap();
        assert_eq!(doc.data_access.get("station_url"), Some("http://host:8080/a,b"));
    }

    #[test]
    fn test_entry_outside_section() {
        let text = "# comment first\n  foo: bar\nMetrics:\n";
        let err = parse(text).unwrap_err();
        assert!(matches!(err, ParseError::EntryOutsideSection { line: 2, .. }));
    }

    #[test]
    fn test_unknown_section() {
        let err = parse("Metrics:\n  a: b\nStations:\n").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnknownSection {
                line: 3,
                text: "Stations:".to_string()
            }
        );
    }

    #[test]
    fn test_unindented_non_header_is_unknown_section() {
        assert!(matches!(
            parse("basicStats: sample_min").unwrap_err(),
            ParseError::UnknownSection { line: 1, .. }
        ));
        assert!(matches!(
            parse("Metrics").unwrap_err(),
            ParseError::UnknownSection { line: 1, .. }
        ));
    }

    #[test]
    fn test_malformed_entry() {
        let err = parse("Metrics:\n  basicStats sample_min\n").unwrap_err();
        assert!(matches!(err, ParseError::MalformedEntry { line: 2, .. }));

        let err = parse("Preferences:\n  : 6\n").unwrap_err();
        assert!(matches!(err, ParseError::MalformedEntry { line: 2, .. }));
    }

    #[test]
    fn test_header_tolerates_space_before_colon() {
        let doc = parse("Preferences :\n  sigfigs: 4\n").unwrap();
        assert_eq!(doc.preferences.get("sigfigs"), Some("4"));
    }

    #[test]
    fn test_reentering_section_accumulates() {
        let text = "Metrics:\n  a: x\nPreferences:\n  sigfigs: 3\nMetrics:\n  b: y\n";
        let doc = parse(text).unwrap();
        assert_eq!(doc.metrics.names().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_empty_alias_kept_for_validation() {
        let doc = parse("Metrics:\n  nothing: , ,\n").unwrap();
        assert_eq!(doc.metrics.resolve("nothing"), Some(&[][..]));
    }

    #[test]
    fn test_duplicates_recorded() {
        let text = "Metrics:\n  a: x\n  a: y\nData_Access:\n  resp_dir: /r\n  resp_dir: /s\n";

        let doc = parse_document(text, DuplicatePolicy::LastWins).unwrap();
        assert_eq!(doc.metrics.resolve("a").unwrap(), ["y"]);
        assert_eq!(doc.data_access.get("resp_dir"), Some("/s"));
        assert_eq!(doc.line_of(Category::Metrics, "a"), Some(3));
        assert_eq!(
            doc.duplicates,
            vec![
                Duplicate {
                    category: Category::Metrics,
                    name: "a".to_string(),
                    first_line: 2,
                    line: 3,
                },
                Duplicate {
                    category: Category::DataAccess,
                    name: "resp_dir".to_string(),
                    first_line: 5,
                    line: 6,
                },
            ]
        );

        let doc = parse_document(text, DuplicatePolicy::FirstWins).unwrap();
        assert_eq!(doc.metrics.resolve("a").unwrap(), ["x"]);
        assert_eq!(doc.line_of(Category::Metrics, "a"), Some(2));
        assert_eq!(doc.duplicates.len(), 2);
    }

    #[test]
    fn test_same_name_in_different_categories_is_not_duplicate() {
        let text = "Metrics:\n  IU: sample_min\nStation_SNCLs:\n  IU: IU.*.*.BH?\n";
        let doc = parse(text).unwrap();
        assert!(doc.duplicates.is_empty());
    }

    #[test]
    fn test_tab_indentation_and_crlf() {
        let doc = parse("Metrics:\r\n\tgaps: num_gaps\r\n").unwrap();
        assert_eq!(doc.metrics.resolve("gaps").unwrap(), ["num_gaps"]);
    }

    #[test]
    fn test_state_category_round_trip() {
        for category in Category::ALL {
            assert_eq!(SectionState::from(category).category(), Some(category));
        }
        assert_eq!(SectionState::NoSection.category(), None);
    }
}
