//! Whole-document checks, run once after parsing.
//!
//! Every check runs regardless of earlier failures so the caller gets the
//! complete list of problems in one pass.

use crate::data_access::{DataAccessConfig, DataAccessRole, DataAccessValue};
use crate::error::ValidationError;
use crate::model::Configuration;
use crate::options::{ParseOptions, ProviderPolicy};
use crate::parser::RawDocument;
use crate::preferences::{self, PreferencesConfig};
use crate::registry::{AliasRegistry, DuplicatePolicy};
use ispaq_core::{Category, SnclFormat};
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, warn};

/// A non-fatal finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    DuplicateDefinition {
        category: Category,
        name: String,
        first_line: usize,
        line: usize,
        policy: DuplicatePolicy,
    },
    UnrecognizedProvider {
        key: String,
        value: String,
        line: usize,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::DuplicateDefinition {
                category,
                name,
                first_line,
                line,
                policy,
            } => {
                let kept = match policy {
                    DuplicatePolicy::LastWins => "using this definition",
                    _ => "keeping the first definition",
                };
                write!(
                    f,
                    "line {line}: {category} '{name}' already defined on line {first_line}, {kept}"
                )
            }
            Warning::UnrecognizedProvider { key, value, line } => {
                write!(f, "line {line}: {key} names unrecognized FDSN provider '{value}'")
            }
        }
    }
}

/// A configuration that passed validation, with any warnings raised on the
/// way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validated {
    pub config: Configuration,
    pub warnings: Vec<Warning>,
}

pub struct Validator {
    options: ParseOptions,
}

impl Validator {
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    pub fn validate(&self, doc: RawDocument) -> Result<Validated, Vec<ValidationError>> {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        self.check_duplicates(&doc, &mut errors, &mut warnings);
        check_aliases(&doc, &doc.metrics, &mut errors);
        check_aliases(&doc, &doc.station_sncls, &mut errors);

        let data_access = DataAccessConfig::from_settings(doc.data_access.clone());
        self.check_data_access(&doc, &data_access, &mut errors, &mut warnings);

        let preferences = build_preferences(&doc, &mut errors);

        for warning in &warnings {
            warn!(%warning, "preference file warning");
        }

        if !errors.is_empty() {
            errors.sort_by_key(ValidationError::line);
            debug!(count = errors.len(), "preference file failed validation");
            return Err(errors);
        }

        let RawDocument {
            metrics,
            station_sncls,
            ..
        } = doc;

        Ok(Validated {
            config: Configuration::new(metrics, station_sncls, data_access, preferences),
            warnings,
        })
    }

    fn check_duplicates(
        &self,
        doc: &RawDocument,
        errors: &mut Vec<ValidationError>,
        warnings: &mut Vec<Warning>,
    ) {
        let policy = self.options.duplicates;

        for dup in &doc.duplicates {
            if policy != DuplicatePolicy::Error {
                warnings.push(Warning::DuplicateDefinition {
                    category: dup.category,
                    name: dup.name.clone(),
                    first_line: dup.first_line,
                    line: dup.line,
                    policy,
                });
                continue;
            }

            let error = if dup.category.is_alias_list() {
                ValidationError::DuplicateAliasName {
                    category: dup.category,
                    name: dup.name.clone(),
                    first_line: dup.first_line,
                    line: dup.line,
                }
            } else {
                ValidationError::DuplicateKey {
                    category: dup.category,
                    name: dup.name.clone(),
                    first_line: dup.first_line,
                    line: dup.line,
                }
            };
            errors.push(error);
        }
    }

    fn check_data_access(
        &self,
        doc: &RawDocument,
        config: &DataAccessConfig,
        errors: &mut Vec<ValidationError>,
        warnings: &mut Vec<Warning>,
    ) {
        let line_of = |role: DataAccessRole| {
            doc.line_of(Category::DataAccess, role.key())
                .unwrap_or_default()
        };

        for role in DataAccessRole::ALL {
            if let DataAccessValue::UnrecognizedProvider(value) = config.endpoint(role) {
                let key = role.key().to_string();
                let value = value.clone();
                let line = line_of(role);
                match self.options.providers {
                    ProviderPolicy::Warn => {
                        warnings.push(Warning::UnrecognizedProvider { key, value, line })
                    }
                    ProviderPolicy::Reject => {
                        errors.push(ValidationError::UnrecognizedProvider { key, value, line })
                    }
                }
            }
        }

        let dataselect = config.endpoint(DataAccessRole::Dataselect);
        let station = config.endpoint(DataAccessRole::Station);
        if !dataselect.kind().compatible_with(station.kind()) {
            errors.push(ValidationError::MixedDataAccessKinds {
                dataselect: config.raw(DataAccessRole::Dataselect).unwrap_or_default().to_string(),
                station: config.raw(DataAccessRole::Station).unwrap_or_default().to_string(),
                line: line_of(DataAccessRole::Dataselect).max(line_of(DataAccessRole::Station)),
            });
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ParseOptions::default())
    }
}

fn check_aliases(doc: &RawDocument, registry: &AliasRegistry, errors: &mut Vec<ValidationError>) {
    let category = registry.category();
    for entry in registry.iter().filter(|e| e.tokens.is_empty()) {
        errors.push(ValidationError::EmptyAliasValue {
            category,
            name: entry.name.clone(),
            line: doc.line_of(category, &entry.name).unwrap_or_default(),
        });
    }
}

fn build_preferences(doc: &RawDocument, errors: &mut Vec<ValidationError>) -> PreferencesConfig {
    let settings = &doc.preferences;
    let line_of = |key: &str| doc.line_of(Category::Preferences, key).unwrap_or_default();
    let mut prefs = PreferencesConfig {
        settings: settings.clone(),
        ..PreferencesConfig::default()
    };

    if let Some(raw) = settings.get(preferences::SIGFIGS) {
        match raw.parse::<u32>() {
            Ok(n) if n > 0 => prefs.sigfigs = n,
            _ => errors.push(ValidationError::InvalidSigfigs {
                value: raw.to_string(),
                line: line_of(preferences::SIGFIGS),
            }),
        }
    }

    if let Some(raw) = settings.get(preferences::SNCL_FORMAT) {
        match raw.parse::<SnclFormat>() {
            Ok(format) => prefs.sncl_format = format,
            Err(_) => errors.push(ValidationError::InvalidSnclFormat {
                value: raw.to_string(),
                line: line_of(preferences::SNCL_FORMAT),
            }),
        }
    }

    for (key, dir) in [
        (preferences::CSV_DIR, &mut prefs.csv_dir),
        (preferences::PNG_DIR, &mut prefs.png_dir),
    ] {
        if let Some(raw) = settings.get(key).filter(|v| !v.is_empty()) {
            *dir = PathBuf::from(raw);
        }
    }

    prefs
}
