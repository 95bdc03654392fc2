//! ISPAQ preference file parsing.
//!
//! A preference file has four sections:
//! - `Metrics`: aliases for lists of metric names
//! - `Station_SNCLs`: aliases for lists of SNCL patterns
//! - `Data_Access`: data, metadata, event and response sources
//! - `Preferences`: output directories and formatting
//!
//! Text goes through comment stripping ([`normalize`]), the section state
//! machine ([`parser`]) and whole-document checks ([`validator`]) before it
//! becomes a [`Configuration`].

pub mod data_access;
pub mod error;
pub mod model;
pub mod normalize;
pub mod options;
pub mod parser;
pub mod preferences;
pub mod registry;
pub mod validator;

pub use data_access::{DataAccessConfig, DataAccessKind, DataAccessRole, DataAccessValue};
pub use error::{ConfigError, ConfigResult, ParseError, ValidationError, ValidationErrors};
pub use model::Configuration;
pub use options::{ParseOptions, ProviderPolicy};
pub use preferences::PreferencesConfig;
pub use registry::{AliasEntry, AliasRegistry, DuplicatePolicy, SettingsTable};
pub use validator::{Validated, Validator, Warning};

use std::path::Path;
use tracing::debug;

/// Parse and validate preference file text with default options.
pub fn parse_preferences(text: &str) -> ConfigResult<Configuration> {
    parse_preferences_with(text, &ParseOptions::default()).map(|v| v.config)
}

/// Parse and validate preference file text, returning warnings alongside
/// the configuration.
pub fn parse_preferences_with(text: &str, options: &ParseOptions) -> ConfigResult<Validated> {
    let doc = parser::parse_document(text, options.duplicates)?;
    Ok(Validator::new(*options).validate(doc)?)
}

/// Read, parse and validate a preference file with default options.
pub fn load_preferences(path: impl AsRef<Path>) -> ConfigResult<Configuration> {
    load_preferences_with(path, &ParseOptions::default()).map(|v| v.config)
}

/// Read, parse and validate a preference file.
pub fn load_preferences_with(
    path: impl AsRef<Path>,
    options: &ParseOptions,
) -> ConfigResult<Validated> {
    let path = path.as_ref();
    debug!(path = %path.display(), "loading preference file");
    let text = std::fs::read_to_string(path)?;
    parse_preferences_with(&text, options)
}
