//! Preference file errors.
//!
//! Structural problems ([`ParseError`]) abort parsing at the offending line.
//! Semantic problems ([`ValidationError`]) are collected over the whole
//! document and reported together.

use ispaq_core::Category;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("invalid preference file: {0}")]
    Invalid(ValidationErrors),
}

impl From<Vec<ValidationError>> for ConfigError {
    fn from(errors: Vec<ValidationError>) -> Self {
        ConfigError::Invalid(ValidationErrors(errors))
    }
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Fatal structural error. Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("line {line}: unknown section '{text}'")]
    UnknownSection { line: usize, text: String },

    #[error("line {line}: entry '{text}' appears before any section header")]
    EntryOutsideSection { line: usize, text: String },

    #[error("line {line}: malformed entry '{text}', expected 'key: value'")]
    MalformedEntry { line: usize, text: String },
}

impl ParseError {
    pub fn line(&self) -> usize {
        match self {
            ParseError::UnknownSection { line, .. }
            | ParseError::EntryOutsideSection { line, .. }
            | ParseError::MalformedEntry { line, .. } => *line,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("line {line}: {category} alias '{name}' has no values")]
    EmptyAliasValue {
        category: Category,
        name: String,
        line: usize,
    },

    #[error("line {line}: invalid sncl_format '{value}', expected a permutation of N.S.L.C")]
    InvalidSnclFormat { value: String, line: usize },

    #[error(
        "line {line}: invalid sigfigs '{value}', expected a positive integer no larger than {}",
        u32::MAX
    )]
    InvalidSigfigs { value: String, line: usize },

    #[error(
        "line {line}: dataselect_url '{dataselect}' and station_url '{station}' must both be \
         services or both be local paths"
    )]
    MixedDataAccessKinds {
        dataselect: String,
        station: String,
        line: usize,
    },

    #[error("line {line}: {category} alias '{name}' already defined on line {first_line}")]
    DuplicateAliasName {
        category: Category,
        name: String,
        first_line: usize,
        line: usize,
    },

    #[error("line {line}: {category} key '{name}' already defined on line {first_line}")]
    DuplicateKey {
        category: Category,
        name: String,
        first_line: usize,
        line: usize,
    },

    #[error("line {line}: {key} names unrecognized FDSN provider '{value}'")]
    UnrecognizedProvider {
        key: String,
        value: String,
        line: usize,
    },
}

impl ValidationError {
    pub fn line(&self) -> usize {
        match self {
            ValidationError::EmptyAliasValue { line, .. }
            | ValidationError::InvalidSnclFormat { line, .. }
            | ValidationError::InvalidSigfigs { line, .. }
            | ValidationError::MixedDataAccessKinds { line, .. }
            | ValidationError::DuplicateAliasName { line, .. }
            | ValidationError::DuplicateKey { line, .. }
            | ValidationError::UnrecognizedProvider { line, .. } => *line,
        }
    }
}

/// Every validation error found in one document, in line order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl ValidationErrors {
    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} problem(s) found", self.0.len())?;
        for error in &self.0 {
            write!(f, "\n  {error}")?;
        }
        Ok(())
    }
}
