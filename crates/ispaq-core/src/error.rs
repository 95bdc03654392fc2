//! Error types for ISPAQ domain values.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid SNCL format '{0}': expected a permutation of N.S.L.C")]
    InvalidSnclFormat(String),

    #[error("could not parse SNCL pattern '{0}': expected four dot-separated fields")]
    InvalidSnclPattern(String),

    #[error("unknown FDSN provider: {0}")]
    UnknownProvider(String),

    #[error("cannot find local path: {}", .0.display())]
    MissingLocalPath(PathBuf),
}

pub type Result<T> = std::result::Result<T, Error>;
