//! Core domain types for ISPAQ preference files.
//!
//! This crate contains:
//! - The four preference file categories
//! - FDSN provider short-names and their service URLs
//! - SNCL field ordering and pattern splitting

pub mod category;
pub mod error;
pub mod provider;
pub mod sncl;

pub use category::Category;
pub use error::{Error, Result};
pub use provider::FdsnProvider;
pub use sncl::{SnclField, SnclFormat, SnclPattern};
