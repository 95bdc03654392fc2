//! Parser policies.

use crate::registry::DuplicatePolicy;
use serde::{Deserialize, Serialize};

/// How to treat a `Data_Access` value that looks like a provider short-name
/// but is not a known one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderPolicy {
    /// Log and keep going.
    #[default]
    Warn,
    /// Report a validation error.
    Reject,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseOptions {
    pub duplicates: DuplicatePolicy,
    pub providers: ProviderPolicy,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_duplicates(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }

    pub fn with_providers(mut self, policy: ProviderPolicy) -> Self {
        self.providers = policy;
        self
    }

    /// Every duplicate and every unknown provider is an error.
    pub fn strict() -> Self {
        Self {
            duplicates: DuplicatePolicy::Error,
            providers: ProviderPolicy::Reject,
        }
    }
}
