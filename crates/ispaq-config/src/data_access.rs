//! `Data_Access` section: where waveforms, metadata, events and instrument
//! responses come from.

use crate::registry::SettingsTable;
use ispaq_core::FdsnProvider;
use regex::Regex;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use url::Url;

// Bare upper-case tokens look like provider short-names rather than paths
static PROVIDER_LIKE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Z0-9_-]*$").unwrap());

/// The four recognized `Data_Access` keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DataAccessRole {
    Dataselect,
    Station,
    Event,
    Resp,
}

impl DataAccessRole {
    pub const ALL: [DataAccessRole; 4] = [
        DataAccessRole::Dataselect,
        DataAccessRole::Station,
        DataAccessRole::Event,
        DataAccessRole::Resp,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            DataAccessRole::Dataselect => "dataselect_url",
            DataAccessRole::Station => "station_url",
            DataAccessRole::Event => "event_url",
            DataAccessRole::Resp => "resp_dir",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.key() == key)
    }
}

/// Broad kind of a data source, used for the dataselect/station consistency
/// check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataAccessKind {
    Default,
    Remote,
    Local,
}

impl DataAccessKind {
    /// `Default` is compatible with anything.
    pub fn compatible_with(self, other: DataAccessKind) -> bool {
        self == DataAccessKind::Default || other == DataAccessKind::Default || self == other
    }
}

/// A classified `Data_Access` value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DataAccessValue {
    /// Empty value: use the consumer's default service.
    #[default]
    Default,
    Provider(FdsnProvider),
    Url(Url),
    /// Looks like a provider short-name but is not one we know.
    UnrecognizedProvider(String),
    Path(PathBuf),
}

impl DataAccessValue {
    pub fn classify(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            return DataAccessValue::Default;
        }
        if let Some(provider) = FdsnProvider::from_short_name(raw) {
            return DataAccessValue::Provider(provider);
        }
        if raw.contains("://") {
            if let Ok(url) = Url::parse(raw) {
                if url.scheme() == "file" {
                    if let Ok(path) = url.to_file_path() {
                        return DataAccessValue::Path(path);
                    }
                }
                return DataAccessValue::Url(url);
            }
        }
        if PROVIDER_LIKE.is_match(raw) {
            return DataAccessValue::UnrecognizedProvider(raw.to_string());
        }
        DataAccessValue::Path(PathBuf::from(raw))
    }

    pub fn kind(&self) -> DataAccessKind {
        match self {
            DataAccessValue::Default => DataAccessKind::Default,
            DataAccessValue::Provider(_)
            | DataAccessValue::Url(_)
            | DataAccessValue::UnrecognizedProvider(_) => DataAccessKind::Remote,
            DataAccessValue::Path(_) => DataAccessKind::Local,
        }
    }

    /// Web-service base URL, for providers and explicit URLs.
    pub fn service_url(&self) -> Option<&str> {
        match self {
            DataAccessValue::Provider(p) => Some(p.base_url()),
            DataAccessValue::Url(url) => Some(url.as_str()),
            _ => None,
        }
    }

    pub fn local_path(&self) -> Option<&Path> {
        match self {
            DataAccessValue::Path(p) => Some(p),
            _ => None,
        }
    }

    /// Resolve a local path against `base_dir` and check that it exists.
    ///
    /// Returns `Ok(None)` for values that are not local paths.
    pub fn check_local(&self, base_dir: &Path) -> ispaq_core::Result<Option<PathBuf>> {
        let Some(path) = self.local_path() else {
            return Ok(None);
        };

        let resolved = if path.is_absolute() {
            path.to_path_buf()
        } else {
            base_dir.join(path)
        };

        if resolved.exists() {
            Ok(Some(resolved))
        } else {
            Err(ispaq_core::Error::MissingLocalPath(resolved))
        }
    }
}

/// Parsed `Data_Access` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DataAccessConfig {
    pub(crate) dataselect_url: DataAccessValue,
    pub(crate) station_url: DataAccessValue,
    pub(crate) event_url: DataAccessValue,
    pub(crate) resp_dir: DataAccessValue,
    /// Every key as written, recognized or not.
    pub(crate) settings: SettingsTable,
}

impl DataAccessConfig {
    pub(crate) fn from_settings(settings: SettingsTable) -> Self {
        let classify = |role: DataAccessRole| {
            settings
                .get(role.key())
                .map(DataAccessValue::classify)
                .unwrap_or_default()
        };

        Self {
            dataselect_url: classify(DataAccessRole::Dataselect),
            station_url: classify(DataAccessRole::Station),
            event_url: classify(DataAccessRole::Event),
            resp_dir: classify(DataAccessRole::Resp),
            settings,
        }
    }

    pub fn endpoint(&self, role: DataAccessRole) -> &DataAccessValue {
        match role {
            DataAccessRole::Dataselect => &self.dataselect_url,
            DataAccessRole::Station => &self.station_url,
            DataAccessRole::Event => &self.event_url,
            DataAccessRole::Resp => &self.resp_dir,
        }
    }

    /// The value exactly as written, `Some("")` for an empty entry and `None`
    /// when the key is absent.
    pub fn raw(&self, role: DataAccessRole) -> Option<&str> {
        self.settings.get(role.key())
    }

    /// Directory of local RESP files, when one is configured. Anything else
    /// means responses come from the default evalresp service.
    pub fn resp_dir(&self) -> Option<&Path> {
        self.resp_dir.local_path()
    }

    /// Pass-through value of a key this crate does not interpret.
    pub fn extra(&self, key: &str) -> Option<&str> {
        if DataAccessRole::from_key(key).is_some() {
            return None;
        }
        self.settings.get(key)
    }

    pub fn settings(&self) -> &SettingsTable {
        &self.settings
    }
}
