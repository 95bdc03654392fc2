//! `Preferences` section: output locations and formatting.

use crate::registry::SettingsTable;
use chrono::{NaiveDateTime, TimeDelta};
use ispaq_core::SnclFormat;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::warn;

pub const CSV_DIR: &str = "csv_dir";
pub const PNG_DIR: &str = "png_dir";
pub const SIGFIGS: &str = "sigfigs";
pub const SNCL_FORMAT: &str = "sncl_format";

pub const DEFAULT_SIGFIGS: u32 = 6;

/// Parsed `Preferences` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreferencesConfig {
    pub(crate) csv_dir: PathBuf,
    pub(crate) png_dir: PathBuf,
    pub(crate) sigfigs: u32,
    pub(crate) sncl_format: SnclFormat,
    /// Every key as written, recognized or not.
    pub(crate) settings: SettingsTable,
}

impl Default for PreferencesConfig {
    fn default() -> Self {
        Self {
            csv_dir: PathBuf::from("."),
            png_dir: PathBuf::from("."),
            sigfigs: DEFAULT_SIGFIGS,
            sncl_format: SnclFormat::CANONICAL,
            settings: SettingsTable::new(),
        }
    }
}

impl PreferencesConfig {
    pub fn csv_dir(&self) -> &Path {
        &self.csv_dir
    }

    pub fn png_dir(&self) -> &Path {
        &self.png_dir
    }

    pub fn sigfigs(&self) -> u32 {
        self.sigfigs
    }

    pub fn sncl_format(&self) -> SnclFormat {
        self.sncl_format
    }

    /// Raw value of any key in the section, recognized or pass-through.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.settings.get(key)
    }

    /// Typed value of a key, falling back to `default` when the key is absent,
    /// empty, or does not parse.
    pub fn get_or<T: FromStr>(&self, key: &str, default: T) -> T {
        match self.settings.get(key) {
            None | Some("") => default,
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                warn!(key, value = raw, "preference value does not parse, using default");
                default
            }),
        }
    }

    pub fn settings(&self) -> &SettingsTable {
        &self.settings
    }

    /// Base name shared by the CSV files of one run:
    /// `<metricSet>_<snclSet>_<startDate>`, followed by `_<endDate>` when the
    /// last included second falls on a later day than the start.
    ///
    /// `end` is exclusive. When `end` is the earliest representable time the
    /// end date is left off.
    pub fn file_base_name(
        metric_set: &str,
        sncl_set: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> String {
        let start_date = start.date();
        let mut name = format!("{metric_set}_{sncl_set}_{start_date}");

        let inclusive_end = end
            .checked_sub_signed(TimeDelta::seconds(1))
            .map(|t| t.date());
        if let Some(date) = inclusive_end.filter(|d| *d != start_date) {
            name.push_str(&format!("_{date}"));
        }
        name
    }

    /// Path of a CSV output file inside `csv_dir`, e.g.
    /// `<csv_dir>/basicStats_IU_2013-06-01_simpleMetrics.csv`.
    pub fn csv_file(
        &self,
        metric_set: &str,
        sncl_set: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
        suffix: &str,
    ) -> PathBuf {
        let base = Self::file_base_name(metric_set, sncl_set, start, end);
        self.csv_dir.join(format!("{base}_{suffix}.csv"))
    }
}
