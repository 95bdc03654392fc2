//! SNCL (Network.Station.Location.Channel) field ordering.
//!
//! A preference file declares the order in which the four fields appear in
//! its SNCL aliases and in local miniSEED file names, e.g. `N.S.L.C` or
//! `S.N.L.C`. Patterns are split on `.` and mapped to fields in that order.
//! Wildcards (`*`, `?`) are carried through untouched; nothing here expands
//! them.

use crate::{Error, Result};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the four SNCL fields, written as its initial letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum SnclField {
    #[display("N")]
    Network,
    #[display("S")]
    Station,
    #[display("L")]
    Location,
    #[display("C")]
    Channel,
}

impl SnclField {
    fn from_letter(letter: &str) -> Option<Self> {
        match letter {
            "N" => Some(SnclField::Network),
            "S" => Some(SnclField::Station),
            "L" => Some(SnclField::Location),
            "C" => Some(SnclField::Channel),
            _ => None,
        }
    }
}

/// Field order of a `sncl_format` preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SnclFormat([SnclField; 4]);

impl SnclFormat {
    pub const CANONICAL: SnclFormat = SnclFormat([
        SnclField::Network,
        SnclField::Station,
        SnclField::Location,
        SnclField::Channel,
    ]);

    pub fn fields(&self) -> &[SnclField; 4] {
        &self.0
    }

    /// Split a dotted pattern written in this order into its fields.
    ///
    /// Empty fields are allowed (a blank location code is common), but there
    /// must be exactly four of them.
    pub fn split(&self, pattern: &str) -> Result<SnclPattern> {
        let parts: Vec<&str> = pattern.split('.').collect();
        if parts.len() != 4 {
            return Err(Error::InvalidSnclPattern(pattern.to_string()));
        }

        let mut sncl = SnclPattern::default();
        for (field, part) in self.0.iter().zip(parts) {
            *sncl.field_mut(*field) = part.to_string();
        }
        Ok(sncl)
    }

    /// Render a pattern in this order.
    pub fn join(&self, sncl: &SnclPattern) -> String {
        self.0
            .iter()
            .map(|f| sncl.field(*f))
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl Default for SnclFormat {
    fn default() -> Self {
        Self::CANONICAL
    }
}

impl fmt::Display for SnclFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.0;
        write!(f, "{a}.{b}.{c}.{d}")
    }
}

impl FromStr for SnclFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidSnclFormat(s.to_string());

        let parts: Vec<&str> = s.split('.').collect();
        if parts.len() != 4 {
            return Err(invalid());
        }

        let mut fields = [SnclField::Network; 4];
        for (slot, part) in fields.iter_mut().zip(&parts) {
            *slot = SnclField::from_letter(part).ok_or_else(invalid)?;
        }

        for (i, field) in fields.iter().enumerate() {
            if fields[i + 1..].contains(field) {
                return Err(invalid());
            }
        }

        Ok(Self(fields))
    }
}

impl Serialize for SnclFormat {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SnclFormat {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A SNCL pattern split into its four fields. Fields may hold wildcards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SnclPattern {
    pub network: String,
    pub station: String,
    pub location: String,
    pub channel: String,
}

impl SnclPattern {
    pub fn field(&self, field: SnclField) -> &str {
        match field {
            SnclField::Network => &self.network,
            SnclField::Station => &self.station,
            SnclField::Location => &self.location,
            SnclField::Channel => &self.channel,
        }
    }

    fn field_mut(&mut self, field: SnclField) -> &mut String {
        match field {
            SnclField::Network => &mut self.network,
            SnclField::Station => &mut self.station,
            SnclField::Location => &mut self.location,
            SnclField::Channel => &mut self.channel,
        }
    }

    /// Whether any field contains a `*` or `?` wildcard.
    pub fn has_wildcards(&self) -> bool {
        [&self.network, &self.station, &self.location, &self.channel]
            .iter()
            .any(|f| f.contains(['*', '?']))
    }
}

impl fmt::Display for SnclPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&SnclFormat::CANONICAL.join(self))
    }
}
