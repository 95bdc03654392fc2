//! Ordered name registries built up while parsing.

use ispaq_core::Category;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// What to do when a name is defined twice in the same category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// The later definition replaces the earlier one in place.
    #[default]
    LastWins,
    /// The earlier definition is kept, later ones are ignored.
    FirstWins,
    /// Any redefinition is a validation error.
    Error,
}

/// Result of inserting into a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    Replaced,
    Ignored,
}

fn upsert<T>(
    entries: &mut Vec<T>,
    index: &mut HashMap<String, usize>,
    name: &str,
    item: T,
    policy: DuplicatePolicy,
) -> InsertOutcome {
    match index.get(name) {
        Some(&i) => match policy {
            DuplicatePolicy::LastWins => {
                entries[i] = item;
                InsertOutcome::Replaced
            }
            DuplicatePolicy::FirstWins | DuplicatePolicy::Error => InsertOutcome::Ignored,
        },
        None => {
            index.insert(name.to_string(), entries.len());
            entries.push(item);
            InsertOutcome::Inserted
        }
    }
}

/// A named, ordered list of metric names or SNCL patterns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasEntry {
    pub name: String,
    pub tokens: Vec<String>,
}

impl AliasEntry {
    pub fn new(name: impl Into<String>, tokens: Vec<String>) -> Self {
        Self {
            name: name.into(),
            tokens,
        }
    }

    /// Split a list value on commas, trimming tokens and dropping empty ones.
    pub fn split_tokens(value: &str) -> Vec<String> {
        value
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Renders the entry as an indented preference file line. A literal `#` is
/// written as `\#` so it is not read back as a comment.
impl fmt::Display for AliasEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tokens: Vec<String> = self.tokens.iter().map(|t| escape_hash(t)).collect();
        write!(f, "  {}: {}", escape_hash(&self.name), tokens.join(", "))
    }
}

fn escape_hash(text: &str) -> String {
    text.replace('#', "\\#")
}

/// Aliases of one category, in definition order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AliasRegistry {
    category: Category,
    entries: Vec<AliasEntry>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl AliasRegistry {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn insert(&mut self, entry: AliasEntry, policy: DuplicatePolicy) -> InsertOutcome {
        let name = entry.name.clone();
        upsert(&mut self.entries, &mut self.index, &name, entry, policy)
    }

    pub fn get(&self, name: &str) -> Option<&AliasEntry> {
        self.index.get(name).map(|&i| &self.entries[i])
    }

    /// Token list of the named alias.
    pub fn resolve(&self, name: &str) -> Option<&[String]> {
        self.get(name).map(|e| e.tokens.as_slice())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AliasEntry> {
        self.entries.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A single scalar `key: value` setting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Setting {
    pub key: String,
    pub value: String,
}

/// Scalar settings of one category, in definition order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SettingsTable {
    entries: Vec<Setting>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl SettingsTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
        policy: DuplicatePolicy,
    ) -> InsertOutcome {
        let setting = Setting {
            key: key.into(),
            value: value.into(),
        };
        let key = setting.key.clone();
        upsert(&mut self.entries, &mut self.index, &key, setting, policy)
    }

    /// Raw value of a key. A key written with nothing after the colon yields
    /// `Some("")`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.index.get(key).map(|&i| self.entries[i].value.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Setting> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_split_tokens_trims_and_keeps_order() {
        assert_eq!(
            AliasEntry::split_tokens(" b , a,  b ,c "),
            tokens(&["b", "a", "b", "c"])
        );
        assert!(AliasEntry::split_tokens(" , ,").is_empty());
        assert!(AliasEntry::split_tokens("").is_empty());
    }

    #[test]
    fn test_last_wins_keeps_position() {
        let mut reg = AliasRegistry::new(Category::Metrics);
        reg.insert(AliasEntry::new("a", tokens(&["x"])), DuplicatePolicy::LastWins);
        reg.insert(AliasEntry::new("b", tokens(&["y"])), DuplicatePolicy::LastWins);
        let outcome = reg.insert(AliasEntry::new("a", tokens(&["z"])), DuplicatePolicy::LastWins);

        assert_eq!(outcome, InsertOutcome::Replaced);
        assert_eq!(reg.names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(reg.resolve("a"), Some(&tokens(&["z"])[..]));
    }

    #[test]
    fn test_first_wins_and_error_keep_original() {
        for policy in [DuplicatePolicy::FirstWins, DuplicatePolicy::Error] {
            let mut reg = AliasRegistry::new(Category::StationSncls);
            reg.insert(AliasEntry::new("a", tokens(&["x"])), policy);
            let outcome = reg.insert(AliasEntry::new("a", tokens(&["z"])), policy);

            assert_eq!(outcome, InsertOutcome::Ignored);
            assert_eq!(reg.len(), 1);
            assert_eq!(reg.resolve("a"), Some(&tokens(&["x"])[..]));
        }
    }

    #[test]
    fn test_settings_empty_value_is_present() {
        let mut table = SettingsTable::new();
        table.insert("resp_dir", "", DuplicatePolicy::LastWins);

        assert!(table.contains("resp_dir"));
        assert_eq!(table.get("resp_dir"), Some(""));
        assert_eq!(table.get("event_url"), None);
    }

    #[test]
    fn test_entry_display_is_parseable_line() {
        let entry = AliasEntry::new("numSpikes", tokens(&["IU.RAO.10.BH?", "IM.TX31..BH?"]));
        assert_eq!(entry.to_string(), "  numSpikes: IU.RAO.10.BH?, IM.TX31..BH?");
    }

    #[test]
    fn test_entry_display_escapes_hash() {
        let entry = AliasEntry::new("tagged#2", tokens(&["a#1", "b"]));
        assert_eq!(entry.to_string(), r"  tagged\#2: a\#1, b");
        assert_eq!(
            crate::normalize::strip_comment(&entry.to_string()),
            "  tagged#2: a#1, b"
        );
    }
}
