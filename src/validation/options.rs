use crate::shared::serde_ext::string_or_number;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// One entry of a dynamic listing (repository, guild, channel).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionEntry {
    #[serde(deserialize_with = "deserialize_option_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

fn deserialize_option_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    string_or_number(deserializer, "option id")
}

impl OptionEntry {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    pub fn matches(&self, value: &str) -> bool {
        let value = value.trim();
        self.id == value || (!self.name.is_empty() && self.name == value)
    }
}

/// Already-fetched option lists, keyed by the config field they populate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedOptions {
    by_field: BTreeMap<String, Vec<OptionEntry>>,
}

impl ResolvedOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, entries: Vec<OptionEntry>) {
        self.by_field.insert(field.into(), entries);
    }

    pub fn with(mut self, field: impl Into<String>, entries: Vec<OptionEntry>) -> Self {
        self.insert(field, entries);
        self
    }

    pub fn get(&self, field: &str) -> Option<&[OptionEntry]> {
        self.by_field.get(field).map(Vec::as_slice)
    }

    /// `true` unless a non-empty list for `field` exists and `value` is not in it.
    pub fn admits(&self, field: &str, value: &str) -> bool {
        match self.get(field) {
            Some(entries) if !entries.is_empty() => entries.iter().any(|e| e.matches(value)),
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_entry_accepts_numeric_ids() {
        let entries: Vec<OptionEntry> =
            serde_json::from_str(r#"[{"id": 123, "name": "general"}, {"id": "456"}]"#)
                .expect("parse entries");
        assert_eq!(entries[0].id, "123");
        assert_eq!(entries[1].name, "");
    }

    #[test]
    fn unresolved_or_empty_lists_admit_any_value() {
        let options = ResolvedOptions::new().with("channelId", Vec::new());
        assert!(options.admits("channelId", "999"));
        assert!(options.admits("repo", "anything"));
    }

    #[test]
    fn resolved_lists_match_by_id_or_name() {
        let options =
            ResolvedOptions::new().with("repo", vec![OptionEntry::new("17", "app")]);
        assert!(options.admits("repo", "app"));
        assert!(options.admits("repo", "17"));
        assert!(!options.admits("repo", "other"));
    }
}
