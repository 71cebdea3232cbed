use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

impl ConfigValue {
    pub fn text(raw: impl Into<String>) -> Self {
        Self::Text(raw.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(raw) => Some(raw),
            Self::Bool(_) | Self::Number(_) => None,
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(raw) => raw.trim().is_empty(),
            Self::Bool(_) | Self::Number(_) => false,
        }
    }

    pub fn is_numeric(&self) -> bool {
        match self {
            Self::Number(_) => true,
            Self::Text(raw) => raw.trim().parse::<f64>().is_ok_and(f64::is_finite),
            Self::Bool(_) => false,
        }
    }

    pub fn is_boolean(&self) -> bool {
        match self {
            Self::Bool(_) => true,
            Self::Text(raw) => matches!(raw.trim(), "true" | "false"),
            Self::Number(_) => false,
        }
    }
}

impl std::fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(value) => value.fmt(f),
            Self::Number(value) => value.fmt(f),
            Self::Text(value) => value.fmt(f),
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

/// Field key to value mapping for one action or reaction.
///
/// Keys outside the kind's field specs are kept but ignored by validation.
/// Placeholder tokens in text values are stored verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Config(BTreeMap<String, ConfigValue>);

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<ConfigValue>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.0.get(key)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(ConfigValue::as_text)
    }

    /// Non-blank value for `key`, rendered as text.
    pub fn present(&self, key: &str) -> Option<String> {
        self.get(key)
            .filter(|value| !value.is_blank())
            .map(|value| value.to_string().trim().to_string())
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ConfigValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<ConfigValue> {
        self.0.remove(key)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<'de> Deserialize<'de> for Config {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<String, Option<ConfigValue>>::deserialize(deserializer)?;
        Ok(Self(
            raw.into_iter()
                .filter_map(|(key, value)| value.map(|value| (key, value)))
                .collect(),
        ))
    }
}

/// Parses `key=value` pairs as entered on the command line.
pub fn parse_config_pairs<I, S>(pairs: I) -> Result<Config, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut config = Config::new();
    for raw in pairs {
        let raw = raw.as_ref();
        let (key, value) = raw
            .split_once('=')
            .ok_or_else(|| format!("config entry `{raw}` must use key=value"))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(format!("config entry `{raw}` has an empty key"));
        }
        config.set(key, ConfigValue::text(value));
    }
    Ok(config)
}
