use crate::shared::serde_ext::{parse_via_string, string_or_number};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

pub fn validate_identifier_value(kind: &str, value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err(format!("{kind} must be non-empty"));
    }
    if value
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_')
    {
        return Ok(());
    }
    Err(format!(
        "{kind} must use only ASCII letters, digits, '-' or '_'"
    ))
}

macro_rules! define_id_type {
    ($name:ident, $kind:literal, $validate:expr) => {
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn parse(raw: &str) -> Result<Self, String> {
                let normalized = raw.trim();
                ($validate)($kind, normalized)?;
                Ok(Self(normalized.to_string()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }

        impl std::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                self.as_str()
            }
        }

        impl TryFrom<String> for $name {
            type Error = String;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::parse(&value)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                parse_via_string(deserializer, $kind, Self::parse)
            }
        }
    };
}

fn validate_lowercase_identifier(kind: &str, value: &str) -> Result<(), String> {
    validate_identifier_value(kind, value)?;
    if value.chars().any(|ch| ch.is_ascii_uppercase()) {
        return Err(format!("{kind} must be lowercase"));
    }
    Ok(())
}

fn validate_opaque_value(kind: &str, value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err(format!("{kind} must be non-empty"));
    }
    if value.chars().any(char::is_whitespace) {
        return Err(format!("{kind} must not contain whitespace"));
    }
    Ok(())
}

define_id_type!(ServiceName, "service name", validate_lowercase_identifier);
define_id_type!(KindName, "kind name", validate_lowercase_identifier);
define_id_type!(UserId, "user id", validate_opaque_value);

/// Backend-assigned rule identifier; the wire form may be a string or a number.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct AreaId(String);

impl AreaId {
    pub fn parse(raw: &str) -> Result<Self, String> {
        let normalized = raw.trim();
        validate_opaque_value("area id", normalized)?;
        Ok(Self(normalized.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AreaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl<'de> Deserialize<'de> for AreaId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = string_or_number(deserializer, "area id")?;
        Self::parse(&raw).map_err(|err| D::Error::custom(format!("invalid area id `{raw}`: {err}")))
    }
}
