use areaboard::shared::serde_ext::{parse_via_string, string_or_number};
use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Hashtag(String);

impl Hashtag {
    fn parse(raw: &str) -> Result<Self, String> {
        let tag = raw.trim().strip_prefix('#').ok_or("must start with #")?;
        if tag.is_empty() {
            return Err("must name a tag".to_string());
        }
        Ok(Self(tag.to_string()))
    }
}

impl<'de> Deserialize<'de> for Hashtag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        parse_via_string(deserializer, "hashtag", Self::parse)
    }
}

#[derive(Debug, Deserialize)]
struct Listing {
    #[serde(deserialize_with = "listing_id")]
    id: String,
}

fn listing_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    string_or_number(deserializer, "listing id")
}

#[test]
fn shared_serde_ext_module_parses_typed_value_from_string() {
    let parsed: Hashtag = serde_yaml::from_str("\" #release \"").expect("parse hashtag");
    assert_eq!(parsed, Hashtag("release".to_string()));

    let err = serde_yaml::from_str::<Hashtag>("\"release\"").expect_err("missing #");
    assert!(err.to_string().contains("invalid hashtag `release`"));
}

#[test]
fn shared_serde_ext_module_accepts_string_or_number_ids() {
    let numeric: Listing = serde_json::from_str(r#"{"id": 9001}"#).expect("numeric");
    let text: Listing = serde_json::from_str(r#"{"id": "9001"}"#).expect("text");
    assert_eq!(numeric.id, text.id);

    let err = serde_json::from_str::<Listing>(r#"{"id": true}"#).expect_err("bool id");
    assert!(err.to_string().contains("listing id must be a string or number"));
}
