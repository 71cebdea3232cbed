use serde::{Deserialize, Serialize};

/// Capability listing served by the backend `about.json` endpoint.
///
/// Both the flat `{ "services": [...] }` shape and the nested
/// `{ "client": {...}, "server": { "services": [...] } }` shape are accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AboutDocument {
    pub services: Vec<AboutService>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AboutService {
    pub name: String,
    #[serde(default)]
    pub actions: Vec<AboutKind>,
    #[serde(default)]
    pub reactions: Vec<AboutKind>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AboutKind {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
struct RawAboutDocument {
    #[serde(default)]
    services: Option<Vec<AboutService>>,
    #[serde(default)]
    server: Option<RawAboutServer>,
}

#[derive(Debug, Deserialize)]
struct RawAboutServer {
    #[serde(default)]
    services: Vec<AboutService>,
}

impl<'de> Deserialize<'de> for AboutDocument {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawAboutDocument::deserialize(deserializer)?;
        let services = match (raw.services, raw.server) {
            (Some(services), _) => services,
            (None, Some(server)) => server.services,
            (None, None) => Vec::new(),
        };
        Ok(Self { services })
    }
}
