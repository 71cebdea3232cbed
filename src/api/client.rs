use super::{ApiError, AreaStore, CatalogSource, OptionSource};
use crate::area::{Area, AreaDraft, AreaUpdate};
use crate::catalog::{AboutDocument, DynamicSource};
use crate::config::Settings;
use crate::shared::ids::{AreaId, ServiceName, UserId};
use crate::validation::OptionEntry;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ApiClient {
    agent: ureq::Agent,
    api_base: String,
    auth_token: Option<String>,
}

/// Connection status of one service for the signed-in account.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServiceConnection {
    pub service: ServiceName,
    #[serde(default)]
    pub connected: bool,
}

impl ApiClient {
    pub fn new(settings: &Settings) -> Self {
        Self::with_base(
            &settings.api_base_url,
            settings.auth_token.clone(),
            settings.request_timeout(),
        )
    }

    pub fn with_base(api_base: &str, auth_token: Option<String>, timeout: Duration) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
            api_base: api_base.trim().trim_end_matches('/').to_string(),
            auth_token: auth_token.filter(|token| !token.trim().is_empty()),
        }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> String {
        let mut url = format!("{}/{}", self.api_base, path.trim_start_matches('/'));
        if !query.is_empty() {
            let encoded = query
                .iter()
                .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
                .collect::<Vec<_>>()
                .join("&");
            url = format!("{url}?{encoded}");
        }
        url
    }

    fn request(&self, method: &str, url: &str) -> ureq::Request {
        let request = self
            .agent
            .request(method, url)
            .set("Accept", "application/json");
        match &self.auth_token {
            Some(token) => request.set("Authorization", &format!("Bearer {token}")),
            None => request,
        }
    }

    fn send(
        &self,
        method: &str,
        url: &str,
        body: Option<serde_json::Value>,
    ) -> Result<ureq::Response, ApiError> {
        let request = self.request(method, url);
        let result = match body {
            Some(body) => request.send_json(body),
            None => request.call(),
        };
        result.map_err(|err| match err {
            ureq::Error::Status(status, response) => ApiError::Status {
                endpoint: url.to_string(),
                status,
                body: response.into_string().unwrap_or_default(),
            },
            ureq::Error::Transport(transport) => ApiError::Request {
                endpoint: url.to_string(),
                reason: transport.to_string(),
            },
        })
    }

    fn json<T: for<'de> Deserialize<'de>>(
        &self,
        method: &str,
        url: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T, ApiError> {
        self.send(method, url, body)?
            .into_json::<T>()
            .map_err(|e| ApiError::Decode {
                endpoint: url.to_string(),
                reason: e.to_string(),
            })
    }

    fn encode<B: Serialize>(url: &str, body: &B) -> Result<serde_json::Value, ApiError> {
        serde_json::to_value(body).map_err(|source| ApiError::Encode {
            endpoint: url.to_string(),
            source,
        })
    }

    pub fn list_connections(&self) -> Result<Vec<ServiceConnection>, ApiError> {
        let url = self.endpoint("connections", &[]);
        self.json("GET", &url, None)
    }

    pub fn list_github_repositories(&self) -> Result<Vec<OptionEntry>, ApiError> {
        let url = self.endpoint("services/github/repositories", &[]);
        self.json("GET", &url, None)
    }

    pub fn list_discord_guilds(&self) -> Result<Vec<OptionEntry>, ApiError> {
        let url = self.endpoint("services/discord/guilds", &[]);
        self.json("GET", &url, None)
    }

    pub fn list_discord_channels(&self, guild_id: &str) -> Result<Vec<OptionEntry>, ApiError> {
        let path = format!(
            "services/discord/guilds/{}/channels",
            urlencoding::encode(guild_id.trim())
        );
        let url = self.endpoint(&path, &[]);
        self.json("GET", &url, None)
    }
}

impl CatalogSource for ApiClient {
    fn fetch_about(&self) -> Result<AboutDocument, ApiError> {
        let url = self.endpoint("about.json", &[]);
        self.json("GET", &url, None)
    }
}

impl OptionSource for ApiClient {
    fn fetch_options(
        &self,
        source: DynamicSource,
        scope: Option<&str>,
    ) -> Result<Vec<OptionEntry>, ApiError> {
        match source {
            DynamicSource::GithubRepositories => self.list_github_repositories(),
            DynamicSource::DiscordGuilds => self.list_discord_guilds(),
            DynamicSource::DiscordChannels => {
                let guild_id = scope.filter(|v| !v.trim().is_empty()).ok_or(
                    ApiError::MissingScope {
                        source_name: source.as_str(),
                        field: "guildId",
                    },
                )?;
                self.list_discord_channels(guild_id)
            }
        }
    }
}

impl AreaStore for ApiClient {
    fn create_area(&self, user: &UserId, draft: &AreaDraft) -> Result<Area, ApiError> {
        let url = self.endpoint("areas", &[]);
        let mut body = Self::encode(&url, draft)?;
        if let Some(object) = body.as_object_mut() {
            object.insert("userId".to_string(), json!(user.as_str()));
        }
        self.json("POST", &url, Some(body))
    }

    fn list_areas(&self, user: &UserId) -> Result<Vec<Area>, ApiError> {
        let url = self.endpoint("areas", &[("userId", user.as_str())]);
        self.json("GET", &url, None)
    }

    fn update_area(
        &self,
        user: &UserId,
        id: &AreaId,
        update: &AreaUpdate,
    ) -> Result<Area, ApiError> {
        let path = format!("areas/{}", urlencoding::encode(id.as_str()));
        let url = self.endpoint(&path, &[("userId", user.as_str())]);
        let body = Self::encode(&url, update)?;
        self.json("PUT", &url, Some(body))
    }

    fn set_area_enabled(
        &self,
        user: &UserId,
        id: &AreaId,
        enabled: bool,
    ) -> Result<Area, ApiError> {
        let path = format!("areas/{}", urlencoding::encode(id.as_str()));
        let url = self.endpoint(&path, &[("userId", user.as_str())]);
        self.json("PATCH", &url, Some(json!({ "enabled": enabled })))
    }

    fn delete_area(&self, user: &UserId, id: &AreaId) -> Result<(), ApiError> {
        let path = format!("areas/{}", urlencoding::encode(id.as_str()));
        let url = self.endpoint(&path, &[("userId", user.as_str())]);
        self.send("DELETE", &url, None).map(|_| ())
    }
}
