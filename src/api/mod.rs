use crate::area::{Area, AreaDraft, AreaUpdate};
use crate::catalog::{AboutDocument, DynamicSource};
use crate::shared::ids::{AreaId, UserId};
use crate::validation::OptionEntry;

pub mod client;

pub use client::{ApiClient, ServiceConnection};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("api request to {endpoint} failed: {reason}")]
    Request { endpoint: String, reason: String },
    #[error("api responded with status {status} for {endpoint}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },
    #[error("failed to decode api response from {endpoint}: {reason}")]
    Decode { endpoint: String, reason: String },
    #[error("failed to encode api request for {endpoint}: {source}")]
    Encode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("{source_name} listing requires `{field}` to be chosen first")]
    MissingScope {
        source_name: &'static str,
        field: &'static str,
    },
}

/// Rule persistence, scoped to one authenticated user.
pub trait AreaStore {
    fn create_area(&self, user: &UserId, draft: &AreaDraft) -> Result<Area, ApiError>;
    fn list_areas(&self, user: &UserId) -> Result<Vec<Area>, ApiError>;
    fn update_area(&self, user: &UserId, id: &AreaId, update: &AreaUpdate)
        -> Result<Area, ApiError>;
    fn set_area_enabled(&self, user: &UserId, id: &AreaId, enabled: bool)
        -> Result<Area, ApiError>;
    fn delete_area(&self, user: &UserId, id: &AreaId) -> Result<(), ApiError>;
}

/// Idempotent reads behind enumerated fields.
pub trait OptionSource {
    /// `scope` carries the value the listing depends on (the guild for channels).
    fn fetch_options(
        &self,
        source: DynamicSource,
        scope: Option<&str>,
    ) -> Result<Vec<OptionEntry>, ApiError>;
}

pub trait CatalogSource {
    fn fetch_about(&self) -> Result<AboutDocument, ApiError>;
}
