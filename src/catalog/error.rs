use super::Role;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("unknown service `{service}`")]
    UnknownService { service: String },
    #[error("unknown {role} `{kind}` for service `{service}`")]
    UnknownServiceOrKind {
        service: String,
        kind: String,
        role: Role,
    },
    #[error("invalid catalog document: {0}")]
    InvalidDocument(String),
}
