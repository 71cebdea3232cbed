use crate::shared::ids::{KindName, ServiceName};
use crate::shared::logging::EventLog;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub mod about;
pub mod builtin;
pub mod error;
pub mod fields;

pub use about::{AboutDocument, AboutKind, AboutService};
pub use builtin::{builtin_kind, BuiltinKind, BUILTIN_KINDS, BUILTIN_SERVICES};
pub use error::CatalogError;
pub use fields::{DynamicSource, FieldSpec, ValueKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Action,
    Reaction,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Action => "action",
            Self::Reaction => "reaction",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, String> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "action" => Ok(Self::Action),
            "reaction" => Ok(Self::Reaction),
            _ => Err("role must be one of: action, reaction".to_string()),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KindDescriptor {
    pub name: KindName,
    pub description: String,
    pub fields: &'static [FieldSpec],
    pub placeholders: &'static [&'static str],
}

impl KindDescriptor {
    fn from_builtin(def: &BuiltinKind) -> Result<Self, CatalogError> {
        Ok(Self {
            name: KindName::parse(def.name).map_err(CatalogError::InvalidDocument)?,
            description: def.description.to_string(),
            fields: def.fields,
            placeholders: def.placeholders,
        })
    }

    pub fn needs_configuration(&self) -> bool {
        !self.fields.is_empty()
    }

    pub fn dynamic_sources(&self) -> impl Iterator<Item = DynamicSource> + '_ {
        self.fields.iter().filter_map(|field| field.source)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Service {
    pub name: ServiceName,
    pub actions: Vec<KindDescriptor>,
    pub reactions: Vec<KindDescriptor>,
}

impl Service {
    pub fn kinds(&self, role: Role) -> &[KindDescriptor] {
        match role {
            Role::Action => &self.actions,
            Role::Reaction => &self.reactions,
        }
    }

    pub fn kind(&self, role: Role, kind: &str) -> Option<&KindDescriptor> {
        self.kinds(role).iter().find(|k| k.name.as_str() == kind)
    }
}

/// Immutable registry of services, their action/reaction kinds and field specs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CapabilityCatalog {
    services: Vec<Service>,
}

impl CapabilityCatalog {
    /// Every service and kind this crate knows field specs for.
    pub fn builtin() -> Self {
        let services = BUILTIN_SERVICES
            .iter()
            .filter_map(|service| {
                let name = ServiceName::parse(service).ok()?;
                let collect = |role| {
                    builtin::builtin_kinds_for(service, role)
                        .filter_map(|def| KindDescriptor::from_builtin(def).ok())
                        .collect::<Vec<_>>()
                };
                Some(Service {
                    name,
                    actions: collect(Role::Action),
                    reactions: collect(Role::Reaction),
                })
            })
            .collect();
        Self { services }
    }

    /// Builds the catalog from the server listing, preserving its order.
    ///
    /// Known kinds receive builtin field specs. Kinds the crate has never
    /// heard of get no fields and fall back to permissive validation.
    /// Entries whose name cannot be used as an identifier are skipped and
    /// logged as `catalog.entry_skipped`.
    pub fn from_about(doc: &AboutDocument, log: &EventLog) -> Self {
        let mut services = Vec::new();
        let mut seen_services = HashSet::new();
        for raw_service in &doc.services {
            let name = match parse_document_name(&raw_service.name, ServiceName::parse) {
                Ok(name) => name,
                Err(reason) => {
                    log.warn(
                        "catalog.entry_skipped",
                        &format!("service `{}`: {reason}", raw_service.name),
                    );
                    continue;
                }
            };
            if !seen_services.insert(name.clone()) {
                continue;
            }
            let actions = kinds_from_about(&name, Role::Action, &raw_service.actions, log);
            let reactions = kinds_from_about(&name, Role::Reaction, &raw_service.reactions, log);
            services.push(Service {
                name,
                actions,
                reactions,
            });
        }
        Self { services }
    }

    pub fn list_services(&self) -> &[Service] {
        &self.services
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    pub fn service(&self, name: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.name.as_str() == name)
    }

    pub fn kind(&self, service: &str, kind: &str, role: Role) -> Result<&KindDescriptor, CatalogError> {
        self.service(service)
            .and_then(|s| s.kind(role, kind))
            .ok_or_else(|| CatalogError::UnknownServiceOrKind {
                service: service.to_string(),
                kind: kind.to_string(),
                role,
            })
    }

    /// Ordered field specs for `(service, kind, role)`; empty when no configuration is needed.
    pub fn field_specs_for(
        &self,
        service: &str,
        kind: &str,
        role: Role,
    ) -> Result<&'static [FieldSpec], CatalogError> {
        self.kind(service, kind, role).map(|k| k.fields)
    }
}

fn parse_document_name<T>(raw: &str, parse: fn(&str) -> Result<T, String>) -> Result<T, String> {
    parse(&raw.trim().to_ascii_lowercase())
}

fn kinds_from_about(
    service: &ServiceName,
    role: Role,
    raw_kinds: &[AboutKind],
    log: &EventLog,
) -> Vec<KindDescriptor> {
    let mut kinds = Vec::new();
    let mut seen = HashSet::new();
    for raw in raw_kinds {
        let name = match parse_document_name(&raw.name, KindName::parse) {
            Ok(name) => name,
            Err(reason) => {
                log.warn(
                    "catalog.entry_skipped",
                    &format!("{role} `{}` of service `{service}`: {reason}", raw.name),
                );
                continue;
            }
        };
        if !seen.insert(name.clone()) {
            continue;
        }
        let builtin = builtin_kind(service.as_str(), name.as_str(), role);
        let description = if raw.description.trim().is_empty() {
            builtin
                .map(|def| def.description.to_string())
                .unwrap_or_default()
        } else {
            raw.description.trim().to_string()
        };
        kinds.push(KindDescriptor {
            name,
            description,
            fields: builtin.map(|def| def.fields).unwrap_or(&[]),
            placeholders: builtin.map(|def| def.placeholders).unwrap_or(&[]),
        });
    }
    kinds
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_lists_services_in_declared_order() {
        let catalog = CapabilityCatalog::builtin();
        let names: Vec<&str> = catalog
            .list_services()
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, vec!["github", "discord", "spotify", "google", "timer"]);
    }

    #[test]
    fn field_specs_are_empty_for_kinds_without_configuration() {
        let catalog = CapabilityCatalog::builtin();
        assert!(catalog
            .field_specs_for("spotify", "new_liked_track", Role::Action)
            .expect("known kind")
            .is_empty());
        assert!(catalog
            .field_specs_for("timer", "every_hour", Role::Action)
            .expect("known kind")
            .is_empty());
    }

    #[test]
    fn lookup_distinguishes_roles() {
        let catalog = CapabilityCatalog::builtin();
        let err = catalog
            .field_specs_for("github", "create_issue", Role::Action)
            .expect_err("create_issue is a reaction");
        assert_eq!(
            err,
            CatalogError::UnknownServiceOrKind {
                service: "github".to_string(),
                kind: "create_issue".to_string(),
                role: Role::Action,
            }
        );
    }

    #[test]
    fn from_about_keeps_server_order_and_tolerates_unknown_kinds() {
        let doc: AboutDocument = serde_json::from_str(
            r#"{"services":[
                {"name":"Timer","actions":[{"name":"every_hour"},{"name":"every_full_moon","description":"lunar"}]},
                {"name":"github","reactions":[{"name":"create_issue","description":"server text"}]},
                {"name":"github","reactions":[]}
            ]}"#,
        )
        .expect("parse about");
        let catalog = CapabilityCatalog::from_about(&doc, &EventLog::disabled());

        assert_eq!(catalog.list_services().len(), 2);
        assert_eq!(catalog.list_services()[0].name.as_str(), "timer");
        let moon = catalog
            .kind("timer", "every_full_moon", Role::Action)
            .expect("server-declared kind");
        assert!(moon.fields.is_empty());
        assert_eq!(moon.description, "lunar");

        let every_hour = catalog
            .kind("timer", "every_hour", Role::Action)
            .expect("known kind");
        assert_eq!(every_hour.description, "Fires at the start of every hour");

        let create_issue = catalog
            .kind("github", "create_issue", Role::Reaction)
            .expect("known kind");
        assert_eq!(create_issue.description, "server text");
        assert_eq!(create_issue.fields.len(), 5);
    }

    #[test]
    fn from_about_skips_unusable_names_and_keeps_the_rest() {
        let dir = tempfile::tempdir().expect("tempdir");
        let log_path = dir.path().join("areaboard.log");
        let doc: AboutDocument = serde_json::from_str(
            r#"{"services":[
                {"name":"github","reactions":[{"name":"create_issue"}]},
                {"name":"timer","actions":[{"name":"every hour"},{"name":"every_day"}]},
                {"name":"bad name","actions":[{"name":"anything"}]}
            ]}"#,
        )
        .expect("parse about");
        let catalog = CapabilityCatalog::from_about(&doc, &EventLog::to_file(&log_path));

        let names: Vec<&str> = catalog
            .list_services()
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, vec!["github", "timer"]);
        assert_eq!(
            catalog
                .field_specs_for("github", "create_issue", Role::Reaction)
                .expect("known kind")
                .len(),
            5
        );
        let timer_actions: Vec<&str> = catalog
            .service("timer")
            .expect("timer")
            .kinds(Role::Action)
            .iter()
            .map(|k| k.name.as_str())
            .collect();
        assert_eq!(timer_actions, vec!["every_day"]);

        let raw = std::fs::read_to_string(&log_path).expect("read log");
        let skipped: Vec<serde_json::Value> = raw
            .lines()
            .map(|line| serde_json::from_str(line).expect("json line"))
            .collect();
        assert_eq!(skipped.len(), 2);
        assert!(skipped
            .iter()
            .all(|entry| entry["event"] == "catalog.entry_skipped" && entry["level"] == "warn"));
        assert!(skipped[0]["message"]
            .as_str()
            .is_some_and(|m| m.contains("every hour")));
    }

    #[test]
    fn discord_channel_watch_declares_dynamic_sources() {
        let catalog = CapabilityCatalog::builtin();
        let kind = catalog
            .kind("discord", "message_posted_in_channel", Role::Action)
            .expect("known kind");
        let sources: Vec<DynamicSource> = kind.dynamic_sources().collect();
        assert_eq!(
            sources,
            vec![DynamicSource::DiscordGuilds, DynamicSource::DiscordChannels]
        );
    }
}
