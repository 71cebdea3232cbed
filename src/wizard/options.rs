use crate::catalog::{DynamicSource, FieldSpec, Role};
use crate::validation::{Config, OptionEntry, ResolvedOptions};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OptionsState {
    #[default]
    NotRequested,
    Loading,
    /// An empty list means "not yet configurable", not an error.
    Ready(Vec<OptionEntry>),
    Failed(String),
}

/// Handle for one in-flight listing fetch.
///
/// Results are only applied while the ticket's generation is still current.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionsTicket {
    pub role: Role,
    pub source: DynamicSource,
    pub scope: Option<String>,
    generation: u64,
}

#[derive(Debug, Clone, Default)]
struct Entry {
    state: OptionsState,
    generation: u64,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct OptionsTracker {
    entries: BTreeMap<(Role, DynamicSource), Entry>,
    next_generation: u64,
}

fn scope_for(source: DynamicSource, config: &Config) -> Option<Option<String>> {
    match source.depends_on() {
        None => Some(None),
        Some(key) => config.present(key).map(Some),
    }
}

impl OptionsTracker {
    fn bump(&mut self) -> u64 {
        self.next_generation += 1;
        self.next_generation
    }

    pub(crate) fn state(&self, role: Role, source: DynamicSource) -> &OptionsState {
        static NOT_REQUESTED: OptionsState = OptionsState::NotRequested;
        self.entries
            .get(&(role, source))
            .map(|entry| &entry.state)
            .unwrap_or(&NOT_REQUESTED)
    }

    /// Forgets every listing of `role`; in-flight results for it become stale.
    pub(crate) fn reset_role(&mut self, role: Role) {
        self.entries.retain(|(r, _), _| *r != role);
        self.bump();
    }

    pub(crate) fn reset_source(&mut self, role: Role, source: DynamicSource) {
        self.entries.remove(&(role, source));
        self.bump();
    }

    pub(crate) fn reset_all(&mut self) {
        self.entries.clear();
        self.bump();
    }

    fn issue(&mut self, role: Role, source: DynamicSource, scope: Option<String>) -> OptionsTicket {
        let generation = self.bump();
        self.entries.insert(
            (role, source),
            Entry {
                state: OptionsState::Loading,
                generation,
            },
        );
        OptionsTicket {
            role,
            source,
            scope,
            generation,
        }
    }

    /// Tickets for listings the fields need and have not requested yet.
    pub(crate) fn pending(
        &mut self,
        role: Role,
        fields: &[FieldSpec],
        config: &Config,
    ) -> Vec<OptionsTicket> {
        let mut tickets = Vec::new();
        for source in fields.iter().filter_map(|field| field.source) {
            if tickets.iter().any(|t: &OptionsTicket| t.source == source) {
                continue;
            }
            if *self.state(role, source) != OptionsState::NotRequested {
                continue;
            }
            let Some(scope) = scope_for(source, config) else {
                continue;
            };
            tickets.push(self.issue(role, source, scope));
        }
        tickets
    }

    pub(crate) fn retry(
        &mut self,
        role: Role,
        source: DynamicSource,
        config: &Config,
    ) -> Option<OptionsTicket> {
        let scope = scope_for(source, config)?;
        Some(self.issue(role, source, scope))
    }

    /// Returns `false` when the ticket is stale and the result was dropped.
    pub(crate) fn apply(&mut self, ticket: &OptionsTicket, state: OptionsState) -> bool {
        match self.entries.get_mut(&(ticket.role, ticket.source)) {
            Some(entry)
                if entry.generation == ticket.generation
                    && entry.state == OptionsState::Loading =>
            {
                entry.state = state;
                true
            }
            _ => false,
        }
    }

    pub(crate) fn resolved(&self, role: Role, fields: &[FieldSpec]) -> ResolvedOptions {
        let mut resolved = ResolvedOptions::new();
        for field in fields {
            let Some(source) = field.source else {
                continue;
            };
            if let OptionsState::Ready(entries) = self.state(role, source) {
                resolved.insert(field.key, entries.clone());
            }
        }
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ValueKind;

    const FIELDS: &[FieldSpec] = &[
        FieldSpec::new("guildId", "Server", ValueKind::ShortText)
            .from_source(DynamicSource::DiscordGuilds),
        FieldSpec::new("channelId", "Channel", ValueKind::ShortText)
            .from_source(DynamicSource::DiscordChannels),
    ];

    #[test]
    fn dependent_listing_waits_for_its_scope() {
        let mut tracker = OptionsTracker::default();
        let tickets = tracker.pending(Role::Action, FIELDS, &Config::new());
        assert_eq!(tickets.len(), 1);
        assert_eq!(tickets[0].source, DynamicSource::DiscordGuilds);

        let config = Config::from_pairs([("guildId", "42")]);
        let tickets = tracker.pending(Role::Action, FIELDS, &config);
        assert_eq!(tickets.len(), 1);
        assert_eq!(tickets[0].scope.as_deref(), Some("42"));
        assert!(tracker.pending(Role::Action, FIELDS, &config).is_empty());
    }

    #[test]
    fn stale_tickets_are_dropped_after_reset() {
        let mut tracker = OptionsTracker::default();
        let ticket = tracker.pending(Role::Reaction, FIELDS, &Config::new()).remove(0);
        tracker.reset_role(Role::Reaction);
        assert!(!tracker.apply(&ticket, OptionsState::Ready(Vec::new())));
        assert_eq!(
            *tracker.state(Role::Reaction, DynamicSource::DiscordGuilds),
            OptionsState::NotRequested
        );
    }

    #[test]
    fn ready_lists_feed_resolved_options() {
        let mut tracker = OptionsTracker::default();
        let ticket = tracker.pending(Role::Action, FIELDS, &Config::new()).remove(0);
        assert!(tracker.apply(
            &ticket,
            OptionsState::Ready(vec![OptionEntry::new("42", "guild")])
        ));
        let resolved = tracker.resolved(Role::Action, FIELDS);
        assert_eq!(resolved.get("guildId").map(<[OptionEntry]>::len), Some(1));
        assert!(resolved.get("channelId").is_none());
    }
}
