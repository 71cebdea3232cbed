use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    ShortText,
    LongText,
    Email,
    Numeric,
    Choice,
    Boolean,
}

impl ValueKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ShortText => "short_text",
            Self::LongText => "long_text",
            Self::Email => "email",
            Self::Numeric => "numeric",
            Self::Choice => "choice",
            Self::Boolean => "boolean",
        }
    }
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Backend listing that supplies the options of an enumerated field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DynamicSource {
    GithubRepositories,
    DiscordGuilds,
    DiscordChannels,
}

impl DynamicSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GithubRepositories => "github_repositories",
            Self::DiscordGuilds => "discord_guilds",
            Self::DiscordChannels => "discord_channels",
        }
    }

    /// Config key whose value scopes this listing, if any.
    pub fn depends_on(self) -> Option<&'static str> {
        match self {
            Self::DiscordChannels => Some("guildId"),
            Self::GithubRepositories | Self::DiscordGuilds => None,
        }
    }
}

impl std::fmt::Display for DynamicSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub required: bool,
    pub kind: ValueKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<DynamicSource>,
}

impl FieldSpec {
    pub const fn new(key: &'static str, label: &'static str, kind: ValueKind) -> Self {
        Self {
            key,
            label,
            required: true,
            kind,
            source: None,
        }
    }

    pub const fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub const fn from_source(mut self, source: DynamicSource) -> Self {
        self.kind = ValueKind::Choice;
        self.source = Some(source);
        self
    }
}
