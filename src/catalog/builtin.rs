use super::fields::{DynamicSource, FieldSpec, ValueKind};
use super::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinKind {
    pub service: &'static str,
    pub role: Role,
    pub name: &'static str,
    pub description: &'static str,
    pub fields: &'static [FieldSpec],
    pub placeholders: &'static [&'static str],
}

pub mod service_names {
    pub const GITHUB: &str = "github";
    pub const DISCORD: &str = "discord";
    pub const SPOTIFY: &str = "spotify";
    pub const GOOGLE: &str = "google";
    pub const TIMER: &str = "timer";
}

use service_names::{DISCORD, GITHUB, GOOGLE, SPOTIFY, TIMER};

pub const BUILTIN_SERVICES: [&str; 5] = [GITHUB, DISCORD, SPOTIFY, GOOGLE, TIMER];

const GITHUB_OWNER: FieldSpec = FieldSpec::new("owner", "Repository owner", ValueKind::ShortText);
const GITHUB_REPO: FieldSpec = FieldSpec::new("repo", "Repository", ValueKind::ShortText)
    .from_source(DynamicSource::GithubRepositories);

const GITHUB_REPO_FIELDS: &[FieldSpec] = &[GITHUB_OWNER, GITHUB_REPO];

const GITHUB_PUSH_FIELDS: &[FieldSpec] = &[
    GITHUB_OWNER,
    GITHUB_REPO,
    FieldSpec::new("branch", "Branch", ValueKind::ShortText).optional(),
];

const GITHUB_CREATE_ISSUE_FIELDS: &[FieldSpec] = &[
    GITHUB_OWNER,
    GITHUB_REPO,
    FieldSpec::new("title", "Issue title", ValueKind::ShortText),
    FieldSpec::new("body", "Issue body", ValueKind::LongText).optional(),
    FieldSpec::new("labels", "Labels (comma separated)", ValueKind::ShortText).optional(),
];

const GITHUB_COMMENT_FIELDS: &[FieldSpec] = &[
    GITHUB_OWNER,
    GITHUB_REPO,
    FieldSpec::new("issueNumber", "Issue number", ValueKind::Numeric),
    FieldSpec::new("body", "Comment", ValueKind::LongText),
];

const DISCORD_GUILD: FieldSpec =
    FieldSpec::new("guildId", "Server", ValueKind::ShortText).from_source(DynamicSource::DiscordGuilds);
const DISCORD_CHANNEL: FieldSpec = FieldSpec::new("channelId", "Channel", ValueKind::ShortText)
    .from_source(DynamicSource::DiscordChannels);

const DISCORD_CHANNEL_WATCH_FIELDS: &[FieldSpec] = &[DISCORD_GUILD, DISCORD_CHANNEL];

const DISCORD_GUILD_FIELDS: &[FieldSpec] = &[DISCORD_GUILD];

const DISCORD_SEND_FIELDS: &[FieldSpec] = &[
    DISCORD_GUILD.optional(),
    DISCORD_CHANNEL,
    FieldSpec::new("content", "Message", ValueKind::LongText),
];

const DISCORD_ROLE_FIELDS: &[FieldSpec] = &[
    DISCORD_GUILD,
    FieldSpec::new("userId", "User id", ValueKind::ShortText),
    FieldSpec::new("roleId", "Role id", ValueKind::ShortText),
];

const DISCORD_DM_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("userId", "User id", ValueKind::ShortText),
    FieldSpec::new("content", "Message", ValueKind::LongText),
];

const GOOGLE_EMAIL_WATCH_FIELDS: &[FieldSpec] =
    &[FieldSpec::new("from", "Only from sender", ValueKind::Email).optional()];

const GOOGLE_SEND_EMAIL_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("to", "Recipient", ValueKind::Email),
    FieldSpec::new("subject", "Subject", ValueKind::ShortText),
    FieldSpec::new("body", "Body", ValueKind::LongText),
];

const GOOGLE_CALENDAR_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("summary", "Title", ValueKind::ShortText),
    FieldSpec::new("startTime", "Start time (RFC 3339)", ValueKind::ShortText),
    FieldSpec::new("durationMinutes", "Duration in minutes", ValueKind::Numeric),
];

const TIMER_DAILY_FIELDS: &[FieldSpec] = &[FieldSpec::new("time", "Time (HH:MM)", ValueKind::ShortText)];

const TIMER_INTERVAL_FIELDS: &[FieldSpec] =
    &[FieldSpec::new("minutes", "Interval in minutes", ValueKind::Numeric)];

const NO_FIELDS: &[FieldSpec] = &[];
const NO_PLACEHOLDERS: &[&str] = &[];

pub const BUILTIN_KINDS: &[BuiltinKind] = &[
    BuiltinKind {
        service: GITHUB,
        role: Role::Action,
        name: "new_issue",
        description: "An issue is opened in a repository",
        fields: GITHUB_REPO_FIELDS,
        placeholders: &[
            "issue.title",
            "issue.body",
            "issue.number",
            "issue.url",
            "issue.author",
            "repository.full_name",
        ],
    },
    BuiltinKind {
        service: GITHUB,
        role: Role::Action,
        name: "new_pull_request",
        description: "A pull request is opened in a repository",
        fields: GITHUB_REPO_FIELDS,
        placeholders: &[
            "pull_request.title",
            "pull_request.number",
            "pull_request.url",
            "pull_request.author",
            "repository.full_name",
        ],
    },
    BuiltinKind {
        service: GITHUB,
        role: Role::Action,
        name: "push_committed",
        description: "Commits are pushed to a repository",
        fields: GITHUB_PUSH_FIELDS,
        placeholders: &[
            "commit.message",
            "commit.author",
            "commit.url",
            "branch",
            "repository.full_name",
        ],
    },
    BuiltinKind {
        service: GITHUB,
        role: Role::Reaction,
        name: "create_issue",
        description: "Open an issue in a repository",
        fields: GITHUB_CREATE_ISSUE_FIELDS,
        placeholders: NO_PLACEHOLDERS,
    },
    BuiltinKind {
        service: GITHUB,
        role: Role::Reaction,
        name: "comment_on_issue",
        description: "Comment on an existing issue",
        fields: GITHUB_COMMENT_FIELDS,
        placeholders: NO_PLACEHOLDERS,
    },
    BuiltinKind {
        service: DISCORD,
        role: Role::Action,
        name: "message_posted_in_channel",
        description: "A message is posted in a server channel",
        fields: DISCORD_CHANNEL_WATCH_FIELDS,
        placeholders: &[
            "message.content",
            "message.author",
            "message.channel_id",
            "message.url",
        ],
    },
    BuiltinKind {
        service: DISCORD,
        role: Role::Action,
        name: "user_joined_guild",
        description: "A user joins a server",
        fields: DISCORD_GUILD_FIELDS,
        placeholders: &["member.id", "member.username", "guild.name"],
    },
    BuiltinKind {
        service: DISCORD,
        role: Role::Reaction,
        name: "send_message_to_channel",
        description: "Post a message in a server channel",
        fields: DISCORD_SEND_FIELDS,
        placeholders: NO_PLACEHOLDERS,
    },
    BuiltinKind {
        service: DISCORD,
        role: Role::Reaction,
        name: "add_role_to_user",
        description: "Give a role to a server member",
        fields: DISCORD_ROLE_FIELDS,
        placeholders: NO_PLACEHOLDERS,
    },
    BuiltinKind {
        service: DISCORD,
        role: Role::Reaction,
        name: "send_direct_message",
        description: "Send a direct message to a user",
        fields: DISCORD_DM_FIELDS,
        placeholders: NO_PLACEHOLDERS,
    },
    BuiltinKind {
        service: SPOTIFY,
        role: Role::Action,
        name: "new_liked_track",
        description: "A track is added to liked songs",
        fields: NO_FIELDS,
        placeholders: &["track.name", "track.artist", "track.url"],
    },
    BuiltinKind {
        service: SPOTIFY,
        role: Role::Action,
        name: "playback_started",
        description: "Playback starts on any device",
        fields: NO_FIELDS,
        placeholders: &["track.name", "track.artist", "device.name"],
    },
    BuiltinKind {
        service: SPOTIFY,
        role: Role::Reaction,
        name: "skip_to_next_track",
        description: "Skip to the next track",
        fields: NO_FIELDS,
        placeholders: NO_PLACEHOLDERS,
    },
    BuiltinKind {
        service: SPOTIFY,
        role: Role::Reaction,
        name: "pause_playback",
        description: "Pause playback",
        fields: NO_FIELDS,
        placeholders: NO_PLACEHOLDERS,
    },
    BuiltinKind {
        service: GOOGLE,
        role: Role::Action,
        name: "new_email_received",
        description: "A new email arrives in the inbox",
        fields: GOOGLE_EMAIL_WATCH_FIELDS,
        placeholders: &["email.from", "email.subject", "email.snippet"],
    },
    BuiltinKind {
        service: GOOGLE,
        role: Role::Action,
        name: "new_calendar_event",
        description: "An event is added to the primary calendar",
        fields: NO_FIELDS,
        placeholders: &["event.summary", "event.start", "event.url"],
    },
    BuiltinKind {
        service: GOOGLE,
        role: Role::Reaction,
        name: "send_email",
        description: "Send an email from the connected account",
        fields: GOOGLE_SEND_EMAIL_FIELDS,
        placeholders: NO_PLACEHOLDERS,
    },
    BuiltinKind {
        service: GOOGLE,
        role: Role::Reaction,
        name: "create_calendar_event",
        description: "Create an event in the primary calendar",
        fields: GOOGLE_CALENDAR_FIELDS,
        placeholders: NO_PLACEHOLDERS,
    },
    BuiltinKind {
        service: TIMER,
        role: Role::Action,
        name: "every_hour",
        description: "Fires at the start of every hour",
        fields: NO_FIELDS,
        placeholders: &["timer.fired_at"],
    },
    BuiltinKind {
        service: TIMER,
        role: Role::Action,
        name: "every_day_at",
        description: "Fires every day at a given time",
        fields: TIMER_DAILY_FIELDS,
        placeholders: &["timer.fired_at"],
    },
    BuiltinKind {
        service: TIMER,
        role: Role::Action,
        name: "every_n_minutes",
        description: "Fires on a fixed minute interval",
        fields: TIMER_INTERVAL_FIELDS,
        placeholders: &["timer.fired_at", "timer.interval_minutes"],
    },
];

pub fn builtin_kind(service: &str, kind: &str, role: Role) -> Option<&'static BuiltinKind> {
    BUILTIN_KINDS
        .iter()
        .find(|def| def.service == service && def.name == kind && def.role == role)
}

pub fn builtin_kinds_for(service: &str, role: Role) -> impl Iterator<Item = &'static BuiltinKind> + '_ {
    BUILTIN_KINDS
        .iter()
        .filter(move |def| def.service == service && def.role == role)
}
