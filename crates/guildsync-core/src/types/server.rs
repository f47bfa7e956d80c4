use super::common::{string_or_number, Snowflake};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Bucket a ban entry is routed into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BanKind {
    /// Every member of a group is banned
    Group,
    /// A single e-mail address is banned
    Email,
    /// A single member id is banned
    User,
}

impl std::fmt::Display for BanKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Group => write!(f, "group"),
            Self::Email => write!(f, "email"),
            Self::User => write!(f, "user"),
        }
    }
}

/// Kind of a rank assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankKind {
    /// Named role, grouped under its display label
    Classic,
    /// Role given to members with a confirmed e-mail
    Confirmed,
    /// Role given to banned members
    Banned,
}

/// `ban_set` entry of a server record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawBan {
    /// Bucket this ban belongs to
    #[serde(rename = "type")]
    pub kind: BanKind,

    /// Group name, e-mail address or member id
    #[serde(deserialize_with = "string_or_number")]
    pub value: String,
}

/// `rank_set` entry of a server record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRank {
    /// Rank kind
    #[serde(rename = "type")]
    pub kind: RankKind,

    /// Discord role id
    pub discord_id: Snowflake,

    /// Display label, required for classic ranks
    #[serde(default)]
    pub name: Option<String>,
}

/// `emails_domains` entry of a server record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEmailDomain {
    /// Permitted e-mail domain, e.g. `example.org`
    pub domain: String,
}

/// Server record exactly as the backend sends it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawServer {
    /// Guild id; absent on some single-resource answers
    #[serde(default)]
    pub id: Option<Snowflake>,

    /// Guild display name
    #[serde(default)]
    pub name: Option<String>,

    /// Guild icon
    #[serde(default)]
    pub icon_url: Option<String>,

    /// Rank assignments
    pub rank_set: Vec<RawRank>,

    /// Ban list
    pub ban_set: Vec<RawBan>,

    /// Allowed e-mail domains
    pub emails_domains: Vec<RawEmailDomain>,

    /// Any other per-server settings, passed through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Bans of a server, bucketed by kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bans {
    /// Banned group names
    #[serde(default)]
    pub group: Vec<String>,

    /// Banned e-mail addresses
    #[serde(default)]
    pub email: Vec<String>,

    /// Banned member ids
    #[serde(default)]
    pub user: Vec<String>,
}

impl Bans {
    /// Bucket for a given ban kind
    #[must_use]
    pub fn bucket(&self, kind: BanKind) -> &[String] {
        match kind {
            BanKind::Group => &self.group,
            BanKind::Email => &self.email,
            BanKind::User => &self.user,
        }
    }

    pub(crate) fn bucket_mut(&mut self, kind: BanKind) -> &mut Vec<String> {
        match kind {
            BanKind::Group => &mut self.group,
            BanKind::Email => &mut self.email,
            BanKind::User => &mut self.user,
        }
    }

    /// Returns true if `value` is banned under `kind`
    #[must_use]
    pub fn contains(&self, kind: BanKind, value: &str) -> bool {
        self.bucket(kind).iter().any(|v| v == value)
    }

    /// Total number of bans across all buckets
    #[must_use]
    pub fn len(&self) -> usize {
        self.group.len() + self.email.len() + self.user.len()
    }

    /// Returns true if nothing is banned
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Rank assignments of a server
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ranks {
    /// Classic rank label -> role ids
    #[serde(default)]
    pub classic: BTreeMap<String, Vec<Snowflake>>,

    /// Roles for confirmed members
    #[serde(default)]
    pub confirmed: Vec<Snowflake>,

    /// Roles for banned members
    #[serde(default)]
    pub banned: Vec<Snowflake>,
}

impl Ranks {
    /// Role ids of a classic rank
    #[must_use]
    pub fn classic(&self, name: &str) -> &[Snowflake] {
        self.classic.get(name).map_or(&[], Vec::as_slice)
    }
}

/// Normalized server configuration, as consumed by the bot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Guild display name
    #[serde(default)]
    pub name: Option<String>,

    /// Guild icon
    #[serde(default)]
    pub icon_url: Option<String>,

    /// Bans by kind
    pub bans: Bans,

    /// Rank assignments
    pub ranks: Ranks,

    /// Allowed e-mail domains, in backend order
    pub domains: Vec<String>,

    /// Remaining per-server settings
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ServerConfig {
    /// Returns true if addresses from `domain` may confirm on this server
    #[must_use]
    pub fn allows_domain(&self, domain: &str) -> bool {
        self.domains.iter().any(|d| d.eq_ignore_ascii_case(domain))
    }
}
