use super::common::{string_or_number, Snowflake};
use super::server::BanKind;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Group membership record returned by the group listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupRecord {
    /// Raw record fields
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl GroupRecord {
    /// Look up a field by name
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// String field by name, if present and a string
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }
}

/// Filters for the group listing; unset filters match everything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupFilter {
    /// Restrict to groups containing this e-mail address
    pub email: Option<String>,

    /// Restrict to this group name
    pub group: Option<String>,
}

impl GroupFilter {
    /// Filter on an e-mail address
    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Filter on a group name
    #[must_use]
    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }
}

/// Ban record returned by the ban listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BanRecord {
    /// Ban bucket
    #[serde(rename = "type")]
    pub kind: BanKind,

    /// Banned group, e-mail address or member id
    #[serde(deserialize_with = "string_or_number")]
    pub value: String,

    /// Guild the ban applies to
    #[serde(default)]
    pub server: Option<Snowflake>,
}

/// Filters for the ban listing of one server
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BanFilter {
    /// Restrict to one ban kind
    pub kind: Option<BanKind>,

    /// Restrict to one banned value
    pub value: Option<String>,
}

impl BanFilter {
    /// Filter on a ban kind
    #[must_use]
    pub const fn kind(mut self, kind: BanKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Filter on a banned value
    #[must_use]
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}
