use super::common::Snowflake;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Member record as stored by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    /// Discord user id
    pub id: Snowflake,

    /// Display name (`name#discriminator` or global name)
    #[serde(default)]
    pub name: Option<String>,

    /// Avatar URL
    #[serde(default)]
    pub icon_url: Option<String>,

    /// Everything else the backend knows about the member
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Member {
    /// Look up an additional backend field, such as `email`
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }
}

/// Form body for creating or renaming a member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberProfile {
    /// Discord user id
    pub id: Snowflake,

    /// Display name
    pub name: String,

    /// Avatar URL, omitted when the user has none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

impl MemberProfile {
    /// Create a profile without an avatar
    #[must_use]
    pub fn new(id: impl Into<Snowflake>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon_url: None,
        }
    }

    /// Set the avatar URL
    #[must_use]
    pub fn icon_url(mut self, url: impl Into<String>) -> Self {
        self.icon_url = Some(url.into());
        self
    }
}

/// Form body referencing a guild by id, used for membership links and
/// guild registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildRef {
    /// Guild id
    pub id: Snowflake,
}
