use super::common::Snowflake;
use serde::{Deserialize, Serialize};

/// Form body for updating a guild's display name and icon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildProfile {
    /// Guild id
    pub id: Snowflake,

    /// Display name
    pub name: String,

    /// Icon URL, omitted when the guild has none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

impl GuildProfile {
    /// Create a profile without an icon
    #[must_use]
    pub fn new(id: impl Into<Snowflake>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon_url: None,
        }
    }

    /// Set the icon URL
    #[must_use]
    pub fn icon_url(mut self, url: impl Into<String>) -> Self {
        self.icon_url = Some(url.into());
        self
    }
}
