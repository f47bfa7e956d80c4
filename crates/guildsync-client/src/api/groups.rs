//! Group listing.

use crate::GuildSyncClient;
use guildsync_core::{GroupFilter, GroupRecord, Result};

/// Group listing endpoints
pub struct GroupsApi<'a> {
    client: &'a GuildSyncClient,
}

impl<'a> GroupsApi<'a> {
    pub(crate) fn new(client: &'a GuildSyncClient) -> Self {
        Self { client }
    }

    /// Groups matching the filter; empty filters are sent as empty values
    pub async fn list(&self, filter: &GroupFilter) -> Result<Vec<GroupRecord>> {
        let url = self.client.endpoint(
            "/api/groups/",
            &[
                ("email", filter.email.as_deref().unwrap_or_default()),
                ("group", filter.group.as_deref().unwrap_or_default()),
            ],
        )?;
        self.client.fetch_paginated(url).await
    }
}
