//! Pending updates queue.
//!
//! The backend queues changes (new confirmations, renamed groups...) that the
//! bot polls, applies, then acknowledges by deleting them.

use crate::GuildSyncClient;
use futures_util::stream::{self, StreamExt};
use guildsync_core::{PendingUpdate, Result, SyncError};
use reqwest::Method;

/// Number of acknowledgements in flight at once
const DELETE_CONCURRENCY: usize = 4;

/// Pending updates endpoints
pub struct UpdatesApi<'a> {
    client: &'a GuildSyncClient,
}

/// Outcome of acknowledging a batch of updates
#[derive(Debug, Default)]
pub struct DeleteReport {
    /// Ids the backend accepted
    pub deleted: Vec<u64>,

    /// Ids that could not be deleted, with the reason
    pub failed: Vec<(u64, SyncError)>,
}

impl DeleteReport {
    /// Returns true if every id was deleted
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

impl<'a> UpdatesApi<'a> {
    pub(crate) fn new(client: &'a GuildSyncClient) -> Self {
        Self { client }
    }

    /// Every outstanding update, across all pages
    pub async fn list(&self) -> Result<Vec<PendingUpdate>> {
        let url = self.client.endpoint("/api/updates/", &[])?;
        self.client.fetch_paginated(url).await
    }

    /// Acknowledge one update
    pub async fn delete(&self, update_id: u64) -> Result<()> {
        let url = self
            .client
            .endpoint(&format!("/api/updates/{update_id}/"), &[])?;
        self.client.mutate::<()>(Method::DELETE, &url, None).await
    }

    /// Acknowledge a batch of updates.
    ///
    /// Every id is attempted; failures are collected rather than stopping
    /// the batch.
    pub async fn delete_many<I>(&self, ids: I) -> DeleteReport
    where
        I: IntoIterator<Item = u64>,
    {
        let outcomes: Vec<(u64, Result<()>)> = stream::iter(ids)
            .map(|id| async move { (id, self.delete(id).await) })
            .buffer_unordered(DELETE_CONCURRENCY)
            .collect()
            .await;

        let mut report = DeleteReport::default();
        for (id, outcome) in outcomes {
            match outcome {
                Ok(()) => report.deleted.push(id),
                Err(e) => report.failed.push((id, e)),
            }
        }
        report.deleted.sort_unstable();
        report.failed.sort_unstable_by_key(|(id, _)| *id);
        report
    }
}
