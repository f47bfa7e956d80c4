//! Cursor pagination.
//!
//! Listing endpoints answer with a [`Page`] whose `next` field holds the URL
//! of the following page. [`GuildSyncClient::fetch_paginated`] walks that
//! chain and returns every record in backend order. One failed page fails
//! the whole listing; no partial data is handed back.

use crate::GuildSyncClient;
use guildsync_core::{Page, Result, SyncError};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use tracing::debug;
use url::Url;

impl GuildSyncClient {
    /// Follow `next` links from `start` and concatenate every page's `results`.
    ///
    /// Stops with an error when a page answers anything but 200, when a `next`
    /// link points at an already visited page, or when the chain grows past
    /// the configured page bound.
    pub async fn fetch_paginated<T: DeserializeOwned>(&self, start: Url) -> Result<Vec<T>> {
        let limit = self.max_pages();
        let mut output = Vec::new();
        let mut seen = HashSet::new();
        let mut next = Some(start);

        while let Some(url) = next.take() {
            if seen.len() >= limit {
                return Err(SyncError::PageLimitExceeded { limit });
            }
            if !seen.insert(url.to_string()) {
                return Err(SyncError::PaginationCycle {
                    url: url.to_string(),
                });
            }

            let page: Page<T> = self.get_json(&url).await?;
            debug!(url = %url, records = page.results.len(), "fetched page");

            next = if page.is_last() {
                None
            } else {
                let link = page.next.as_deref().unwrap_or_default();
                Some(
                    url.join(link)
                        .map_err(|e| SyncError::InvalidUrl(format!("{link}: {e}")))?,
                )
            };
            output.extend(page.results);
        }

        debug!(pages = seen.len(), records = output.len(), "pagination complete");
        Ok(output)
    }
}
