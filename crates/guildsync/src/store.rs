//! Process-wide configuration state.
//!
//! The bot reads server settings from a [`ConfigStore`]. Readers get an
//! `Arc` snapshot and never block a reload for longer than a pointer swap.
//! A reload builds a whole new [`ServerMap`] off to the side and commits it
//! in one step, so readers see either the old map or the new one.

use crate::settings::WebsiteConfig;
use chrono::{DateTime, Utc};
use guildsync_core::normalize::normalize_server;
use guildsync_core::{RawServer, Result, ServerConfig, Snowflake, SyncError};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Normalized configuration of every known server.
///
/// Entries are individually reference counted so that replacing one server
/// leaves the others shared with the previous map.
#[derive(Debug, Clone)]
pub struct ServerMap {
    servers: HashMap<Snowflake, Arc<ServerConfig>>,
    loaded_at: Option<DateTime<Utc>>,
}

impl Default for ServerMap {
    fn default() -> Self {
        Self::empty()
    }
}

impl ServerMap {
    /// A map that has never been loaded
    #[must_use]
    pub fn empty() -> Self {
        Self {
            servers: HashMap::new(),
            loaded_at: None,
        }
    }

    /// Normalize a full server listing into a fresh map.
    ///
    /// Fails if any record cannot be normalized or two records share an id.
    pub fn from_records(records: Vec<RawServer>) -> Result<Self> {
        let mut servers = HashMap::with_capacity(records.len());

        for raw in records {
            let (id, server) = normalize_server(raw)?;
            if servers.insert(id, Arc::new(server)).is_some() {
                return Err(SyncError::Contract(format!(
                    "server {id} appears twice in listing"
                )));
            }
        }

        Ok(Self {
            servers,
            loaded_at: Some(Utc::now()),
        })
    }

    /// Copy of this map with one server replaced or added.
    ///
    /// Every other entry is shared with `self`.
    #[must_use]
    pub fn with_server(&self, id: Snowflake, server: impl Into<Arc<ServerConfig>>) -> Self {
        let mut servers = self.servers.clone();
        servers.insert(id, server.into());

        Self {
            servers,
            loaded_at: self.loaded_at,
        }
    }

    /// Settings of one server
    #[must_use]
    pub fn get(&self, id: Snowflake) -> Option<&Arc<ServerConfig>> {
        self.servers.get(&id)
    }

    /// Returns true if the server is known
    #[must_use]
    pub fn contains(&self, id: Snowflake) -> bool {
        self.servers.contains_key(&id)
    }

    /// Iterate over every server
    pub fn iter(&self) -> impl Iterator<Item = (Snowflake, &Arc<ServerConfig>)> {
        self.servers.iter().map(|(id, server)| (*id, server))
    }

    /// Number of servers
    #[must_use]
    pub fn len(&self) -> usize {
        self.servers.len()
    }

    /// Returns true if no server is known
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }

    /// When the last full reload completed
    #[must_use]
    pub const fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }
}

/// Shared configuration: backend credentials plus the current server map.
pub struct ConfigStore {
    website: WebsiteConfig,
    servers: RwLock<Arc<ServerMap>>,
}

impl std::fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigStore")
            .field("website", &self.website)
            .finish_non_exhaustive()
    }
}

impl ConfigStore {
    /// Create a store with no servers loaded yet
    #[must_use]
    pub fn new(website: WebsiteConfig) -> Self {
        Self {
            website,
            servers: RwLock::new(Arc::new(ServerMap::empty())),
        }
    }

    /// Backend credentials
    #[must_use]
    pub const fn website(&self) -> &WebsiteConfig {
        &self.website
    }

    /// Current server map
    pub async fn snapshot(&self) -> Arc<ServerMap> {
        Arc::clone(&*self.servers.read().await)
    }

    /// Current settings of one server
    pub async fn server(&self, id: Snowflake) -> Option<Arc<ServerConfig>> {
        self.servers.read().await.get(id).cloned()
    }

    /// Replace the server map, returning the committed snapshot
    pub(crate) async fn commit(&self, map: ServerMap) -> Arc<ServerMap> {
        let map = Arc::new(map);
        *self.servers.write().await = Arc::clone(&map);
        map
    }
}
