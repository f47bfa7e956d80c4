//! Reloading server configuration from the backend.

use crate::listener::{ConfigListener, NoopListener};
use crate::settings::Settings;
use crate::store::{ConfigStore, ServerMap};
use guildsync_client::GuildSyncClient;
use guildsync_core::normalize::normalize_record;
use guildsync_core::{Result, Snowflake, SyncError};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, instrument, warn};

/// Pulls server configuration from the backend into a [`ConfigStore`].
///
/// Reloads are serialized: a full reload and a single-server reload never
/// interleave their read-modify-commit steps.
pub struct Synchronizer {
    client: GuildSyncClient,
    store: Arc<ConfigStore>,
    listener: Arc<dyn ConfigListener>,
    reload_lock: Mutex<()>,
}

impl std::fmt::Debug for Synchronizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Synchronizer")
            .field("client", &self.client)
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

impl Synchronizer {
    /// Create a synchronizer writing into `store`
    #[must_use]
    pub fn new(client: GuildSyncClient, store: Arc<ConfigStore>) -> Self {
        Self {
            client,
            store,
            listener: Arc::new(NoopListener),
            reload_lock: Mutex::new(()),
        }
    }

    /// Build client and store from loaded settings
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let client = settings.client()?;
        let store = Arc::new(ConfigStore::new(settings.website.clone()));
        Ok(Self::new(client, store))
    }

    /// Notify `listener` after each committed reload
    #[must_use]
    pub fn with_listener(mut self, listener: Arc<dyn ConfigListener>) -> Self {
        self.listener = listener;
        self
    }

    /// Backend client
    #[must_use]
    pub const fn client(&self) -> &GuildSyncClient {
        &self.client
    }

    /// Shared configuration store
    #[must_use]
    pub const fn store(&self) -> &Arc<ConfigStore> {
        &self.store
    }

    /// Replace the configuration of every server.
    ///
    /// Either every record is fetched and normalized and the whole map is
    /// swapped, or the store is left untouched. An empty listing is treated
    /// as a failure. Returns the number of servers loaded.
    #[instrument(skip(self))]
    pub async fn reload_all(&self) -> Result<usize> {
        // Held through the notification so listeners see commits in order.
        let _guard = self.reload_lock.lock().await;

        let records = self.client.servers().list().await.map_err(|e| {
            warn!(error = %e, "Server listing failed, keeping current configuration");
            e
        })?;

        if records.is_empty() {
            warn!("Backend returned no servers, keeping current configuration");
            return Err(SyncError::Contract("server listing is empty".into()));
        }

        let committed = self.store.commit(ServerMap::from_records(records)?).await;

        info!(servers = committed.len(), "Configuration reloaded");
        self.listener.config_loaded(&committed).await;

        Ok(committed.len())
    }

    /// Replace the configuration of one server, leaving the others untouched.
    #[instrument(skip(self), fields(server = %guild_id))]
    pub async fn reload_server(&self, guild_id: Snowflake) -> Result<()> {
        let _guard = self.reload_lock.lock().await;

        let raw = self.client.servers().get(guild_id).await?;
        if let Some(id) = raw.id {
            if id != guild_id {
                return Err(SyncError::Contract(format!(
                    "requested server {guild_id}, backend answered with {id}"
                )));
            }
        }

        let server = Arc::new(normalize_record(raw)?);
        let current = self.store.snapshot().await;
        self.store
            .commit(current.with_server(guild_id, Arc::clone(&server)))
            .await;

        info!("Server configuration reloaded");
        self.listener.server_reloaded(guild_id, &server).await;

        Ok(())
    }
}
