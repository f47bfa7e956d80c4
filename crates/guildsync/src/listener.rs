//! Hooks notified after a reload is committed.

use crate::store::ServerMap;
use async_trait::async_trait;
use guildsync_core::{ServerConfig, Snowflake};

/// Receives reload notifications, e.g. to announce the new configuration in
/// a log channel.
#[async_trait]
pub trait ConfigListener: Send + Sync {
    /// Called once after a full reload has been committed
    async fn config_loaded(&self, servers: &ServerMap);

    /// Called after a single server has been reloaded
    async fn server_reloaded(&self, _id: Snowflake, _server: &ServerConfig) {}
}

/// Listener that ignores every notification
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopListener;

#[async_trait]
impl ConfigListener for NoopListener {
    async fn config_loaded(&self, _servers: &ServerMap) {}
}
