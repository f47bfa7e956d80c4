//! Command implementations.

pub mod lookup;
pub mod member;
pub mod reload;
pub mod updates;

use guildsync::{GuildSyncClient, Settings, Synchronizer};

use crate::output::OutputFormat;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Loaded and validated settings
    pub settings: Settings,

    /// Output format
    pub output_format: OutputFormat,
}

impl Context {
    /// Create a backend client from the settings.
    pub fn client(&self) -> anyhow::Result<GuildSyncClient> {
        Ok(self.settings.client()?)
    }

    /// Create a synchronizer with an empty store.
    pub fn synchronizer(&self) -> anyhow::Result<Synchronizer> {
        Ok(Synchronizer::from_settings(&self.settings)?)
    }
}
