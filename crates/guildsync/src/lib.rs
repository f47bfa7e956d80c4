//! Keeps a chat bot's guild configuration in sync with its web backend.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use guildsync::{Settings, Snowflake, Synchronizer};
//!
//! #[tokio::main]
//! async fn main() -> guildsync::Result<()> {
//!     let settings = Settings::load(None)?;
//!     let sync = Synchronizer::from_settings(&settings)?;
//!
//!     // Pull every server at startup
//!     let count = sync.reload_all().await?;
//!     println!("{count} servers loaded");
//!
//!     // Refresh one server after an admin changed it on the website
//!     sync.reload_server(Snowflake(396_760_375_384_735_744)).await?;
//!
//!     // Read settings from event handlers
//!     if let Some(server) = sync.store().server(Snowflake(396_760_375_384_735_744)).await {
//!         println!("allowed domains: {:?}", server.domains);
//!     }
//!
//!     // Report membership changes
//!     sync.client()
//!         .members()
//!         .join_server(Snowflake(1), Snowflake(396_760_375_384_735_744))
//!         .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `default` - Uses rustls for TLS
//! - `rustls` - Use rustls for TLS (recommended)
//! - `native-tls` - Use system native TLS

#![doc(html_root_url = "https://docs.rs/guildsync/0.3.0")]

pub mod listener;
pub mod settings;
pub mod store;
pub mod sync;

pub use listener::{ConfigListener, NoopListener};
pub use settings::{HttpConfig, Settings, WebsiteConfig};
pub use store::{ConfigStore, ServerMap};
pub use sync::Synchronizer;

// Re-export core types
pub use guildsync_core::*;

// Re-export client
pub use guildsync_client::{
    api, DeleteReport, GuildSyncClient, GuildSyncClientBuilder, RateLimitConfig,
};

// Re-export runtime for convenience
pub use tokio;
pub use serde_json;
