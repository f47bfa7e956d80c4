//! HTTP client for the guildsync community backend.
//!
//! This crate provides [`GuildSyncClient`], which signs every request with
//! the backend token, follows cursor pagination and exposes the member,
//! server, update, group and ban endpoints.

#![doc(html_root_url = "https://docs.rs/guildsync-client/0.3.0")]

mod client;
mod config;
mod paginate;
pub mod api;

pub use api::DeleteReport;
pub use client::{GuildSyncClient, GuildSyncClientBuilder};
pub use config::*;
pub use guildsync_core::{Result, SyncError};
