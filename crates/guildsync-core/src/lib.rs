//! Core types and normalizers for the guildsync backend client.
//!
//! This crate provides the foundational pieces shared by the other guildsync
//! crates:
//!
//! - **Types**: wire records (`RawServer`, `Member`, `Page<T>`...) and the
//!   normalized [`ServerConfig`] the bot reads
//! - **Normalizers**: pure functions turning backend relational lists into
//!   bucketed lookups, see [`normalize`]
//! - **Errors**: [`SyncError`] and the [`Result`] alias
//!
//! # Example
//!
//! ```rust,ignore
//! use guildsync_core::{normalize::normalize_server, RawServer, Result};
//!
//! fn load(raw: RawServer) -> Result<()> {
//!     let (id, server) = normalize_server(raw)?;
//!     println!("{id}: {} banned users", server.bans.user.len());
//!     Ok(())
//! }
//! ```

mod error;
pub mod normalize;
pub mod types;

pub use error::{Result, SyncError};
pub use types::*;
