//! # guildsync-cli
//!
//! Operator command-line interface for the guildsync backend.
//!
//! ## Features
//!
//! - **Reload**: fetch and normalize every server, or a single one
//! - **Members**: look up members by id or e-mail address
//! - **Updates**: list the pending updates queue and acknowledge it
//! - **Listings**: groups and per-server bans
//! - **Output formats**: colored summary or JSON

pub mod cli;
pub mod output;

pub use cli::run;
