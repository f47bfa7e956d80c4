//! guildsync - operator CLI for the community backend.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    guildsync_cli::run().await
}
