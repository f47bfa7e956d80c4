//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;

use anyhow::Result;
use args::{Cli, Commands};
use clap::Parser;
use guildsync::Settings;
use tracing_subscriber::EnvFilter;

use crate::output::OutputFormat;

/// Run the CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    if cli.no_color {
        colored::control::set_override(false);
    }

    // Load configuration (file, then GUILDSYNC_URL / GUILDSYNC_TOKEN)
    let settings = Settings::load(cli.config.as_deref())?;

    let ctx = commands::Context {
        settings,
        output_format: cli.output.unwrap_or(OutputFormat::Pretty),
    };

    // Dispatch to appropriate command
    match cli.command {
        Commands::Reload(args) => commands::reload::execute(ctx, args).await,
        Commands::Member(args) => commands::member::execute(ctx, args).await,
        Commands::Updates(args) => commands::updates::execute(ctx, args).await,
        Commands::Groups(args) => commands::lookup::groups(ctx, args).await,
        Commands::Bans(args) => commands::lookup::bans(ctx, args).await,
    }
}

/// Log to stderr; `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "guildsync=info,guildsync_client=warn",
        1 => "guildsync=debug,guildsync_client=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .init();
}
