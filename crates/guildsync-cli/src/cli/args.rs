//! Command-line argument definitions using clap.

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::output::OutputFormat;

/// Operator tool for the guildsync backend
///
/// Reload the bot's server configuration, inspect members and work through
/// the pending updates queue.
#[derive(Parser, Debug)]
#[command(name = "guildsync")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Settings file (defaults to the platform config directory)
    #[arg(short, long, env = "GUILDSYNC_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Increase verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch and normalize server configuration
    Reload(ReloadArgs),

    /// Member lookups
    Member(MemberArgs),

    /// Pending updates queue
    Updates(UpdatesArgs),

    /// List groups
    Groups(GroupsArgs),

    /// List bans of a server
    Bans(BansArgs),
}

// ============================================================================
// Reload command
// ============================================================================

#[derive(Args, Debug)]
pub struct ReloadArgs {
    /// Only reload this server
    #[arg(short, long)]
    pub server: Option<u64>,
}

// ============================================================================
// Member command
// ============================================================================

#[derive(Args, Debug)]
pub struct MemberArgs {
    #[command(subcommand)]
    pub command: MemberCommands,
}

#[derive(Subcommand, Debug)]
pub enum MemberCommands {
    /// Show one member
    Get {
        /// Discord user id
        id: u64,
    },

    /// List members registered with an e-mail address
    ByEmail {
        /// E-mail address
        email: String,
    },
}

// ============================================================================
// Updates command
// ============================================================================

#[derive(Args, Debug)]
pub struct UpdatesArgs {
    /// Delete every listed update after printing it
    #[arg(long)]
    pub purge: bool,
}

// ============================================================================
// Groups command
// ============================================================================

#[derive(Args, Debug)]
pub struct GroupsArgs {
    /// Only groups containing this e-mail address
    #[arg(long)]
    pub email: Option<String>,

    /// Only this group
    #[arg(long)]
    pub group: Option<String>,
}

// ============================================================================
// Bans command
// ============================================================================

#[derive(Args, Debug)]
pub struct BansArgs {
    /// Server id
    pub server: u64,

    /// Only bans of this kind
    #[arg(short = 't', long = "type", value_enum)]
    pub kind: Option<BanKindArg>,

    /// Only bans of this value
    #[arg(long)]
    pub value: Option<String>,
}

/// Ban kind as accepted on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum BanKindArg {
    Group,
    Email,
    User,
}

impl From<BanKindArg> for guildsync::BanKind {
    fn from(arg: BanKindArg) -> Self {
        match arg {
            BanKindArg::Group => Self::Group,
            BanKindArg::Email => Self::Email,
            BanKindArg::User => Self::User,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_reload_server() {
        let cli = Cli::parse_from(["guildsync", "reload", "--server", "42"]);
        match cli.command {
            Commands::Reload(args) => assert_eq!(args.server, Some(42)),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_bans_filters() {
        let cli = Cli::parse_from(["guildsync", "-vv", "bans", "12", "--type", "email"]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Bans(args) => {
                assert_eq!(args.server, 12);
                assert!(matches!(args.kind, Some(BanKindArg::Email)));
                assert!(args.value.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
