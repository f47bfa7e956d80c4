//! `guildsync groups` and `guildsync bans` - Paginated listings.

use anyhow::Result;
use colored::Colorize;
use guildsync::{BanFilter, GroupFilter, Snowflake};

use super::Context;
use crate::cli::args::{BansArgs, GroupsArgs};
use crate::output::{print_json, OutputFormat};

pub async fn groups(ctx: Context, args: GroupsArgs) -> Result<()> {
    let filter = GroupFilter {
        email: args.email,
        group: args.group,
    };
    let groups = ctx.client()?.groups().list(&filter).await?;

    match ctx.output_format {
        OutputFormat::Json => print_json(&groups),
        OutputFormat::Pretty => {
            println!("{} group record(s)", groups.len().to_string().bold());
            for group in &groups {
                println!("  {}", serde_json::to_string(&group.fields)?);
            }
            Ok(())
        }
    }
}

pub async fn bans(ctx: Context, args: BansArgs) -> Result<()> {
    let filter = BanFilter {
        kind: args.kind.map(Into::into),
        value: args.value,
    };
    let bans = ctx
        .client()?
        .bans()
        .list(Snowflake(args.server), &filter)
        .await?;

    match ctx.output_format {
        OutputFormat::Json => print_json(&bans),
        OutputFormat::Pretty => {
            println!("{} ban(s)", bans.len().to_string().bold());
            for ban in &bans {
                println!("  {:<6} {}", ban.kind.to_string().red(), ban.value);
            }
            Ok(())
        }
    }
}
