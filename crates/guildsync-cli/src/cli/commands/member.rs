//! `guildsync member` - Member lookups.

use anyhow::Result;
use colored::Colorize;
use guildsync::{Member, Snowflake};

use super::Context;
use crate::cli::args::{MemberArgs, MemberCommands};
use crate::output::{print_json, OutputFormat};

pub async fn execute(ctx: Context, args: MemberArgs) -> Result<()> {
    let client = ctx.client()?;

    match args.command {
        MemberCommands::Get { id } => match client.members().get(Snowflake(id)).await? {
            Some(member) => show(&ctx, std::slice::from_ref(&member)),
            None => anyhow::bail!("member {id} is not registered"),
        },
        MemberCommands::ByEmail { email } => {
            let members = client.members().by_email(&email).await?;
            show(&ctx, &members)
        }
    }
}

fn show(ctx: &Context, members: &[Member]) -> Result<()> {
    match ctx.output_format {
        OutputFormat::Json => print_json(members),
        OutputFormat::Pretty => {
            if members.is_empty() {
                println!("{}", "No members found".dimmed());
            }
            for member in members {
                println!(
                    "{} {}",
                    member.name.as_deref().unwrap_or("(no name)").bold(),
                    format!("[{}]", member.id).dimmed()
                );
                if let Some(icon) = &member.icon_url {
                    println!("  {}: {icon}", "Avatar".cyan());
                }
                for (key, value) in &member.extra {
                    println!("  {}: {value}", key.cyan());
                }
            }
            Ok(())
        }
    }
}
