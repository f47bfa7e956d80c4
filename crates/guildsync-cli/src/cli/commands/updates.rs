//! `guildsync updates` - Pending updates queue.

use anyhow::Result;
use colored::Colorize;

use super::Context;
use crate::cli::args::UpdatesArgs;
use crate::output::{print_json, OutputFormat};

pub async fn execute(ctx: Context, args: UpdatesArgs) -> Result<()> {
    let client = ctx.client()?;
    let updates = client.updates().list().await?;

    match ctx.output_format {
        OutputFormat::Json => print_json(&updates)?,
        OutputFormat::Pretty => {
            println!("{} pending update(s)", updates.len().to_string().bold());
            for update in &updates {
                println!(
                    "  {} {}",
                    format!("#{}", update.id).yellow(),
                    serde_json::to_string(&update.fields)?
                );
            }
        }
    }

    if !args.purge || updates.is_empty() {
        return Ok(());
    }

    let report = client
        .updates()
        .delete_many(updates.iter().map(|u| u.id))
        .await;

    eprintln!(
        "{} deleted {} update(s)",
        "✓".green().bold(),
        report.deleted.len()
    );
    for (id, err) in &report.failed {
        eprintln!("{} update #{id}: {err}", "✗".red().bold());
    }

    if report.is_complete() {
        Ok(())
    } else {
        anyhow::bail!("{} update(s) could not be deleted", report.failed.len())
    }
}
