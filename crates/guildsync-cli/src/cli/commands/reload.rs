//! `guildsync reload` - Fetch and normalize server configuration.

use anyhow::Result;
use colored::Colorize;
use guildsync::{ServerConfig, Snowflake};
use serde_json::{Map, Value};

use super::Context;
use crate::cli::args::ReloadArgs;
use crate::output::{print_json, OutputFormat};

pub async fn execute(ctx: Context, args: ReloadArgs) -> Result<()> {
    let sync = ctx.synchronizer()?;

    let servers: Vec<(Snowflake, ServerConfig)> = match args.server {
        Some(id) => {
            let id = Snowflake(id);
            sync.reload_server(id).await?;
            let server = sync
                .store()
                .server(id)
                .await
                .ok_or_else(|| anyhow::anyhow!("server {id} missing after reload"))?;
            vec![(id, (*server).clone())]
        }
        None => {
            sync.reload_all().await?;
            let snapshot = sync.store().snapshot().await;
            let mut servers: Vec<_> = snapshot
                .iter()
                .map(|(id, server)| (id, (**server).clone()))
                .collect();
            servers.sort_by_key(|(id, _)| *id);
            servers
        }
    };

    match ctx.output_format {
        OutputFormat::Json => {
            let mut map = Map::new();
            for (id, server) in &servers {
                map.insert(id.to_string(), serde_json::to_value(server)?);
            }
            print_json(&Value::Object(map))?;
        }
        OutputFormat::Pretty => {
            println!(
                "{} {} server(s) loaded from {}",
                "✓".green().bold(),
                servers.len(),
                sync.store().website().url
            );
            println!();
            for (id, server) in &servers {
                print_server(*id, server);
            }
        }
    }

    Ok(())
}

fn print_server(id: Snowflake, server: &ServerConfig) {
    println!(
        "{} {}",
        server.name.as_deref().unwrap_or("(unnamed)").bold(),
        format!("[{id}]").dimmed()
    );
    println!(
        "  {}: {} group, {} email, {} user",
        "Bans".cyan(),
        server.bans.group.len(),
        server.bans.email.len(),
        server.bans.user.len()
    );
    println!(
        "  {}: {} classic, {} confirmed, {} banned",
        "Ranks".cyan(),
        server.ranks.classic.len(),
        server.ranks.confirmed.len(),
        server.ranks.banned.len()
    );
    if server.domains.is_empty() {
        println!("  {}: {}", "Domains".cyan(), "none".dimmed());
    } else {
        println!("  {}: {}", "Domains".cyan(), server.domains.join(", "));
    }
}
