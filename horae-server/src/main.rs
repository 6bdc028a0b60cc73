//! Horae Server Binary
//!
//! Serves the localized `now` GraphQL query.

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

use horae_config::{ConfigLoader, HoraeConfig};
use horae_server::Server;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path (YAML or JSON)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Server bind address, e.g. 0.0.0.0:3000
    #[arg(short, long)]
    bind: Option<String>,

    /// Directory holding `<code>/messages.json` catalogs
    #[arg(long, value_name = "DIR")]
    locale_dir: Option<PathBuf>,

    /// Disable the GraphiQL explorer
    #[arg(long)]
    no_graphiql: bool,

    /// Print default configuration and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        println!("{}", HoraeConfig::generate_sample());
        return Ok(());
    }

    let mut config = ConfigLoader::new()
        .load(cli.config.as_deref())
        .context("Failed to load configuration")?;

    apply_cli_overrides(&mut config, &cli)?;
    config.validate_all()?;

    let server = Server::new(config)?;
    server.start().await
}

/// Apply CLI argument overrides to configuration
fn apply_cli_overrides(config: &mut HoraeConfig, cli: &Cli) -> Result<()> {
    if let Some(bind) = &cli.bind {
        let addr: SocketAddr = bind
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid bind address '{}': {}", bind, e))?;
        config.server.bind_address = addr.ip().to_string();
        config.server.port = addr.port();
    }

    if let Some(dir) = &cli.locale_dir {
        config.i18n.locale_dir = dir.clone();
    }

    if cli.no_graphiql {
        config.graphql.enable_graphiql = false;
    }

    Ok(())
}
