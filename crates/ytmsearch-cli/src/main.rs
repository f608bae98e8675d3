use std::io;
use std::process;

use anyhow::Context;
use clap::Parser;
use dotenvy::dotenv;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use ytmsearch_cli::{is_usage_error, run, Config, USAGE};
use ytmsearch_client::YtMusicClient;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = match Config::try_parse() {
        Ok(config) => config,
        Err(e) if is_usage_error(&e) => {
            eprintln!("{}", USAGE);
            process::exit(1);
        }
        Err(e) => e.exit(),
    };

    // Logs go to stderr; stdout carries only the JSON result
    let level = if config.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set up logging")?;

    debug!(?config, "Parsed configuration");

    let client = YtMusicClient::new(config.http_config())
        .context("Failed to create YouTube Music client")?
        .with_filter(config.search_filter());

    let stdout = io::stdout();
    run(&client, &config.query, config.limit, &mut stdout.lock()).await
}
