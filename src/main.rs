mod app;
mod cli;
mod config;
mod db;
mod error;
mod feed;
mod listing;
mod logging;
mod models;
#[cfg(test)]
mod test_support;
mod web;

use cli::Args;
use config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let args = Args::parse(std::env::args().skip(1))?;

    // Load configuration
    let config = match &args.config_path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    logging::init(config.log_file.as_deref());
    tracing::debug!(?config, "Loaded configuration");

    cli::run(args.command, &config).await?;

    Ok(())
}
