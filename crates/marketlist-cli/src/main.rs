mod scrape;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::scrape::ScrapeArgs;

#[derive(Debug, Parser)]
#[command(name = "marketlist-cli")]
#[command(about = "Crawl marketplace search results into item records")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run one search and print the outcome as JSON
    Scrape(ScrapeArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = marketlist_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(env = %config.env, max_pages = config.scraper_max_pages, "config loaded");

    match cli.command {
        Some(Commands::Scrape(args)) => scrape::run_scrape(&config, &args).await?,
        None => println!("marketlist-cli ready; try `marketlist-cli scrape --help`"),
    }

    Ok(())
}
