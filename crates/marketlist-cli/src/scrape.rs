//! `scrape` command: one query in, one JSON outcome out.

use clap::Args;
use marketlist_core::{AppConfig, MarketplaceType, SearchQuery};
use marketlist_scraper::Scraper;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Args)]
pub struct ScrapeArgs {
    /// Free-text search term
    pub term: Option<String>,

    /// Marketplace id (1 = eBay)
    #[arg(long, default_value_t = MarketplaceType::Ebay.id())]
    pub marketplace: i32,

    /// Category id; omit for all categories
    #[arg(long)]
    pub category: Option<i32>,

    /// Location scope id (1 = US, 2 = worldwide, 3 = North America)
    #[arg(long)]
    pub location: Option<i32>,

    /// Postal code to measure distance from
    #[arg(long)]
    pub zip: Option<String>,

    /// Search radius around `--zip`
    #[arg(long)]
    pub distance: Option<u32>,

    /// Interpret `--distance` as kilometres instead of miles
    #[arg(long)]
    pub km: bool,

    /// Only return completed, sold listings
    #[arg(long)]
    pub sold: bool,

    /// Page cap for this run; defaults to MARKETLIST_SCRAPER_MAX_PAGES
    #[arg(long)]
    pub max_pages: Option<u32>,
}

impl ScrapeArgs {
    #[must_use]
    pub fn to_query(&self) -> SearchQuery {
        SearchQuery {
            marketplace_id: Some(self.marketplace),
            category_id: self.category,
            location_id: self.location,
            search_term: self.term.clone(),
            page_number: 0,
            zip_code: self.zip.clone(),
            distance: self.distance,
            is_miles: !self.km,
            sold_items_only: self.sold,
            max_pages: self.max_pages,
        }
    }
}

/// Runs the scrape, stopping early on Ctrl-C, and prints the outcome.
pub(crate) async fn run_scrape(config: &AppConfig, args: &ScrapeArgs) -> anyhow::Result<()> {
    let scraper = Scraper::from_config(config)?;
    let query = args.to_query();

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupted; finishing with pages fetched so far");
            on_interrupt.cancel();
        }
    });

    let outcome = scraper.scrape_with_cancellation(&query, &cancel).await?;
    if let Some(message) = outcome.message() {
        tracing::warn!(message, "scrape returned no items");
    } else {
        tracing::info!(items = outcome.items.len(), "scrape succeeded");
    }

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
