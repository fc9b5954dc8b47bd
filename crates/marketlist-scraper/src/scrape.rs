//! The scrape entry point: validate, dispatch, crawl, extract.

use marketlist_core::{AppConfig, ItemRecord, SearchQuery};
use tokio_util::sync::CancellationToken;

use crate::adapter::{AdapterRegistry, MarketplaceAdapter};
use crate::crawler::crawl_listing_nodes;
use crate::dom::ListingNode;
use crate::error::ScraperError;
use crate::fetch::{HttpPageFetcher, PageFetcher};
use crate::types::{FailureReason, ScrapeOutcome};

/// Runs scrapes against any registered marketplace.
///
/// Holds no per-request state; one `Scraper` can serve concurrent scrapes.
#[derive(Debug)]
pub struct Scraper<F> {
    fetcher: F,
    registry: AdapterRegistry,
    default_max_pages: u32,
}

impl Scraper<HttpPageFetcher> {
    /// Builds an HTTP-backed scraper with the built-in adapters.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, ScraperError> {
        let fetcher = HttpPageFetcher::new(
            config.scraper_request_timeout_secs,
            &config.scraper_user_agent,
        )?;
        Ok(Self::new(
            fetcher,
            AdapterRegistry::with_builtin(&config.ebay_base_url),
            config.scraper_max_pages,
        ))
    }
}

impl<F: PageFetcher> Scraper<F> {
    #[must_use]
    pub fn new(fetcher: F, registry: AdapterRegistry, default_max_pages: u32) -> Self {
        Self {
            fetcher,
            registry,
            default_max_pages,
        }
    }

    /// Scrapes every result page for `query`, up to its page cap.
    ///
    /// Query problems and empty results come back as an unsuccessful
    /// [`ScrapeOutcome`], never as `Err`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError`] when a page fetch fails or a listing shows a
    /// non-numeric price.
    pub async fn scrape(&self, query: &SearchQuery) -> Result<ScrapeOutcome, ScraperError> {
        self.scrape_with_cancellation(query, &CancellationToken::new())
            .await
    }

    /// Like [`Self::scrape`], but stops requesting pages once `cancel` fires
    /// and extracts whatever was collected up to that point.
    ///
    /// # Errors
    ///
    /// See [`Self::scrape`].
    pub async fn scrape_with_cancellation(
        &self,
        query: &SearchQuery,
        cancel: &CancellationToken,
    ) -> Result<ScrapeOutcome, ScraperError> {
        let Some(marketplace_id) = query.marketplace_id else {
            return Ok(reject(FailureReason::MissingQueryOption));
        };
        let Some(adapter) = self.registry.get(marketplace_id) else {
            tracing::debug!(marketplace_id, "no adapter registered");
            return Ok(reject(FailureReason::InvalidQueryOptionType));
        };

        let max_pages = query.effective_max_pages(self.default_max_pages);
        let report =
            crawl_listing_nodes(&self.fetcher, adapter.as_ref(), query, max_pages, cancel).await?;
        if report.nodes.is_empty() {
            return Ok(reject(FailureReason::NoItemsFound));
        }

        let items = extract_items(adapter.as_ref(), query, &report.nodes)?;
        tracing::info!(
            marketplace_id,
            nodes = report.nodes.len(),
            items = items.len(),
            "scrape complete"
        );
        Ok(ScrapeOutcome::success(items))
    }
}

/// Runs the adapter over every node, dropping the ones it skips.
fn extract_items(
    adapter: &dyn MarketplaceAdapter,
    query: &SearchQuery,
    nodes: &[ListingNode],
) -> Result<Vec<ItemRecord>, ScraperError> {
    let mut items = Vec::with_capacity(nodes.len());
    for node in nodes {
        if let Some(item) = adapter.extract_item(query, node)? {
            items.push(item);
        }
    }
    Ok(items)
}

fn reject(reason: FailureReason) -> ScrapeOutcome {
    tracing::info!(reason = reason.message(), "scrape rejected");
    ScrapeOutcome::failure(reason)
}

#[cfg(test)]
#[path = "scrape_test.rs"]
mod tests;
