//! Page-by-page crawl of a marketplace's search results.

use marketlist_core::SearchQuery;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::adapter::MarketplaceAdapter;
use crate::dom::{parse_selector, select_listing_nodes, ListingNode};
use crate::error::ScraperError;
use crate::fetch::PageFetcher;

/// Why a crawl stopped requesting pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// A page matched no listing nodes.
    EmptyPage,
    /// A page's first listing carried no id.
    MissingFirstId,
    /// A page started with the same listing as the page before it. eBay
    /// serves the last page again when asked for one past the end.
    DuplicatePage,
    /// The page cap was reached.
    PageCap,
    Cancelled,
}

/// Listing nodes gathered by a crawl, in page order.
#[derive(Debug, Clone)]
pub struct CrawlReport {
    pub nodes: Vec<ListingNode>,
    pub pages_fetched: u32,
    pub stop: StopReason,
}

/// Fetches result pages `1..=max_pages` for `query` and accumulates their
/// listing nodes.
///
/// The crawl stops early when a page is empty, when its first node has no
/// id, or when its first id equals the previous page's first id
/// (case-insensitive). Nodes from a stopping page are not kept. Cancellation
/// is honoured between pages and during an in-flight fetch; the nodes
/// accumulated so far are returned.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidSelector`] if the adapter's list selector
/// is not valid CSS, or any error from [`PageFetcher::fetch_page`]. A fetch
/// failure discards the nodes collected from earlier pages.
pub async fn crawl_listing_nodes<F>(
    fetcher: &F,
    adapter: &dyn MarketplaceAdapter,
    query: &SearchQuery,
    max_pages: u32,
    cancel: &CancellationToken,
) -> Result<CrawlReport, ScraperError>
where
    F: PageFetcher,
{
    let list_selector = parse_selector(adapter.item_list_path())?;

    let mut nodes: Vec<ListingNode> = Vec::new();
    let mut previous_first_id: Option<String> = None;
    let mut pages_fetched = 0u32;

    for page in 1..=max_pages {
        if cancel.is_cancelled() {
            return Ok(finish(adapter, nodes, pages_fetched, StopReason::Cancelled));
        }

        let url = adapter.build_search_url(query, page);
        let body = tokio::select! {
            biased;
            () = cancel.cancelled() => {
                return Ok(finish(adapter, nodes, pages_fetched, StopReason::Cancelled));
            }
            body = fetcher.fetch_page(&url) => body?,
        };
        pages_fetched += 1;

        let page_nodes = select_listing_nodes(&body, &list_selector);
        tracing::debug!(page, url = %url, nodes = page_nodes.len(), "fetched results page");

        let Some(first) = page_nodes.first() else {
            return Ok(finish(adapter, nodes, pages_fetched, StopReason::EmptyPage));
        };
        let Some(first_id) = first.element_id() else {
            return Ok(finish(adapter, nodes, pages_fetched, StopReason::MissingFirstId));
        };
        if previous_first_id
            .as_deref()
            .is_some_and(|prev| prev.eq_ignore_ascii_case(first_id))
        {
            return Ok(finish(adapter, nodes, pages_fetched, StopReason::DuplicatePage));
        }

        previous_first_id = Some(first_id.to_owned());
        nodes.extend(page_nodes);
    }

    Ok(finish(adapter, nodes, pages_fetched, StopReason::PageCap))
}

fn finish(
    adapter: &dyn MarketplaceAdapter,
    nodes: Vec<ListingNode>,
    pages_fetched: u32,
    stop: StopReason,
) -> CrawlReport {
    tracing::info!(
        marketplace_id = adapter.marketplace_id(),
        pages_fetched,
        nodes = nodes.len(),
        ?stop,
        "crawl finished"
    );
    CrawlReport {
        nodes,
        pages_fetched,
        stop,
    }
}
