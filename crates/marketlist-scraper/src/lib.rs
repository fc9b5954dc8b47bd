//! Marketplace search-result crawler.
//!
//! [`Scraper::scrape`] validates a [`SearchQuery`](marketlist_core::SearchQuery),
//! picks the [`MarketplaceAdapter`] registered for its marketplace, walks the
//! result pages through a [`PageFetcher`], and turns each listing into an
//! [`ItemRecord`](marketlist_core::ItemRecord).

pub mod adapter;
pub mod crawler;
pub mod dom;
pub mod ebay;
pub mod error;
pub mod fetch;
pub mod normalize;
pub mod scrape;
pub mod types;

pub use adapter::{AdapterRegistry, MarketplaceAdapter};
pub use crawler::{crawl_listing_nodes, CrawlReport, StopReason};
pub use dom::ListingNode;
pub use ebay::{EbayAdapter, EBAY_BASE_URL};
pub use error::ScraperError;
pub use fetch::{HttpPageFetcher, PageFetcher};
pub use scrape::Scraper;
pub use types::{FailureReason, ScrapeOutcome};
