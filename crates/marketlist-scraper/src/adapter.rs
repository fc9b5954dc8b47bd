//! Per-marketplace strategies and the registry that dispatches to them.

use std::collections::HashMap;
use std::sync::Arc;

use marketlist_core::{ItemRecord, SearchQuery};

use crate::dom::ListingNode;
use crate::ebay::EbayAdapter;
use crate::error::ScraperError;

/// Everything the crawler and orchestrator need to know about one marketplace.
pub trait MarketplaceAdapter: Send + Sync {
    /// Numeric id this adapter is registered under.
    fn marketplace_id(&self) -> i32;

    /// Builds the search URL for `query` at `page`. Pure and deterministic;
    /// `page == 0` omits the page parameter.
    fn build_search_url(&self, query: &SearchQuery, page: u32) -> String;

    /// Search URL at the page the query itself carries.
    fn search_url(&self, query: &SearchQuery) -> String {
        self.build_search_url(query, query.page_number)
    }

    /// CSS selector matching the listing containers on a results page.
    fn item_list_path(&self) -> &str;

    /// Turns one listing node into a record.
    ///
    /// `Ok(None)` means the node is not a real listing and is skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::PriceFormat`] when a listing shows a price
    /// that cannot be parsed.
    fn extract_item(
        &self,
        query: &SearchQuery,
        node: &ListingNode,
    ) -> Result<Option<ItemRecord>, ScraperError>;
}

/// Adapters keyed by marketplace id.
#[derive(Clone, Default)]
pub struct AdapterRegistry {
    adapters: HashMap<i32, Arc<dyn MarketplaceAdapter>>,
}

impl AdapterRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in adapter, with eBay searching under
    /// `ebay_base_url`.
    #[must_use]
    pub fn with_builtin(ebay_base_url: &str) -> Self {
        let mut registry = Self::new();
        registry.register(EbayAdapter::with_base_url(ebay_base_url));
        registry
    }

    /// Registers `adapter`, replacing any adapter already under its id.
    pub fn register<A>(&mut self, adapter: A)
    where
        A: MarketplaceAdapter + 'static,
    {
        self.adapters
            .insert(adapter.marketplace_id(), Arc::new(adapter));
    }

    #[must_use]
    pub fn get(&self, marketplace_id: i32) -> Option<Arc<dyn MarketplaceAdapter>> {
        self.adapters.get(&marketplace_id).cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}

impl std::fmt::Debug for AdapterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut ids: Vec<_> = self.adapters.keys().copied().collect();
        ids.sort_unstable();
        f.debug_struct("AdapterRegistry")
            .field("marketplace_ids", &ids)
            .finish()
    }
}
