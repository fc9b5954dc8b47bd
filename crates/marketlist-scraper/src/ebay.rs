//! eBay search-results adapter.
//!
//! ## URL shape
//!
//! ```text
//! https://www.ebay.com/sch/{category}/i.html?_nkw=term&_sacat={category}
//!     &LH_Sold=1&LH_Complete=1&_pgn={page}&_stpos={zip}&_sadis={distance}
//!     &LH_PrefLoc={location}
//! ```
//!
//! Every segment after the base path is optional and the order above is
//! fixed. `_sadis` is passed through unconverted; eBay interprets it in the
//! unit of the storefront.
//!
//! ## Listing markup
//!
//! Each result is an `li.s-item` under `ul.srp-results`, carrying the listing
//! id in its `id` attribute. Sale date, bid count, buying format, delivery,
//! and quantity sold are not reliably in dedicated elements, so they are read
//! from the listing's full text.

use std::sync::LazyLock;

use marketlist_core::{ItemRecord, MarketplaceType, SearchQuery, ALL_CATEGORIES_ID};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use scraper::Selector;

use crate::adapter::MarketplaceAdapter;
use crate::dom::{inner_text, select_first, ListingNode};
use crate::error::ScraperError;
use crate::normalize::{
    contains_ignore_case, is_all_uppercase, normalize_location, parse_bid_count,
    parse_buying_format, parse_price_range, parse_quantity_sold, parse_seller_info,
    parse_sold_date, parse_watcher_count,
};

pub const EBAY_BASE_URL: &str = "https://www.ebay.com/sch/";

pub(crate) const ITEM_LIST_PATH: &str = "ul.srp-results > li.s-item";

const CATEGORY_INDEX: &str = "/i.html";
const SOLD_ITEMS_FILTER: &str = "LH_Sold=1&LH_Complete=1";
const FREE_DELIVERY_MARKER: &str = "Free delivery";

/// Unreserved URL characters stay literal; everything else is escaped.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

static NAME: LazyLock<Selector> = LazyLock::new(|| compile(".s-item__title"));
static PRICE: LazyLock<Selector> = LazyLock::new(|| compile(".s-item__price"));
static CONDITION: LazyLock<Selector> = LazyLock::new(|| compile(".SECONDARY_INFO"));
static WATCHERS: LazyLock<Selector> = LazyLock::new(|| compile(".s-item__watchCountTotal"));
static OFFER: LazyLock<Selector> =
    LazyLock::new(|| compile(".s-item__formatBestOfferEnabled"));
static SELLER_INFO: LazyLock<Selector> =
    LazyLock::new(|| compile(".s-item__seller-info-text"));
static LOCATION: LazyLock<Selector> = LazyLock::new(|| compile(".s-item__location"));
static SPONSORED: LazyLock<Selector> = LazyLock::new(|| compile(".s-item__sponsored"));

fn compile(css: &str) -> Selector {
    Selector::parse(css).expect("valid eBay selector")
}

/// [`MarketplaceAdapter`] for eBay search results.
#[derive(Debug, Clone)]
pub struct EbayAdapter {
    base_url: String,
}

impl Default for EbayAdapter {
    fn default() -> Self {
        Self::with_base_url(EBAY_BASE_URL)
    }
}

impl EbayAdapter {
    /// Creates an adapter searching under `base_url`. A trailing `/` is added
    /// when missing so category segments append cleanly.
    #[must_use]
    pub fn with_base_url(base_url: &str) -> Self {
        let mut base_url = base_url.trim().to_owned();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self { base_url }
    }
}

impl MarketplaceAdapter for EbayAdapter {
    fn marketplace_id(&self) -> i32 {
        MarketplaceType::Ebay.id()
    }

    fn build_search_url(&self, query: &SearchQuery, page: u32) -> String {
        let mut url = self.base_url.clone();

        if let Some(category) = query.category_id {
            url.push_str(&category.to_string());
            url.push_str(CATEGORY_INDEX);
        }

        let mut params: Vec<String> = Vec::new();
        if let Some(term) = query.trimmed_search_term() {
            params.push(format!("_nkw={}", utf8_percent_encode(term, QUERY_VALUE)));
        }
        if let Some(category) = query.category_id {
            params.push(format!("_sacat={category}"));
        }
        if query.sold_items_only {
            params.push(SOLD_ITEMS_FILTER.to_owned());
        }
        if page > 0 {
            params.push(format!("_pgn={page}"));
        }
        if let Some(zip) = query.trimmed_zip_code() {
            params.push(format!("_stpos={}", utf8_percent_encode(zip, QUERY_VALUE)));
        }
        if let Some(distance) = query.distance {
            params.push(format!("_sadis={distance}"));
        }
        if let Some(location) = query.location_id {
            params.push(format!("LH_PrefLoc={location}"));
        }

        if !params.is_empty() {
            url.push('?');
            url.push_str(&params.join("&"));
        }
        url
    }

    fn item_list_path(&self) -> &str {
        ITEM_LIST_PATH
    }

    fn extract_item(
        &self,
        query: &SearchQuery,
        node: &ListingNode,
    ) -> Result<Option<ItemRecord>, ScraperError> {
        let Some(element_id) = node.element_id() else {
            tracing::debug!("skipping listing node without an id");
            return Ok(None);
        };

        let fragment = node.parse();
        let root = fragment.root_element();

        let (Some(name_node), Some(price_node)) =
            (select_first(root, &NAME), select_first(root, &PRICE))
        else {
            tracing::debug!(element_id, "skipping listing node without name or price");
            return Ok(None);
        };

        let name = inner_text(name_node);
        let (min_price, max_price) = parse_price_range(&inner_text(price_node))
            .inspect_err(|e| tracing::warn!(element_id, error = %e, "listing price unparseable"))?;

        let text = inner_text(root);
        let seller = select_first(root, &SELLER_INFO).map(|el| parse_seller_info(&inner_text(el)));

        Ok(Some(ItemRecord {
            marketplace_id: self.marketplace_id(),
            category_id: query.category_id.unwrap_or(ALL_CATEGORIES_ID),
            location_id: query.location_id,
            element_id: element_id.to_owned(),
            has_upper_case_name: is_all_uppercase(&name),
            name,
            min_price,
            max_price,
            sale_date: parse_sold_date(&text),
            total_watchers: Some(
                select_first(root, &WATCHERS).map_or(0, |el| parse_watcher_count(&inner_text(el))),
            ),
            condition: select_first(root, &CONDITION)
                .map(inner_text)
                .unwrap_or_default(),
            total_bids: Some(parse_bid_count(&text)),
            buying_format: parse_buying_format(&text),
            has_free_delivery: contains_ignore_case(&text, FREE_DELIVERY_MARKER),
            quantity_sold: Some(parse_quantity_sold(&text)),
            has_offer: select_first(root, &OFFER).is_some(),
            is_sponsored: select_first(root, &SPONSORED).is_some(),
            seller_name: seller.as_ref().map(|s| s.name.clone()),
            total_seller_reviews: seller.as_ref().map(|s| s.total_reviews),
            seller_rating: seller.map(|s| s.rating),
            location: select_first(root, &LOCATION)
                .map(|el| normalize_location(&inner_text(el)))
                .unwrap_or_default(),
        }))
    }
}

#[cfg(test)]
#[path = "ebay_test.rs"]
mod tests;
