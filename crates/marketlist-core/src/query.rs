use serde::{Deserialize, Serialize};

/// Category identifier meaning "no category filter".
pub const ALL_CATEGORIES_ID: i32 = 0;

/// Marketplaces with a registered adapter, keyed by their stable numeric id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketplaceType {
    Ebay,
}

impl MarketplaceType {
    #[must_use]
    pub fn id(self) -> i32 {
        match self {
            MarketplaceType::Ebay => 1,
        }
    }

    #[must_use]
    pub fn from_id(id: i32) -> Option<Self> {
        match id {
            1 => Some(MarketplaceType::Ebay),
            _ => None,
        }
    }
}

impl std::fmt::Display for MarketplaceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MarketplaceType::Ebay => write!(f, "ebay"),
        }
    }
}

/// Geographic scope a search is restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationType {
    Us,
    Worldwide,
    NorthAmerica,
}

impl LocationType {
    #[must_use]
    pub fn id(self) -> i32 {
        match self {
            LocationType::Us => 1,
            LocationType::Worldwide => 2,
            LocationType::NorthAmerica => 3,
        }
    }

    #[must_use]
    pub fn from_id(id: i32) -> Option<Self> {
        match id {
            1 => Some(LocationType::Us),
            2 => Some(LocationType::Worldwide),
            3 => Some(LocationType::NorthAmerica),
            _ => None,
        }
    }
}

/// Search parameters for one scrape.
///
/// A query is never mutated by a crawl: the page being fetched is passed
/// alongside it, so one query value can drive concurrent scrapes safely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Numeric marketplace id (see [`MarketplaceType::id`]). Required before
    /// any URL is built.
    pub marketplace_id: Option<i32>,
    pub category_id: Option<i32>,
    /// Numeric location scope (see [`LocationType::id`]).
    pub location_id: Option<i32>,
    pub search_term: Option<String>,
    /// Page number used when a URL is built outside a crawl. `0` omits the
    /// page parameter.
    #[serde(default)]
    pub page_number: u32,
    pub zip_code: Option<String>,
    pub distance: Option<u32>,
    /// `true` when `distance` is in miles, `false` for kilometres.
    #[serde(default)]
    pub is_miles: bool,
    #[serde(default)]
    pub sold_items_only: bool,
    /// Overrides the configured page cap for this query only.
    pub max_pages: Option<u32>,
}

impl SearchQuery {
    /// Starts a query against the given marketplace.
    #[must_use]
    pub fn for_marketplace(marketplace: MarketplaceType) -> Self {
        Self {
            marketplace_id: Some(marketplace.id()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_search_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    #[must_use]
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = Some(max_pages);
        self
    }

    /// Page cap for this query: its own override, else `default_max_pages`.
    #[must_use]
    pub fn effective_max_pages(&self, default_max_pages: u32) -> u32 {
        self.max_pages.unwrap_or(default_max_pages)
    }

    /// Search term with surrounding whitespace removed; blank terms are `None`.
    #[must_use]
    pub fn trimmed_search_term(&self) -> Option<&str> {
        self.search_term
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    /// Postal code with surrounding whitespace removed; blank codes are `None`.
    #[must_use]
    pub fn trimmed_zip_code(&self) -> Option<&str> {
        self.zip_code
            .as_deref()
            .map(str::trim)
            .filter(|z| !z.is_empty())
    }
}
