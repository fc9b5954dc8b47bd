use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How a listing can be bought. Integer codes are stable for persistence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuyingFormat {
    #[default]
    None = 0,
    BuyItNow = 1,
    BestOffer = 2,
    Bids = 3,
}

/// One listing parsed from a search-results page.
///
/// Built once per listing node and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub marketplace_id: i32,
    /// Copied from the query; [`crate::ALL_CATEGORIES_ID`] when the query had none.
    pub category_id: i32,
    /// Copied from the query.
    pub location_id: Option<i32>,
    /// Marketplace-assigned element id, stable per listing.
    pub element_id: String,
    pub name: String,
    /// `true` when every character of the name is uppercase. A downstream
    /// signal only; not validated here.
    pub has_upper_case_name: bool,
    pub min_price: Decimal,
    /// Present only when the listing shows a price range.
    pub max_price: Option<Decimal>,
    /// Absent when the listing shows no sale date. Never a sentinel value.
    pub sale_date: Option<NaiveDate>,
    pub total_watchers: Option<u32>,
    /// Empty when the listing shows no condition.
    pub condition: String,
    pub total_bids: Option<u32>,
    pub buying_format: BuyingFormat,
    pub has_free_delivery: bool,
    pub quantity_sold: Option<u32>,
    pub has_offer: bool,
    pub is_sponsored: bool,
    /// Absent when the listing has no seller block at all.
    pub seller_name: Option<String>,
    pub total_seller_reviews: Option<u32>,
    pub seller_rating: Option<Decimal>,
    /// Empty when the listing shows no location.
    pub location: String,
}
