use std::str::FromStr;

use chrono::NaiveDate;
use marketlist_core::BuyingFormat;
use rust_decimal::Decimal;

use super::*;
use crate::dom::{parse_selector, select_listing_nodes};

fn ebay_query() -> SearchQuery {
    SearchQuery::for_marketplace(MarketplaceType::Ebay)
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Wraps listing markup in a results page and lifts out the first node.
fn node_from(listing_html: &str) -> ListingNode {
    let page = format!(
        r#"<html><body><ul class="srp-results srp-list clearfix">{listing_html}</ul></body></html>"#
    );
    let selector = parse_selector(ITEM_LIST_PATH).unwrap();
    select_listing_nodes(&page, &selector)
        .into_iter()
        .next()
        .expect("fixture has a listing node")
}

const FULL_LISTING: &str = r#"
<li class="s-item" id="item3f1a9c">
  <div class="s-item__info">
    <a class="s-item__link" href="https://www.ebay.com/itm/1">
      <div class="s-item__title"><span>Vintage Lego Castle 6080</span></div>
    </a>
    <div class="s-item__subtitle"><span class="SECONDARY_INFO"> Pre-Owned </span></div>
    <span class="s-item__price">$10.00 to $20.00</span>
    <span class="s-item__purchase-options">or Best Offer</span>
    <span class="s-item__bids">3 bids</span>
    <span class="s-item__formatBestOfferEnabled">or Best Offer</span>
    <span class="s-item__logisticsCost">Free delivery</span>
    <span class="s-item__location">from United States</span>
    <span class="s-item__watchCountTotal">14 watchers</span>
    <span class="s-item__hotness">1,234 sold</span>
    <span class="s-item__seller-info-text">shop4less (1234) 98.7%</span>
    <div class="s-item__caption"><span class="POSITIVE">Sold  Oct 5, 2024</span></div>
  </div>
</li>
"#;

// -----------------------------------------------------------------------
// build_search_url
// -----------------------------------------------------------------------

#[test]
fn url_with_term_only() {
    let adapter = EbayAdapter::default();
    let query = ebay_query().with_search_term("test");
    assert_eq!(
        adapter.build_search_url(&query, 0),
        "https://www.ebay.com/sch/?_nkw=test"
    );
}

#[test]
fn url_with_page_appends_pgn() {
    let adapter = EbayAdapter::default();
    let query = ebay_query().with_search_term("test");
    assert_eq!(
        adapter.build_search_url(&query, 3),
        "https://www.ebay.com/sch/?_nkw=test&_pgn=3"
    );
}

#[test]
fn url_with_every_option_keeps_fixed_order() {
    let adapter = EbayAdapter::default();
    let query = SearchQuery {
        category_id: Some(260),
        location_id: Some(1),
        zip_code: Some("90210".to_owned()),
        distance: Some(50),
        sold_items_only: true,
        ..ebay_query().with_search_term("lego castle")
    };
    assert_eq!(
        adapter.build_search_url(&query, 2),
        "https://www.ebay.com/sch/260/i.html?_nkw=lego%20castle&_sacat=260\
         &LH_Sold=1&LH_Complete=1&_pgn=2&_stpos=90210&_sadis=50&LH_PrefLoc=1"
    );
}

#[test]
fn url_without_term_has_no_stray_separator() {
    let adapter = EbayAdapter::default();
    let query = SearchQuery {
        sold_items_only: true,
        ..ebay_query()
    };
    assert_eq!(
        adapter.build_search_url(&query, 1),
        "https://www.ebay.com/sch/?LH_Sold=1&LH_Complete=1&_pgn=1"
    );
}

#[test]
fn url_with_nothing_set_is_the_base_path() {
    let adapter = EbayAdapter::default();
    assert_eq!(
        adapter.build_search_url(&ebay_query(), 0),
        "https://www.ebay.com/sch/"
    );
}

#[test]
fn url_ignores_blank_term_and_zip() {
    let adapter = EbayAdapter::default();
    let query = SearchQuery {
        zip_code: Some("  ".to_owned()),
        ..ebay_query().with_search_term(" ")
    };
    assert_eq!(
        adapter.build_search_url(&query, 1),
        "https://www.ebay.com/sch/?_pgn=1"
    );
}

#[test]
fn url_encodes_reserved_characters_in_term() {
    let adapter = EbayAdapter::default();
    let query = ebay_query().with_search_term("r&b vinyl");
    assert_eq!(
        adapter.build_search_url(&query, 0),
        "https://www.ebay.com/sch/?_nkw=r%26b%20vinyl"
    );
}

#[test]
fn search_url_uses_query_page_number() {
    let adapter = EbayAdapter::default();
    let query = SearchQuery {
        page_number: 4,
        ..ebay_query().with_search_term("test")
    };
    assert_eq!(
        adapter.search_url(&query),
        "https://www.ebay.com/sch/?_nkw=test&_pgn=4"
    );
}

#[test]
fn with_base_url_adds_trailing_slash() {
    let adapter = EbayAdapter::with_base_url("http://127.0.0.1:8080/sch");
    let query = SearchQuery {
        category_id: Some(11450),
        ..ebay_query()
    };
    assert_eq!(
        adapter.build_search_url(&query, 0),
        "http://127.0.0.1:8080/sch/11450/i.html?_sacat=11450"
    );
}

#[test]
fn item_list_path_is_valid_css() {
    let adapter = EbayAdapter::default();
    assert!(parse_selector(adapter.item_list_path()).is_ok());
}

// -----------------------------------------------------------------------
// extract_item
// -----------------------------------------------------------------------

#[test]
fn extract_item_reads_every_field() {
    let adapter = EbayAdapter::default();
    let query = SearchQuery {
        category_id: Some(260),
        location_id: Some(2),
        ..ebay_query()
    };
    let item = adapter
        .extract_item(&query, &node_from(FULL_LISTING))
        .unwrap()
        .expect("listing is real");

    assert_eq!(item.marketplace_id, 1);
    assert_eq!(item.category_id, 260);
    assert_eq!(item.location_id, Some(2));
    assert_eq!(item.element_id, "item3f1a9c");
    assert_eq!(item.name, "Vintage Lego Castle 6080");
    assert!(!item.has_upper_case_name);
    assert_eq!(item.min_price, dec("10.00"));
    assert_eq!(item.max_price, Some(dec("20.00")));
    assert_eq!(item.sale_date, NaiveDate::from_ymd_opt(2024, 10, 5));
    assert_eq!(item.condition, "Pre-Owned");
    assert_eq!(item.total_bids, Some(3));
    assert_eq!(item.buying_format, BuyingFormat::BestOffer);
    assert!(item.has_free_delivery);
    assert_eq!(item.total_watchers, Some(14));
    assert!(item.has_offer);
    assert!(!item.is_sponsored);
    assert_eq!(item.quantity_sold, Some(1234));
    assert_eq!(item.seller_name.as_deref(), Some("shop4less"));
    assert_eq!(item.total_seller_reviews, Some(1234));
    assert_eq!(item.seller_rating, Some(dec("98.7")));
    assert_eq!(item.location, "United States");
}

#[test]
fn extract_item_minimal_listing_uses_defaults() {
    let adapter = EbayAdapter::default();
    let node = node_from(
        r#"<li class="s-item" id="item1">
             <div class="s-item__title">USED</div>
             <span class="s-item__price">$5.25</span>
           </li>"#,
    );
    let item = adapter
        .extract_item(&ebay_query(), &node)
        .unwrap()
        .expect("listing is real");

    assert_eq!(item.category_id, ALL_CATEGORIES_ID);
    assert!(item.location_id.is_none());
    assert!(item.has_upper_case_name);
    assert_eq!(item.min_price, dec("5.25"));
    assert!(item.max_price.is_none());
    assert!(item.sale_date.is_none());
    assert_eq!(item.condition, "");
    assert_eq!(item.total_bids, Some(0));
    assert_eq!(item.buying_format, BuyingFormat::None);
    assert!(!item.has_free_delivery);
    assert_eq!(item.total_watchers, Some(0));
    assert!(!item.has_offer);
    assert_eq!(item.quantity_sold, Some(0));
    assert!(item.seller_name.is_none());
    assert!(item.total_seller_reviews.is_none());
    assert!(item.seller_rating.is_none());
    assert_eq!(item.location, "");
}

#[test]
fn extract_item_seller_block_without_counts_defaults_to_zero() {
    let adapter = EbayAdapter::default();
    let node = node_from(
        r#"<li class="s-item" id="item2">
             <div class="s-item__title">Widget</div>
             <span class="s-item__price">$1.00</span>
             <span class="s-item__seller-info-text">quietseller</span>
           </li>"#,
    );
    let item = adapter.extract_item(&ebay_query(), &node).unwrap().unwrap();
    assert_eq!(item.seller_name.as_deref(), Some("quietseller"));
    assert_eq!(item.total_seller_reviews, Some(0));
    assert_eq!(item.seller_rating, Some(Decimal::ZERO));
}

#[test]
fn extract_item_detects_sponsored_marker() {
    let adapter = EbayAdapter::default();
    let node = node_from(
        r#"<li class="s-item" id="item4">
             <div class="s-item__title">Widget</div>
             <span class="s-item__price">$1.00</span>
             <span class="s-item__sponsored">Sponsored</span>
           </li>"#,
    );
    let item = adapter.extract_item(&ebay_query(), &node).unwrap().unwrap();
    assert!(item.is_sponsored);
}

#[test]
fn extract_item_skips_node_without_id() {
    let adapter = EbayAdapter::default();
    let node = node_from(
        r#"<li class="s-item">
             <div class="s-item__title">Shop on eBay</div>
             <span class="s-item__price">$20.00</span>
           </li>"#,
    );
    assert!(adapter.extract_item(&ebay_query(), &node).unwrap().is_none());
}

#[test]
fn extract_item_skips_node_without_price() {
    let adapter = EbayAdapter::default();
    let node = node_from(
        r#"<li class="s-item" id="item5"><div class="s-item__title">Widget</div></li>"#,
    );
    assert!(adapter.extract_item(&ebay_query(), &node).unwrap().is_none());
}

#[test]
fn extract_item_skips_node_without_name() {
    let adapter = EbayAdapter::default();
    let node = node_from(
        r#"<li class="s-item" id="item6"><span class="s-item__price">$3.00</span></li>"#,
    );
    assert!(adapter.extract_item(&ebay_query(), &node).unwrap().is_none());
}

#[test]
fn extract_item_non_numeric_price_is_fatal() {
    let adapter = EbayAdapter::default();
    let node = node_from(
        r#"<li class="s-item" id="item7">
             <div class="s-item__title">Widget</div>
             <span class="s-item__price">See price</span>
           </li>"#,
    );
    let err = adapter.extract_item(&ebay_query(), &node).unwrap_err();
    assert!(
        matches!(err, ScraperError::PriceFormat { .. }),
        "expected PriceFormat, got: {err:?}"
    );
}
