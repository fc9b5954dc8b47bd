//! Pure text normalizers that turn fragments of listing text into typed values.
//!
//! Nothing here knows about any marketplace's markup. Adapters locate the
//! text; these functions interpret it, so a layout change on the source site
//! breaks an adapter selector rather than a parser.

use std::str::FromStr;
use std::sync::LazyLock;

use chrono::NaiveDate;
use marketlist_core::BuyingFormat;
use regex::Regex;
use rust_decimal::Decimal;

use crate::error::ScraperError;

/// Separator between the two ends of a displayed price range.
const RANGE_SEPARATOR: &str = " to ";

static SOLD_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Sold\s+([A-Za-z]+)\s+(\d{1,2}),\s+(\d{4})").expect("valid sold date regex")
});

static BID_COUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(\d+)\s+bids?\b").expect("valid bid count regex"));

static QUANTITY_SOLD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(\d{1,3}(?:,\d{3})+|\d+)\s*sold\b").expect("valid quantity sold regex")
});

static SELLER_REVIEWS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\((\d{1,3}(?:,\d{3})+|\d+)\)").expect("valid seller reviews regex")
});

static SELLER_RATING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)\s*%").expect("valid seller rating regex"));

/// Seller block of a listing, e.g. `"shop4less (1,234) 98.7%"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SellerInfo {
    pub name: String,
    /// `0` when the block carries no parenthesised review count.
    pub total_reviews: u32,
    /// `0` when the block carries no percentage.
    pub rating: Decimal,
}

/// Parses a single monetary token such as `"$1,234.50"` or `"US $10.00"`.
///
/// Any leading currency marker is stripped and thousands separators are
/// removed before the remainder is parsed as a decimal.
///
/// # Errors
///
/// Returns [`ScraperError::PriceFormat`] when no numeric value remains or the
/// remainder is not a valid decimal.
pub fn parse_price(raw: &str) -> Result<Decimal, ScraperError> {
    let numeric = raw
        .trim()
        .trim_start_matches(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-'));
    let cleaned: String = numeric.chars().filter(|c| *c != ',').collect();
    let cleaned = cleaned.trim();

    if cleaned.is_empty() {
        return Err(ScraperError::PriceFormat {
            raw: raw.to_owned(),
            reason: "no numeric value".to_owned(),
        });
    }

    Decimal::from_str(cleaned).map_err(|e| ScraperError::PriceFormat {
        raw: raw.to_owned(),
        reason: e.to_string(),
    })
}

/// Parses a displayed price into `(min, max)`.
///
/// `"$10.00"` yields `(10.00, None)`; `"$10.00 to $20.00"` yields
/// `(10.00, Some(20.00))`. The `" to "` separator is matched
/// case-insensitively.
///
/// # Errors
///
/// Returns [`ScraperError::PriceFormat`] when the range does not split into
/// exactly two tokens or either token is not a valid price.
pub fn parse_price_range(raw: &str) -> Result<(Decimal, Option<Decimal>), ScraperError> {
    let trimmed = raw.trim();
    // ASCII lowercasing keeps byte offsets aligned with `trimmed`.
    let lower = trimmed.to_ascii_lowercase();

    let Some(idx) = lower.find(RANGE_SEPARATOR) else {
        return Ok((parse_price(trimmed)?, None));
    };

    let min_raw = &trimmed[..idx];
    let max_raw = &trimmed[idx + RANGE_SEPARATOR.len()..];
    if lower[idx + RANGE_SEPARATOR.len()..].contains(RANGE_SEPARATOR) {
        return Err(ScraperError::PriceFormat {
            raw: raw.to_owned(),
            reason: "expected exactly two prices in range".to_owned(),
        });
    }

    Ok((parse_price(min_raw)?, Some(parse_price(max_raw)?)))
}

/// Finds `Sold <Month> <Day>, <Year>` in `text` and parses it.
///
/// The month may be written in full or abbreviated. Returns `None` when the
/// pattern is absent or names an unknown month.
#[must_use]
pub fn parse_sold_date(text: &str) -> Option<NaiveDate> {
    let caps = SOLD_DATE_RE.captures(text)?;
    let (month, day, year) = (&caps[1], &caps[2], &caps[3]);

    match NaiveDate::parse_from_str(&format!("{month} {day} {year}"), "%B %d %Y") {
        Ok(date) => Some(date),
        Err(e) => {
            tracing::warn!(month, day, year, error = %e, "unparseable sale date");
            None
        }
    }
}

/// Extracts `N` from `"N bids"` (or `"1 bid"`); `0` when absent.
#[must_use]
pub fn parse_bid_count(text: &str) -> u32 {
    BID_COUNT_RE
        .captures(text)
        .and_then(|caps| caps[1].parse().ok())
        .unwrap_or(0)
}

/// Classifies the buying format from free listing text.
///
/// Keywords are checked in priority order and the first hit wins, so text
/// mentioning both "Best Offer" and "Bids" resolves to
/// [`BuyingFormat::BestOffer`].
#[must_use]
pub fn parse_buying_format(text: &str) -> BuyingFormat {
    if contains_ignore_case(text, "buy it now") {
        BuyingFormat::BuyItNow
    } else if contains_ignore_case(text, "best offer") {
        BuyingFormat::BestOffer
    } else if contains_ignore_case(text, "bids") {
        BuyingFormat::Bids
    } else {
        BuyingFormat::None
    }
}

/// Case-insensitive substring check.
#[must_use]
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Parses the leading integer of a watcher label such as `"12 watchers"`.
///
/// Returns `0` when the first token is not a number (e.g. `"Last one"`).
#[must_use]
pub fn parse_watcher_count(text: &str) -> u32 {
    let Some(token) = text.split_whitespace().next() else {
        return 0;
    };
    let digits: String = token.chars().filter(|c| *c != ',').collect();
    digits.parse().unwrap_or_else(|_| {
        tracing::warn!(token, "watcher label has no leading count");
        0
    })
}

/// Extracts `N` from `"N sold"`, accepting grouped digits like `"1,234 sold"`;
/// `0` when absent.
#[must_use]
pub fn parse_quantity_sold(text: &str) -> u32 {
    QUANTITY_SOLD_RE
        .captures(text)
        .and_then(|caps| caps[1].replace(',', "").parse().ok())
        .unwrap_or(0)
}

/// Splits a seller block into name, review count, and positive-feedback rating.
#[must_use]
pub fn parse_seller_info(text: &str) -> SellerInfo {
    let name = text.split('(').next().unwrap_or_default().trim().to_owned();

    let total_reviews = SELLER_REVIEWS_RE
        .captures(text)
        .and_then(|caps| caps[1].replace(',', "").parse().ok())
        .unwrap_or(0);

    let rating = SELLER_RATING_RE
        .captures(text)
        .and_then(|caps| Decimal::from_str(&caps[1]).ok())
        .unwrap_or(Decimal::ZERO);

    SellerInfo {
        name,
        total_reviews,
        rating,
    }
}

/// Trims a location label and drops a leading `"from "` marker.
#[must_use]
pub fn normalize_location(text: &str) -> String {
    let trimmed = text.trim();
    match trimmed.get(..5) {
        Some(prefix) if prefix.eq_ignore_ascii_case("from ") => trimmed[5..].trim().to_owned(),
        _ => trimmed.to_owned(),
    }
}

/// `true` when `text` is non-empty and every character in it is uppercase.
///
/// Spaces, digits, and punctuation are not uppercase, so `"IPHONE 12"` is
/// `false`.
#[must_use]
pub fn is_all_uppercase(text: &str) -> bool {
    !text.is_empty() && text.chars().all(char::is_uppercase)
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
