use thiserror::Error;

/// Fatal failures that abort a scrape.
///
/// Validation problems with the query are not errors; they are reported
/// through [`crate::FailureReason`] on the returned outcome.
#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("rate limited fetching {url}")]
    RateLimited { url: String },

    #[error("page not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid selector \"{selector}\": {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("invalid price \"{raw}\": {reason}")]
    PriceFormat { raw: String, reason: String },
}
