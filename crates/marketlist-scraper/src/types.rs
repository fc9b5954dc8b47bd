use marketlist_core::ItemRecord;
use serde::Serialize;

/// Why a scrape produced no items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// The query names no marketplace.
    MissingQueryOption,
    /// The query names a marketplace with no registered adapter.
    InvalidQueryOptionType,
    NoItemsFound,
}

impl FailureReason {
    /// Human-readable message for display to end users.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            FailureReason::MissingQueryOption => "A required query option is missing.",
            FailureReason::InvalidQueryOptionType => "The query option type is invalid.",
            FailureReason::NoItemsFound => "No items found.",
        }
    }
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Result of one scrape. `items` is non-empty exactly when `succeeded` is
/// true, and `failure` is set exactly when it is false.
#[derive(Debug, Clone, Serialize)]
pub struct ScrapeOutcome {
    pub succeeded: bool,
    pub items: Vec<ItemRecord>,
    pub failure: Option<FailureReason>,
}

impl ScrapeOutcome {
    /// A successful outcome. An empty `items` is reported as
    /// [`FailureReason::NoItemsFound`] instead.
    #[must_use]
    pub fn success(items: Vec<ItemRecord>) -> Self {
        if items.is_empty() {
            return Self::failure(FailureReason::NoItemsFound);
        }
        Self {
            succeeded: true,
            items,
            failure: None,
        }
    }

    #[must_use]
    pub fn failure(reason: FailureReason) -> Self {
        Self {
            succeeded: false,
            items: Vec::new(),
            failure: Some(reason),
        }
    }

    /// The failure message, if the scrape failed.
    #[must_use]
    pub fn message(&self) -> Option<&'static str> {
        self.failure.map(FailureReason::message)
    }
}
