#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Runtime settings for the crawler and its command-line driver.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub scraper_request_timeout_secs: u64,
    pub scraper_user_agent: String,
    /// Page cap applied when a query does not carry its own.
    pub scraper_max_pages: u32,
    /// Search base path for the eBay adapter, e.g. `https://www.ebay.com/sch/`.
    pub ebay_base_url: String,
}
