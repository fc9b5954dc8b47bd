use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Page cap used when neither the environment nor the query sets one.
pub const DEFAULT_MAX_PAGES: u32 = 200;

/// Default eBay search base path.
pub const DEFAULT_EBAY_BASE_URL: &str = "https://www.ebay.com/sch/";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is present but its value is invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is present but its value is invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("MARKETLIST_ENV", "development"))?;
    let log_level = or_default("MARKETLIST_LOG_LEVEL", "info");

    let scraper_request_timeout_secs =
        parse_u64("MARKETLIST_SCRAPER_REQUEST_TIMEOUT_SECS", "30")?;
    let scraper_user_agent = or_default(
        "MARKETLIST_SCRAPER_USER_AGENT",
        "marketlist/0.1 (listing-crawler)",
    );

    let scraper_max_pages = parse_u32(
        "MARKETLIST_SCRAPER_MAX_PAGES",
        &DEFAULT_MAX_PAGES.to_string(),
    )?;
    if scraper_max_pages == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "MARKETLIST_SCRAPER_MAX_PAGES".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    let ebay_base_url = or_default("MARKETLIST_EBAY_BASE_URL", DEFAULT_EBAY_BASE_URL);

    Ok(AppConfig {
        env,
        log_level,
        scraper_request_timeout_secs,
        scraper_user_agent,
        scraper_max_pages,
        ebay_base_url,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than
/// `development`, `test`, or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "MARKETLIST_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
