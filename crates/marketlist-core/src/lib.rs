//! Shared domain types and configuration for the marketplace listing crawler.

pub mod app_config;
pub mod config;
pub mod items;
pub mod query;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use items::{BuyingFormat, ItemRecord};
pub use query::{LocationType, MarketplaceType, SearchQuery, ALL_CATEGORIES_ID};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
