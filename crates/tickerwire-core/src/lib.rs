//! Shared configuration for tickerwire.
//!
//! Holds the environment-driven [`AppConfig`] and the feed source list
//! loader. Nothing in here touches the network.

mod app_config;
mod config;
mod error;
mod feeds;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use feeds::{load_feeds, parse_feeds, FeedConfig, FeedsFile};
