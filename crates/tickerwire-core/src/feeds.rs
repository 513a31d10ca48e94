use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

use crate::ConfigError;

/// One configured feed source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedConfig {
    pub name: String,
    pub url: String,
}

/// The validated feed source list.
#[derive(Debug, Clone, Default)]
pub struct FeedsFile {
    pub feeds: Vec<FeedConfig>,
}

impl FeedsFile {
    /// The URLs of every configured feed, in file order.
    #[must_use]
    pub fn urls(&self) -> Vec<String> {
        self.feeds.iter().map(|f| f.url.clone()).collect()
    }
}

/// Accepted on-disk shapes: a `feeds:` list, or a flat `name: url` mapping.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawFeedsFile {
    List { feeds: Vec<FeedConfig> },
    /// Kept as a `Mapping` so feeds stay in file order.
    Map(Mapping),
}

impl TryFrom<RawFeedsFile> for FeedsFile {
    type Error = ConfigError;

    fn try_from(raw: RawFeedsFile) -> Result<Self, Self::Error> {
        let feeds = match raw {
            RawFeedsFile::List { feeds } => feeds,
            RawFeedsFile::Map(map) => map
                .into_iter()
                .map(|entry| match entry {
                    (Value::String(name), Value::String(url)) => Ok(FeedConfig { name, url }),
                    (name, _) => Err(ConfigError::FeedValidation(format!(
                        "feed {name:?} must map a name to a url string"
                    ))),
                })
                .collect::<Result<Vec<_>, _>>()?,
        };
        Ok(Self { feeds })
    }
}

/// Load and validate the feed source list from a YAML (or JSON) file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_feeds(path: &Path) -> Result<FeedsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FeedsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_feeds(&content)
}

/// Parse and validate feed source list content.
///
/// # Errors
///
/// Returns `ConfigError` if the content cannot be parsed or fails validation.
pub fn parse_feeds(content: &str) -> Result<FeedsFile, ConfigError> {
    let raw: RawFeedsFile = serde_yaml::from_str(content)?;
    let feeds_file = FeedsFile::try_from(raw)?;
    validate_feeds(&feeds_file)?;
    Ok(feeds_file)
}

fn validate_feeds(feeds_file: &FeedsFile) -> Result<(), ConfigError> {
    if feeds_file.feeds.is_empty() {
        return Err(ConfigError::FeedValidation(
            "at least one feed must be configured".to_string(),
        ));
    }

    let mut seen_urls = HashSet::new();
    for feed in &feeds_file.feeds {
        if feed.name.trim().is_empty() {
            return Err(ConfigError::FeedValidation(format!(
                "feed with url '{}' has an empty name",
                feed.url
            )));
        }

        let url = feed.url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::FeedValidation(format!(
                "feed '{}' has non-http url '{}'",
                feed.name, feed.url
            )));
        }

        if !seen_urls.insert(url.to_string()) {
            return Err(ConfigError::FeedValidation(format!(
                "duplicate feed url: '{url}'"
            )));
        }
    }

    Ok(())
}
