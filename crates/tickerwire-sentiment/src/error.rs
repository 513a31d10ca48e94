use thiserror::Error;

#[derive(Debug, Error)]
pub enum SentimentError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("request to {url} timed out after {timeout_ms}ms")]
    Timeout { url: String, timeout_ms: u128 },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid feed content from {url}: {reason}")]
    InvalidFeed { url: String, reason: String },

    #[error("subject lookup failed: {0}")]
    Resolver(String),
}

impl SentimentError {
    /// `true` when the failure was the request outliving its deadline.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        match self {
            SentimentError::Timeout { .. } => true,
            SentimentError::Http(e) => e.is_timeout(),
            _ => false,
        }
    }
}
