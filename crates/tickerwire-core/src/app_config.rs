use std::path::PathBuf;

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

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub feeds_path: PathBuf,
    /// Per-source timeout applied to both fetching and verification.
    pub fetch_timeout_secs: u64,
    pub user_agent: String,
    pub max_concurrent_fetches: usize,
    pub max_concurrent_scores: usize,
    pub sentiment_cache_ttl_secs: u64,
    /// `None` keeps cached result sets for the lifetime of the process.
    pub result_cache_ttl_secs: Option<u64>,
    pub verify_feeds_on_startup: bool,
    pub resolver_base_url: String,
}
