use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
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
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_positive_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        match parse_u64(var, default)? {
            0 => Err(invalid(var, "must be greater than zero".to_string())),
            n => Ok(n),
        }
    };

    let parse_positive_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        match or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))?
        {
            0 => Err(invalid(var, "must be greater than zero".to_string())),
            n => Ok(n),
        }
    };

    let parse_bool = |var: &str, default: bool| -> Result<bool, ConfigError> {
        match lookup(var) {
            Err(_) => Ok(default),
            Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(true),
                "0" | "false" | "no" | "off" => Ok(false),
                other => Err(invalid(var, format!("expected a boolean, got '{other}'"))),
            },
        }
    };

    let env = parse_environment(&or_default("TICKERWIRE_ENV", "development"))?;
    let log_level = or_default("TICKERWIRE_LOG_LEVEL", "info");
    let feeds_path = PathBuf::from(or_default("TICKERWIRE_FEEDS_PATH", "./config/feeds.yaml"));

    let fetch_timeout_secs = parse_positive_u64("TICKERWIRE_FETCH_TIMEOUT_SECS", "10")?;
    let user_agent = or_default("TICKERWIRE_USER_AGENT", "tickerwire/0.1 (news-sentiment)");
    let max_concurrent_fetches = parse_positive_usize("TICKERWIRE_MAX_CONCURRENT_FETCHES", "32")?;
    let max_concurrent_scores = parse_positive_usize("TICKERWIRE_MAX_CONCURRENT_SCORES", "16")?;

    let sentiment_cache_ttl_secs =
        parse_positive_u64("TICKERWIRE_SENTIMENT_CACHE_TTL_SECS", "3600")?;
    let result_cache_ttl_secs = match lookup("TICKERWIRE_RESULT_CACHE_TTL_SECS") {
        Ok(_) => Some(parse_positive_u64("TICKERWIRE_RESULT_CACHE_TTL_SECS", "0")?),
        Err(_) => None,
    };

    let verify_feeds_on_startup = parse_bool("TICKERWIRE_VERIFY_FEEDS_ON_STARTUP", true)?;
    let resolver_base_url = or_default(
        "TICKERWIRE_RESOLVER_BASE_URL",
        "https://query1.finance.yahoo.com",
    );

    Ok(AppConfig {
        env,
        log_level,
        feeds_path,
        fetch_timeout_secs,
        user_agent,
        max_concurrent_fetches,
        max_concurrent_scores,
        sentiment_cache_ttl_secs,
        result_cache_ttl_secs,
        verify_feeds_on_startup,
        resolver_base_url,
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
            var: "TICKERWIRE_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
