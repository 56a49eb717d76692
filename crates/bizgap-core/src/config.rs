use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub const DEFAULT_USER_AGENT: &str = "BusinessOpportunityAnalyzer/1.0";

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
/// Decoupled from the process environment so tests can feed a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
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

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("BIZGAP_ENV", "development"))?;

    let bind_addr = or_default("BIZGAP_BIND_ADDR", "0.0.0.0:3000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("BIZGAP_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("BIZGAP_LOG_LEVEL", "info");

    let user_agent = or_default("BIZGAP_USER_AGENT", DEFAULT_USER_AGENT);
    if user_agent.trim().is_empty() {
        return Err(invalid(
            "BIZGAP_USER_AGENT",
            "upstream services require a non-empty client identifier".to_string(),
        ));
    }

    let request_timeout_secs = parse_u64("BIZGAP_REQUEST_TIMEOUT_SECS", "30")?;
    if request_timeout_secs == 0 {
        return Err(invalid(
            "BIZGAP_REQUEST_TIMEOUT_SECS",
            "must be at least 1".to_string(),
        ));
    }

    let geocode_limit = parse_u32("BIZGAP_GEOCODE_LIMIT", "5")?;
    if geocode_limit == 0 {
        return Err(invalid("BIZGAP_GEOCODE_LIMIT", "must be at least 1".to_string()));
    }

    let thresholds_path = lookup("BIZGAP_THRESHOLDS_PATH")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from);

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        user_agent,
        request_timeout_secs,
        geocode_limit,
        thresholds_path,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "BIZGAP_ENV".to_string(),
            reason: format!("expected development, test, or production; got '{other}'"),
        }),
    }
}
