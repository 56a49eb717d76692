use std::net::SocketAddr;
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
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Identifies this application to the public OSM services.
    pub user_agent: String,
    pub request_timeout_secs: u64,
    /// Maximum number of geocoding candidates requested per lookup.
    pub geocode_limit: u32,
    /// Optional YAML file overriding the built-in competition thresholds.
    pub thresholds_path: Option<PathBuf>,
}
