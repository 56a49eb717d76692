use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("invalid coordinate ({lat}, {lon}): {reason}")]
    InvalidCoordinate {
        lat: f64,
        lon: f64,
        reason: &'static str,
    },

    #[error("invalid search radius {0}: must be a positive number of metres")]
    InvalidRadius(u32),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read thresholds file {path}: {source}")]
    ThresholdsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse thresholds file: {0}")]
    ThresholdsFileParse(#[source] serde_yaml::Error),

    #[error("config validation failed: {0}")]
    Validation(String),
}
