use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, MetricsError>;

/// Every failure is fatal to the run: no retries, no partial snapshot.
#[derive(Error, Debug)]
pub enum MetricsError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("cannot read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Network failure, non-2xx status, or a body that does not decode as
    /// the expected page envelope.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid date: {0}")]
    DateParse(#[from] chrono::ParseError),

    #[error("timestamp out of range: {0} ms")]
    Timestamp(i64),

    #[error("snapshot serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
