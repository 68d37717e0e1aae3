use std::path::PathBuf;

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, CollectorError>;

#[derive(Debug, Error)]
pub enum CollectorError {
    #[error("API key is required (pass --api-key <KEY> or set OPENWEATHER_API_KEY)")]
    MissingApiKey,

    #[error("could not determine platform config directory")]
    ConfigDir,

    #[error("failed to read config file '{0}'")]
    ConfigRead(PathBuf, #[source] std::io::Error),

    #[error("failed to parse config file '{0}'")]
    ConfigParse(PathBuf, #[source] toml::de::Error),

    #[error("failed to construct HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    #[error("request to {0} failed")]
    Request(String, #[source] reqwest::Error),

    #[error("failed to read response body from {0}")]
    BodyRead(String, #[source] reqwest::Error),

    #[error("{url} returned HTTP {status}: {body}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("failed to decode weather payload")]
    Decode(#[from] serde_json::Error),

    #[error("failed to create output directory '{0}'")]
    DirCreate(PathBuf, #[source] std::io::Error),

    #[error("failed to open '{0}' for append")]
    FileOpen(PathBuf, #[source] std::io::Error),

    #[error("failed to append record to '{0}'")]
    CsvWrite(PathBuf, #[source] csv::Error),

    #[error("failed to flush '{0}'")]
    Flush(PathBuf, #[source] std::io::Error),
}
