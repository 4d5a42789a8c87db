//! Error types you might see while loading registry and image data

use thiserror::Error;

/// Errors in registry configuration data
#[derive(Error, Debug)]
pub enum ConfigError {
    /// registry type code is not one we know about
    #[error("unknown registry type code: {0}")]
    UnknownRegistryType(u8),

    /// registry id is not a non-negative integer
    #[error("invalid registry id: {0:?}")]
    InvalidRegistryId(String),
}

/// Errors while fetching registries, settings, or the image inventory
#[derive(Error, Debug)]
pub enum SourceError {
    /// io error
    #[error("io error reading {path:?}: {source}")]
    IO {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    /// json error
    #[error("json error: {0}")]
    JSON(#[from] serde_json::Error),

    /// source is not able to answer this query
    #[error("source unavailable: {0}")]
    Unavailable(String),
}
