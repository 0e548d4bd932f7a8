use std::fmt;

// === StoreError ===

/// Errors surfaced by the history store.
#[derive(Debug)]
pub enum StoreError {
    /// A read query against the store failed.
    Query(String),
    /// The top-sites cache recompute failed.
    CacheRefresh(String),
    /// The underlying database operation failed.
    Database(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Query(msg) => write!(f, "Store query failed: {}", msg),
            StoreError::CacheRefresh(msg) => write!(f, "Top-sites cache refresh failed: {}", msg),
            StoreError::Database(msg) => write!(f, "History database error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

// === ValidationError ===

/// Errors raised when transforming a raw [`Site`](crate::types::site::Site)
/// into a display item. Invalid records are dropped from the batch, never
/// surfaced to the user.
#[derive(Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// The site has no tile URL to display or navigate to.
    MissingUrl,
    /// The tile URL does not parse.
    MalformedUrl(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingUrl => write!(f, "Site has no tile URL"),
            ValidationError::MalformedUrl(url) => write!(f, "Malformed tile URL: {}", url),
        }
    }
}

impl std::error::Error for ValidationError {}

// === ConfigError ===

/// Errors related to panel configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// An I/O error occurred while reading the config file.
    IoError(String),
    /// Failed to deserialize the config file.
    SerializationError(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::IoError(msg) => write!(f, "Config I/O error: {}", msg),
            ConfigError::SerializationError(msg) => {
                write!(f, "Config serialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
