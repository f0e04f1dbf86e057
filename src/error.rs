//! Error types for rulemerge.

use std::path::PathBuf;
use thiserror::Error;

/// Error type for rulemerge operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Retriable fetch failure: timeout, 5xx, connection reset
    #[error("transient fetch error: {0}")]
    TransientFetch(String),

    /// Client error response (4xx), never retried
    #[error("permanent fetch error: HTTP {status}")]
    PermanentFetch { status: u16 },

    /// Any other fetch failure, never retried
    #[error("unexpected fetch error: {0}")]
    UnexpectedFetch(String),

    /// Source descriptor file could not be read; that descriptor is skipped
    #[error("failed to read source {path}: {source}")]
    SourceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Output document could not be written; that document is skipped
    #[error("failed to write output {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Whether the fetcher's retry budget applies to this error.
    pub fn is_retriable(&self) -> bool {
        matches!(self, Error::TransientFetch(_))
    }
}

/// Result type alias for rulemerge operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_transient_is_retriable() {
        assert!(Error::TransientFetch("timeout".into()).is_retriable());
        assert!(!Error::PermanentFetch { status: 404 }.is_retriable());
        assert!(!Error::UnexpectedFetch("oops".into()).is_retriable());
        assert!(!Error::Config("bad".into()).is_retriable());
    }

    #[test]
    fn test_display_includes_context() {
        let err = Error::PermanentFetch { status: 403 };
        assert!(err.to_string().contains("403"));

        let err = Error::SourceRead {
            path: PathBuf::from("/sources/ads.txt"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.to_string().contains("ads.txt"));
    }
}
