//! Error types for the orphan checker.
//!
//! All errors in the system are represented by the [`Error`] enum.
//! Unresolved local links are *not* errors; they travel as warnings on the
//! link graph and the caller decides what to do with them.

use std::io;
use std::path::PathBuf;
use thiserror::Error as ThisError;

/// The core error type for all mdorphan operations.
#[derive(ThisError, Debug)]
pub enum Error {
    /// File system error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A document from the inventory could not be read
    #[error("read markdown file {path:?}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A path could not be resolved to its absolute form
    #[error("Invalid file path: {reason}")]
    InvalidPath { reason: String },

    /// Invalid configuration or usage
    #[error("Configuration error: {reason}")]
    ConfigError { reason: String },

    /// The root document is missing from the scanned inventory
    #[error("root markdown file is not in scan result: {}", root.display())]
    RootNotInScan { root: PathBuf },

    /// Directory walk failure
    #[error("scan markdown files: {reason}")]
    ScanError { reason: String },

    /// Parse error (configuration files)
    #[error("Parse error: {reason}")]
    ParseError { reason: String },

    /// Graph export or report rendering failure
    #[error("Export error: {reason}")]
    ExportError { reason: String },

    /// Worker pool failure
    #[error("Concurrency error: {reason}")]
    ConcurrencyError { reason: String },
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an IO error
    pub fn io(err: io::Error) -> Self {
        Error::Io(err)
    }

    /// Create a read error for an inventory document
    pub fn read_file(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid path error
    pub fn invalid_path(reason: impl Into<String>) -> Self {
        Error::InvalidPath {
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config_error(reason: impl Into<String>) -> Self {
        Error::ConfigError {
            reason: reason.into(),
        }
    }

    /// Create a root-not-in-scan error
    pub fn root_not_in_scan(root: impl Into<PathBuf>) -> Self {
        Error::RootNotInScan { root: root.into() }
    }

    /// Create a scan error
    pub fn scan_error(reason: impl Into<String>) -> Self {
        Error::ScanError {
            reason: reason.into(),
        }
    }

    /// Create a parse error
    pub fn parse_error(reason: impl Into<String>) -> Self {
        Error::ParseError {
            reason: reason.into(),
        }
    }

    /// Create an export error
    pub fn export_error(reason: impl Into<String>) -> Self {
        Error::ExportError {
            reason: reason.into(),
        }
    }

    /// Create a concurrency error
    pub fn concurrency_error(reason: impl Into<String>) -> Self {
        Error::ConcurrencyError {
            reason: reason.into(),
        }
    }

    /// Whether this error stems from configuration or usage rather than the
    /// environment.
    pub fn is_config(&self) -> bool {
        matches!(self, Error::ConfigError { .. } | Error::RootNotInScan { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = Error::config_error("graph root is required");
        assert!(err.to_string().contains("Configuration error"));
        assert!(err.is_config());

        let err = Error::invalid_path("contains NUL");
        assert!(err.to_string().contains("Invalid file path"));
        assert!(!err.is_config());
    }

    #[test]
    fn test_root_not_in_scan_message_is_verbatim() {
        let err = Error::root_not_in_scan("/docs/index.md");
        assert_eq!(
            err.to_string(),
            "root markdown file is not in scan result: /docs/index.md"
        );
        assert!(err.is_config());
    }

    #[test]
    fn test_read_file_names_path_and_cause() {
        let cause = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err = Error::read_file("/docs/a.md", cause);
        let msg = err.to_string();
        assert!(msg.contains("/docs/a.md"));
        assert!(msg.contains("denied"));
    }
}
