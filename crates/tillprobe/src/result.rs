//! Result and error types for Tillprobe.

use thiserror::Error;

/// Result type for Tillprobe operations
pub type ProbeResult<T> = Result<T, ProbeError>;

/// Errors that can occur while driving a sale screen
#[derive(Debug, Error)]
pub enum ProbeError {
    /// A typeahead or dropdown key never resolved to an option
    #[error("No option matching {key:?} in {locator} (candidates: {candidates:?})")]
    SelectionNotFound {
        /// Locator of the input that was searched
        locator: String,
        /// Search key supplied by the caller
        key: String,
        /// Options that were rendered when the settle window elapsed
        candidates: Vec<String>,
    },

    /// Rendered value differs from the expected value
    #[error("Assertion failed on {}{field}: expected {expected:?}, got {actual:?}", row_label(.row))]
    AssertionMismatch {
        /// Logical field name
        field: String,
        /// Row index for line-item fields
        row: Option<usize>,
        /// Expected value
        expected: String,
        /// Rendered value
        actual: String,
    },

    /// Locator resolved to nothing (for example a stale row index)
    #[error("Element unavailable: {locator}")]
    ElementUnavailable {
        /// Locator that failed to resolve
        locator: String,
    },

    /// Entry screen did not load
    #[error("Navigation to {url} failed: {message}")]
    NavigationFailure {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// Automation engine failure not covered by the other variants
    #[error("Driver error: {message}")]
    Driver {
        /// Error message
        message: String,
    },

    /// Browser launch error
    #[error("Failed to launch browser: {message}")]
    BrowserLaunch {
        /// Error message
        message: String,
    },

    /// Invalid scenario file
    #[error("Invalid scenario: {message}")]
    Scenario {
        /// Error message
        message: String,
    },

    /// Invalid configuration
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

#[allow(clippy::ref_option)]
fn row_label(row: &Option<usize>) -> String {
    row.map_or_else(String::new, |r| format!("row {r} "))
}

/// Coarse classification of [`ProbeError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// See [`ProbeError::SelectionNotFound`]
    SelectionNotFound,
    /// See [`ProbeError::AssertionMismatch`]
    AssertionMismatch,
    /// See [`ProbeError::ElementUnavailable`]
    ElementUnavailable,
    /// See [`ProbeError::NavigationFailure`]
    NavigationFailure,
    /// Anything else
    Other,
}

impl ProbeError {
    /// Create a driver error
    #[must_use]
    pub fn driver(message: impl Into<String>) -> Self {
        Self::Driver {
            message: message.into(),
        }
    }

    /// Create a scenario error
    #[must_use]
    pub fn scenario(message: impl Into<String>) -> Self {
        Self::Scenario {
            message: message.into(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an element-unavailable error
    #[must_use]
    pub fn unavailable(locator: impl Into<String>) -> Self {
        Self::ElementUnavailable {
            locator: locator.into(),
        }
    }

    /// Classify this error
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::SelectionNotFound { .. } => ErrorKind::SelectionNotFound,
            Self::AssertionMismatch { .. } => ErrorKind::AssertionMismatch,
            Self::ElementUnavailable { .. } => ErrorKind::ElementUnavailable,
            Self::NavigationFailure { .. } => ErrorKind::NavigationFailure,
            _ => ErrorKind::Other,
        }
    }
}
