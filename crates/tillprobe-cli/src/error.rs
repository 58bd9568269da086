//! Error types for the CLI

use std::path::PathBuf;

use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Invalid argument
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Error message
        message: String,
    },

    /// A scenario file that could not be loaded
    #[error("{}: {source}", path.display())]
    Scenario {
        path: PathBuf,
        #[source]
        source: tillprobe::ProbeError,
    },

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Harness library error
    #[error("{0}")]
    Probe(#[from] tillprobe::ProbeError),

    /// One or more scenarios ran and failed
    #[error("{failed} of {total} scenario(s) failed")]
    ScenarioFailed { failed: usize, total: usize },
}

impl CliError {
    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid argument error
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Wrap a load failure with the file it came from
    #[must_use]
    pub fn scenario(path: impl Into<PathBuf>, source: tillprobe::ProbeError) -> Self {
        Self::Scenario {
            path: path.into(),
            source,
        }
    }
}
