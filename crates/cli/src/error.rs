use std::path::PathBuf;

use crate::escape::EscapeError;

/// bsed error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration file not found or invalid
    #[error("config error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    /// Invalid command-line arguments
    #[error("argument error: {0}")]
    Argument(String),

    /// File I/O error
    #[error("io error: {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Rule argument did not resolve to a readable file.
    #[error("rule file not found: {}", .path.display())]
    RuleNotFound { path: PathBuf },

    /// A rule literal could not be decoded; loading stopped.
    #[error("rule error: {}:{}: {}", .path.display(), .line, .source)]
    Rule {
        path: PathBuf,
        line: usize,
        #[source]
        source: EscapeError,
    },

    /// Internal error (bug)
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type using bsed Error
pub type Result<T> = std::result::Result<T, Error>;

/// Process exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Every target translated
    Success = 0,
    /// Rule file missing or malformed
    RuleError = 1,
    /// Configuration or argument error
    ConfigError = 2,
    /// I/O or internal error
    InternalError = 3,
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        match err {
            Error::Config { .. } | Error::Argument(_) => ExitCode::ConfigError,
            Error::RuleNotFound { .. } | Error::Rule { .. } => ExitCode::RuleError,
            Error::Io { .. } => ExitCode::InternalError,
            Error::Internal(_) => ExitCode::InternalError,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
