//! Error handling for user-scout

use thiserror::Error;

/// Main error type for user-scout
#[derive(Error, Debug, Clone)]
pub enum UserScoutError {
    /// Malformed pattern syntax. Raised at parse time, before any
    /// expansion; a malformed pattern never yields partial results.
    #[error("Pattern syntax error: {message}")]
    PatternSyntax { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Network error: {message}")]
    Network {
        message: String,
        status_code: Option<u16>,
        url: Option<String>,
    },

    #[error("Probe error for '{site}': {message}")]
    Probe { site: String, message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<String>,
    },

    #[error("CLI error: {message}")]
    Cli { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl UserScoutError {
    /// Create a pattern syntax error
    pub fn pattern_syntax(message: impl Into<String>) -> Self {
        Self::PatternSyntax {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a network error
    pub fn network(
        message: impl Into<String>,
        status_code: Option<u16>,
        url: Option<String>,
    ) -> Self {
        Self::Network {
            message: message.into(),
            status_code,
            url,
        }
    }

    /// Create a probe error
    pub fn probe(site: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Probe {
            site: site.into(),
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create an IO error
    pub fn io(message: impl Into<String>, path: Option<String>) -> Self {
        Self::Io {
            message: message.into(),
            path,
        }
    }

    /// Create a CLI error
    pub fn cli(message: impl Into<String>) -> Self {
        Self::Cli {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

/// Convert from common error types
impl From<reqwest::Error> for UserScoutError {
    fn from(err: reqwest::Error) -> Self {
        let status_code = err.status().map(|s| s.as_u16());
        let url = err.url().map(|u| u.to_string());

        if err.is_timeout() {
            Self::network("Request timed out", status_code, url)
        } else if err.is_connect() {
            Self::network("Connection failed", status_code, url)
        } else {
            Self::network(err.to_string(), status_code, url)
        }
    }
}

impl From<std::io::Error> for UserScoutError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string(), None)
    }
}

impl From<serde_json::Error> for UserScoutError {
    fn from(err: serde_json::Error) -> Self {
        Self::internal(err.to_string())
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, UserScoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_syntax_message_passthrough() {
        let err = UserScoutError::pattern_syntax("missing ']' at the end of pattern");
        assert!(err.to_string().contains("missing ']'"));
        assert!(err.to_string().contains("Pattern syntax error"));
    }

    #[test]
    fn test_constructor_helpers() {
        assert!(UserScoutError::config("no sites selected")
            .to_string()
            .contains("no sites selected"));
        assert!(UserScoutError::probe("github", "unexpected status")
            .to_string()
            .contains("github"));
        assert!(UserScoutError::cli("unknown category")
            .to_string()
            .contains("unknown category"));
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing file");
        let err: UserScoutError = io.into();
        assert!(matches!(err, UserScoutError::Io { .. }));
    }
}
