//! Error handling for website status checking operations.
//!
//! This module defines a comprehensive error type that covers all the different
//! ways status checking can fail, from network issues to invalid input.

use std::fmt;

/// Main error type for status checking operations.
///
/// This enum covers all possible failure modes in the checking process,
/// providing detailed context for debugging and user-friendly error messages.
#[derive(Debug, Clone)]
pub enum SiteCheckError {
    /// Invalid URL format
    InvalidUrl {
        url: String,
        reason: String,
    },

    /// Network-related errors (connection, DNS, etc.)
    NetworkError {
        message: String,
        source: Option<String>,
    },

    /// HTTP-level errors (unexpected status, protocol violation)
    HttpError {
        url: String,
        message: String,
        status_code: Option<u16>,
    },

    /// Configuration errors (invalid settings, bad config file)
    ConfigError {
        message: String,
    },

    /// File I/O errors when reading URL lists
    FileError {
        path: String,
        message: String,
    },

    /// Timeout errors when a single probe takes too long
    Timeout {
        operation: String,
        duration: std::time::Duration,
    },

    /// The overall deadline expired before all probes completed
    DeadlineExceeded {
        deadline: std::time::Duration,
        completed: usize,
        total: usize,
    },

    /// Generic internal errors that don't fit other categories
    Internal {
        message: String,
    },
}

impl SiteCheckError {
    /// Create a new invalid URL error.
    pub fn invalid_url<U: Into<String>, R: Into<String>>(url: U, reason: R) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Create a new network error.
    pub fn network<M: Into<String>>(message: M) -> Self {
        Self::NetworkError {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new network error with source information.
    pub fn network_with_source<M: Into<String>, S: Into<String>>(message: M, source: S) -> Self {
        Self::NetworkError {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a new HTTP error.
    pub fn http<U: Into<String>, M: Into<String>>(url: U, message: M) -> Self {
        Self::HttpError {
            url: url.into(),
            message: message.into(),
            status_code: None,
        }
    }

    /// Create a new HTTP error with status code.
    pub fn http_with_status<U: Into<String>, M: Into<String>>(
        url: U,
        message: M,
        status_code: u16,
    ) -> Self {
        Self::HttpError {
            url: url.into(),
            message: message.into(),
            status_code: Some(status_code),
        }
    }

    /// Create a new configuration error.
    pub fn config<M: Into<String>>(message: M) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create a new file error.
    pub fn file_error<P: Into<String>, M: Into<String>>(path: P, message: M) -> Self {
        Self::FileError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a new timeout error.
    pub fn timeout<O: Into<String>>(operation: O, duration: std::time::Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            duration,
        }
    }

    /// Create a new deadline-exceeded error.
    pub fn deadline_exceeded(deadline: std::time::Duration, completed: usize, total: usize) -> Self {
        Self::DeadlineExceeded {
            deadline,
            completed,
            total,
        }
    }

    /// Create a new internal error.
    pub fn internal<M: Into<String>>(message: M) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Check if this error suggests the operation should be retried.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::NetworkError { .. }
                | Self::Timeout { .. }
                | Self::HttpError {
                    status_code: Some(500..=599),
                    ..
                }
        )
    }
}

impl fmt::Display for SiteCheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidUrl { url, reason } => {
                write!(f, "Invalid URL '{}': {}", url, reason)
            }
            Self::NetworkError { message, source } => {
                if let Some(source) = source {
                    write!(f, "Network error: {} (source: {})", message, source)
                } else {
                    write!(f, "Network error: {}", message)
                }
            }
            Self::HttpError {
                url,
                message,
                status_code,
            } => {
                if let Some(code) = status_code {
                    write!(f, "HTTP error for '{}' (HTTP {}): {}", url, code, message)
                } else {
                    write!(f, "HTTP error for '{}': {}", url, message)
                }
            }
            Self::ConfigError { message } => {
                write!(f, "Configuration error: {}", message)
            }
            Self::FileError { path, message } => {
                write!(f, "File error at '{}': {}", path, message)
            }
            Self::Timeout {
                operation,
                duration,
            } => {
                write!(f, "Timeout after {:?} during: {}", duration, operation)
            }
            Self::DeadlineExceeded {
                deadline,
                completed,
                total,
            } => {
                write!(
                    f,
                    "Deadline of {:?} exceeded with {}/{} probes completed",
                    deadline, completed, total
                )
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {}", message)
            }
        }
    }
}

impl std::error::Error for SiteCheckError {}

// Implement From conversions for common error types
impl From<reqwest::Error> for SiteCheckError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::timeout("HTTP request", std::time::Duration::from_secs(30))
        } else if err.is_connect() {
            Self::network_with_source("Connection failed", err.to_string())
        } else {
            Self::network_with_source("HTTP request failed", err.to_string())
        }
    }
}

impl From<std::io::Error> for SiteCheckError {
    fn from(err: std::io::Error) -> Self {
        Self::Internal {
            message: format!("I/O error: {}", err),
        }
    }
}

impl From<serde_json::Error> for SiteCheckError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal {
            message: format!("JSON serialization failed: {}", err),
        }
    }
}

impl From<url::ParseError> for SiteCheckError {
    fn from(err: url::ParseError) -> Self {
        Self::Internal {
            message: format!("URL parse error: {}", err),
        }
    }
}
