//! Error handling for domain checking operations.
//!
//! This module defines one error type covering every way a check can fail,
//! from a missing argument to a response body that does not have the
//! expected shape.

use crate::types::HostnameRule;
use std::fmt;

/// Main error type for domain checking operations.
///
/// Every variant is terminal for an invocation: nothing is retried, the
/// caller reports the error and stops.
#[derive(Debug, Clone)]
pub enum DomainCheckError {
    /// No domain was given, or it was blank
    Usage,

    /// The input does not end with any supported TLD
    UnsupportedTld {
        domain: String,
        valid: Vec<String>,
    },

    /// The hostname part failed one of the validation rules
    InvalidHostname {
        hostname: String,
        rule: HostnameRule,
    },

    /// Connection-level failures (DNS, refused, reset, TLS)
    NetworkError {
        message: String,
        source: Option<String>,
    },

    /// The lookup endpoint answered with a non-2xx status
    HttpStatus {
        url: String,
        status: u16,
    },

    /// The response body was not JSON
    ParseError {
        message: String,
        content: Option<String>,
    },

    /// The response was JSON but not an availability result
    SchemaError {
        message: String,
    },

    /// Timeout errors when the request takes too long
    Timeout {
        operation: String,
        duration: std::time::Duration,
    },

    /// Configuration errors (invalid settings, unreadable TOML, etc.)
    ConfigError {
        message: String,
    },

    /// File I/O errors when reading configuration
    FileError {
        path: String,
        message: String,
    },

    /// Generic internal errors that don't fit other categories
    Internal {
        message: String,
    },
}

impl DomainCheckError {
    /// Create a new unsupported TLD error.
    pub fn unsupported_tld<D: Into<String>>(domain: D, valid: Vec<String>) -> Self {
        Self::UnsupportedTld {
            domain: domain.into(),
            valid,
        }
    }

    /// Create a new hostname validation error.
    pub fn invalid_hostname<H: Into<String>>(hostname: H, rule: HostnameRule) -> Self {
        Self::InvalidHostname {
            hostname: hostname.into(),
            rule,
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

    /// Create a new schema error.
    pub fn schema<M: Into<String>>(message: M) -> Self {
        Self::SchemaError {
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

    /// Create a new internal error.
    pub fn internal<M: Into<String>>(message: M) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether this error came from talking to the lookup endpoint.
    ///
    /// Transport errors share one user-facing message; the raw detail is
    /// printed underneath it.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::NetworkError { .. }
                | Self::HttpStatus { .. }
                | Self::ParseError { .. }
                | Self::SchemaError { .. }
                | Self::Timeout { .. }
        )
    }

    /// Whether this error was raised before any network traffic.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::Usage | Self::UnsupportedTld { .. } | Self::InvalidHostname { .. }
        )
    }
}

impl fmt::Display for DomainCheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Usage => write!(f, "No domain given"),
            Self::UnsupportedTld { domain, valid } => {
                write!(
                    f,
                    "Unsupported TLD in '{}' (expected one of: {})",
                    domain,
                    valid.join(", ")
                )
            }
            Self::InvalidHostname { hostname, rule } => {
                write!(f, "Invalid hostname '{}': {}", hostname, rule)
            }
            Self::NetworkError { message, source } => {
                if let Some(source) = source {
                    write!(f, "Network error: {} (source: {})", message, source)
                } else {
                    write!(f, "Network error: {}", message)
                }
            }
            Self::HttpStatus { url, status } => {
                write!(f, "Lookup endpoint returned HTTP {} for {}", status, url)
            }
            Self::ParseError { message, content: _ } => {
                write!(f, "Parse error: {}", message)
            }
            Self::SchemaError { message } => {
                write!(f, "Unexpected response shape: {}", message)
            }
            Self::Timeout {
                operation,
                duration,
            } => {
                write!(f, "Timeout after {:?} during: {}", duration, operation)
            }
            Self::ConfigError { message } => {
                write!(f, "Configuration error: {}", message)
            }
            Self::FileError { path, message } => {
                write!(f, "File error at '{}': {}", path, message)
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {}", message)
            }
        }
    }
}

impl std::error::Error for DomainCheckError {}

impl From<reqwest::Error> for DomainCheckError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::timeout("HTTP request", crate::types::DEFAULT_TIMEOUT)
        } else if err.is_connect() {
            Self::network_with_source("Connection failed", err.to_string())
        } else {
            Self::network_with_source("HTTP request failed", err.to_string())
        }
    }
}

impl From<serde_json::Error> for DomainCheckError {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError {
            message: format!("JSON parsing failed: {}", err),
            content: None,
        }
    }
}

impl From<std::io::Error> for DomainCheckError {
    fn from(err: std::io::Error) -> Self {
        Self::Internal {
            message: format!("I/O error: {}", err),
        }
    }
}

impl From<toml::de::Error> for DomainCheckError {
    fn from(err: toml::de::Error) -> Self {
        Self::ConfigError {
            message: format!("Failed to parse TOML configuration: {}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_transport_classification() {
        assert!(DomainCheckError::network("boom").is_transport());
        assert!(DomainCheckError::schema("missing field").is_transport());
        assert!(DomainCheckError::timeout("req", Duration::from_secs(1)).is_transport());
        assert!(DomainCheckError::HttpStatus {
            url: "https://x/".to_string(),
            status: 503
        }
        .is_transport());

        assert!(!DomainCheckError::Usage.is_transport());
        assert!(!DomainCheckError::config("bad").is_transport());
    }

    #[test]
    fn test_input_classification() {
        assert!(DomainCheckError::Usage.is_input_error());
        assert!(DomainCheckError::unsupported_tld("x.com", vec![]).is_input_error());
        assert!(
            DomainCheckError::invalid_hostname("a", HostnameRule::Length).is_input_error()
        );
        assert!(!DomainCheckError::network("boom").is_input_error());
    }

    #[test]
    fn test_display_messages() {
        let err = DomainCheckError::unsupported_tld(
            "site.com",
            vec!["com.br".to_string(), "net.br".to_string()],
        );
        assert_eq!(
            err.to_string(),
            "Unsupported TLD in 'site.com' (expected one of: com.br, net.br)"
        );

        let err = DomainCheckError::invalid_hostname("-ab", HostnameRule::HyphenEdge);
        assert_eq!(err.to_string(), "Invalid hostname '-ab': hyphen-edge");

        let err = DomainCheckError::network_with_source("Connection failed", "refused");
        assert_eq!(
            err.to_string(),
            "Network error: Connection failed (source: refused)"
        );
    }

    #[test]
    fn test_from_serde_json_error() {
        let err: DomainCheckError = serde_json::from_str::<serde_json::Value>("<html>")
            .unwrap_err()
            .into();
        assert!(matches!(err, DomainCheckError::ParseError { .. }));
    }
}
