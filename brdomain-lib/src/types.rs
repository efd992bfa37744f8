//! Core data types for .br domain availability checking.
//!
//! This module defines the TLD metadata record, the availability response,
//! the hostname/TLD split and the checker configuration.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::time::Duration;

/// Lookup endpoint queried when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "https://registro.br/ajax/avail/";

/// Request timeout used when nothing else is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Metadata for one supported TLD, as stored in the embedded registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TldInfo {
    /// What the TLD is meant for (e.g. "Atividades comerciais")
    pub tld_description: String,

    /// Registry category (e.g. "Genéricos", "Profissionais Liberais")
    pub category_name: String,

    /// Registration restriction; empty when anyone may register
    #[serde(default)]
    pub restriction: String,
}

/// Body returned by the availability endpoint.
///
/// `available` and `fqdn` are required; a response without them is a
/// schema error. The remaining fields default to empty when absent or null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityResult {
    /// Whether the domain can be registered
    pub available: bool,

    /// Why the domain is unavailable, HTML-entity encoded
    #[serde(default, deserialize_with = "null_as_default")]
    pub reason: String,

    /// The domain that was looked up
    pub fqdn: String,

    /// Hostname part, used to build suggestions
    #[serde(default, deserialize_with = "null_as_default")]
    pub domain: String,

    /// Alternative TLDs under which the hostname is free
    #[serde(default, deserialize_with = "null_as_default")]
    pub suggestions: Vec<String>,
}

impl AvailabilityResult {
    /// The reason with HTML entities decoded (`&atilde;` becomes `ã`).
    pub fn decoded_reason(&self) -> String {
        html_escape::decode_html_entities(&self.reason).into_owned()
    }

    pub fn has_suggestions(&self) -> bool {
        !self.suggestions.is_empty()
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A domain split into hostname and matched TLD.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainParts {
    /// Everything before the dot that precedes the TLD
    pub hostname: String,

    /// The registry key that matched (e.g. "com.br")
    pub tld: String,

    /// The normalized input, as sent to the lookup endpoint
    pub fqdn: String,
}

/// Hostname validation rules, in the order they are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostnameRule {
    /// Length outside 2..=26 characters
    Length,
    /// Starts or ends with a hyphen
    HyphenEdge,
    /// Parses as a number in its entirety
    NumericOnly,
    /// Contains a character outside the allowed set
    Charset,
}

impl HostnameRule {
    /// Stable short code for the rule.
    pub fn code(&self) -> &'static str {
        match self {
            HostnameRule::Length => "length",
            HostnameRule::HyphenEdge => "hyphen-edge",
            HostnameRule::NumericOnly => "numeric-only",
            HostnameRule::Charset => "charset",
        }
    }
}

impl fmt::Display for HostnameRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Outcome of hostname validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationResult {
    Ok,
    Invalid(HostnameRule),
}

impl ValidationResult {
    pub fn is_ok(&self) -> bool {
        matches!(self, ValidationResult::Ok)
    }
}

/// Result of a full check: the validated split plus the endpoint's answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub parts: DomainParts,
    pub result: AvailabilityResult,
}

/// Configuration options for the availability client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckConfig {
    /// Base URL; the FQDN is appended verbatim
    /// Default: https://registro.br/ajax/avail/
    pub endpoint: String,

    /// Timeout for the lookup request
    /// Default: 10 seconds
    pub timeout: Duration,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl CheckConfig {
    /// Set a custom lookup endpoint.
    pub fn with_endpoint<E: Into<String>>(mut self, endpoint: E) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set a custom request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
