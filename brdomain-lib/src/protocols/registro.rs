//! Client for the Registro.br availability endpoint.
//!
//! The endpoint takes the FQDN appended to a fixed base URL and answers with
//! a JSON object describing availability, a reason and alternative TLDs.

use crate::error::DomainCheckError;
use crate::types::{AvailabilityResult, CheckConfig};
use std::time::{Duration, Instant};
use tracing::debug;

/// How much of a non-JSON body is kept for error reporting.
const BODY_SNIPPET_LEN: usize = 200;

/// HTTP client for the availability endpoint.
///
/// Each check is exactly one GET request; nothing is retried.
#[derive(Clone)]
pub struct AvailabilityClient {
    /// HTTP client for making lookup requests
    http_client: reqwest::Client,
    /// Base URL the FQDN is appended to
    endpoint: String,
    /// Timeout for the whole request
    timeout: Duration,
}

impl AvailabilityClient {
    /// Create a client for the default endpoint and timeout.
    pub fn new() -> Result<Self, DomainCheckError> {
        Self::with_config(&CheckConfig::default())
    }

    /// Create a client with a custom endpoint and timeout.
    pub fn with_config(config: &CheckConfig) -> Result<Self, DomainCheckError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("brdomain/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                DomainCheckError::network_with_source(
                    "Failed to create HTTP client",
                    e.to_string(),
                )
            })?;

        Ok(Self {
            http_client,
            endpoint: config.endpoint.clone(),
            timeout: config.timeout,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// URL queried for a domain: the base URL followed by the FQDN as is.
    pub fn lookup_url(&self, fqdn: &str) -> String {
        format!("{}{}", self.endpoint, fqdn)
    }

    /// Check whether a domain is available.
    ///
    /// # Arguments
    ///
    /// * `fqdn` - Validated domain name (e.g. "meusite.com.br")
    ///
    /// # Errors
    ///
    /// Returns `DomainCheckError` if:
    /// - The connection fails or the timeout elapses
    /// - The endpoint answers with a non-2xx status
    /// - The body is not JSON (`ParseError`)
    /// - The JSON lacks `available`/`fqdn` or has wrong types (`SchemaError`)
    pub async fn check_availability(
        &self,
        fqdn: &str,
    ) -> Result<AvailabilityResult, DomainCheckError> {
        let start_time = Instant::now();
        let url = self.lookup_url(fqdn);
        debug!(%url, "querying availability endpoint");

        let result = tokio::time::timeout(self.timeout, self.fetch(&url)).await;

        match result {
            Ok(Ok(availability)) => {
                debug!(
                    fqdn = %availability.fqdn,
                    available = availability.available,
                    suggestions = availability.suggestions.len(),
                    elapsed_ms = start_time.elapsed().as_millis() as u64,
                    "availability lookup finished"
                );
                Ok(availability)
            }
            Ok(Err(e)) => {
                debug!(%url, error = %e, "availability lookup failed");
                Err(e)
            }
            Err(_) => {
                debug!(%url, timeout = ?self.timeout, "availability lookup timed out");
                Err(DomainCheckError::timeout("availability lookup", self.timeout))
            }
        }
    }

    async fn fetch(&self, url: &str) -> Result<AvailabilityResult, DomainCheckError> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        let status = response.status();
        debug!(%status, "availability endpoint responded");

        if !status.is_success() {
            return Err(DomainCheckError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| self.request_error(e))?;
        parse_availability(&body)
    }

    fn request_error(&self, err: reqwest::Error) -> DomainCheckError {
        if err.is_timeout() {
            DomainCheckError::timeout("availability lookup", self.timeout)
        } else {
            err.into()
        }
    }
}

/// Parse an endpoint body into an [`AvailabilityResult`].
///
/// A body that is not JSON is a `ParseError`; JSON of the wrong shape is a
/// `SchemaError`.
pub fn parse_availability(body: &str) -> Result<AvailabilityResult, DomainCheckError> {
    let json: serde_json::Value =
        serde_json::from_str(body).map_err(|e| DomainCheckError::ParseError {
            message: format!("Response is not JSON: {}", e),
            content: Some(body.chars().take(BODY_SNIPPET_LEN).collect()),
        })?;

    serde_json::from_value(json).map_err(|e| DomainCheckError::schema(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = AvailabilityClient::new();
        assert!(client.is_ok());
        assert_eq!(client.unwrap().endpoint(), crate::types::DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_lookup_url_appends_fqdn() {
        let client = AvailabilityClient::new().unwrap();
        assert_eq!(
            client.lookup_url("meusite.com.br"),
            "https://registro.br/ajax/avail/meusite.com.br"
        );

        let config = CheckConfig::default().with_endpoint("http://127.0.0.1:8080/avail/");
        let client = AvailabilityClient::with_config(&config).unwrap();
        assert_eq!(
            client.lookup_url("açaí.com.br"),
            "http://127.0.0.1:8080/avail/açaí.com.br"
        );
    }

    #[test]
    fn test_parse_availability_ok() {
        let body = r#"{"available": true, "fqdn": "meusite.com.br", "domain": "meusite", "reason": "", "suggestions": []}"#;
        let result = parse_availability(body).unwrap();
        assert!(result.available);
        assert_eq!(result.fqdn, "meusite.com.br");
    }

    #[test]
    fn test_parse_availability_not_json() {
        let body = "<html><body>Service Unavailable</body></html>";
        match parse_availability(body) {
            Err(DomainCheckError::ParseError { content, .. }) => {
                assert_eq!(content.as_deref(), Some(body));
            }
            other => panic!("expected ParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_availability_schema_error() {
        assert!(matches!(
            parse_availability(r#"{"fqdn": "meusite.com.br"}"#),
            Err(DomainCheckError::SchemaError { .. })
        ));
        assert!(matches!(
            parse_availability(r#"{"available": 1, "fqdn": "meusite.com.br"}"#),
            Err(DomainCheckError::SchemaError { .. })
        ));
        assert!(matches!(
            parse_availability(r#"{"available": false, "fqdn": "x.com.br", "suggestions": "net.br"}"#),
            Err(DomainCheckError::SchemaError { .. })
        ));
        assert!(matches!(
            parse_availability("[]"),
            Err(DomainCheckError::SchemaError { .. })
        ));
    }

    #[test]
    fn test_parse_availability_truncates_snippet() {
        let body = "x".repeat(1000);
        match parse_availability(&body) {
            Err(DomainCheckError::ParseError { content, .. }) => {
                assert_eq!(content.unwrap().len(), BODY_SNIPPET_LEN);
            }
            other => panic!("expected ParseError, got {:?}", other),
        }
    }
}
