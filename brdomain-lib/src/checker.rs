//! Main domain checker implementation.
//!
//! `DomainChecker` ties the registry, the input validation and the
//! availability client together for a single lookup.

use crate::error::DomainCheckError;
use crate::protocols::AvailabilityClient;
use crate::registry::TldRegistry;
use crate::types::{AvailabilityResult, CheckConfig, CheckOutcome, DomainParts};
use crate::validation::prepare_domain;

/// Coordinates one availability check.
///
/// Input problems are reported before any request is made; the request
/// itself happens at most once per call.
///
/// # Example
///
/// ```rust,no_run
/// use brdomain_lib::DomainChecker;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let checker = DomainChecker::new()?;
///     let outcome = checker.check("meusite.com.br").await?;
///     println!("{}: {}", outcome.parts.fqdn, outcome.result.available);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct DomainChecker {
    /// Configuration settings for this checker instance
    config: CheckConfig,
    /// Immutable TLD table used for matching and metadata
    registry: &'static TldRegistry,
    /// Client for the availability endpoint
    client: AvailabilityClient,
}

impl DomainChecker {
    /// Create a checker with the built-in registry and default configuration.
    pub fn new() -> Result<Self, DomainCheckError> {
        Self::with_config(CheckConfig::default())
    }

    /// Create a checker with the built-in registry and a custom configuration.
    ///
    /// # Example
    ///
    /// ```rust
    /// use brdomain_lib::{CheckConfig, DomainChecker};
    /// use std::time::Duration;
    ///
    /// let config = CheckConfig::default().with_timeout(Duration::from_secs(3));
    /// let checker = DomainChecker::with_config(config).unwrap();
    /// assert!(checker.registry().contains("com.br"));
    /// ```
    pub fn with_config(config: CheckConfig) -> Result<Self, DomainCheckError> {
        Self::with_registry(config, TldRegistry::builtin()?)
    }

    /// Create a checker over a caller-supplied registry.
    pub fn with_registry(
        config: CheckConfig,
        registry: &'static TldRegistry,
    ) -> Result<Self, DomainCheckError> {
        let client = AvailabilityClient::with_config(&config)?;
        Ok(Self {
            config,
            registry,
            client,
        })
    }

    /// Normalize, split and validate raw input without touching the network.
    pub fn prepare(&self, input: &str) -> Result<DomainParts, DomainCheckError> {
        prepare_domain(input, self.registry)
    }

    /// Query the endpoint for an already validated domain.
    pub async fn lookup(&self, parts: &DomainParts) -> Result<AvailabilityResult, DomainCheckError> {
        self.client.check_availability(&parts.fqdn).await
    }

    /// Validate raw input and, if it passes, query the endpoint once.
    ///
    /// # Errors
    ///
    /// Returns `DomainCheckError` if:
    /// - The input is blank, has an unsupported TLD or an invalid hostname
    ///   (no request is made in these cases)
    /// - The lookup fails at the transport, status, parse or schema level
    pub async fn check(&self, input: &str) -> Result<CheckOutcome, DomainCheckError> {
        let parts = self.prepare(input)?;
        let result = self.lookup(&parts).await?;
        Ok(CheckOutcome { parts, result })
    }

    /// Get the current configuration for this checker.
    pub fn config(&self) -> &CheckConfig {
        &self.config
    }

    pub fn registry(&self) -> &'static TldRegistry {
        self.registry
    }

    pub fn client(&self) -> &AvailabilityClient {
        &self.client
    }
}
