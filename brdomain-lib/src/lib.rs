//! # brdomain Library
//!
//! Checks whether a domain under a Brazilian TLD (com.br, adv.br, blog.br, ...)
//! can be registered, using the Registro.br availability endpoint.
//!
//! Input is validated locally against the embedded TLD registry and the
//! registry's hostname rules before a single lookup request is made.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use brdomain_lib::DomainChecker;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let checker = DomainChecker::new()?;
//!     let outcome = checker.check("meusite.com.br").await?;
//!
//!     println!("{} available: {}", outcome.parts.fqdn, outcome.result.available);
//!     Ok(())
//! }
//! ```

// Re-export main public API types and functions
pub use checker::DomainChecker;
pub use config::{
    env_config_from, load_env_config, merge_configs, parse_timeout_string, validate_endpoint,
    ConfigManager, DefaultsConfig, EnvConfig, FileConfig, ENV_CONFIG, ENV_ENDPOINT, ENV_TIMEOUT,
};
pub use error::DomainCheckError;
pub use protocols::{parse_availability, AvailabilityClient};
pub use registry::{match_tld, supported_tlds, TldRegistry};
pub use types::{
    AvailabilityResult, CheckConfig, CheckOutcome, DomainParts, HostnameRule, TldInfo,
    ValidationResult, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT,
};
pub use validation::{
    normalize, prepare_domain, split_domain, validate_hostname, ACCENTED_CHARS,
    MAX_HOSTNAME_LEN, MIN_HOSTNAME_LEN,
};

// Internal modules - reached through the re-exports above
mod checker;
mod config;
mod error;
mod protocols;
mod registry;
mod types;
mod validation;

// Type alias for convenience
pub type Result<T> = std::result::Result<T, DomainCheckError>;

// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
