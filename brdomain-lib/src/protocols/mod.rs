//! Protocol implementations for domain checking.
//!
//! Only one backend exists: the Registro.br availability endpoint.

/// Registro.br availability endpoint client
pub mod registro;

pub use registro::{parse_availability, AvailabilityClient};
