//! Domain types and ports for registration intake.
//!
//! Everything here is transport agnostic: validation is pure, the rate
//! limiter is in-memory, and persistence is reached only through the
//! [`ports::RegistrationStore`] trait. Inbound adapters map [`Error`] to
//! protocol-specific envelopes.

pub mod error;
pub mod ports;
pub mod rate_limit;
pub mod registration;

pub use self::error::Error;
