//! Registration intake service for the Podium community conference.
//!
//! The crate is organised hexagonally: [`domain`] holds transport-agnostic
//! types, pure validation, the rate limiter, and the store port; [`inbound`]
//! adapts HTTP requests onto the domain; [`outbound`] implements the store
//! port against PostgreSQL. Server wiring lives in the binary.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Request tracing middleware re-exported for server wiring.
pub use middleware::Trace;
