//! Shared HTTP adapter state.
//!
//! Handlers receive their collaborators through this bundle via
//! `actix_web::web::Data`, so the endpoint depends on the store port and the
//! limiter as injected values and stays testable without a database.

use std::sync::Arc;

use crate::domain::ports::RegistrationStore;
use crate::domain::rate_limit::RateLimiter;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Durable store gateway; the only path to the database.
    pub registrations: Arc<dyn RegistrationStore>,
    /// Process-local request limiter shared by all workers.
    pub rate_limiter: Arc<RateLimiter>,
}

impl HttpState {
    /// Bundle the handler dependencies.
    pub fn new(registrations: Arc<dyn RegistrationStore>, rate_limiter: Arc<RateLimiter>) -> Self {
        Self {
            registrations,
            rate_limiter,
        }
    }
}
