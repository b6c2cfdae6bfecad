//! Transport-agnostic failure vocabulary for the intake pipeline.
//!
//! Each variant's `Display` string is the literal `error` value returned to
//! clients, so nothing here may ever embed an internal cause. Store failures
//! are logged with their real cause at the conversion point below and then
//! collapse into the generic [`Error::Store`] variant.

use chrono::{DateTime, Utc};
use tracing::error;

use crate::domain::ports::RegistrationStoreError;
use crate::domain::registration::FieldErrors;

/// Outcome of a rejected registration request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// One or more submitted fields failed validation.
    #[error("validation failed")]
    Validation(FieldErrors),
    /// The client exhausted its per-window request quota.
    #[error("rate limit exceeded")]
    RateLimited {
        /// Admissions left in the current window (zero on rejection).
        remaining: u32,
        /// Instant at which the quota resets.
        reset_at: DateTime<Utc>,
    },
    /// A registration with the same email already exists.
    ///
    /// The message confirms no more than the submitter already knows.
    #[error("this email is already registered")]
    AlreadyRegistered,
    /// The durable store failed for a non-duplicate reason.
    #[error("registration failed, please try again later")]
    Store,
    /// The request body was not parseable JSON.
    #[error("request body must be valid JSON")]
    InvalidBody,
    /// Non-POST request on the registration endpoint.
    #[error("method not allowed")]
    MethodNotAllowed,
}

impl From<RegistrationStoreError> for Error {
    fn from(err: RegistrationStoreError) -> Self {
        match err {
            RegistrationStoreError::Duplicate => Self::AlreadyRegistered,
            RegistrationStoreError::Connection { .. } | RegistrationStoreError::Query { .. } => {
                // The cause stays in the log; callers only ever see `Store`.
                error!(error = %err, "registration store failure");
                Self::Store
            }
        }
    }
}
