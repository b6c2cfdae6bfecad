//! Port abstraction for durable registration storage.
//!
//! The [`RegistrationStore`] trait is the only gateway to the durable
//! datastore. Implementations run with the elevated service-role credential;
//! nothing behind this trait is ever reachable from a browser.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::registration::{NewRegistration, RegistrationId};

/// Errors raised by registration store adapters.
///
/// Messages describe the failure category only; the underlying cause is
/// logged by the adapter and never carried here.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationStoreError {
    /// A registration with the same email already exists.
    #[error("registration email already exists")]
    Duplicate,
    /// Store connection could not be established or was lost.
    #[error("registration store connection failed: {message}")]
    Connection { message: String },
    /// The insert failed during execution for a non-duplicate reason.
    #[error("registration store query failed: {message}")]
    Query { message: String },
}

impl RegistrationStoreError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Port for inserting registrations into the durable store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationStore: Send + Sync {
    /// Insert a new registration and return the generated identifier.
    ///
    /// Duplicate detection is delegated entirely to the store's uniqueness
    /// constraint on the normalized email; there is no existence pre-check,
    /// so concurrent submissions with the same email race at the index and
    /// exactly one wins. The loser surfaces as
    /// [`RegistrationStoreError::Duplicate`].
    async fn insert(
        &self,
        registration: &NewRegistration,
    ) -> Result<RegistrationId, RegistrationStoreError>;
}

/// In-memory store for tests and database-less development runs.
///
/// Mirrors the production duplicate semantics: a second insert with the same
/// normalized email fails with [`RegistrationStoreError::Duplicate`].
#[derive(Debug, Default)]
pub struct FixtureRegistrationStore {
    emails: Mutex<HashSet<String>>,
}

#[async_trait]
impl RegistrationStore for FixtureRegistrationStore {
    async fn insert(
        &self,
        registration: &NewRegistration,
    ) -> Result<RegistrationId, RegistrationStoreError> {
        let mut emails = self.emails.lock().expect("fixture store mutex poisoned");
        if !emails.insert(registration.email().as_str().to_owned()) {
            return Err(RegistrationStoreError::Duplicate);
        }
        Ok(RegistrationId::random())
    }
}
