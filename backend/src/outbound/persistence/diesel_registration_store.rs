//! PostgreSQL-backed [`RegistrationStore`] implementation using Diesel.
//!
//! Inserts run on a pool built from the service-role connection string, the
//! credential that bypasses the table's row-level security; this path is
//! only ever reachable from the server process. Duplicate detection is
//! delegated entirely to the unique index on `email` — there is no
//! existence pre-check to race against a concurrent submission, so exactly
//! one of two simultaneous inserts with the same address wins and the other
//! maps to [`RegistrationStoreError::Duplicate`].

use async_trait::async_trait;
use diesel_async::RunQueryDsl;
use tracing::{debug, error};
use uuid::Uuid;

use crate::domain::ports::{RegistrationStore, RegistrationStoreError};
use crate::domain::registration::{AcademicYear, NewRegistration, Phone, RegistrationId};

use super::models::NewRegistrationRow;
use super::pool::{DbPool, PoolError};
use super::schema::registrations;

/// Diesel-backed implementation of the [`RegistrationStore`] port.
#[derive(Clone)]
pub struct DieselRegistrationStore {
    pool: DbPool,
}

impl DieselRegistrationStore {
    /// Create a new store with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RegistrationStoreError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            RegistrationStoreError::connection(message)
        }
    }
}

/// Map Diesel errors to the port taxonomy.
///
/// The real cause is logged here and only here; the returned variants carry
/// generic messages so no internal detail can travel toward a response body.
fn map_diesel_error(error: diesel::result::Error) -> RegistrationStoreError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            debug!(
                constraint = ?info.constraint_name(),
                "unique violation on registration insert"
            );
            RegistrationStoreError::Duplicate
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            error!(message = info.message(), "registration store connection lost");
            RegistrationStoreError::connection("database connection error")
        }
        DieselError::DatabaseError(kind, info) => {
            error!(?kind, message = info.message(), "registration insert failed");
            RegistrationStoreError::query("database error")
        }
        other => {
            error!(error = %other, "registration insert failed");
            RegistrationStoreError::query("database error")
        }
    }
}

#[async_trait]
impl RegistrationStore for DieselRegistrationStore {
    async fn insert(
        &self,
        registration: &NewRegistration,
    ) -> Result<RegistrationId, RegistrationStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let id = Uuid::new_v4();
        let row = NewRegistrationRow {
            id,
            name: registration.name().as_str(),
            email: registration.email().as_str(),
            phone: registration.phone().map(Phone::as_str),
            college: registration.college(),
            year: registration.year().map(AcademicYear::as_str),
            department: registration.department(),
            ticket_type: registration.ticket_type().as_str(),
        };

        diesel::insert_into(registrations::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(RegistrationId::from_uuid(id))
    }
}
