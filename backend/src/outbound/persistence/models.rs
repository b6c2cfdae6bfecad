//! Internal Diesel row structs for database operations.
//!
//! Implementation details of the persistence layer; never exposed to the
//! domain. The pipeline only ever inserts, so there is no read row.

use diesel::prelude::*;
use uuid::Uuid;

use super::schema::registrations;

/// Insertable struct for creating new registration records.
///
/// `created_at` is omitted; the database default assigns it.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = registrations)]
pub(crate) struct NewRegistrationRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub college: Option<&'a str>,
    pub year: Option<&'a str>,
    pub department: Option<&'a str>,
    pub ticket_type: &'a str,
}
