//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations exactly; regenerate with
//! `diesel print-schema` after a migration changes the table.

diesel::table! {
    /// Conference registrations.
    ///
    /// One row per attendee. The unique index on `email` is the sole arbiter
    /// of duplicate submissions; row-level security is enabled with no
    /// policies, so only the service role can touch rows.
    registrations (id) {
        /// Primary key: UUID v4 generated by the store adapter.
        id -> Uuid,
        /// Attendee name (2-100 characters).
        name -> Varchar,
        /// Normalized email address; unique.
        email -> Varchar,
        /// Optional contact number.
        phone -> Nullable<Varchar>,
        /// Optional college name.
        college -> Nullable<Varchar>,
        /// Optional year-of-study bracket.
        year -> Nullable<Varchar>,
        /// Optional department name.
        department -> Nullable<Varchar>,
        /// Ticket tier: standard, vip, or student.
        ticket_type -> Varchar,
        /// Record creation timestamp, assigned by the database.
        created_at -> Timestamptz,
    }
}
