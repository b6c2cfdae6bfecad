//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementation of the registration store port, backed by
//! PostgreSQL via `diesel-async` with `bb8` connection pooling. Row structs
//! (`models`) and the table definition (`schema`) are implementation
//! details, never exposed to the domain layer; database errors are mapped to
//! the port's error taxonomy at this boundary.

mod diesel_registration_store;
mod migrate;
mod models;
mod pool;
mod schema;

pub use diesel_registration_store::DieselRegistrationStore;
pub use migrate::{run_pending_migrations, MigrationError};
pub use pool::{DbPool, PoolConfig, PoolError};
