//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! Adapters are thin translators between domain types and
//! infrastructure-specific representations; no business logic lives here.

pub mod persistence;
