//! Ports implemented by outbound adapters.

mod registration_store;

#[cfg(test)]
pub use registration_store::MockRegistrationStore;
pub use registration_store::{FixtureRegistrationStore, RegistrationStore, RegistrationStoreError};
