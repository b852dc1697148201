//! Core data layer for the Kontakti address book.
//! This crate owns contact persistence; presentation layers call into it.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use logging::{
    default_log_level, flush_logging, init_logging, logging_status, LogConfig, LogInitError,
};
pub use model::contact::{Contact, ContactId, ContactValidationError};
pub use repo::contact_repo::{
    ContactRepository, RepoError, RepoResult, SqliteContactRepository,
};
pub use search::filter::{escape_like, ContactSearch};
pub use service::contact_store::ContactStore;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
