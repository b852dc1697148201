//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for contacts.
//! - Isolate SQLite query details from the store service.
//!
//! # Invariants
//! - Repository writes must enforce `Contact::validate()` before persistence.
//! - Missing rows are reported as `None`/`false`, never as errors.

pub mod contact_repo;
