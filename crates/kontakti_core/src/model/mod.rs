//! Domain model for address-book entries.
//!
//! # Responsibility
//! - Define the canonical contact record used by core and its callers.
//!
//! # Invariants
//! - A persisted contact is identified by a store-assigned `ContactId`.
//! - Deletion is a hard delete; ids are never reused.

pub mod contact;
