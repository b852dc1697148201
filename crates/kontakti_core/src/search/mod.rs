//! Contact search entry points.
//!
//! # Responsibility
//! - Describe search criteria for contact lookups.
//! - Translate criteria into parameter-bound SQL with LIKE-escaping.
//!
//! # Invariants
//! - User input only ever reaches SQL as bound parameters.
//! - Result ordering is `Name COLLATE NOCASE, Id`.

pub mod filter;
