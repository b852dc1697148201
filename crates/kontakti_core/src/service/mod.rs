//! Core use-case services.
//!
//! # Responsibility
//! - Own the store location and hand out per-operation repositories.
//! - Keep presentation layers decoupled from storage details.

pub mod contact_store;
