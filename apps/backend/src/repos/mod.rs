//! Repository functions for the domain layer.
//!
//! Thin wrappers over the SeaORM adapters that expose domain models
//! and `DomainError`.

pub mod evidence;
pub mod transcripts;
pub mod trials;
pub mod users;
pub mod witnesses;
