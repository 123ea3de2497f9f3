//! SeaORM adapters, generic over `ConnectionTrait`.
//!
//! Adapter functions return `DbErr`; the repos layer maps to
//! `DomainError` via `From<DbErr>`.

pub mod evidence_sea;
pub mod transcripts_sea;
pub mod trials_sea;
pub mod users_sea;
pub mod witnesses_sea;
