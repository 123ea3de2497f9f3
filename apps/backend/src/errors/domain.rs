//! Domain-level error type used across services and adapters.
//!
//! This error type is HTTP- and DB-agnostic. Handlers should return
//! `Result<T, crate::error::AppError>` and convert from `DomainError`
//! using the provided `From<DomainError> for AppError` implementation.
//! WebSocket code surfaces these as `error{message}` events instead.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Infra error kinds to distinguish operational failures
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    DbUnavailable,
    Other(String),
}

/// Domain-level not found entities (minimal set; extend as needed)
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    User,
    Trial,
    Opponent,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input/user validation or business rule violation
    Validation(String),
    /// A trial action was submitted by a participant who does not hold the turn
    OutOfTurn,
    /// Missing resource in domain terms
    NotFound(NotFoundKind, String),
    /// Infrastructure/operational failures
    Infra(InfraErrorKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(d) => write!(f, "validation error: {d}"),
            DomainError::OutOfTurn => write!(f, "out of turn"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
            DomainError::Infra(kind, d) => write!(f, "infra {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(detail: impl Into<String>) -> Self {
        Self::Validation(detail.into())
    }
    pub fn out_of_turn() -> Self {
        Self::OutOfTurn
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }

    /// Message surfaced to WebSocket clients as `error{message}`.
    ///
    /// These strings are part of the client protocol; keep them stable.
    pub fn client_message(&self) -> String {
        match self {
            DomainError::OutOfTurn => "Not your turn.".to_string(),
            DomainError::NotFound(NotFoundKind::Trial, _) => "Trial not found.".to_string(),
            DomainError::NotFound(NotFoundKind::User, _)
            | DomainError::NotFound(NotFoundKind::Opponent, _) => {
                "Invalid user or trial.".to_string()
            }
            DomainError::Validation(d) => d.clone(),
            _ => "Internal error.".to_string(),
        }
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        DomainError::infra(InfraErrorKind::Other("db".to_string()), e.to_string())
    }
}
