use actix_web::http::StatusCode;

use crate::error::AppError;
use crate::errors::domain::{DomainError, NotFoundKind};

#[test]
fn out_of_turn_maps_to_conflict() {
    let app: AppError = DomainError::out_of_turn().into();
    assert_eq!(app.status(), StatusCode::CONFLICT);
    assert!(matches!(app, AppError::Conflict { code, .. } if code == "OUT_OF_TURN"));
}

#[test]
fn trial_not_found_maps_to_404() {
    let app: AppError = DomainError::not_found(NotFoundKind::Trial, "no such trial").into();
    assert_eq!(app.status(), StatusCode::NOT_FOUND);
    assert!(matches!(app, AppError::NotFound { code, .. } if code == "TRIAL_NOT_FOUND"));
}

#[test]
fn validation_maps_to_400() {
    let app: AppError = DomainError::validation("missing field").into();
    assert_eq!(app.status(), StatusCode::BAD_REQUEST);
}

#[test]
fn client_messages_are_stable() {
    assert_eq!(DomainError::out_of_turn().client_message(), "Not your turn.");
    assert_eq!(
        DomainError::not_found(NotFoundKind::Trial, "x").client_message(),
        "Trial not found."
    );
    assert_eq!(
        DomainError::not_found(NotFoundKind::User, "x").client_message(),
        "Invalid user or trial."
    );
}
