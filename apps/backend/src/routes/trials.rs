use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::db::require_db;
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::services;
use crate::state::app_state::AppState;
use crate::ws::coordinator::OpponentReady;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/create_trial", web::post().to(create_trial));
    cfg.route("/case_library/{trial_id}", web::get().to(case_library));
    cfg.route(
        "/opponent_ready/{trial_id}/{username}",
        web::get().to(opponent_ready),
    );
}

#[derive(Debug, Deserialize)]
pub struct CreateTrialRequest {
    pub username1: Option<String>,
    pub username2: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
struct CreateTrialResponse {
    trial_id: String,
}

/// POST /create_trial
///
/// Registers both usernames on first sight and creates the trial with
/// the first as plaintiff. Field presence is checked before storage is
/// touched, so a bad payload never needs a database.
async fn create_trial(
    app_state: web::Data<AppState>,
    body: web::Json<CreateTrialRequest>,
) -> Result<HttpResponse, AppError> {
    let username1 = body.username1.as_deref().filter(|s| !s.is_empty());
    let username2 = body.username2.as_deref().filter(|s| !s.is_empty());
    let description = body.description.as_deref().filter(|s| !s.is_empty());
    let (Some(username1), Some(username2), Some(description)) =
        (username1, username2, description)
    else {
        return Err(AppError::bad_request(
            "MISSING_FIELDS",
            "Missing required fields".to_string(),
        ));
    };

    let db = require_db(&app_state)?;
    let trial = services::trials::create_trial(db, username1, username2, description).await?;

    Ok(HttpResponse::Ok().json(CreateTrialResponse {
        trial_id: trial.trial_id,
    }))
}

#[derive(Debug, Serialize)]
struct EvidenceView {
    description: String,
    submitted_by: String,
}

#[derive(Debug, Serialize)]
struct WitnessView {
    name: String,
    called_by: String,
}

#[derive(Debug, Serialize)]
struct CaseLibraryResponse {
    evidence: Vec<EvidenceView>,
    witnesses: Vec<WitnessView>,
}

/// GET /case_library/{trial_id}
///
/// Durable evidence and witnesses for a trial. An unknown trial id
/// yields empty lists, not an error.
async fn case_library(
    app_state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let trial_id = path.into_inner();
    let db = require_db(&app_state)?;
    let library = services::trials::case_library(db, &trial_id).await?;

    Ok(HttpResponse::Ok().json(CaseLibraryResponse {
        evidence: library
            .evidence
            .into_iter()
            .map(|e| EvidenceView {
                description: e.description,
                submitted_by: e.submitted_by_username,
            })
            .collect(),
        witnesses: library
            .witnesses
            .into_iter()
            .map(|w| WitnessView {
                name: w.name,
                called_by: w.called_by_username,
            })
            .collect(),
    }))
}

#[derive(Debug, Serialize)]
struct OpponentReadyResponse {
    opponent_ready: bool,
}

/// GET /opponent_ready/{trial_id}/{username}
///
/// Asks the live coordinator whether the caller's opponent has
/// signalled readiness. Only answers for trials with a coordinator;
/// a trial nobody has joined yet is reported as not found.
async fn opponent_ready(
    app_state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (trial_id, username) = path.into_inner();

    let addr = app_state.registry.get(&trial_id).ok_or_else(|| {
        AppError::not_found("TRIAL_NOT_FOUND", format!("trial {trial_id} not found"))
    })?;

    let ready: Result<bool, DomainError> = addr
        .send(OpponentReady { username })
        .await
        .map_err(|err| AppError::internal(format!("coordinator unavailable: {err}")))?;

    Ok(HttpResponse::Ok().json(OpponentReadyResponse {
        opponent_ready: ready?,
    }))
}
