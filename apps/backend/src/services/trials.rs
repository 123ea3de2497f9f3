//! Trial lifecycle operations backed by storage.

use sea_orm::ConnectionTrait;
use uuid::Uuid;

use crate::errors::domain::DomainError;
use crate::repos;
use crate::repos::trials::{Trial, TrialCreate};

/// Everything durably attached to a trial's case: submitted evidence
/// and called witnesses.
#[derive(Debug, Clone)]
pub struct CaseLibrary {
    pub evidence: Vec<repos::evidence::EvidenceItem>,
    pub witnesses: Vec<repos::witnesses::WitnessItem>,
}

/// Create a trial between two usernames, registering either user on
/// first sight. The first username is the plaintiff.
pub async fn create_trial<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    username1: &str,
    username2: &str,
    description: &str,
) -> Result<Trial, DomainError> {
    repos::users::find_or_create(conn, username1).await?;
    repos::users::find_or_create(conn, username2).await?;

    let trial_id = Uuid::new_v4().to_string();
    let title = format!("{username1} v. {username2}");
    repos::trials::create_trial(
        conn,
        TrialCreate {
            trial_id,
            title,
            description: description.to_string(),
            plaintiff_id: username1.to_string(),
            defendant_id: username2.to_string(),
        },
    )
    .await
}

pub async fn case_library<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    trial_id: &str,
) -> Result<CaseLibrary, DomainError> {
    let evidence = repos::evidence::list_by_trial(conn, trial_id).await?;
    let witnesses = repos::witnesses::list_by_trial(conn, trial_id).await?;
    Ok(CaseLibrary {
        evidence,
        witnesses,
    })
}
