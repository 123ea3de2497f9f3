use sea_orm::ConnectionTrait;
use uuid::Uuid;

use crate::adapters::evidence_sea as evidence_adapter;
use crate::adapters::evidence_sea::EvidenceCreate;
use crate::entities::evidence;
use crate::errors::domain::DomainError;

/// Evidence domain model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvidenceItem {
    pub evidence_id: String,
    pub trial_id: String,
    pub submitted_by_username: String,
    pub description: String,
    /// Present in the model but never set by current logic.
    pub used: bool,
}

impl EvidenceItem {
    pub fn new(trial_id: &str, submitted_by: &str, description: String) -> Self {
        Self {
            evidence_id: Uuid::new_v4().to_string(),
            trial_id: trial_id.to_string(),
            submitted_by_username: submitted_by.to_string(),
            description,
            used: false,
        }
    }
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    item: &EvidenceItem,
) -> Result<(), DomainError> {
    evidence_adapter::insert_evidence(
        conn,
        EvidenceCreate {
            evidence_id: item.evidence_id.clone(),
            trial_id: item.trial_id.clone(),
            submitted_by_username: item.submitted_by_username.clone(),
            description: item.description.clone(),
        },
    )
    .await?;
    Ok(())
}

pub async fn list_by_trial<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    trial_id: &str,
) -> Result<Vec<EvidenceItem>, DomainError> {
    let rows = evidence_adapter::list_by_trial(conn, trial_id).await?;
    Ok(rows.into_iter().map(EvidenceItem::from).collect())
}

impl From<evidence::Model> for EvidenceItem {
    fn from(model: evidence::Model) -> Self {
        Self {
            evidence_id: model.evidence_id,
            trial_id: model.trial_id,
            submitted_by_username: model.submitted_by_username,
            description: model.description,
            used: model.used,
        }
    }
}
