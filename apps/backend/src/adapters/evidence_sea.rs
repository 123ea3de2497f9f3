//! SeaORM adapter for the evidence table.

use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};

use crate::entities::evidence;

#[derive(Debug, Clone)]
pub struct EvidenceCreate {
    pub evidence_id: String,
    pub trial_id: String,
    pub submitted_by_username: String,
    pub description: String,
}

pub async fn insert_evidence<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: EvidenceCreate,
) -> Result<evidence::Model, sea_orm::DbErr> {
    let model = evidence::ActiveModel {
        evidence_id: Set(dto.evidence_id),
        trial_id: Set(dto.trial_id),
        submitted_by_username: Set(dto.submitted_by_username),
        description: Set(dto.description),
        used: Set(false),
    };
    model.insert(conn).await
}

pub async fn list_by_trial<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    trial_id: &str,
) -> Result<Vec<evidence::Model>, sea_orm::DbErr> {
    evidence::Entity::find()
        .filter(evidence::Column::TrialId.eq(trial_id))
        .all(conn)
        .await
}
