//! SeaORM adapter for the trials table.

use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, Set};
use time::OffsetDateTime;

use crate::entities::trials;

#[derive(Debug, Clone)]
pub struct TrialCreate {
    pub trial_id: String,
    pub title: String,
    pub description: String,
    pub plaintiff_id: String,
    pub defendant_id: String,
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    trial_id: &str,
) -> Result<Option<trials::Model>, sea_orm::DbErr> {
    trials::Entity::find_by_id(trial_id.to_string()).one(conn).await
}

pub async fn create_trial<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: TrialCreate,
) -> Result<trials::Model, sea_orm::DbErr> {
    let model = trials::ActiveModel {
        trial_id: Set(dto.trial_id),
        title: Set(dto.title),
        description: Set(dto.description),
        plaintiff_id: Set(dto.plaintiff_id),
        defendant_id: Set(dto.defendant_id),
        current_phase: Set(trials::TrialPhase::PreTrial),
        current_turn_username: Set(None),
        created_at: Set(OffsetDateTime::now_utc()),
        motion_to_judgment_called: Set(false),
    };
    model.insert(conn).await
}

/// Mirror the coordinator's in-memory phase/turn into the durable row.
pub async fn update_progress<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    trial_id: &str,
    phase: trials::TrialPhase,
    turn: Option<String>,
) -> Result<(), sea_orm::DbErr> {
    let model = trials::ActiveModel {
        trial_id: Set(trial_id.to_string()),
        current_phase: Set(phase),
        current_turn_username: Set(turn),
        ..Default::default()
    };
    trials::Entity::update(model).exec(conn).await?;
    Ok(())
}
