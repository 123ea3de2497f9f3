//! SeaORM adapter for the witnesses table.

use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};

use crate::entities::witnesses;

#[derive(Debug, Clone)]
pub struct WitnessCreate {
    pub witness_id: String,
    pub name: String,
    pub trial_id: String,
    pub called_by_username: String,
}

pub async fn insert_witness<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: WitnessCreate,
) -> Result<witnesses::Model, sea_orm::DbErr> {
    let model = witnesses::ActiveModel {
        witness_id: Set(dto.witness_id),
        name: Set(dto.name),
        trial_id: Set(dto.trial_id),
        called_by_username: Set(dto.called_by_username),
    };
    model.insert(conn).await
}

pub async fn list_by_trial<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    trial_id: &str,
) -> Result<Vec<witnesses::Model>, sea_orm::DbErr> {
    witnesses::Entity::find()
        .filter(witnesses::Column::TrialId.eq(trial_id))
        .all(conn)
        .await
}
