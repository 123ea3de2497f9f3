use sea_orm::ConnectionTrait;
use uuid::Uuid;

use crate::adapters::witnesses_sea as witnesses_adapter;
use crate::adapters::witnesses_sea::WitnessCreate;
use crate::entities::witnesses;
use crate::errors::domain::DomainError;

/// Witness domain model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WitnessItem {
    pub witness_id: String,
    pub name: String,
    pub trial_id: String,
    pub called_by_username: String,
}

impl WitnessItem {
    pub fn new(trial_id: &str, called_by: &str, name: String) -> Self {
        Self {
            witness_id: Uuid::new_v4().to_string(),
            name,
            trial_id: trial_id.to_string(),
            called_by_username: called_by.to_string(),
        }
    }
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    item: &WitnessItem,
) -> Result<(), DomainError> {
    witnesses_adapter::insert_witness(
        conn,
        WitnessCreate {
            witness_id: item.witness_id.clone(),
            name: item.name.clone(),
            trial_id: item.trial_id.clone(),
            called_by_username: item.called_by_username.clone(),
        },
    )
    .await?;
    Ok(())
}

pub async fn list_by_trial<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    trial_id: &str,
) -> Result<Vec<WitnessItem>, DomainError> {
    let rows = witnesses_adapter::list_by_trial(conn, trial_id).await?;
    Ok(rows.into_iter().map(WitnessItem::from).collect())
}

impl From<witnesses::Model> for WitnessItem {
    fn from(model: witnesses::Model) -> Self {
        Self {
            witness_id: model.witness_id,
            name: model.name,
            trial_id: model.trial_id,
            called_by_username: model.called_by_username,
        }
    }
}
