use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "evidence")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub evidence_id: String,
    #[sea_orm(column_name = "trial_id")]
    pub trial_id: String,
    #[sea_orm(column_name = "submitted_by_username")]
    pub submitted_by_username: String,
    pub description: String,
    /// Present in the model but never set by current logic.
    pub used: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::trials::Entity",
        from = "Column::TrialId",
        to = "super::trials::Column::TrialId"
    )]
    Trial,
}

impl Related<super::trials::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Trial.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
