use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "witnesses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub witness_id: String,
    pub name: String,
    #[sea_orm(column_name = "trial_id")]
    pub trial_id: String,
    #[sea_orm(column_name = "called_by_username")]
    pub called_by_username: String,
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
