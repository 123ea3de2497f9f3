use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transcript_entries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub entry_id: String,
    #[sea_orm(column_name = "trial_id")]
    pub trial_id: String,
    pub timestamp: OffsetDateTime,
    #[sea_orm(column_name = "speaker_username")]
    pub speaker_username: Option<String>,
    #[sea_orm(column_name = "speaker_role")]
    pub speaker_role: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    #[sea_orm(column_name = "action_type")]
    pub action_type: String,
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
