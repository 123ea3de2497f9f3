use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(64))")]
pub enum TrialPhase {
    #[sea_orm(string_value = "pre_trial")]
    PreTrial,
    #[sea_orm(string_value = "opening_statements")]
    OpeningStatements,
    #[sea_orm(string_value = "presentation_of_evidence_plaintiff")]
    PresentationOfEvidencePlaintiff,
    #[sea_orm(string_value = "presentation_of_evidence_defendant")]
    PresentationOfEvidenceDefendant,
    #[sea_orm(string_value = "rebuttal")]
    Rebuttal,
    #[sea_orm(string_value = "closing_arguments")]
    ClosingArguments,
    #[sea_orm(string_value = "verdict")]
    Verdict,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "trials")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub trial_id: String,
    pub title: String,
    pub description: String,
    #[sea_orm(column_name = "plaintiff_id")]
    pub plaintiff_id: String,
    #[sea_orm(column_name = "defendant_id")]
    pub defendant_id: String,
    #[sea_orm(column_name = "current_phase")]
    pub current_phase: TrialPhase,
    #[sea_orm(column_name = "current_turn_username")]
    pub current_turn_username: Option<String>,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "motion_to_judgment_called")]
    pub motion_to_judgment_called: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::PlaintiffId",
        to = "super::users::Column::Username"
    )]
    Plaintiff,
    #[sea_orm(has_many = "super::transcript_entries::Entity")]
    TranscriptEntries,
    #[sea_orm(has_many = "super::evidence::Entity")]
    Evidence,
    #[sea_orm(has_many = "super::witnesses::Entity")]
    Witnesses,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Plaintiff.def()
    }
}

impl Related<super::transcript_entries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TranscriptEntries.def()
    }
}

impl Related<super::evidence::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Evidence.def()
    }
}

impl Related<super::witnesses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Witnesses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
