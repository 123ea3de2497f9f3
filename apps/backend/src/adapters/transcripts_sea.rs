//! SeaORM adapter for the transcript_entries table. Insert-only.

use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder, Set};
use time::OffsetDateTime;

use crate::entities::transcript_entries;

#[derive(Debug, Clone)]
pub struct TranscriptEntryCreate {
    pub entry_id: String,
    pub trial_id: String,
    pub timestamp: OffsetDateTime,
    pub speaker_username: Option<String>,
    pub speaker_role: String,
    pub content: String,
    pub action_type: String,
}

pub async fn insert_entry<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: TranscriptEntryCreate,
) -> Result<transcript_entries::Model, sea_orm::DbErr> {
    let model = transcript_entries::ActiveModel {
        entry_id: Set(dto.entry_id),
        trial_id: Set(dto.trial_id),
        timestamp: Set(dto.timestamp),
        speaker_username: Set(dto.speaker_username),
        speaker_role: Set(dto.speaker_role),
        content: Set(dto.content),
        action_type: Set(dto.action_type),
    };
    model.insert(conn).await
}

pub async fn list_by_trial<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    trial_id: &str,
) -> Result<Vec<transcript_entries::Model>, sea_orm::DbErr> {
    transcript_entries::Entity::find()
        .filter(transcript_entries::Column::TrialId.eq(trial_id))
        .order_by_asc(transcript_entries::Column::Timestamp)
        .all(conn)
        .await
}
