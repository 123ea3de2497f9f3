use sea_orm::ConnectionTrait;

use crate::adapters::transcripts_sea as transcripts_adapter;
use crate::adapters::transcripts_sea::TranscriptEntryCreate;
use crate::domain::{ActionType, SpeakerRole, TranscriptEntry};
use crate::entities::transcript_entries;
use crate::errors::domain::DomainError;

/// Persist an in-memory transcript entry. Insert-only by design.
pub async fn append<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    entry: &TranscriptEntry,
) -> Result<(), DomainError> {
    transcripts_adapter::insert_entry(
        conn,
        TranscriptEntryCreate {
            entry_id: entry.entry_id.clone(),
            trial_id: entry.trial_id.clone(),
            timestamp: entry.timestamp,
            speaker_username: entry.speaker_username.clone(),
            speaker_role: entry.speaker_role.as_str().to_string(),
            content: entry.content.clone(),
            action_type: entry.action_type.as_str().to_string(),
        },
    )
    .await?;
    Ok(())
}

/// Full session transcript in timestamp order, for replay.
pub async fn list_by_trial<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    trial_id: &str,
) -> Result<Vec<TranscriptEntry>, DomainError> {
    let rows = transcripts_adapter::list_by_trial(conn, trial_id).await?;
    rows.into_iter().map(TranscriptEntry::try_from).collect()
}

impl TryFrom<transcript_entries::Model> for TranscriptEntry {
    type Error = DomainError;

    fn try_from(model: transcript_entries::Model) -> Result<Self, Self::Error> {
        let speaker_role = SpeakerRole::parse(&model.speaker_role).ok_or_else(|| {
            DomainError::validation(format!("unknown speaker role: {}", model.speaker_role))
        })?;
        let action_type = ActionType::parse(&model.action_type).ok_or_else(|| {
            DomainError::validation(format!("unknown action type: {}", model.action_type))
        })?;
        Ok(Self {
            entry_id: model.entry_id,
            trial_id: model.trial_id,
            timestamp: model.timestamp,
            speaker_username: model.speaker_username,
            speaker_role,
            content: model.content,
            action_type,
        })
    }
}
