//! Append-only transcript log for one trial session.

use serde::{Deserialize, Serialize};
use time::format_description::FormatItem;
use time::macros::format_description;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::state::PartyRole;

/// Action tag attached to each transcript entry.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    OpeningStatement,
    CallWitness,
    IntroduceEvidence,
    RestCase,
    ClosingArgument,
    Question,
    Objection,
    JudgeRuling,
    Verdict,
}

impl ActionType {
    pub fn parse(s: &str) -> Option<ActionType> {
        match s {
            "opening_statement" => Some(ActionType::OpeningStatement),
            "call_witness" => Some(ActionType::CallWitness),
            "introduce_evidence" => Some(ActionType::IntroduceEvidence),
            "rest_case" => Some(ActionType::RestCase),
            "closing_argument" => Some(ActionType::ClosingArgument),
            "question" => Some(ActionType::Question),
            "objection" => Some(ActionType::Objection),
            "judge_ruling" => Some(ActionType::JudgeRuling),
            "verdict" => Some(ActionType::Verdict),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ActionType::OpeningStatement => "opening_statement",
            ActionType::CallWitness => "call_witness",
            ActionType::IntroduceEvidence => "introduce_evidence",
            ActionType::RestCase => "rest_case",
            ActionType::ClosingArgument => "closing_argument",
            ActionType::Question => "question",
            ActionType::Objection => "objection",
            ActionType::JudgeRuling => "judge_ruling",
            ActionType::Verdict => "verdict",
        }
    }
}

/// Who is speaking on a transcript entry.
///
/// Judge and jury entries carry no username.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeakerRole {
    Plaintiff,
    Defendant,
    Judge,
    Jury,
}

impl SpeakerRole {
    pub fn parse(s: &str) -> Option<SpeakerRole> {
        match s {
            "plaintiff" => Some(SpeakerRole::Plaintiff),
            "defendant" => Some(SpeakerRole::Defendant),
            "judge" => Some(SpeakerRole::Judge),
            "jury" => Some(SpeakerRole::Jury),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SpeakerRole::Plaintiff => "plaintiff",
            SpeakerRole::Defendant => "defendant",
            SpeakerRole::Judge => "judge",
            SpeakerRole::Jury => "jury",
        }
    }
}

impl From<PartyRole> for SpeakerRole {
    fn from(role: PartyRole) -> Self {
        match role {
            PartyRole::Plaintiff => SpeakerRole::Plaintiff,
            PartyRole::Defendant => SpeakerRole::Defendant,
        }
    }
}

/// One immutable recorded utterance/action.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptEntry {
    pub entry_id: String,
    pub trial_id: String,
    pub timestamp: OffsetDateTime,
    /// None for judge/jury narrator entries.
    pub speaker_username: Option<String>,
    pub speaker_role: SpeakerRole,
    pub content: String,
    pub action_type: ActionType,
}

const TIMESTAMP_FORMAT: &[FormatItem<'_>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

impl TranscriptEntry {
    /// Wire timestamp, e.g. `2026-08-24 17:03:11`.
    pub fn formatted_timestamp(&self) -> String {
        self.timestamp
            .format(TIMESTAMP_FORMAT)
            .unwrap_or_else(|_| "unknown".to_string())
    }
}

/// Append-only ordered record of speech/action events for a session.
///
/// `append` assigns the server-side id and timestamp. No update or
/// delete operation exists; the full log is queryable for replay.
#[derive(Debug, Default)]
pub struct TranscriptLog {
    entries: Vec<TranscriptEntry>,
}

impl TranscriptLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(
        &mut self,
        trial_id: &str,
        speaker_username: Option<String>,
        speaker_role: SpeakerRole,
        content: String,
        action_type: ActionType,
    ) -> &TranscriptEntry {
        let entry = TranscriptEntry {
            entry_id: Uuid::new_v4().to_string(),
            trial_id: trial_id.to_string(),
            timestamp: OffsetDateTime::now_utc(),
            speaker_username,
            speaker_role,
            content,
            action_type,
        };
        self.entries.push(entry);
        self.entries.last().expect("just pushed")
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
