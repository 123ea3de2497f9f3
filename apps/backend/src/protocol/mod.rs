//! Wire protocol for the realtime trial channel.
//!
//! Inbound messages carry the session id and participant username;
//! outbound events mirror the coordinator's state transitions. Tagged
//! JSON on both directions.

use serde::{Deserialize, Serialize};

use crate::domain::{ActionType, Ruling, SpeakerRole, TrialPhase, VerdictOutcome};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMsg {
    JoinTrial {
        username: String,
        trial_id: String,
    },
    SubmitEvidence {
        username: String,
        trial_id: String,
        description: String,
    },
    SubmitWitness {
        username: String,
        trial_id: String,
        witness_name: String,
    },
    ReadyForNextPhase {
        username: String,
        trial_id: String,
    },
    SubmitAction {
        username: String,
        trial_id: String,
        action_type: String,
        #[serde(default)]
        content: String,
        #[serde(default)]
        witness_name: Option<String>,
        #[serde(default)]
        evidence_description: Option<String>,
    },
    SubmitQuestion {
        username: String,
        trial_id: String,
        question: String,
    },
    Object {
        username: String,
        trial_id: String,
        reason: String,
    },
}

impl ClientMsg {
    pub fn trial_id(&self) -> &str {
        match self {
            ClientMsg::JoinTrial { trial_id, .. }
            | ClientMsg::SubmitEvidence { trial_id, .. }
            | ClientMsg::SubmitWitness { trial_id, .. }
            | ClientMsg::ReadyForNextPhase { trial_id, .. }
            | ClientMsg::SubmitAction { trial_id, .. }
            | ClientMsg::SubmitQuestion { trial_id, .. }
            | ClientMsg::Object { trial_id, .. } => trial_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMsg {
    /// Snapshot pushed to a joining observer only.
    TrialState {
        current_phase: TrialPhase,
        current_turn: Option<String>,
    },

    JoinedTrial {
        message: String,
    },

    PhaseAdvanced {
        next_phase: TrialPhase,
    },

    TurnChanged {
        current_turn: String,
    },

    EvidenceUpdated {
        username: String,
        description: String,
    },

    WitnessUpdated {
        username: String,
        witness_name: String,
    },

    UserReady {
        username: String,
    },

    StartExamination {
        witness_name: String,
    },

    QuestionAsked {
        question: String,
        asked_by: String,
    },

    ObjectionRuled {
        ruling: Ruling,
    },

    TranscriptUpdated {
        timestamp: String,
        speaker_role: SpeakerRole,
        speaker_username: Option<String>,
        content: String,
        action_type: ActionType,
    },

    VerdictAnnounced {
        verdict: VerdictOutcome,
        reasoning: String,
    },

    Error {
        message: String,
    },
}
