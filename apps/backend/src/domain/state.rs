use serde::{Deserialize, Serialize};

use crate::domain::phase::TrialPhase;

/// The two opposing participant roles.
///
/// Judge and jury are narrators on the transcript, never participants;
/// see [`crate::domain::transcript::SpeakerRole`].
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartyRole {
    Plaintiff,
    Defendant,
}

impl PartyRole {
    pub fn opponent(self) -> PartyRole {
        match self {
            PartyRole::Plaintiff => PartyRole::Defendant,
            PartyRole::Defendant => PartyRole::Plaintiff,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PartyRole::Plaintiff => "plaintiff",
            PartyRole::Defendant => "defendant",
        }
    }
}

/// Readiness flags for exactly the two participants.
///
/// Both must be true to trigger the phase advance out of pre-trial;
/// the gate resets both to false when it fires.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Readiness {
    pub plaintiff: bool,
    pub defendant: bool,
}

impl Readiness {
    pub fn set(&mut self, role: PartyRole) {
        match role {
            PartyRole::Plaintiff => self.plaintiff = true,
            PartyRole::Defendant => self.defendant = true,
        }
    }

    pub fn get(&self, role: PartyRole) -> bool {
        match role {
            PartyRole::Plaintiff => self.plaintiff,
            PartyRole::Defendant => self.defendant,
        }
    }

    pub fn all_ready(&self) -> bool {
        self.plaintiff && self.defendant
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Authoritative in-memory state of one trial session.
///
/// Owned exclusively by the trial's coordinator actor; the coordinator
/// is the single writer. Durable storage only mirrors this state.
#[derive(Debug, Clone)]
pub struct TrialState {
    pub plaintiff: String,
    pub defendant: String,
    pub phase: TrialPhase,
    /// Participant currently authorized to submit an action, if any.
    pub turn: Option<String>,
    pub ready: Readiness,
    /// Declared but unused by current logic; retained for compatibility.
    pub motion_to_judgment_called: bool,
}

impl TrialState {
    pub fn new(plaintiff: String, defendant: String) -> Self {
        Self {
            plaintiff,
            defendant,
            phase: TrialPhase::PreTrial,
            turn: None,
            ready: Readiness::default(),
            motion_to_judgment_called: false,
        }
    }

    /// Role of a username within this trial, or None for outsiders.
    pub fn role_of(&self, username: &str) -> Option<PartyRole> {
        if username == self.plaintiff {
            Some(PartyRole::Plaintiff)
        } else if username == self.defendant {
            Some(PartyRole::Defendant)
        } else {
            None
        }
    }

    pub fn username_of(&self, role: PartyRole) -> &str {
        match role {
            PartyRole::Plaintiff => &self.plaintiff,
            PartyRole::Defendant => &self.defendant,
        }
    }

    /// Role of the current turn holder, if a turn is set.
    pub fn turn_role(&self) -> Option<PartyRole> {
        self.turn.as_deref().and_then(|u| self.role_of(u))
    }

    pub fn holds_turn(&self, username: &str) -> bool {
        self.turn.as_deref() == Some(username)
    }

    pub fn set_turn(&mut self, role: PartyRole) {
        self.turn = Some(self.username_of(role).to_string());
    }

    /// Hand the turn to the other party.
    pub fn switch_turn(&mut self) {
        if let Some(role) = self.turn_role() {
            self.set_turn(role.opponent());
        }
    }
}
