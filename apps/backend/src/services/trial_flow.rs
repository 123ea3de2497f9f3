//! Core per-trial session logic.
//!
//! `TrialFlow` owns the authoritative in-memory state of one trial and
//! processes commands synchronously, one at a time. Each command
//! returns an [`Outcome`]: the events to deliver and the storage writes
//! to mirror. The flow itself never touches the network or the
//! database; the coordinator actor owns both side effects, so every
//! method here is directly testable.

use std::sync::Arc;

use crate::domain::{
    action_effects, ActionKind, ActionType, DecisionPolicy, Effect, PartyRole, SpeakerRole,
    TranscriptEntry, TranscriptLog, TrialPhase, TrialState,
};
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::protocol::ServerMsg;
use crate::repos::evidence::EvidenceItem;
use crate::repos::trials::Trial;
use crate::repos::witnesses::WitnessItem;

/// Where an outgoing event should be delivered.
#[derive(Debug, Clone, PartialEq)]
pub enum Emit {
    /// Broadcast to every connection subscribed to the trial room.
    Room(ServerMsg),
    /// Reply to the submitting connection only.
    Caller(ServerMsg),
}

/// A storage write the coordinator should mirror asynchronously.
///
/// The in-memory state has already changed when these are produced;
/// a failed write is logged, never surfaced to clients.
#[derive(Debug, Clone, PartialEq)]
pub enum PersistCmd {
    Transcript(TranscriptEntry),
    Evidence(EvidenceItem),
    Witness(WitnessItem),
    Progress {
        phase: TrialPhase,
        turn: Option<String>,
    },
}

/// Result of one processed command.
#[derive(Debug, Default)]
pub struct Outcome {
    pub events: Vec<Emit>,
    pub persist: Vec<PersistCmd>,
}

impl Outcome {
    fn room(&mut self, msg: ServerMsg) {
        self.events.push(Emit::Room(msg));
    }

    fn caller(&mut self, msg: ServerMsg) {
        self.events.push(Emit::Caller(msg));
    }
}

/// A structured turn action, parsed off the wire.
#[derive(Debug, Clone)]
pub struct ActionSubmission {
    pub action_type: String,
    pub content: String,
    pub witness_name: Option<String>,
    pub evidence_description: Option<String>,
}

/// State machine for a single trial session.
pub struct TrialFlow {
    trial_id: String,
    state: TrialState,
    transcript: TranscriptLog,
    policy: Arc<dyn DecisionPolicy>,
}

impl TrialFlow {
    /// Seed a flow from its stored trial row.
    pub fn from_trial(trial: &Trial, policy: Arc<dyn DecisionPolicy>) -> Self {
        let mut state = TrialState::new(trial.plaintiff_id.clone(), trial.defendant_id.clone());
        state.phase = trial.current_phase;
        state.turn = trial.current_turn_username.clone();
        Self {
            trial_id: trial.trial_id.clone(),
            state,
            transcript: TranscriptLog::new(),
            policy,
        }
    }

    pub fn trial_id(&self) -> &str {
        &self.trial_id
    }

    pub fn state(&self) -> &TrialState {
        &self.state
    }

    pub fn transcript(&self) -> &TranscriptLog {
        &self.transcript
    }

    /// Current-state snapshot event, sent to joining connections.
    pub fn state_event(&self) -> ServerMsg {
        ServerMsg::TrialState {
            current_phase: self.state.phase,
            current_turn: self.state.turn.clone(),
        }
    }

    /// A connection joined the trial room.
    ///
    /// Any known user may join and observe; participation is only
    /// enforced on the commands that require a party role.
    pub fn join(&mut self, username: &str) -> Outcome {
        let mut out = Outcome::default();
        out.room(ServerMsg::JoinedTrial {
            message: format!("{username} has joined the trial."),
        });
        out.caller(self.state_event());
        out
    }

    pub fn submit_evidence(&mut self, username: &str, description: &str) -> Outcome {
        let item = EvidenceItem::new(&self.trial_id, username, description.to_string());
        let mut out = Outcome::default();
        out.room(ServerMsg::EvidenceUpdated {
            username: username.to_string(),
            description: description.to_string(),
        });
        out.persist.push(PersistCmd::Evidence(item));
        out
    }

    pub fn submit_witness(&mut self, username: &str, witness_name: &str) -> Outcome {
        let item = WitnessItem::new(&self.trial_id, username, witness_name.to_string());
        let mut out = Outcome::default();
        out.room(ServerMsg::WitnessUpdated {
            username: username.to_string(),
            witness_name: witness_name.to_string(),
        });
        out.persist.push(PersistCmd::Witness(item));
        out
    }

    /// Mark a participant ready; when both are ready, leave pre-trial.
    pub fn set_ready(&mut self, username: &str) -> Result<Outcome, DomainError> {
        let role = self.require_participant(username)?;
        self.state.ready.set(role);

        let mut out = Outcome::default();
        out.room(ServerMsg::UserReady {
            username: username.to_string(),
        });

        if self.state.ready.all_ready() && self.advance_phase(TrialPhase::OpeningStatements) {
            self.state.ready.reset();
            self.state.set_turn(PartyRole::Plaintiff);
            out.room(ServerMsg::PhaseAdvanced {
                next_phase: self.state.phase,
            });
            out.room(ServerMsg::TurnChanged {
                current_turn: self.state.plaintiff.clone(),
            });
            out.persist.push(self.progress());
        }
        Ok(out)
    }

    /// Process a turn action. Rejected outright if `username` does not
    /// hold the turn; nothing mutates before that check passes.
    pub fn submit_action(
        &mut self,
        username: &str,
        submission: &ActionSubmission,
    ) -> Result<Outcome, DomainError> {
        if !self.state.holds_turn(username) {
            return Err(DomainError::out_of_turn());
        }
        let role = self.require_participant(username)?;
        let kind = ActionKind::parse(&submission.action_type);

        let mut out = Outcome::default();
        let (content, action_type) = match kind {
            ActionKind::OpeningStatement => {
                (submission.content.clone(), ActionType::OpeningStatement)
            }
            ActionKind::CallWitness => {
                let name = submission
                    .witness_name
                    .as_deref()
                    .ok_or_else(|| DomainError::validation("witness_name is required"))?;
                (format!("Called witness: {name}"), ActionType::CallWitness)
            }
            ActionKind::IntroduceEvidence => {
                let desc = submission
                    .evidence_description
                    .as_deref()
                    .ok_or_else(|| DomainError::validation("evidence_description is required"))?;
                (
                    format!("Introduced evidence: {desc}"),
                    ActionType::IntroduceEvidence,
                )
            }
            ActionKind::RestCase => (format!("{username} rests their case."), ActionType::RestCase),
            ActionKind::ClosingArgument => {
                (submission.content.clone(), ActionType::ClosingArgument)
            }
            // Unknown actions are accepted but recorded nowhere.
            ActionKind::Other => return Ok(out),
        };

        self.record(
            &mut out,
            Some(username.to_string()),
            role.into(),
            content,
            action_type,
        );

        let mut progressed = false;
        for effect in action_effects(self.state.phase, role, kind) {
            match effect {
                Effect::AdvancePhase(next) => {
                    if self.advance_phase(next) {
                        progressed = true;
                        out.room(ServerMsg::PhaseAdvanced {
                            next_phase: self.state.phase,
                        });
                    }
                }
                Effect::SetTurn(to) => {
                    self.state.set_turn(to);
                    progressed = true;
                    out.room(ServerMsg::TurnChanged {
                        current_turn: self.state.username_of(to).to_string(),
                    });
                }
                Effect::SwitchTurn => {
                    self.state.switch_turn();
                    progressed = true;
                    if let Some(turn) = self.state.turn.clone() {
                        out.room(ServerMsg::TurnChanged { current_turn: turn });
                    }
                }
                Effect::StartExamination => {
                    // Validated above for call_witness.
                    if let Some(name) = submission.witness_name.clone() {
                        out.room(ServerMsg::StartExamination { witness_name: name });
                    }
                }
                Effect::ResolveVerdict => self.resolve_verdict(&mut out),
            }
        }

        if progressed {
            out.persist.push(self.progress());
        }
        Ok(out)
    }

    /// Record an examination question and invite objections.
    pub fn submit_question(&mut self, username: &str, question: &str) -> Result<Outcome, DomainError> {
        let role = self.require_participant(username)?;
        let mut out = Outcome::default();
        self.record(
            &mut out,
            Some(username.to_string()),
            role.into(),
            format!("Q: {question}"),
            ActionType::Question,
        );
        out.room(ServerMsg::QuestionAsked {
            question: question.to_string(),
            asked_by: username.to_string(),
        });
        Ok(out)
    }

    /// Record an objection and have the judge rule on it immediately.
    pub fn raise_objection(&mut self, username: &str, reason: &str) -> Result<Outcome, DomainError> {
        let role = self.require_participant(username)?;
        let mut out = Outcome::default();
        self.record(
            &mut out,
            Some(username.to_string()),
            role.into(),
            format!("Objection: {reason}"),
            ActionType::Objection,
        );
        let ruling = self.policy.ruling();
        self.record(
            &mut out,
            None,
            SpeakerRole::Judge,
            format!("Objection {}.", ruling.as_str()),
            ActionType::JudgeRuling,
        );
        out.room(ServerMsg::ObjectionRuled { ruling });
        Ok(out)
    }

    /// Whether `username`'s opponent has signalled readiness.
    pub fn opponent_ready(&self, username: &str) -> Result<bool, DomainError> {
        let role = self
            .state
            .role_of(username)
            .ok_or_else(|| DomainError::not_found(NotFoundKind::Opponent, "opponent not found"))?;
        Ok(self.state.ready.get(role.opponent()))
    }

    fn require_participant(&self, username: &str) -> Result<PartyRole, DomainError> {
        self.state
            .role_of(username)
            .ok_or_else(|| DomainError::validation("not a participant in this trial"))
    }

    /// Guarded phase assignment: the phase sequence never regresses,
    /// so a non-forward target is a no-op.
    fn advance_phase(&mut self, to: TrialPhase) -> bool {
        if self.state.phase.is_forward_of(to) {
            self.state.phase = to;
            true
        } else {
            false
        }
    }

    fn resolve_verdict(&mut self, out: &mut Outcome) {
        let verdict = self.policy.verdict();
        let reasoning = "Based on the evidence and testimony presented.";
        self.record(
            out,
            None,
            SpeakerRole::Jury,
            format!("Verdict: {}. Reasoning: {reasoning}", verdict.as_str()),
            ActionType::Verdict,
        );
        out.room(ServerMsg::VerdictAnnounced {
            verdict,
            reasoning: reasoning.to_string(),
        });
    }

    /// Append to the transcript, broadcast the entry, queue the write.
    fn record(
        &mut self,
        out: &mut Outcome,
        speaker_username: Option<String>,
        speaker_role: SpeakerRole,
        content: String,
        action_type: ActionType,
    ) {
        let entry = self
            .transcript
            .append(&self.trial_id, speaker_username, speaker_role, content, action_type)
            .clone();
        out.room(ServerMsg::TranscriptUpdated {
            timestamp: entry.formatted_timestamp(),
            speaker_role: entry.speaker_role,
            speaker_username: entry.speaker_username.clone(),
            content: entry.content.clone(),
            action_type: entry.action_type,
        });
        out.persist.push(PersistCmd::Transcript(entry));
    }

    fn progress(&self) -> PersistCmd {
        PersistCmd::Progress {
            phase: self.state.phase,
            turn: self.state.turn.clone(),
        }
    }
}
