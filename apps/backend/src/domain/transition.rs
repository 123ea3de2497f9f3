//! Pure action transition table for the trial state machine.
//!
//! Given the current phase and the role of the (already validated)
//! turn holder, `action_effects` returns the state effects an action
//! produces. Applying the effects and emitting events is the
//! coordinator's job; this module has no side effects.

use crate::domain::phase::TrialPhase;
use crate::domain::state::PartyRole;

/// Action kinds accepted by `submit_action`.
///
/// Unknown wire strings map to `Other`: the message is accepted but
/// produces no state change and no transcript entry.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ActionKind {
    OpeningStatement,
    CallWitness,
    IntroduceEvidence,
    RestCase,
    ClosingArgument,
    Other,
}

impl ActionKind {
    pub fn parse(wire: &str) -> ActionKind {
        match wire {
            "opening_statement" => ActionKind::OpeningStatement,
            "call_witness" => ActionKind::CallWitness,
            "introduce_evidence" => ActionKind::IntroduceEvidence,
            "rest_case" => ActionKind::RestCase,
            "closing_argument" => ActionKind::ClosingArgument,
            _ => ActionKind::Other,
        }
    }
}

/// One state effect produced by an accepted action.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Effect {
    AdvancePhase(TrialPhase),
    SetTurn(PartyRole),
    SwitchTurn,
    /// Broadcast `start_examination` for the named witness.
    StartExamination,
    /// Resolve and announce the jury verdict.
    ResolveVerdict,
}

/// The action transition table.
///
/// `speaker` is the role of the current turn holder. Rows mirror the
/// scripted trial flow: the defendant's opening statement and closing
/// argument each end their phase, `rest_case` walks the evidence
/// phases, and everything else leaves phase and turn untouched.
pub fn action_effects(phase: TrialPhase, speaker: PartyRole, action: ActionKind) -> Vec<Effect> {
    match action {
        ActionKind::OpeningStatement => {
            if speaker == PartyRole::Defendant {
                vec![
                    Effect::AdvancePhase(TrialPhase::PresentationOfEvidencePlaintiff),
                    Effect::SetTurn(PartyRole::Plaintiff),
                ]
            } else {
                vec![Effect::SwitchTurn]
            }
        }
        ActionKind::CallWitness => vec![Effect::StartExamination],
        ActionKind::IntroduceEvidence => vec![],
        ActionKind::RestCase => match phase {
            TrialPhase::PresentationOfEvidencePlaintiff => vec![
                Effect::AdvancePhase(TrialPhase::PresentationOfEvidenceDefendant),
                Effect::SetTurn(PartyRole::Defendant),
            ],
            TrialPhase::PresentationOfEvidenceDefendant => vec![
                Effect::AdvancePhase(TrialPhase::Rebuttal),
                Effect::SetTurn(PartyRole::Plaintiff),
            ],
            TrialPhase::Rebuttal => vec![
                Effect::AdvancePhase(TrialPhase::ClosingArguments),
                Effect::SetTurn(PartyRole::Plaintiff),
            ],
            _ => vec![],
        },
        ActionKind::ClosingArgument => {
            if speaker == PartyRole::Defendant {
                vec![
                    Effect::AdvancePhase(TrialPhase::Verdict),
                    Effect::ResolveVerdict,
                ]
            } else {
                vec![Effect::SwitchTurn]
            }
        }
        ActionKind::Other => vec![],
    }
}
