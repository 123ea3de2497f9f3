use serde::{Deserialize, Serialize};

/// Scripted trial progression phases.
///
/// The sequence is strictly ordered and only ever advances forward;
/// no phase is revisited within a trial's lifetime. Wire values are
/// the snake_case variant names.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrialPhase {
    /// Both parties prepare; the readiness gate leaves this phase.
    PreTrial,
    OpeningStatements,
    PresentationOfEvidencePlaintiff,
    PresentationOfEvidenceDefendant,
    Rebuttal,
    ClosingArguments,
    Verdict,
}

impl TrialPhase {
    pub const SEQUENCE: [TrialPhase; 7] = [
        TrialPhase::PreTrial,
        TrialPhase::OpeningStatements,
        TrialPhase::PresentationOfEvidencePlaintiff,
        TrialPhase::PresentationOfEvidenceDefendant,
        TrialPhase::Rebuttal,
        TrialPhase::ClosingArguments,
        TrialPhase::Verdict,
    ];

    /// Position within the fixed sequence (0-based).
    pub fn index(self) -> usize {
        Self::SEQUENCE
            .iter()
            .position(|p| *p == self)
            .expect("phase is in SEQUENCE")
    }

    /// The phase that follows this one, if any.
    pub fn next(self) -> Option<TrialPhase> {
        Self::SEQUENCE.get(self.index() + 1).copied()
    }

    /// True when advancing from `self` to `to` moves forward in the sequence.
    pub fn is_forward_of(self, to: TrialPhase) -> bool {
        to.index() > self.index()
    }

    /// Wire representation, e.g. `presentation_of_evidence_plaintiff`.
    pub fn as_str(self) -> &'static str {
        match self {
            TrialPhase::PreTrial => "pre_trial",
            TrialPhase::OpeningStatements => "opening_statements",
            TrialPhase::PresentationOfEvidencePlaintiff => "presentation_of_evidence_plaintiff",
            TrialPhase::PresentationOfEvidenceDefendant => "presentation_of_evidence_defendant",
            TrialPhase::Rebuttal => "rebuttal",
            TrialPhase::ClosingArguments => "closing_arguments",
            TrialPhase::Verdict => "verdict",
        }
    }
}
