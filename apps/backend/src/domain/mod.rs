//! Domain layer: pure trial logic types and helpers.

pub mod phase;
pub mod ruling;
pub mod state;
pub mod transcript;
pub mod transition;

#[cfg(test)]
mod tests_phase;
#[cfg(test)]
mod tests_transition;

// Re-exports for ergonomics
pub use phase::TrialPhase;
pub use ruling::{CoinFlip, DecisionPolicy, Ruling, VerdictOutcome};
#[cfg(test)]
pub use ruling::Scripted;
pub use state::{PartyRole, Readiness, TrialState};
pub use transcript::{ActionType, SpeakerRole, TranscriptEntry, TranscriptLog};
pub use transition::{action_effects, ActionKind, Effect};
