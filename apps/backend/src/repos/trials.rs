use sea_orm::ConnectionTrait;

use crate::adapters::trials_sea as trials_adapter;
pub use crate::adapters::trials_sea::TrialCreate;
use crate::domain::TrialPhase;
use crate::entities::trials;
use crate::errors::domain::DomainError;

/// Trial domain model, converted from the database row.
///
/// This is only the durable seed for a coordinator; once a coordinator
/// exists its in-memory state is authoritative.
#[derive(Debug, Clone, PartialEq)]
pub struct Trial {
    pub trial_id: String,
    pub title: String,
    pub description: String,
    pub plaintiff_id: String,
    pub defendant_id: String,
    pub current_phase: TrialPhase,
    pub current_turn_username: Option<String>,
    pub created_at: time::OffsetDateTime,
    pub motion_to_judgment_called: bool,
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    trial_id: &str,
) -> Result<Option<Trial>, DomainError> {
    let trial = trials_adapter::find_by_id(conn, trial_id).await?;
    Ok(trial.map(Trial::from))
}

pub async fn create_trial<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: TrialCreate,
) -> Result<Trial, DomainError> {
    let trial = trials_adapter::create_trial(conn, dto).await?;
    Ok(Trial::from(trial))
}

pub async fn update_progress<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    trial_id: &str,
    phase: TrialPhase,
    turn: Option<String>,
) -> Result<(), DomainError> {
    trials_adapter::update_progress(conn, trial_id, phase.into(), turn).await?;
    Ok(())
}

// Conversions between the SeaORM phase enum and the domain phase

impl From<trials::TrialPhase> for TrialPhase {
    fn from(db: trials::TrialPhase) -> Self {
        match db {
            trials::TrialPhase::PreTrial => TrialPhase::PreTrial,
            trials::TrialPhase::OpeningStatements => TrialPhase::OpeningStatements,
            trials::TrialPhase::PresentationOfEvidencePlaintiff => {
                TrialPhase::PresentationOfEvidencePlaintiff
            }
            trials::TrialPhase::PresentationOfEvidenceDefendant => {
                TrialPhase::PresentationOfEvidenceDefendant
            }
            trials::TrialPhase::Rebuttal => TrialPhase::Rebuttal,
            trials::TrialPhase::ClosingArguments => TrialPhase::ClosingArguments,
            trials::TrialPhase::Verdict => TrialPhase::Verdict,
        }
    }
}

impl From<TrialPhase> for trials::TrialPhase {
    fn from(phase: TrialPhase) -> Self {
        match phase {
            TrialPhase::PreTrial => trials::TrialPhase::PreTrial,
            TrialPhase::OpeningStatements => trials::TrialPhase::OpeningStatements,
            TrialPhase::PresentationOfEvidencePlaintiff => {
                trials::TrialPhase::PresentationOfEvidencePlaintiff
            }
            TrialPhase::PresentationOfEvidenceDefendant => {
                trials::TrialPhase::PresentationOfEvidenceDefendant
            }
            TrialPhase::Rebuttal => trials::TrialPhase::Rebuttal,
            TrialPhase::ClosingArguments => trials::TrialPhase::ClosingArguments,
            TrialPhase::Verdict => trials::TrialPhase::Verdict,
        }
    }
}

impl From<trials::Model> for Trial {
    fn from(model: trials::Model) -> Self {
        Self {
            trial_id: model.trial_id,
            title: model.title,
            description: model.description,
            plaintiff_id: model.plaintiff_id,
            defendant_id: model.defendant_id,
            current_phase: model.current_phase.into(),
            current_turn_username: model.current_turn_username,
            created_at: model.created_at,
            motion_to_judgment_called: model.motion_to_judgment_called,
        }
    }
}
