use std::sync::Arc;

use actix::prelude::*;
use dashmap::DashMap;
use sea_orm::DatabaseConnection;

use crate::domain::DecisionPolicy;
use crate::repos::trials::Trial;
use crate::ws::coordinator::TrialCoordinator;
use crate::ws::hub::TrialHub;

/// Live coordinator addresses, keyed by trial id.
///
/// Coordinators are spawned lazily on the first join and live for the
/// process lifetime; a trial with no connections keeps its in-memory
/// state until restart.
#[derive(Default)]
pub struct TrialRegistry {
    trials: DashMap<String, Addr<TrialCoordinator>>,
}

impl TrialRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, trial_id: &str) -> Option<Addr<TrialCoordinator>> {
        self.trials.get(trial_id).map(|addr| addr.clone())
    }

    /// Return the trial's coordinator, spawning it from the stored
    /// trial row if this is the first join.
    pub fn get_or_spawn(
        &self,
        trial: &Trial,
        hub: Arc<TrialHub>,
        db: Option<DatabaseConnection>,
        policy: Arc<dyn DecisionPolicy>,
    ) -> Addr<TrialCoordinator> {
        self.trials
            .entry(trial.trial_id.clone())
            .or_insert_with(|| TrialCoordinator::new(trial, hub, db, policy).start())
            .clone()
    }

    pub fn len(&self) -> usize {
        self.trials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trials.is_empty()
    }
}
