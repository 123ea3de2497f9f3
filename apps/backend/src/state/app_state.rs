use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::domain::{CoinFlip, DecisionPolicy};
use crate::ws::hub::TrialHub;
use crate::ws::registry::TrialRegistry;

/// Application state containing shared resources.
///
/// Everything realtime flows through here: the hub fans events out to
/// connections, the registry holds the live trial coordinators, and
/// the decision policy resolves judge and jury choices.
#[derive(Clone)]
pub struct AppState {
    /// Database connection (optional for test scenarios)
    pub db: Option<DatabaseConnection>,
    pub hub: Arc<TrialHub>,
    pub registry: Arc<TrialRegistry>,
    pub policy: Arc<dyn DecisionPolicy>,
}

impl AppState {
    /// Create a new AppState with the given database connection.
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db: Some(db),
            hub: Arc::new(TrialHub::new()),
            registry: Arc::new(TrialRegistry::new()),
            policy: Arc::new(CoinFlip),
        }
    }

    /// Create a new AppState without a database connection.
    pub fn without_db() -> Self {
        Self {
            db: None,
            hub: Arc::new(TrialHub::new()),
            registry: Arc::new(TrialRegistry::new()),
            policy: Arc::new(CoinFlip),
        }
    }

    /// Swap in a different decision policy.
    pub fn with_policy(mut self, policy: Arc<dyn DecisionPolicy>) -> Self {
        self.policy = policy;
        self
    }

    #[cfg(test)]
    pub fn for_tests_without_db() -> Self {
        Self::without_db()
    }
}
