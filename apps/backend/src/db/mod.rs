use sea_orm::{Database, DatabaseConnection};

use crate::error::AppError;
use crate::state::app_state::AppState;

/// Centralized helper to access the database connection from AppState.
///
/// Returns a borrowed reference to the DatabaseConnection if
/// available, or `AppError::DbUnavailable` when the server is running
/// without storage.
pub fn require_db(state: &AppState) -> Result<&DatabaseConnection, AppError> {
    state.db.as_ref().ok_or_else(AppError::db_unavailable)
}

/// Connect using the configured database URL.
pub async fn connect_db(url: &str) -> Result<DatabaseConnection, AppError> {
    Database::connect(url).await.map_err(AppError::from)
}
