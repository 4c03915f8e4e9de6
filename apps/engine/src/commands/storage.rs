//! Storage lifecycle and maintenance commands.

use crate::db::{DatabaseStatus, SeedReport, StatsRepository, WordInspection};
use crate::state::AppState;

use super::CommandError;

/// Open the database and ensure the schema exists.
pub fn initialize_storage(state: &AppState) -> Result<(), CommandError> {
    state.initialize_storage().map_err(Into::into)
}

/// Release the connection.
pub fn close_storage(state: &AppState) -> Result<(), CommandError> {
    state.close_storage().map_err(Into::into)
}

/// Replace all content with the bundled dataset and drop stale caches.
pub fn seed_from_static_dataset(state: &AppState) -> Result<SeedReport, CommandError> {
    let report = state.with_repository(|repo| repo.seed_bundled())?;
    state.multi_grade.clear_cache();
    Ok(report)
}

/// Delete all content and bookmarks.
pub fn reset_all_data(state: &AppState) -> Result<(), CommandError> {
    state.with_repository(|repo| repo.reset_all())?;
    state.multi_grade.clear_cache();
    Ok(())
}

pub fn get_database_status(state: &AppState) -> Result<DatabaseStatus, CommandError> {
    state
        .with_repository(|repo| repo.get_database_status())
        .map_err(Into::into)
}

pub fn inspect_word(word_id: &str, state: &AppState) -> Result<Option<WordInspection>, CommandError> {
    state
        .with_repository(|repo| repo.inspect_word(word_id))
        .map_err(Into::into)
}

pub fn clear_cache(state: &AppState) {
    state.multi_grade.clear_cache();
}
