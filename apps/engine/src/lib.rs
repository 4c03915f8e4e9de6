//! Storage engine for the Hanja word-card application.
//!
//! Owns the SQLite store, the multi-grade and related-word services, the
//! in-memory study session and the command surface the UI calls into.

pub mod commands;
pub mod config;
pub mod db;
pub mod logging;
pub mod services;
pub mod session;
pub mod state;

use anyhow::Context;
use config::EngineConfig;
use state::AppState;
use std::path::PathBuf;

pub fn get_db_path() -> PathBuf {
    // Use app data directory for production, fallback to current dir
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("hanja-cards")
        .join("hanja.db")
}

/// Open storage and seed it from the bundled dataset on first launch or
/// when the bundled dataset has changed since the last seed.
pub fn bootstrap(config: EngineConfig) -> anyhow::Result<AppState> {
    let db_path = config.resolved_db_path();
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create data directory {}", parent.display()))?;
    }

    let state = AppState::new(config);
    state
        .initialize_storage()
        .with_context(|| format!("failed to open database at {}", db_path.display()))?;
    seed_if_needed(&state)?;
    Ok(state)
}

/// Same as [`bootstrap`] over a private in-memory database.
pub fn bootstrap_in_memory(config: EngineConfig) -> anyhow::Result<AppState> {
    let state = AppState::in_memory(config);
    state
        .initialize_storage()
        .context("failed to open in-memory database")?;
    seed_if_needed(&state)?;
    Ok(state)
}

fn seed_if_needed(state: &AppState) -> anyhow::Result<()> {
    let needs_seed = state
        .with_repository(|repo| repo.needs_bundled_seed())
        .context("failed to inspect database")?;
    if needs_seed {
        tracing::info!("seeding bundled dataset");
        state
            .with_repository(|repo| repo.seed_bundled())
            .context("failed to seed database")?;
        state.multi_grade.clear_cache();
    }
    Ok(())
}
