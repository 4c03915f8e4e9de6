//! Common test utilities for integration tests.
//!
//! - TestContext over a fresh in-memory database per test
//! - Fixture builders for small seed datasets

pub mod fixtures;

use hanja_cards_lib::config::EngineConfig;
use hanja_cards_lib::db::{DbError, SeedReport, SqliteRepository};
use hanja_cards_lib::state::AppState;
use hanja_core::SeedDataset;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Isolated application state backed by an in-memory database.
pub struct TestContext {
    pub state: AppState,
}

impl TestContext {
    /// Empty, initialized storage.
    pub fn new() -> Self {
        let state = AppState::in_memory(EngineConfig::default());
        state.initialize_storage().expect("initialize storage");
        Self { state }
    }

    /// Storage seeded with `dataset`.
    pub fn with_dataset(dataset: &SeedDataset) -> Self {
        let ctx = Self::new();
        ctx.seed(dataset);
        ctx
    }

    pub fn seed(&self, dataset: &SeedDataset) -> SeedReport {
        let report = self
            .repo(|repo| repo.seed_from_dataset(dataset))
            .expect("seed dataset");
        self.state.multi_grade.clear_cache();
        report
    }

    pub fn repo<T>(&self, f: impl FnOnce(&SqliteRepository) -> Result<T, DbError>) -> Result<T, DbError> {
        self.state.with_repository(f)
    }
}

pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub fn ids<'a>(cards: impl IntoIterator<Item = &'a hanja_core::WordCard>) -> Vec<&'a str> {
    cards.into_iter().map(|c| c.id.as_str()).collect()
}
