//! Application state.

use crate::config::EngineConfig;
use crate::db::{DbError, SqliteRepository};
use crate::services::{MultiGradeService, RelatedWordService};
use crate::session::StudySession;
use std::path::PathBuf;
use std::sync::Mutex;

/// Where the connection is opened from.
#[derive(Debug, Clone)]
enum Storage {
    File(PathBuf),
    Memory,
}

/// Process-wide context handed to every command.
///
/// The connection is opened lazily on first use and reopened after
/// [`AppState::close_storage`]. Caches live in the services.
pub struct AppState {
    pub config: EngineConfig,
    storage: Storage,
    repository: Mutex<Option<SqliteRepository>>,
    pub multi_grade: MultiGradeService,
    pub related: RelatedWordService,
    pub session: Mutex<StudySession>,
}

impl AppState {
    pub fn new(config: EngineConfig) -> Self {
        let storage = Storage::File(config.resolved_db_path());
        Self::with_storage(config, storage)
    }

    /// State backed by a private in-memory database.
    pub fn in_memory(config: EngineConfig) -> Self {
        Self::with_storage(config, Storage::Memory)
    }

    fn with_storage(config: EngineConfig, storage: Storage) -> Self {
        Self {
            storage,
            repository: Mutex::new(None),
            multi_grade: MultiGradeService::new(),
            related: RelatedWordService::new(config.related_candidate_limit),
            session: Mutex::new(StudySession::new(config.recent_window, config.history_size)),
            config,
        }
    }

    fn open(&self) -> Result<SqliteRepository, DbError> {
        match &self.storage {
            Storage::File(path) => {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                SqliteRepository::open(path)
            }
            Storage::Memory => SqliteRepository::open_in_memory(),
        }
    }

    /// Open the connection if needed and ensure the schema exists.
    pub fn initialize_storage(&self) -> Result<(), DbError> {
        let mut guard = self.repository.lock().expect("repository lock");
        match guard.as_ref() {
            Some(repo) => repo.initialize(),
            None => {
                *guard = Some(self.open()?);
                Ok(())
            }
        }
    }

    /// Release the connection. The next operation reopens it.
    pub fn close_storage(&self) -> Result<(), DbError> {
        let repo = self.repository.lock().expect("repository lock").take();
        match repo {
            Some(repo) => repo.close(),
            None => Ok(()),
        }
    }

    pub fn is_open(&self) -> bool {
        self.repository.lock().expect("repository lock").is_some()
    }

    /// Run `f` against the repository, opening it first when closed.
    pub fn with_repository<T, F>(&self, f: F) -> Result<T, DbError>
    where
        F: FnOnce(&SqliteRepository) -> Result<T, DbError>,
    {
        let mut guard = self.repository.lock().expect("repository lock");
        if guard.is_none() {
            *guard = Some(self.open()?);
        }
        match guard.as_ref() {
            Some(repo) => f(repo),
            None => Err(DbError::InvalidData("storage unavailable".into())),
        }
    }
}
