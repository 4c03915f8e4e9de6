//! Local SQLite database operations.

pub mod error;
pub mod repository;
pub mod schema;
pub mod seed;

pub use error::DbError;
pub use repository::{
    BookmarkRepository, CharacterField, CharacterRepository, DatabaseStatus, OrphanWord,
    RelationRow, SharedCharacterQuery, SqliteRepository, StatsRepository, WordInspection,
    WordRepository,
};
pub use seed::{bundled_dataset, bundled_dataset_hash, hash_content, SeedReport};
