//! Core Hanja word-card library shared by the storage engine and its callers.
//!
//! Provides:
//! - Shared types (Grade, Character, WordCard, SwipeDirection, statistics)
//! - Character order reconciliation against a word's literal string
//! - Unbiased Fisher-Yates sampling
//! - Recent-card exclusion window and swipe-undo history
//! - The bundled seed dataset model

pub mod dataset;
pub mod error;
pub mod history;
pub mod ordering;
pub mod sampling;
pub mod types;

pub use dataset::{normalize_meaning, SeedCharacter, SeedDataset, SeedWord};
pub use error::{CoreError, Result};
pub use history::{CardHistory, CardHistoryItem, GoBack, RecentHistory};
pub use ordering::reconcile_character_order;
pub use sampling::{choose_one, sample, shuffle};
pub use types::{
    Character, Grade, GradeStatistics, GradeStats, MultiGradeStatistics, RelatedWords,
    RelatedWordsStats, SwipeDirection, WordCard,
};
