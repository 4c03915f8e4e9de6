//! Command surface exposed to the embedding UI.
//!
//! Each command takes its arguments followed by the shared [`AppState`]
//! and returns a serialisable [`CommandError`] on failure. Grade and
//! direction arguments arrive as strings and are parsed here.
//!
//! [`AppState`]: crate::state::AppState

pub mod stats;
pub mod storage;
pub mod study;
pub mod words;

pub use stats::{get_grade_statistics, get_multi_grade_statistics, get_related_words_stats};
pub use storage::{
    clear_cache, close_storage, get_database_status, initialize_storage, inspect_word,
    reset_all_data, seed_from_static_dataset,
};
pub use study::{
    find_related_word, go_back_card, remove_from_stack, start_study_session, swipe_card,
    RelatedWordRequest, SwipeResponse,
};
pub use words::{
    get_bookmarked_words, get_random_words_from_multiple_grades, get_words_by_grade,
    get_words_by_grades, set_word_memorized, toggle_bookmark,
};

use hanja_core::Grade;

/// Error returned to the caller.
#[derive(Debug, serde::Serialize)]
pub struct CommandError {
    pub message: String,
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CommandError {}

impl From<crate::db::DbError> for CommandError {
    fn from(e: crate::db::DbError) -> Self {
        Self { message: e.to_string() }
    }
}

impl From<hanja_core::CoreError> for CommandError {
    fn from(e: hanja_core::CoreError) -> Self {
        Self { message: e.to_string() }
    }
}

/// Parse grade labels (`"8"` or `"8급"`) at the command boundary.
pub(crate) fn parse_grades(grades: &[String]) -> Result<Vec<Grade>, CommandError> {
    grades
        .iter()
        .map(|g| Grade::parse(g).map_err(Into::into))
        .collect()
}
