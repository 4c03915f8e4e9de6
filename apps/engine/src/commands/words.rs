//! Word and learner-state commands.

use crate::db::{BookmarkRepository, WordRepository};
use crate::state::AppState;
use hanja_core::{Grade, WordCard};

use super::{parse_grades, CommandError};

/// Cards of one grade, characters in literal order. Always read fresh so
/// learner flags reflect the latest mutations.
pub fn get_words_by_grade(grade: &str, state: &AppState) -> Result<Vec<WordCard>, CommandError> {
    let grade = Grade::parse(grade)?;
    state
        .with_repository(|repo| repo.get_words_by_grade(grade))
        .map_err(Into::into)
}

/// Deduplicated pool across several grades.
pub fn get_words_by_grades(grades: &[String], state: &AppState) -> Result<Vec<WordCard>, CommandError> {
    let grades = parse_grades(grades)?;
    state
        .with_repository(|repo| state.multi_grade.get_words_by_multiple_grades(repo, &grades))
        .map_err(Into::into)
}

/// Random sample of unbookmarked cards outside `exclude_ids`.
pub fn get_random_words_from_multiple_grades(
    grades: &[String],
    count: usize,
    exclude_ids: &[String],
    state: &AppState,
) -> Result<Vec<WordCard>, CommandError> {
    let grades = parse_grades(grades)?;
    let mut rng = rand::thread_rng();
    state
        .with_repository(|repo| {
            state
                .multi_grade
                .get_random_words_from_multiple_grades(repo, &grades, count, exclude_ids, &mut rng)
        })
        .map_err(Into::into)
}

/// Returns whether a word was updated.
pub fn set_word_memorized(word_id: &str, is_memorized: bool, state: &AppState) -> Result<bool, CommandError> {
    state
        .with_repository(|repo| repo.update_word_memorized(word_id, is_memorized))
        .map_err(Into::into)
}

/// Flip the bookmark and return the new state. A bookmarked card also
/// leaves the active study stack.
pub fn toggle_bookmark(word_id: &str, state: &AppState) -> Result<bool, CommandError> {
    let bookmarked = state.with_repository(|repo| repo.toggle_bookmark(word_id))?;
    if bookmarked {
        state
            .session
            .lock()
            .expect("session lock")
            .remove_from_stack(word_id);
    }
    Ok(bookmarked)
}

pub fn get_bookmarked_words(state: &AppState) -> Result<Vec<WordCard>, CommandError> {
    state
        .with_repository(|repo| repo.get_bookmarked_words())
        .map_err(Into::into)
}
