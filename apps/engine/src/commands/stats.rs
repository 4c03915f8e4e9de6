//! Statistics commands.

use crate::db::StatsRepository;
use crate::state::AppState;
use hanja_core::{GradeStatistics, MultiGradeStatistics, RelatedWordsStats};

use super::{parse_grades, CommandError};

/// Total and memorized counts for every grade, zero-filled.
pub fn get_grade_statistics(state: &AppState) -> Result<GradeStatistics, CommandError> {
    state
        .with_repository(|repo| repo.get_grade_statistics())
        .map_err(Into::into)
}

pub fn get_multi_grade_statistics(
    grades: &[String],
    state: &AppState,
) -> Result<MultiGradeStatistics, CommandError> {
    let grades = parse_grades(grades)?;
    state
        .with_repository(|repo| state.multi_grade.get_multi_grade_statistics(repo, &grades))
        .map_err(Into::into)
}

/// Related-word candidate counts for a glyph.
pub fn get_related_words_stats(
    glyph: &str,
    grades: &[String],
    state: &AppState,
) -> Result<RelatedWordsStats, CommandError> {
    let grades = parse_grades(grades)?;
    state
        .with_repository(|repo| state.related.related_words_stats(repo, glyph, &grades))
        .map_err(Into::into)
}
