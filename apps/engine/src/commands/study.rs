//! Related-word and study session commands.

use crate::services::RelatedWordQuery;
use crate::session::SwipeOutcome;
use crate::state::AppState;
use hanja_core::{CardHistoryItem, SwipeDirection, WordCard};

use super::{parse_grades, CommandError};

#[derive(Debug, Default, serde::Deserialize)]
pub struct RelatedWordRequest {
    pub grades: Vec<String>,
    #[serde(default)]
    pub exclude_recent_ids: Vec<String>,
    #[serde(default)]
    pub recent_words: Vec<String>,
}

#[derive(Debug, serde::Serialize)]
pub struct SwipeResponse {
    /// `chained`, `advanced`, `removed` or `empty`.
    pub outcome: &'static str,
    pub current: Option<WordCard>,
    pub can_go_back: bool,
}

/// Resolve a related card for a swipe. Lookup failures yield `None`.
pub fn find_related_word(
    current: &WordCard,
    direction: &str,
    request: &RelatedWordRequest,
    state: &AppState,
) -> Result<Option<WordCard>, CommandError> {
    let direction = SwipeDirection::parse(direction)?;
    let grades = parse_grades(&request.grades)?;
    let query = RelatedWordQuery {
        grades: &grades,
        exclude_recent_ids: &request.exclude_recent_ids,
        recent_words: &request.recent_words,
    };
    let mut rng = rand::thread_rng();

    let found = state.with_repository(|repo| {
        Ok(state
            .related
            .find_related_word(repo, current, direction, &query, &mut rng))
    });
    match found {
        Ok(found) => Ok(found),
        Err(e) => {
            tracing::warn!(error = %e, "storage unavailable for related word lookup");
            Ok(None)
        }
    }
}

/// Build a new stack from `grades` (the configured default grade when
/// empty) and return the first card.
pub fn start_study_session(grades: &[String], state: &AppState) -> Result<Option<WordCard>, CommandError> {
    let mut grades = parse_grades(grades)?;
    if grades.is_empty() {
        grades.push(state.config.default_grade);
    }
    let mut rng = rand::thread_rng();

    state
        .with_repository(|repo| {
            let mut session = state.session.lock().expect("session lock");
            session.start(
                repo,
                &state.multi_grade,
                &grades,
                state.config.initial_stack_size,
                &mut rng,
            )?;
            Ok(session.current().cloned())
        })
        .map_err(Into::into)
}

pub fn swipe_card(direction: &str, state: &AppState) -> Result<SwipeResponse, CommandError> {
    let direction = SwipeDirection::parse(direction)?;
    let mut rng = rand::thread_rng();

    state
        .with_repository(|repo| {
            let mut session = state.session.lock().expect("session lock");
            let outcome = match session.swipe(repo, &state.related, direction, &mut rng) {
                SwipeOutcome::Chained(_) => "chained",
                SwipeOutcome::Advanced => "advanced",
                SwipeOutcome::Removed => "removed",
                SwipeOutcome::Empty => "empty",
            };
            Ok(SwipeResponse {
                outcome,
                current: session.current().cloned(),
                can_go_back: session.can_go_back(),
            })
        })
        .map_err(Into::into)
}

/// Undo the last swipe, returning the restored card and its direction.
pub fn go_back_card(state: &AppState) -> Option<CardHistoryItem> {
    state.session.lock().expect("session lock").go_back()
}

pub fn remove_from_stack(word_id: &str, state: &AppState) -> bool {
    state
        .session
        .lock()
        .expect("session lock")
        .remove_from_stack(word_id)
}
