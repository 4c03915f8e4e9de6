//! In-memory study session: the card stack a learner swipes through.
//!
//! The session owns no storage. Every operation that needs the database or
//! the services receives them explicitly.

use crate::db::{BookmarkRepository, DbError, WordRepository};
use crate::services::{MultiGradeService, RelatedWordQuery, RelatedWordService};
use hanja_core::{
    choose_one, CardHistory, CardHistoryItem, GoBack, Grade, RecentHistory, SwipeDirection,
    WordCard,
};
use rand::Rng;

type Result<T> = std::result::Result<T, DbError>;

/// What a swipe did to the stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwipeOutcome {
    /// A related card was spliced in front of the remaining stack.
    Chained(WordCard),
    /// No related card; moved to the next card, wrapping around.
    Advanced,
    /// The card was bookmarked and left the stack.
    Removed,
    /// Nothing to swipe.
    Empty,
}

#[derive(Debug, Clone)]
pub struct StudySession {
    grades: Vec<Grade>,
    stack: Vec<WordCard>,
    index: usize,
    recent: RecentHistory,
    history: CardHistory,
    studied: Vec<String>,
    saved: Vec<String>,
}

impl StudySession {
    pub fn new(recent_window: usize, history_size: usize) -> Self {
        Self {
            grades: Vec::new(),
            stack: Vec::new(),
            index: 0,
            recent: RecentHistory::new(recent_window),
            history: CardHistory::new(history_size),
            studied: Vec::new(),
            saved: Vec::new(),
        }
    }

    /// Draw a fresh stack from `grades` and rotate a random card to the front.
    pub fn start<R, G>(
        &mut self,
        repo: &R,
        multi_grade: &MultiGradeService,
        grades: &[Grade],
        stack_size: usize,
        rng: &mut G,
    ) -> Result<()>
    where
        R: WordRepository + BookmarkRepository + ?Sized,
        G: Rng + ?Sized,
    {
        self.grades = grades.to_vec();
        let mut cards =
            multi_grade.get_random_words_from_multiple_grades(repo, grades, stack_size, &[], rng)?;

        let first_id = choose_one(&cards, rng).map(|c| c.id.clone());
        if let Some(first_id) = first_id {
            if let Some(pos) = cards.iter().position(|c| c.id == first_id) {
                let first = cards.remove(pos);
                cards.insert(0, first);
            }
        } else {
            tracing::warn!(grades = ?grades, "no cards available for study session");
        }

        self.stack = cards;
        self.index = 0;
        Ok(())
    }

    pub fn current(&self) -> Option<&WordCard> {
        self.stack.get(self.index)
    }

    pub fn stack(&self) -> &[WordCard] {
        &self.stack
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn grades(&self) -> &[Grade] {
        &self.grades
    }

    pub fn studied_ids(&self) -> &[String] {
        &self.studied
    }

    pub fn saved_ids(&self) -> &[String] {
        &self.saved
    }

    pub fn recent(&self) -> &RecentHistory {
        &self.recent
    }

    pub fn can_go_back(&self) -> bool {
        self.history.can_go_back()
    }

    /// Swipe the current card away.
    ///
    /// Bookmarked cards leave the stack. Otherwise the swipe is recorded and
    /// a related card is chained in; lookup failures fall back to advancing.
    pub fn swipe<R, G>(
        &mut self,
        repo: &R,
        related: &RelatedWordService,
        direction: SwipeDirection,
        rng: &mut G,
    ) -> SwipeOutcome
    where
        R: WordRepository + BookmarkRepository + ?Sized,
        G: Rng + ?Sized,
    {
        let Some(current) = self.current().cloned() else {
            return SwipeOutcome::Empty;
        };

        match repo.is_bookmarked(&current.id) {
            Ok(true) => {
                tracing::debug!(word_id = %current.id, "bookmarked card swiped out of stack");
                self.remove_from_stack(&current.id);
                return SwipeOutcome::Removed;
            }
            Ok(false) => {}
            Err(e) => {
                tracing::warn!(word_id = %current.id, error = %e, "bookmark lookup failed");
                self.advance();
                return SwipeOutcome::Advanced;
            }
        }

        let recent_ids = self.recent.ids();
        let recent_words = self.recent.words();
        let query = RelatedWordQuery {
            grades: &self.grades,
            exclude_recent_ids: &recent_ids,
            recent_words: &recent_words,
        };
        let found = related.find_related_word(repo, &current, direction, &query, rng);

        match direction {
            SwipeDirection::Left => self.studied.push(current.id.clone()),
            SwipeDirection::Right => self.saved.push(current.id.clone()),
        }
        self.history.push(current.clone(), direction);

        match found {
            Some(next) => {
                self.recent.record(&current);
                let rest = self.stack.split_off((self.index + 1).min(self.stack.len()));
                self.stack = std::iter::once(next.clone()).chain(rest).collect();
                self.index = 0;
                SwipeOutcome::Chained(next)
            }
            None => {
                self.advance();
                SwipeOutcome::Advanced
            }
        }
    }

    fn advance(&mut self) {
        if !self.stack.is_empty() {
            self.index = (self.index + 1) % self.stack.len();
        }
    }

    /// Step back to the most recently swiped card.
    pub fn go_back(&mut self) -> Option<CardHistoryItem> {
        let outcome = self.history.go_back(&self.stack)?;
        match &outcome {
            GoBack::InStack { index, .. } => self.index = *index,
            GoBack::Reinsert { item } => {
                self.stack.insert(0, item.card.clone());
                self.index = 0;
            }
        }
        Some(outcome.item().clone())
    }

    /// Remove a card, keeping the current card in view when it survives.
    pub fn remove_from_stack(&mut self, word_id: &str) -> bool {
        let Some(pos) = self.stack.iter().position(|c| c.id == word_id) else {
            return false;
        };
        self.stack.remove(pos);

        if self.stack.is_empty() {
            self.index = 0;
        } else if pos < self.index {
            self.index -= 1;
        } else if self.index >= self.stack.len() {
            self.index = self.stack.len() - 1;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::SqliteRepository;
    use hanja_core::SeedDataset;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const DATASET: &str = r#"{
        "characters": [
            {"id": "c1", "character": "天", "pronunciation": "천", "meaning": "하늘",
             "stroke_count": 4, "radical": "大", "radical_name": "큰대", "radical_strokes": 3},
            {"id": "c2", "character": "地", "pronunciation": "지", "meaning": "땅",
             "stroke_count": 6, "radical": "土", "radical_name": "흙토", "radical_strokes": 3},
            {"id": "c3", "character": "國", "pronunciation": "국", "meaning": "나라",
             "stroke_count": 11, "radical": "囗", "radical_name": "큰입구몸", "radical_strokes": 3},
            {"id": "c4", "character": "山", "pronunciation": "산", "meaning": "메",
             "stroke_count": 3, "radical": "山", "radical_name": "메산", "radical_strokes": 3}
        ],
        "words": [
            {"id": "w1", "word": "天地", "pronunciation": "천지", "meaning": "하늘과 땅", "grade": 8, "characters": ["c1", "c2"]},
            {"id": "w2", "word": "天國", "pronunciation": "천국", "meaning": "하늘 나라", "grade": 8, "characters": ["c1", "c3"]},
            {"id": "w3", "word": "山", "pronunciation": "산", "meaning": "메", "grade": 8, "characters": ["c4"]}
        ]
    }"#;

    fn seeded() -> SqliteRepository {
        let repo = SqliteRepository::open_in_memory().unwrap();
        repo.seed_from_dataset(&SeedDataset::from_json(DATASET).unwrap()).unwrap();
        repo
    }

    fn card(repo: &SqliteRepository, id: &str) -> WordCard {
        repo.get_word(id).unwrap().unwrap()
    }

    fn session_with(stack: Vec<WordCard>) -> StudySession {
        let mut session = StudySession::new(10, 10);
        session.grades = vec![Grade::Eight];
        session.stack = stack;
        session
    }

    #[test]
    fn start_builds_stack_without_bookmarks() {
        let repo = seeded();
        repo.toggle_bookmark("w3").unwrap();
        let mut session = StudySession::new(10, 10);
        let mut rng = StdRng::seed_from_u64(1);

        session
            .start(&repo, &MultiGradeService::new(), &[Grade::Eight], 50, &mut rng)
            .unwrap();
        assert_eq!(session.stack().len(), 2);
        assert!(session.stack().iter().all(|c| c.id != "w3"));
        assert_eq!(session.index(), 0);
    }

    #[test]
    fn swipe_chains_related_card() {
        let repo = seeded();
        let mut session = session_with(vec![card(&repo, "w1"), card(&repo, "w3")]);
        let mut rng = StdRng::seed_from_u64(2);

        let outcome = session.swipe(&repo, &RelatedWordService::default(), SwipeDirection::Left, &mut rng);
        match outcome {
            SwipeOutcome::Chained(next) => assert_eq!(next.id, "w2"),
            other => panic!("unexpected {:?}", other),
        }
        let ids: Vec<&str> = session.stack().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["w2", "w3"]);
        assert_eq!(session.studied_ids(), &["w1".to_string()]);
        assert!(session.recent().contains_id("w1"));
    }

    #[test]
    fn swipe_without_relation_advances_and_wraps() {
        let repo = seeded();
        let mut session = session_with(vec![card(&repo, "w1"), card(&repo, "w3")]);
        session.index = 1;
        let mut rng = StdRng::seed_from_u64(3);

        let outcome = session.swipe(&repo, &RelatedWordService::default(), SwipeDirection::Right, &mut rng);
        assert_eq!(outcome, SwipeOutcome::Advanced);
        assert_eq!(session.index(), 0);
        assert_eq!(session.saved_ids(), &["w3".to_string()]);
    }

    #[test]
    fn bookmarked_card_leaves_stack() {
        let repo = seeded();
        repo.toggle_bookmark("w1").unwrap();
        let mut session = session_with(vec![card(&repo, "w1"), card(&repo, "w3")]);
        let mut rng = StdRng::seed_from_u64(4);

        let outcome = session.swipe(&repo, &RelatedWordService::default(), SwipeDirection::Left, &mut rng);
        assert_eq!(outcome, SwipeOutcome::Removed);
        assert_eq!(session.current().unwrap().id, "w3");
        assert!(!session.can_go_back());
    }

    #[test]
    fn go_back_reinserts_chained_away_card() {
        let repo = seeded();
        let mut session = session_with(vec![card(&repo, "w1"), card(&repo, "w3")]);
        let mut rng = StdRng::seed_from_u64(5);

        session.swipe(&repo, &RelatedWordService::default(), SwipeDirection::Left, &mut rng);
        let item = session.go_back().unwrap();
        assert_eq!(item.card.id, "w1");
        assert_eq!(item.swipe_direction, SwipeDirection::Left);
        assert_eq!(session.current().unwrap().id, "w1");
        assert!(session.go_back().is_none());
    }

    #[test]
    fn remove_keeps_current_card() {
        let repo = seeded();
        let mut session = session_with(vec![card(&repo, "w1"), card(&repo, "w2"), card(&repo, "w3")]);
        session.index = 2;

        assert!(session.remove_from_stack("w1"));
        assert_eq!(session.current().unwrap().id, "w3");
        assert!(session.remove_from_stack("w3"));
        assert_eq!(session.current().unwrap().id, "w2");
        assert!(!session.remove_from_stack("missing"));
    }

    #[test]
    fn empty_session_swipe_is_noop() {
        let repo = seeded();
        let mut session = StudySession::new(10, 10);
        let mut rng = StdRng::seed_from_u64(6);
        assert_eq!(
            session.swipe(&repo, &RelatedWordService::default(), SwipeDirection::Left, &mut rng),
            SwipeOutcome::Empty
        );
    }
}
