//! Related-word resolution for swipe chaining.
//!
//! Given the current card and a swipe direction, the boundary character
//! (first for left, last for right) anchors a tiered search:
//!
//! 1. words containing the same glyph,
//! 2. words containing a character with the same radical,
//! 3. nothing, and the caller advances the stack normally.
//!
//! Each tier samples a bounded candidate set in storage, filters it again
//! against the exclusion window, and picks one survivor uniformly.
//! Resolution never fails: storage errors degrade to "no related word".

use crate::db::{
    CharacterField, CharacterRepository, DbError, SharedCharacterQuery, WordRepository,
};
use hanja_core::{choose_one, Grade, RelatedWordsStats, SwipeDirection, WordCard};
use rand::Rng;
use std::collections::HashSet;

type Result<T> = std::result::Result<T, DbError>;

/// Candidates sampled per tier.
pub const DEFAULT_CANDIDATE_LIMIT: usize = 15;

/// Caller-supplied scope and exclusion window for one resolution.
#[derive(Debug, Clone, Copy)]
pub struct RelatedWordQuery<'a> {
    pub grades: &'a [Grade],
    pub exclude_recent_ids: &'a [String],
    pub recent_words: &'a [String],
}

pub struct RelatedWordService {
    candidate_limit: usize,
}

impl Default for RelatedWordService {
    fn default() -> Self {
        Self::new(DEFAULT_CANDIDATE_LIMIT)
    }
}

impl RelatedWordService {
    pub fn new(candidate_limit: usize) -> Self {
        Self { candidate_limit }
    }

    /// Resolve the next card to chain to, or `None`.
    pub fn find_related_word<R, G>(
        &self,
        repo: &R,
        current: &WordCard,
        direction: SwipeDirection,
        query: &RelatedWordQuery<'_>,
        rng: &mut G,
    ) -> Option<WordCard>
    where
        R: WordRepository + ?Sized,
        G: Rng + ?Sized,
    {
        match self.try_find_related_word(repo, current, direction, query, rng) {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!(word_id = %current.id, error = %e, "related word lookup failed");
                None
            }
        }
    }

    fn try_find_related_word<R, G>(
        &self,
        repo: &R,
        current: &WordCard,
        direction: SwipeDirection,
        query: &RelatedWordQuery<'_>,
        rng: &mut G,
    ) -> Result<Option<WordCard>>
    where
        R: WordRepository + ?Sized,
        G: Rng + ?Sized,
    {
        let Some(anchor) = current.boundary_character(direction) else {
            tracing::debug!(word_id = %current.id, "no boundary character");
            return Ok(None);
        };
        if query.grades.is_empty() {
            return Ok(None);
        }

        let tiers = [
            (CharacterField::Glyph, anchor.character.as_str()),
            (CharacterField::Radical, anchor.radical.as_str()),
        ];
        for (field, value) in tiers {
            if value.is_empty() {
                continue;
            }
            let candidates = self.search_tier(repo, field, value, current, query)?;
            if let Some(found) = choose_one(&candidates, rng) {
                tracing::debug!(
                    from = %current.word,
                    to = %found.word,
                    tier = ?field,
                    direction = direction.as_str(),
                    "resolved related word"
                );
                return Ok(Some(found.clone()));
            }
        }

        Ok(None)
    }

    /// Storage-side sample for one tier, re-filtered against the window.
    ///
    /// Every exclusion is applied inside the sample so excluded rows never
    /// crowd out valid candidates.
    fn search_tier<R>(
        &self,
        repo: &R,
        field: CharacterField,
        value: &str,
        current: &WordCard,
        query: &RelatedWordQuery<'_>,
    ) -> Result<Vec<WordCard>>
    where
        R: WordRepository + ?Sized,
    {
        let candidates = repo.find_words_sharing(&SharedCharacterQuery {
            field,
            value,
            grades: query.grades,
            exclude_word_id: &current.id,
            exclude_word: &current.word,
            exclude_ids: query.exclude_recent_ids,
            exclude_words: query.recent_words,
            limit: self.candidate_limit,
        })?;

        let excluded_ids: HashSet<&str> = query.exclude_recent_ids.iter().map(String::as_str).collect();
        let excluded_words: HashSet<&str> = query.recent_words.iter().map(String::as_str).collect();

        Ok(candidates
            .into_iter()
            .filter(|w| {
                w.id != current.id
                    && w.word != current.word
                    && !excluded_ids.contains(w.id.as_str())
                    && !excluded_words.contains(w.word.as_str())
            })
            .collect())
    }

    /// Candidate counts for `glyph` within `grades`.
    pub fn related_words_stats<R>(&self, repo: &R, glyph: &str, grades: &[Grade]) -> Result<RelatedWordsStats>
    where
        R: WordRepository + CharacterRepository + ?Sized,
    {
        let same_character_count = repo.count_words_sharing(CharacterField::Glyph, glyph, grades)?;
        let same_radical_count = match repo.radical_of(glyph)? {
            Some(radical) => repo.count_words_sharing(CharacterField::Radical, &radical, grades)?,
            None => 0,
        };

        Ok(RelatedWordsStats {
            same_character_count,
            same_radical_count,
            total_available: repo.count_words_in_grades(grades)?,
        })
    }
}
