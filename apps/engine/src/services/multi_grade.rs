//! Word pools spanning several grades.
//!
//! The service owns two caches: single-grade loads keyed by [`Grade`] and
//! deduplicated multi-grade pools keyed by the sorted, comma-joined grade
//! set. Each cache lock is held across the whole check-then-populate
//! sequence so concurrent callers never populate the same key twice. Pool
//! locks are always taken before grade locks.

use crate::db::{BookmarkRepository, DbError, WordRepository};
use hanja_core::{choose_one, sample, Grade, MultiGradeStatistics, WordCard};
use rand::Rng;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Mutex;

type Result<T> = std::result::Result<T, DbError>;

/// Cache key for a grade set: tier numbers ascending, joined with `,`.
pub fn cache_key(grades: &[Grade]) -> String {
    let mut numbers: Vec<u8> = grades.iter().map(|g| g.number()).collect();
    numbers.sort_unstable();
    numbers
        .iter()
        .map(u8::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

#[derive(Default)]
pub struct MultiGradeService {
    pool_cache: Mutex<HashMap<String, Vec<WordCard>>>,
    grade_cache: Mutex<HashMap<Grade, Vec<WordCard>>>,
}

impl MultiGradeService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cards of one grade, loaded once per process until cleared. Empty
    /// loads are not cached, so a grade seeded later is picked up.
    pub fn load_grade<R>(&self, repo: &R, grade: Grade) -> Result<Vec<WordCard>>
    where
        R: WordRepository + ?Sized,
    {
        let mut cache = self.grade_cache.lock().expect("grade cache lock");
        if let Some(words) = cache.get(&grade) {
            tracing::debug!(%grade, count = words.len(), "grade cache hit");
            return Ok(words.clone());
        }

        let words = repo.get_words_by_grade(grade)?;
        if !words.is_empty() {
            cache.insert(grade, words.clone());
        }
        Ok(words)
    }

    pub fn cached_grade_count(&self) -> usize {
        self.grade_cache.lock().expect("grade cache lock").len()
    }

    /// Deduplicated union of every grade in `grades`, first occurrence wins.
    pub fn get_words_by_multiple_grades<R>(&self, repo: &R, grades: &[Grade]) -> Result<Vec<WordCard>>
    where
        R: WordRepository + ?Sized,
    {
        if grades.is_empty() {
            return Ok(Vec::new());
        }

        let key = cache_key(grades);
        let mut cache = self.pool_cache.lock().expect("pool cache lock");
        if let Some(pool) = cache.get(&key) {
            tracing::debug!(key = %key, count = pool.len(), "pool cache hit");
            return Ok(pool.clone());
        }

        let mut seen = HashSet::new();
        let mut pool = Vec::new();
        for &grade in grades {
            for word in self.load_grade(repo, grade)? {
                if seen.insert(word.id.clone()) {
                    pool.push(word);
                }
            }
        }

        if !pool.is_empty() {
            tracing::debug!(key = %key, count = pool.len(), "cached grade pool");
            cache.insert(key, pool.clone());
        }
        Ok(pool)
    }

    /// Pool minus bookmarked words and `exclude_ids`.
    fn available_words<R>(&self, repo: &R, grades: &[Grade], exclude_ids: &[String]) -> Result<Vec<WordCard>>
    where
        R: WordRepository + BookmarkRepository + ?Sized,
    {
        let pool = self.get_words_by_multiple_grades(repo, grades)?;
        let bookmarked: HashSet<String> = repo.get_bookmarked_word_ids()?.into_iter().collect();
        let excluded: HashSet<&str> = exclude_ids.iter().map(String::as_str).collect();

        let total = pool.len();
        let available: Vec<WordCard> = pool
            .into_iter()
            .filter(|w| !bookmarked.contains(&w.id) && !excluded.contains(w.id.as_str()))
            .collect();

        if !bookmarked.is_empty() {
            tracing::debug!(
                bookmarked = bookmarked.len(),
                available = available.len(),
                total,
                "excluded bookmarked words from pool"
            );
        }
        if available.is_empty() && total > 0 {
            tracing::warn!("every word in the selected grades is bookmarked or excluded");
        }
        Ok(available)
    }

    /// Up to `count` cards drawn uniformly without replacement.
    pub fn get_random_words_from_multiple_grades<R, G>(
        &self,
        repo: &R,
        grades: &[Grade],
        count: usize,
        exclude_ids: &[String],
        rng: &mut G,
    ) -> Result<Vec<WordCard>>
    where
        R: WordRepository + BookmarkRepository + ?Sized,
        G: Rng + ?Sized,
    {
        let available = self.available_words(repo, grades, exclude_ids)?;
        Ok(sample(available, count, rng))
    }

    /// One uniform pick from the pool minus `exclude_ids`. Unlike the
    /// stack-building draw, bookmarked words stay eligible.
    pub fn get_random_word_from_multiple_grades<R, G>(
        &self,
        repo: &R,
        grades: &[Grade],
        exclude_ids: &[String],
        rng: &mut G,
    ) -> Result<Option<WordCard>>
    where
        R: WordRepository + ?Sized,
        G: Rng + ?Sized,
    {
        let excluded: HashSet<&str> = exclude_ids.iter().map(String::as_str).collect();
        let available: Vec<WordCard> = self
            .get_words_by_multiple_grades(repo, grades)?
            .into_iter()
            .filter(|w| !excluded.contains(w.id.as_str()))
            .collect();
        Ok(choose_one(&available, rng).cloned())
    }

    /// Pool size and its per-grade breakdown. Requested grades with no
    /// words report zero.
    pub fn get_multi_grade_statistics<R>(&self, repo: &R, grades: &[Grade]) -> Result<MultiGradeStatistics>
    where
        R: WordRepository + ?Sized,
    {
        let pool = self.get_words_by_multiple_grades(repo, grades)?;
        let mut grade_breakdown: BTreeMap<Grade, usize> = grades.iter().map(|&g| (g, 0)).collect();
        for word in &pool {
            *grade_breakdown.entry(word.grade).or_default() += 1;
        }

        Ok(MultiGradeStatistics {
            total_words: pool.len(),
            grade_breakdown,
        })
    }

    /// Drop both caches.
    pub fn clear_cache(&self) {
        let mut pools = self.pool_cache.lock().expect("pool cache lock");
        let mut grades = self.grade_cache.lock().expect("grade cache lock");
        pools.clear();
        grades.clear();
        tracing::info!("cleared word caches");
    }

    pub fn cached_pool_count(&self) -> usize {
        self.pool_cache.lock().expect("pool cache lock").len()
    }
}
