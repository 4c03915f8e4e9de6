//! Bulk seeding from the bundled dataset.

use crate::db::error::DbError;
use crate::db::repository::SqliteRepository;
use hanja_core::SeedDataset;
use rusqlite::params;
use rusqlite::OptionalExtension;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::HashSet;

type Result<T> = std::result::Result<T, DbError>;

const BUNDLED_DATASET: &str = include_str!("../../data/hanja_seed.json");

/// Parse the dataset compiled into the binary.
pub fn bundled_dataset() -> Result<SeedDataset> {
    Ok(SeedDataset::from_json(BUNDLED_DATASET)?)
}

/// Fingerprint of the bundled dataset, recorded at seed time.
pub fn bundled_dataset_hash() -> String {
    hash_content(BUNDLED_DATASET)
}

pub fn hash_content(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Row counts written by one seeding run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub characters: usize,
    pub words: usize,
    pub relations: usize,
    pub skipped_relations: usize,
}

impl SqliteRepository {
    /// Replace all characters, words and relations with `dataset`.
    ///
    /// Runs in a single transaction: a failure leaves the previous contents
    /// intact. Bookmarks are user state and survive a reseed.
    pub fn seed_from_dataset(&self, dataset: &SeedDataset) -> Result<SeedReport> {
        self.seed(dataset, None)
    }

    fn seed(&self, dataset: &SeedDataset, dataset_hash: Option<&str>) -> Result<SeedReport> {
        dataset.validate()?;

        let tx = self.conn().unchecked_transaction()?;
        tx.execute("DELETE FROM word_characters", [])?;
        tx.execute("DELETE FROM words", [])?;
        tx.execute("DELETE FROM characters", [])?;

        let mut report = SeedReport::default();
        let known: HashSet<&str> = dataset.characters.iter().map(|c| c.id.as_str()).collect();

        {
            let mut insert_character = tx.prepare(
                "INSERT INTO characters (id, character, pronunciation, meaning, strokeCount, radical, radicalName, radicalStrokes)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            )?;
            for seed in &dataset.characters {
                let character = seed.clone().into_character();
                insert_character.execute(params![
                    character.id,
                    character.character,
                    character.pronunciation,
                    character.meaning,
                    character.stroke_count,
                    character.radical,
                    character.radical_name,
                    character.radical_strokes,
                ])?;
                report.characters += 1;
            }

            let mut insert_word = tx.prepare(
                "INSERT INTO words (id, word, pronunciation, meaning, grade, isMemorized, leftSwipeWords, rightSwipeWords)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            )?;
            let mut insert_relation = tx.prepare(
                "INSERT OR IGNORE INTO word_characters (wordId, characterId, position) VALUES (?1, ?2, ?3)",
            )?;
            for word in &dataset.words {
                insert_word.execute(params![
                    word.id,
                    word.word,
                    word.pronunciation,
                    word.meaning,
                    word.grade.number(),
                    word.is_memorized as i64,
                    serde_json::to_string(&word.related_words.left_swipe)?,
                    serde_json::to_string(&word.related_words.right_swipe)?,
                ])?;
                report.words += 1;

                for (position, character_id) in word.characters.iter().enumerate() {
                    if !known.contains(character_id.as_str()) {
                        tracing::warn!(word_id = %word.id, %character_id, "skipping relation to unknown character");
                        report.skipped_relations += 1;
                        continue;
                    }
                    insert_relation.execute(params![word.id, character_id, position as i64])?;
                    report.relations += 1;
                }
            }
        }

        match dataset_hash {
            Some(hash) => tx.execute(
                "INSERT INTO dataset_meta (key, value) VALUES ('dataset_hash', ?1)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![hash],
            )?,
            None => tx.execute("DELETE FROM dataset_meta WHERE key = 'dataset_hash'", [])?,
        };

        tx.commit()?;
        tracing::info!(
            characters = report.characters,
            words = report.words,
            relations = report.relations,
            skipped = report.skipped_relations,
            "seeded hanja database"
        );
        Ok(report)
    }

    /// Seed from the dataset compiled into the binary.
    pub fn seed_bundled(&self) -> Result<SeedReport> {
        self.seed(&bundled_dataset()?, Some(&bundled_dataset_hash()))
    }

    pub fn stored_dataset_hash(&self) -> Result<Option<String>> {
        self.conn()
            .query_row(
                "SELECT value FROM dataset_meta WHERE key = 'dataset_hash'",
                [],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
    }

    /// True when the store is empty or was seeded from other content than
    /// the bundled dataset.
    pub fn needs_bundled_seed(&self) -> Result<bool> {
        if !self.is_seeded()? {
            return Ok(true);
        }
        Ok(self.stored_dataset_hash()?.as_deref() != Some(bundled_dataset_hash().as_str()))
    }

    /// Whether any word rows exist.
    pub fn is_seeded(&self) -> Result<bool> {
        let count: i64 = self
            .conn()
            .query_row("SELECT COUNT(*) FROM words", [], |row| row.get(0))?;
        Ok(count > 0)
    }

    /// Delete every row from every table, bookmarks included.
    pub fn reset_all(&self) -> Result<()> {
        let tx = self.conn().unchecked_transaction()?;
        tx.execute_batch(
            "DELETE FROM word_characters;
             DELETE FROM words;
             DELETE FROM characters;
             DELETE FROM bookmarks;
             DELETE FROM dataset_meta;",
        )?;
        tx.commit()?;
        tracing::info!("reset hanja database");
        Ok(())
    }
}
