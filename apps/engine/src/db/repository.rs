//! Repository pattern for database access.
//!
//! Word cards are assembled from one normalized join: each result row is a
//! (word, character) pair ordered by word then `position`, and consecutive
//! rows for the same word are folded into a single card. Character order is
//! then reconciled against the literal word.

use crate::db::error::DbError;
use chrono::Utc;
use hanja_core::types::{Character, Grade, GradeStatistics, GradeStats, RelatedWords, WordCard};
use hanja_core::reconcile_character_order;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Params};
use std::path::Path;

type Result<T> = std::result::Result<T, DbError>;

/// Repository for word card queries and the memorized flag.
pub trait WordRepository {
    fn get_word(&self, id: &str) -> Result<Option<WordCard>>;
    fn get_words_by_grade(&self, grade: Grade) -> Result<Vec<WordCard>>;
    fn get_words_by_memorized(&self, is_memorized: bool) -> Result<Vec<WordCard>>;
    fn get_words_by_character(&self, glyph: &str) -> Result<Vec<WordCard>>;
    fn find_words_sharing(&self, query: &SharedCharacterQuery<'_>) -> Result<Vec<WordCard>>;
    fn count_words_sharing(&self, field: CharacterField, value: &str, grades: &[Grade]) -> Result<usize>;
    fn count_words_in_grades(&self, grades: &[Grade]) -> Result<usize>;
    fn update_word_memorized(&self, word_id: &str, is_memorized: bool) -> Result<bool>;
}

/// Repository for character lookups.
pub trait CharacterRepository {
    fn get_character(&self, id: &str) -> Result<Option<Character>>;
    fn get_characters_by_glyph(&self, glyph: &str) -> Result<Vec<Character>>;
    fn radical_of(&self, glyph: &str) -> Result<Option<String>>;
}

/// Repository for per-word bookmark state.
pub trait BookmarkRepository {
    fn toggle_bookmark(&self, word_id: &str) -> Result<bool>;
    fn is_bookmarked(&self, word_id: &str) -> Result<bool>;
    fn get_bookmarked_word_ids(&self) -> Result<Vec<String>>;
    fn get_bookmarked_words(&self) -> Result<Vec<WordCard>>;
    fn clear_bookmarks(&self) -> Result<usize>;
}

/// Repository for statistics and integrity diagnostics.
pub trait StatsRepository {
    fn get_grade_statistics(&self) -> Result<GradeStatistics>;
    fn get_database_status(&self) -> Result<DatabaseStatus>;
    fn words_without_relations(&self, limit: usize) -> Result<Vec<OrphanWord>>;
    fn inspect_word(&self, word_id: &str) -> Result<Option<WordInspection>>;
}

/// Character column a related-word search matches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterField {
    Glyph,
    Radical,
}

impl CharacterField {
    fn column(self) -> &'static str {
        match self {
            Self::Glyph => "character",
            Self::Radical => "radical",
        }
    }
}

/// Words in `grades` containing a character whose `field` equals `value`.
#[derive(Debug, Clone)]
pub struct SharedCharacterQuery<'a> {
    pub field: CharacterField,
    pub value: &'a str,
    pub grades: &'a [Grade],
    pub exclude_word_id: &'a str,
    /// Literal of the current word; homographs never count as related.
    pub exclude_word: &'a str,
    pub exclude_ids: &'a [String],
    pub exclude_words: &'a [String],
    /// Storage-side random sample bound.
    pub limit: usize,
}

/// Row counts per table plus per-grade totals.
#[derive(Debug, Clone, serde::Serialize)]
pub struct DatabaseStatus {
    pub characters: usize,
    pub words: usize,
    pub relations: usize,
    pub bookmarks: usize,
    pub grades: GradeStatistics,
}

/// Word with no relation rows at all.
#[derive(Debug, Clone, serde::Serialize)]
pub struct OrphanWord {
    pub id: String,
    pub word: String,
    pub grade: i64,
}

/// One relation row and whether its character resolves.
#[derive(Debug, Clone, serde::Serialize)]
pub struct RelationRow {
    pub character_id: String,
    pub position: i64,
    pub resolved: bool,
}

/// A word's assembled card next to its raw relation rows.
#[derive(Debug, Clone, serde::Serialize)]
pub struct WordInspection {
    pub card: WordCard,
    pub relations: Vec<RelationRow>,
}

const WORD_ORDER: &str = "w.createdAt, w.rowid";

const CARD_SELECT: &str = "SELECT w.id, w.word, w.pronunciation, w.meaning, w.grade, w.isMemorized,
        w.leftSwipeWords, w.rightSwipeWords, COALESCE(b.isBookmarked, 0),
        wc.characterId, c.id, c.character, c.pronunciation, c.meaning, c.strokeCount,
        c.radical, c.radicalName, c.radicalStrokes
    FROM words w
    LEFT JOIN bookmarks b ON b.wordId = w.id
    LEFT JOIN word_characters wc ON wc.wordId = w.id
    LEFT JOIN characters c ON c.id = wc.characterId";

/// SQLite implementation of repositories.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Open database at path, creating if necessary.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path.as_ref())?;
        let repo = Self { conn };
        repo.initialize()?;
        tracing::info!(path = %path.as_ref().display(), "opened hanja database");
        Ok(repo)
    }

    /// Open in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let repo = Self { conn };
        repo.initialize()?;
        Ok(repo)
    }

    /// Create tables and indexes. Safe to call repeatedly.
    pub fn initialize(&self) -> Result<()> {
        self.conn.execute_batch(super::schema::SCHEMA)?;
        self.conn.execute_batch(super::schema::INIT_SCHEMA_VERSION)?;
        Ok(())
    }

    /// Release the connection.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| DbError::Sqlite(e))?;
        tracing::info!("closed hanja database");
        Ok(())
    }

    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Load cards matching `filter`, in `order`, with reconciled characters.
    fn load_cards<P: Params>(&self, filter: &str, order: &str, params: P) -> Result<Vec<WordCard>> {
        let sql = format!(
            "{} WHERE {} ORDER BY {}, w.id, wc.position",
            CARD_SELECT, filter, order
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params, Self::row_to_card_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(assemble_cards(rows))
    }

    fn row_to_card_row(row: &rusqlite::Row) -> rusqlite::Result<CardRow> {
        let relation_character_id: Option<String> = row.get(9)?;
        let character_id: Option<String> = row.get(10)?;
        let character = match character_id {
            Some(id) => Some(Character {
                id,
                character: row.get::<_, Option<String>>(11)?.unwrap_or_default(),
                pronunciation: row.get::<_, Option<String>>(12)?.unwrap_or_default(),
                meaning: row.get::<_, Option<String>>(13)?.unwrap_or_default(),
                stroke_count: row.get::<_, Option<u32>>(14)?.unwrap_or(0),
                radical: row.get::<_, Option<String>>(15)?.unwrap_or_default(),
                radical_name: row.get::<_, Option<String>>(16)?.unwrap_or_default(),
                radical_strokes: row.get::<_, Option<u32>>(17)?.unwrap_or(0),
            }),
            None => None,
        };

        Ok(CardRow {
            id: row.get(0)?,
            word: row.get(1)?,
            pronunciation: row.get(2)?,
            meaning: row.get(3)?,
            grade: row.get(4)?,
            is_memorized: row.get::<_, i64>(5)? != 0,
            left_swipe: row.get(6)?,
            right_swipe: row.get(7)?,
            is_bookmarked: row.get::<_, i64>(8)? != 0,
            relation_character_id,
            character,
        })
    }

    fn row_to_character(row: &rusqlite::Row) -> rusqlite::Result<Character> {
        Ok(Character {
            id: row.get(0)?,
            character: row.get(1)?,
            pronunciation: row.get(2)?,
            meaning: row.get(3)?,
            stroke_count: row.get(4)?,
            radical: row.get(5)?,
            radical_name: row.get(6)?,
            radical_strokes: row.get(7)?,
        })
    }

    fn count(&self, sql: &str) -> Result<usize> {
        self.conn
            .query_row(sql, [], |row| row.get::<_, i64>(0))
            .map(|n| n as usize)
            .map_err(Into::into)
    }
}

/// One (word, character) row of the card join.
struct CardRow {
    id: String,
    word: String,
    pronunciation: String,
    meaning: String,
    grade: i64,
    is_memorized: bool,
    left_swipe: Option<String>,
    right_swipe: Option<String>,
    is_bookmarked: bool,
    relation_character_id: Option<String>,
    character: Option<Character>,
}

/// Fold consecutive join rows into cards.
///
/// Relations whose character row is missing or empty are dropped, and words
/// with an out-of-range grade are skipped; both are logged.
fn assemble_cards(rows: Vec<CardRow>) -> Vec<WordCard> {
    let mut cards: Vec<WordCard> = Vec::new();
    let mut skipped_word: Option<String> = None;

    for row in rows {
        if skipped_word.as_deref() == Some(row.id.as_str()) {
            continue;
        }

        let continues_last = cards.last().map(|c| c.id == row.id).unwrap_or(false);
        if !continues_last {
            let Some(grade) = u8::try_from(row.grade).ok().and_then(Grade::from_number) else {
                tracing::warn!(word_id = %row.id, grade = row.grade, "skipping word with invalid grade");
                skipped_word = Some(row.id);
                continue;
            };
            cards.push(WordCard {
                related_words: RelatedWords {
                    left_swipe: parse_id_list(&row.id, row.left_swipe.as_deref()),
                    right_swipe: parse_id_list(&row.id, row.right_swipe.as_deref()),
                },
                id: row.id.clone(),
                word: row.word,
                pronunciation: row.pronunciation,
                meaning: row.meaning,
                grade,
                is_memorized: row.is_memorized,
                is_bookmarked: row.is_bookmarked,
                characters: Vec::new(),
            });
        }

        match (row.relation_character_id, row.character) {
            (None, _) => {
                tracing::warn!(word_id = %row.id, "word has no character relations");
            }
            (Some(character_id), None) => {
                tracing::warn!(word_id = %row.id, %character_id, "relation points at missing character");
            }
            (Some(_), Some(character)) if character.character.is_empty() => {
                tracing::warn!(word_id = %row.id, character_id = %character.id, "dropping character with empty glyph");
            }
            (Some(_), Some(character)) => {
                if let Some(card) = cards.last_mut() {
                    card.characters.push(character);
                }
            }
        }
    }

    for card in &mut cards {
        let characters = std::mem::take(&mut card.characters);
        card.characters = reconcile_character_order(&card.word, characters);
    }
    cards
}

/// Parse a stored JSON id list, treating malformed content as empty.
fn parse_id_list(word_id: &str, raw: Option<&str>) -> Vec<String> {
    match raw {
        None => Vec::new(),
        Some(s) if s.trim().is_empty() => Vec::new(),
        Some(s) => serde_json::from_str(s).unwrap_or_else(|e| {
            tracing::warn!(%word_id, error = %e, "malformed related word list");
            Vec::new()
        }),
    }
}

fn placeholders(count: usize) -> String {
    vec!["?"; count].join(",")
}

fn grade_values(grades: &[Grade]) -> impl Iterator<Item = Value> + '_ {
    grades.iter().map(|g| Value::Integer(i64::from(g.number())))
}

impl WordRepository for SqliteRepository {
    fn get_word(&self, id: &str) -> Result<Option<WordCard>> {
        let mut cards = self.load_cards("w.id = ?1", WORD_ORDER, params![id])?;
        Ok(cards.pop())
    }

    fn get_words_by_grade(&self, grade: Grade) -> Result<Vec<WordCard>> {
        self.load_cards("w.grade = ?1", WORD_ORDER, params![grade.number()])
    }

    fn get_words_by_memorized(&self, is_memorized: bool) -> Result<Vec<WordCard>> {
        self.load_cards("w.isMemorized = ?1", WORD_ORDER, params![is_memorized as i64])
    }

    fn get_words_by_character(&self, glyph: &str) -> Result<Vec<WordCard>> {
        self.load_cards(
            "w.id IN (
                SELECT wc2.wordId FROM word_characters wc2
                JOIN characters c2 ON c2.id = wc2.characterId
                WHERE c2.character = ?1
            )",
            WORD_ORDER,
            params![glyph],
        )
    }

    fn find_words_sharing(&self, query: &SharedCharacterQuery<'_>) -> Result<Vec<WordCard>> {
        if query.grades.is_empty() || query.limit == 0 {
            return Ok(Vec::new());
        }

        let mut exclude_clause = String::new();
        if !query.exclude_ids.is_empty() {
            exclude_clause.push_str(&format!(
                "AND w2.id NOT IN ({}) ",
                placeholders(query.exclude_ids.len())
            ));
        }
        if !query.exclude_words.is_empty() {
            exclude_clause.push_str(&format!(
                "AND w2.word NOT IN ({})",
                placeholders(query.exclude_words.len())
            ));
        }
        let filter = format!(
            "w.id IN (
                SELECT w2.id FROM words w2
                JOIN word_characters wc2 ON wc2.wordId = w2.id
                JOIN characters c2 ON c2.id = wc2.characterId
                WHERE c2.{} = ?
                AND w2.grade IN ({})
                AND w2.id != ?
                AND w2.word != ?
                {}
                GROUP BY w2.id
                ORDER BY RANDOM()
                LIMIT ?
            )",
            query.field.column(),
            placeholders(query.grades.len()),
            exclude_clause,
        );

        let mut values = vec![Value::Text(query.value.to_string())];
        values.extend(grade_values(query.grades));
        values.push(Value::Text(query.exclude_word_id.to_string()));
        values.push(Value::Text(query.exclude_word.to_string()));
        values.extend(query.exclude_ids.iter().cloned().map(Value::Text));
        values.extend(query.exclude_words.iter().cloned().map(Value::Text));
        values.push(Value::Integer(query.limit as i64));

        self.load_cards(&filter, WORD_ORDER, params_from_iter(values))
    }

    fn count_words_sharing(&self, field: CharacterField, value: &str, grades: &[Grade]) -> Result<usize> {
        if grades.is_empty() {
            return Ok(0);
        }
        let sql = format!(
            "SELECT COUNT(DISTINCT w.id) FROM words w
             JOIN word_characters wc ON wc.wordId = w.id
             JOIN characters c ON c.id = wc.characterId
             WHERE c.{} = ? AND w.grade IN ({})",
            field.column(),
            placeholders(grades.len())
        );
        let mut values = vec![Value::Text(value.to_string())];
        values.extend(grade_values(grades));
        self.conn
            .query_row(&sql, params_from_iter(values), |row| row.get::<_, i64>(0))
            .map(|n| n as usize)
            .map_err(Into::into)
    }

    fn count_words_in_grades(&self, grades: &[Grade]) -> Result<usize> {
        if grades.is_empty() {
            return Ok(0);
        }
        let sql = format!(
            "SELECT COUNT(*) FROM words WHERE grade IN ({})",
            placeholders(grades.len())
        );
        self.conn
            .query_row(&sql, params_from_iter(grade_values(grades)), |row| {
                row.get::<_, i64>(0)
            })
            .map(|n| n as usize)
            .map_err(Into::into)
    }

    fn update_word_memorized(&self, word_id: &str, is_memorized: bool) -> Result<bool> {
        let changed = self.conn.execute(
            "UPDATE words SET isMemorized = ?1 WHERE id = ?2",
            params![is_memorized as i64, word_id],
        )?;
        if changed == 0 {
            tracing::warn!(%word_id, "memorized update matched no word");
        }
        Ok(changed > 0)
    }
}

impl CharacterRepository for SqliteRepository {
    fn get_character(&self, id: &str) -> Result<Option<Character>> {
        self.conn
            .query_row(
                "SELECT id, character, pronunciation, meaning, strokeCount, radical, radicalName, radicalStrokes
                 FROM characters WHERE id = ?1",
                params![id],
                Self::row_to_character,
            )
            .optional()
            .map_err(Into::into)
    }

    fn get_characters_by_glyph(&self, glyph: &str) -> Result<Vec<Character>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, character, pronunciation, meaning, strokeCount, radical, radicalName, radicalStrokes
             FROM characters WHERE character = ?1 ORDER BY rowid",
        )?;
        let characters = stmt
            .query_map(params![glyph], Self::row_to_character)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(characters)
    }

    fn radical_of(&self, glyph: &str) -> Result<Option<String>> {
        self.conn
            .query_row(
                "SELECT radical FROM characters WHERE character = ?1 ORDER BY rowid LIMIT 1",
                params![glyph],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
    }
}

impl BookmarkRepository for SqliteRepository {
    fn toggle_bookmark(&self, word_id: &str) -> Result<bool> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO bookmarks (wordId, isBookmarked, updatedAt) VALUES (?1, 1, ?2)
             ON CONFLICT(wordId) DO UPDATE SET
                isBookmarked = 1 - bookmarks.isBookmarked,
                updatedAt = excluded.updatedAt",
            params![word_id, now],
        )?;
        let state = self.is_bookmarked(word_id)?;
        tracing::debug!(%word_id, bookmarked = state, "toggled bookmark");
        Ok(state)
    }

    fn is_bookmarked(&self, word_id: &str) -> Result<bool> {
        let flag: Option<i64> = self
            .conn
            .query_row(
                "SELECT isBookmarked FROM bookmarks WHERE wordId = ?1",
                params![word_id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(flag.unwrap_or(0) != 0)
    }

    fn get_bookmarked_word_ids(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT wordId FROM bookmarks WHERE isBookmarked = 1 ORDER BY updatedAt DESC, rowid DESC")?;
        let ids = stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(ids)
    }

    fn get_bookmarked_words(&self) -> Result<Vec<WordCard>> {
        self.load_cards(
            "b.isBookmarked = 1",
            "b.updatedAt DESC, w.rowid",
            [],
        )
    }

    fn clear_bookmarks(&self) -> Result<usize> {
        Ok(self.conn.execute("DELETE FROM bookmarks", [])?)
    }
}

impl StatsRepository for SqliteRepository {
    fn get_grade_statistics(&self) -> Result<GradeStatistics> {
        let mut stmt = self.conn.prepare(
            "SELECT grade, COUNT(*) AS total,
                SUM(CASE WHEN isMemorized = 1 THEN 1 ELSE 0 END) AS memorized
             FROM words
             GROUP BY grade",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, i64>(1)? as usize,
                    row.get::<_, i64>(2)? as usize,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut stats = GradeStatistics::default();
        for (grade, total, memorized) in rows {
            match u8::try_from(grade).ok().and_then(Grade::from_number) {
                Some(grade) => stats.set(grade, GradeStats { total, memorized }),
                None => tracing::warn!(grade, "ignoring statistics for invalid grade"),
            }
        }
        Ok(stats)
    }

    fn get_database_status(&self) -> Result<DatabaseStatus> {
        Ok(DatabaseStatus {
            characters: self.count("SELECT COUNT(*) FROM characters")?,
            words: self.count("SELECT COUNT(*) FROM words")?,
            relations: self.count("SELECT COUNT(*) FROM word_characters")?,
            bookmarks: self.count("SELECT COUNT(*) FROM bookmarks WHERE isBookmarked = 1")?,
            grades: self.get_grade_statistics()?,
        })
    }

    fn words_without_relations(&self, limit: usize) -> Result<Vec<OrphanWord>> {
        let mut stmt = self.conn.prepare(
            "SELECT w.id, w.word, w.grade FROM words w
             LEFT JOIN word_characters wc ON wc.wordId = w.id
             WHERE wc.wordId IS NULL
             ORDER BY w.rowid
             LIMIT ?1",
        )?;
        let words = stmt
            .query_map(params![limit as i64], |row| {
                Ok(OrphanWord {
                    id: row.get(0)?,
                    word: row.get(1)?,
                    grade: row.get(2)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(words)
    }

    fn inspect_word(&self, word_id: &str) -> Result<Option<WordInspection>> {
        let Some(card) = self.get_word(word_id)? else {
            return Ok(None);
        };

        let mut stmt = self.conn.prepare(
            "SELECT wc.characterId, wc.position, c.id IS NOT NULL
             FROM word_characters wc
             LEFT JOIN characters c ON c.id = wc.characterId
             WHERE wc.wordId = ?1
             ORDER BY wc.position",
        )?;
        let relations = stmt
            .query_map(params![word_id], |row| {
                Ok(RelationRow {
                    character_id: row.get(0)?,
                    position: row.get(1)?,
                    resolved: row.get(2)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Some(WordInspection { card, relations }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn insert_character(repo: &SqliteRepository, id: &str, glyph: &str, radical: &str) {
        repo.conn()
            .execute(
                "INSERT INTO characters (id, character, pronunciation, meaning, strokeCount, radical, radicalName, radicalStrokes)
                 VALUES (?1, ?2, '음', '뜻', 4, ?3, '부수', 3)",
                params![id, glyph, radical],
            )
            .unwrap();
    }

    fn insert_word(repo: &SqliteRepository, id: &str, word: &str, grade: i64) {
        repo.conn()
            .execute(
                "INSERT INTO words (id, word, pronunciation, meaning, grade, leftSwipeWords, rightSwipeWords)
                 VALUES (?1, ?2, '발음', '의미', ?3, '[]', '[\"w9\"]')",
                params![id, word, grade],
            )
            .unwrap();
    }

    fn relate(repo: &SqliteRepository, word_id: &str, character_id: &str, position: i64) {
        repo.conn()
            .execute(
                "INSERT INTO word_characters (wordId, characterId, position) VALUES (?1, ?2, ?3)",
                params![word_id, character_id, position],
            )
            .unwrap();
    }

    fn glyphs(card: &WordCard) -> String {
        card.character_glyphs()
    }

    #[test]
    fn initialize_is_idempotent() {
        let repo = SqliteRepository::open_in_memory().unwrap();
        repo.initialize().unwrap();
        repo.initialize().unwrap();
        assert_eq!(repo.count("SELECT COUNT(*) FROM schema_version").unwrap(), 1);
    }

    #[test]
    fn assembles_card_in_literal_order() {
        let repo = SqliteRepository::open_in_memory().unwrap();
        insert_character(&repo, "c1", "天", "大");
        insert_character(&repo, "c2", "地", "土");
        insert_word(&repo, "w1", "天地", 8);
        // Relation rows inserted in reverse and with swapped positions.
        relate(&repo, "w1", "c2", 0);
        relate(&repo, "w1", "c1", 1);

        let cards = repo.get_words_by_grade(Grade::Eight).unwrap();
        assert_eq!(cards.len(), 1);
        let ids: Vec<&str> = cards[0].characters.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c1", "c2"]);
        assert_eq!(cards[0].related_words.right_swipe, vec!["w9".to_string()]);
    }

    #[test]
    fn tolerates_missing_relations_and_characters() {
        let repo = SqliteRepository::open_in_memory().unwrap();
        insert_character(&repo, "c1", "天", "大");
        insert_word(&repo, "w1", "天地", 8);
        insert_word(&repo, "w2", "山水", 8);
        relate(&repo, "w1", "c1", 0);
        relate(&repo, "w1", "missing", 1);

        let cards = repo.get_words_by_grade(Grade::Eight).unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(glyphs(&cards[0]), "天");
        assert!(cards[1].characters.is_empty());

        let orphans = repo.words_without_relations(10).unwrap();
        assert_eq!(orphans.len(), 1);
        assert_eq!(orphans[0].id, "w2");
    }

    #[test]
    fn skips_words_with_invalid_grade() {
        let repo = SqliteRepository::open_in_memory().unwrap();
        insert_word(&repo, "bad", "天", 0);
        assert!(repo.get_words_by_memorized(false).unwrap().is_empty());
    }

    #[test]
    fn malformed_related_list_is_empty() {
        let repo = SqliteRepository::open_in_memory().unwrap();
        repo.conn()
            .execute(
                "INSERT INTO words (id, word, pronunciation, meaning, grade, leftSwipeWords)
                 VALUES ('w1', '山', '산', '메', 8, 'not json')",
                [],
            )
            .unwrap();
        let card = repo.get_word("w1").unwrap().unwrap();
        assert!(card.related_words.left_swipe.is_empty());
        assert!(card.related_words.right_swipe.is_empty());
    }

    #[test]
    fn update_memorized_reports_affected_rows() {
        let repo = SqliteRepository::open_in_memory().unwrap();
        insert_word(&repo, "w1", "山", 7);
        assert!(repo.update_word_memorized("w1", true).unwrap());
        assert!(!repo.update_word_memorized("nope", true).unwrap());
        assert!(repo.get_word("w1").unwrap().unwrap().is_memorized);
        assert_eq!(repo.get_words_by_memorized(true).unwrap().len(), 1);
    }

    #[test]
    fn grade_statistics_cover_every_grade() {
        let repo = SqliteRepository::open_in_memory().unwrap();
        insert_word(&repo, "w1", "山", 8);
        insert_word(&repo, "w2", "水", 8);
        repo.update_word_memorized("w2", true).unwrap();

        let stats = repo.get_grade_statistics().unwrap();
        assert_eq!(stats.len(), 8);
        assert_eq!(stats.get(Grade::Eight), GradeStats { total: 2, memorized: 1 });
        assert_eq!(stats.get(Grade::Three), GradeStats { total: 0, memorized: 0 });
    }

    #[test]
    fn bookmark_toggles_and_lists() {
        let repo = SqliteRepository::open_in_memory().unwrap();
        insert_word(&repo, "w1", "山", 8);

        assert!(!repo.is_bookmarked("w1").unwrap());
        assert!(repo.toggle_bookmark("w1").unwrap());
        assert!(repo.is_bookmarked("w1").unwrap());
        assert_eq!(repo.get_bookmarked_word_ids().unwrap(), vec!["w1".to_string()]);

        let words = repo.get_bookmarked_words().unwrap();
        assert_eq!(words.len(), 1);
        assert!(words[0].is_bookmarked);

        assert!(!repo.toggle_bookmark("w1").unwrap());
        assert!(repo.get_bookmarked_word_ids().unwrap().is_empty());
    }

    #[test]
    fn finds_words_sharing_glyph_with_exclusions() {
        let repo = SqliteRepository::open_in_memory().unwrap();
        insert_character(&repo, "c1", "天", "大");
        insert_character(&repo, "c2", "地", "土");
        insert_character(&repo, "c3", "國", "囗");
        insert_word(&repo, "w1", "天地", 8);
        insert_word(&repo, "w2", "天國", 8);
        insert_word(&repo, "w3", "天", 5);
        relate(&repo, "w1", "c1", 0);
        relate(&repo, "w1", "c2", 1);
        relate(&repo, "w2", "c1", 0);
        relate(&repo, "w2", "c3", 1);
        relate(&repo, "w3", "c1", 0);

        let grades = [Grade::Eight];
        let query = SharedCharacterQuery {
            field: CharacterField::Glyph,
            value: "天",
            grades: &grades,
            exclude_word_id: "w1",
            exclude_word: "天地",
            exclude_ids: &[],
            exclude_words: &[],
            limit: 15,
        };
        let found = repo.find_words_sharing(&query).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "w2");
        assert_eq!(glyphs(&found[0]), "天國");

        let recent = vec!["天國".to_string()];
        let query_without_recent = SharedCharacterQuery {
            exclude_words: &recent,
            ..query.clone()
        };
        assert!(repo.find_words_sharing(&query_without_recent).unwrap().is_empty());

        let excluded = vec!["w2".to_string()];
        let query = SharedCharacterQuery {
            exclude_ids: &excluded,
            ..query
        };
        assert!(repo.find_words_sharing(&query).unwrap().is_empty());
    }

    #[test]
    fn finds_words_sharing_radical() {
        let repo = SqliteRepository::open_in_memory().unwrap();
        insert_character(&repo, "c1", "校", "木");
        insert_character(&repo, "c2", "東", "木");
        insert_word(&repo, "w1", "校", 8);
        insert_word(&repo, "w2", "東", 8);
        relate(&repo, "w1", "c1", 0);
        relate(&repo, "w2", "c2", 0);

        let grades = [Grade::Eight];
        let query = SharedCharacterQuery {
            field: CharacterField::Radical,
            value: "木",
            grades: &grades,
            exclude_word_id: "w1",
            exclude_word: "校",
            exclude_ids: &[],
            exclude_words: &[],
            limit: 15,
        };
        let found = repo.find_words_sharing(&query).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "w2");
        assert_eq!(repo.radical_of("校").unwrap().as_deref(), Some("木"));
        assert_eq!(repo.count_words_in_grades(&grades).unwrap(), 2);
        assert_eq!(
            repo.count_words_sharing(CharacterField::Radical, "木", &grades).unwrap(),
            2
        );
        assert_eq!(
            repo.count_words_sharing(CharacterField::Glyph, "校", &[Grade::One]).unwrap(),
            0
        );
        assert_eq!(repo.count_words_in_grades(&[]).unwrap(), 0);
    }

    #[test]
    fn inspect_word_lists_relations() {
        let repo = SqliteRepository::open_in_memory().unwrap();
        insert_character(&repo, "c1", "天", "大");
        insert_word(&repo, "w1", "天地", 8);
        relate(&repo, "w1", "c1", 0);
        relate(&repo, "w1", "ghost", 1);

        let inspection = repo.inspect_word("w1").unwrap().unwrap();
        assert_eq!(inspection.relations.len(), 2);
        assert!(inspection.relations[0].resolved);
        assert!(!inspection.relations[1].resolved);
        assert!(repo.inspect_word("nope").unwrap().is_none());
    }

    #[test]
    fn close_releases_connection() {
        let repo = SqliteRepository::open_in_memory().unwrap();
        repo.close().unwrap();
    }
}
