//! SQLite schema definitions.

/// Current schema version.
pub const SCHEMA_VERSION: i32 = 1;

/// Complete schema for the local Hanja database.
pub const SCHEMA: &str = r#"
-- Individual characters (seeded, immutable)
CREATE TABLE IF NOT EXISTS characters (
    id TEXT PRIMARY KEY,
    character TEXT NOT NULL,
    pronunciation TEXT NOT NULL,
    meaning TEXT NOT NULL,
    strokeCount INTEGER NOT NULL,
    radical TEXT NOT NULL,
    radicalName TEXT NOT NULL,
    radicalStrokes INTEGER NOT NULL
);

-- Word cards
CREATE TABLE IF NOT EXISTS words (
    id TEXT PRIMARY KEY,
    word TEXT NOT NULL,
    pronunciation TEXT NOT NULL,
    meaning TEXT NOT NULL,
    grade INTEGER NOT NULL,
    isMemorized INTEGER NOT NULL DEFAULT 0,
    leftSwipeWords TEXT,
    rightSwipeWords TEXT,
    createdAt DATETIME DEFAULT CURRENT_TIMESTAMP
);

-- Word to character relation, position is the index in the literal word
CREATE TABLE IF NOT EXISTS word_characters (
    wordId TEXT NOT NULL REFERENCES words(id),
    characterId TEXT NOT NULL REFERENCES characters(id),
    position INTEGER NOT NULL,
    PRIMARY KEY (wordId, characterId, position)
);

-- Bookmark state, keyed by word id only
CREATE TABLE IF NOT EXISTS bookmarks (
    wordId TEXT PRIMARY KEY,
    isBookmarked INTEGER NOT NULL DEFAULT 0,
    updatedAt TEXT NOT NULL
);

-- Bookkeeping about the seeded dataset
CREATE TABLE IF NOT EXISTS dataset_meta (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);

-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY
);

-- Indexes
CREATE INDEX IF NOT EXISTS idx_words_grade ON words(grade);
CREATE INDEX IF NOT EXISTS idx_words_memorized ON words(isMemorized);
CREATE INDEX IF NOT EXISTS idx_characters_character ON characters(character);
CREATE INDEX IF NOT EXISTS idx_characters_radical ON characters(radical);
CREATE INDEX IF NOT EXISTS idx_word_characters_word ON word_characters(wordId);
CREATE INDEX IF NOT EXISTS idx_word_characters_character ON word_characters(characterId);
CREATE INDEX IF NOT EXISTS idx_bookmarks_flag ON bookmarks(isBookmarked);
"#;

/// Record the schema version if not present.
pub const INIT_SCHEMA_VERSION: &str = r#"
INSERT OR IGNORE INTO schema_version (version) VALUES (1);
"#;
