//! Seed dataset builders.

use hanja_core::{Grade, RelatedWords, SeedCharacter, SeedDataset, SeedWord};

pub fn character(id: &str, glyph: &str, radical: &str) -> SeedCharacter {
    SeedCharacter {
        id: id.to_string(),
        character: glyph.to_string(),
        pronunciation: "음".to_string(),
        meaning: "뜻".to_string(),
        stroke_count: 4,
        radical: radical.to_string(),
        radical_name: format!("{}부", radical),
        radical_strokes: 3,
    }
}

/// Word whose relation rows follow `character_ids` in the given order.
pub fn word(id: &str, literal: &str, grade: Grade, character_ids: &[&str]) -> SeedWord {
    SeedWord {
        id: id.to_string(),
        word: literal.to_string(),
        pronunciation: "발음".to_string(),
        meaning: "의미".to_string(),
        grade,
        is_memorized: false,
        characters: character_ids.iter().map(|c| c.to_string()).collect(),
        related_words: RelatedWords::default(),
    }
}

pub fn dataset(characters: Vec<SeedCharacter>, words: Vec<SeedWord>) -> SeedDataset {
    SeedDataset { characters, words }
}

/// 天地 and 天國 share 天; 大學 shares only the radical 大 with 天;
/// 山 is unrelated to everything.
pub fn sky_dataset() -> SeedDataset {
    dataset(
        vec![
            character("c1", "天", "大"),
            character("c2", "地", "土"),
            character("c3", "國", "囗"),
            character("c4", "大", "大"),
            character("c5", "學", "子"),
            character("c6", "山", "山"),
        ],
        vec![
            word("w1", "天地", Grade::Eight, &["c1", "c2"]),
            word("w2", "天國", Grade::Eight, &["c1", "c3"]),
            word("w3", "大學", Grade::Eight, &["c4", "c5"]),
            word("w4", "山", Grade::Seven, &["c6"]),
        ],
    )
}

/// `count` single-character words spread over grades 8, 7 and 6.
pub fn spread_dataset(count: usize) -> SeedDataset {
    let characters = vec![character("c1", "一", "一")];
    let grades = [Grade::Eight, Grade::Seven, Grade::Six];
    let words = (0..count)
        .map(|i| word(&format!("w{}", i), "一", grades[i % grades.len()], &["c1"]))
        .collect();
    dataset(characters, words)
}
