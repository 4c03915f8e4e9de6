//! Static seed dataset model.
//!
//! The dataset ships with the application as JSON: a list of characters and
//! a list of words, each word naming its characters by id in literal order.

use crate::error::{CoreError, Result};
use crate::types::{Character, Grade, RelatedWords};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Character row as exported from the source spreadsheets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedCharacter {
    pub id: String,
    pub character: String,
    pub pronunciation: String,
    pub meaning: String,
    pub stroke_count: u32,
    pub radical: String,
    pub radical_name: String,
    pub radical_strokes: u32,
}

impl SeedCharacter {
    pub fn into_character(self) -> Character {
        Character {
            meaning: normalize_meaning(&self.meaning),
            id: self.id,
            character: self.character,
            pronunciation: self.pronunciation,
            stroke_count: self.stroke_count,
            radical: self.radical,
            radical_name: self.radical_name,
            radical_strokes: self.radical_strokes,
        }
    }
}

/// Word row with its character ids in literal order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedWord {
    pub id: String,
    pub word: String,
    pub pronunciation: String,
    pub meaning: String,
    pub grade: Grade,
    #[serde(default)]
    pub is_memorized: bool,
    pub characters: Vec<String>,
    #[serde(default)]
    pub related_words: RelatedWords,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedDataset {
    pub characters: Vec<SeedCharacter>,
    pub words: Vec<SeedWord>,
}

impl SeedDataset {
    /// Parse and validate a JSON dataset.
    pub fn from_json(content: &str) -> Result<Self> {
        let dataset: SeedDataset =
            serde_json::from_str(content).map_err(|e| CoreError::Dataset(e.to_string()))?;
        dataset.validate()?;
        Ok(dataset)
    }

    /// Reject structurally broken datasets: duplicate ids or empty words.
    ///
    /// Words that reference unknown characters are not rejected here; see
    /// [`SeedDataset::unresolved_relations`].
    pub fn validate(&self) -> Result<()> {
        let mut character_ids = HashSet::new();
        for character in &self.characters {
            if !character_ids.insert(character.id.as_str()) {
                return Err(CoreError::Dataset(format!(
                    "duplicate character id {}",
                    character.id
                )));
            }
        }

        let mut word_ids = HashSet::new();
        for word in &self.words {
            if word.word.trim().is_empty() {
                return Err(CoreError::Dataset(format!("word {} is empty", word.id)));
            }
            if !word_ids.insert(word.id.as_str()) {
                return Err(CoreError::Dataset(format!("duplicate word id {}", word.id)));
            }
        }

        Ok(())
    }

    /// Relations pointing at character ids the dataset does not define.
    pub fn unresolved_relations(&self) -> Vec<CoreError> {
        let known: HashSet<&str> = self.characters.iter().map(|c| c.id.as_str()).collect();
        self.words
            .iter()
            .flat_map(|word| {
                word.characters
                    .iter()
                    .filter(|id| !known.contains(id.as_str()))
                    .map(|id| CoreError::UnknownCharacter {
                        word_id: word.id.clone(),
                        character_id: id.clone(),
                    })
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    pub fn relation_count(&self) -> usize {
        self.words.iter().map(|w| w.characters.len()).sum()
    }
}

/// Reduce the nested-list meaning export (`[[['학교'], ['교']]]`) to its
/// first gloss. Plain meanings pass through unchanged.
pub fn normalize_meaning(raw: &str) -> String {
    if !(raw.contains("[[") && raw.contains("]]")) {
        return raw.to_string();
    }

    let Some(open) = raw.find('\'') else {
        return raw.to_string();
    };
    let rest = &raw[open + 1..];
    match rest.find('\'') {
        Some(close) => rest[..close].replace("\\'", "'"),
        None => raw.to_string(),
    }
}
