//! Core types for the Hanja word-card application.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Proficiency grade (급). One is the hardest tier, Eight the easiest.
///
/// The tier number is the canonical representation: it is what the
/// `words.grade` column stores and what serde reads and writes. The `"8급"`
/// label only exists at the display boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Grade {
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
}

impl Default for Grade {
    fn default() -> Self {
        Self::Eight
    }
}

impl Grade {
    /// Every grade, hardest (1) to easiest (8).
    pub const ALL: [Grade; 8] = [
        Self::One,
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
    ];

    /// Tier number (1-8).
    pub fn number(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
            Self::Four => 4,
            Self::Five => 5,
            Self::Six => 6,
            Self::Seven => 7,
            Self::Eight => 8,
        }
    }

    /// Create from a tier number.
    pub fn from_number(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::One),
            2 => Some(Self::Two),
            3 => Some(Self::Three),
            4 => Some(Self::Four),
            5 => Some(Self::Five),
            6 => Some(Self::Six),
            7 => Some(Self::Seven),
            8 => Some(Self::Eight),
            _ => None,
        }
    }

    /// Parse either the bare tier number (`"8"`) or the label form (`"8급"`).
    pub fn parse(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        let digits = trimmed.strip_suffix('급').unwrap_or(trimmed).trim();
        digits
            .parse::<u8>()
            .ok()
            .and_then(Self::from_number)
            .ok_or_else(|| CoreError::InvalidGrade {
                value: value.to_string(),
            })
    }

    /// Display label, e.g. `"8급"`.
    pub fn label(self) -> String {
        format!("{}급", self.number())
    }

    /// Grades ordered from the easiest tier down to the hardest.
    pub fn easiest_first() -> impl Iterator<Item = Grade> {
        Self::ALL.into_iter().rev()
    }
}

impl TryFrom<u8> for Grade {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self> {
        Self::from_number(value).ok_or_else(|| CoreError::InvalidGrade {
            value: value.to_string(),
        })
    }
}

impl From<Grade> for u8 {
    fn from(grade: Grade) -> Self {
        grade.number()
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}급", self.number())
    }
}

/// Swipe direction on a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwipeDirection {
    /// Marks the card studied; anchors on the first character.
    Left,
    /// Saves the card; anchors on the last character.
    Right,
}

impl SwipeDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            _ => Err(CoreError::InvalidDirection {
                value: value.to_string(),
            }),
        }
    }
}

/// A single ideograph with its radical classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: String,
    pub character: String,
    pub pronunciation: String,
    pub meaning: String,
    pub stroke_count: u32,
    pub radical: String,
    pub radical_name: String,
    pub radical_strokes: u32,
}

/// Legacy precomputed swipe targets stored with each word.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedWords {
    #[serde(default)]
    pub left_swipe: Vec<String>,
    #[serde(default)]
    pub right_swipe: Vec<String>,
}

/// A word plus its ordered constituent characters and learner flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCard {
    pub id: String,
    pub word: String,
    pub pronunciation: String,
    pub meaning: String,
    pub grade: Grade,
    pub is_memorized: bool,
    pub is_bookmarked: bool,
    pub characters: Vec<Character>,
    pub related_words: RelatedWords,
}

impl WordCard {
    /// Anchor character for related-word search: first for a left swipe,
    /// last for a right swipe.
    pub fn boundary_character(&self, direction: SwipeDirection) -> Option<&Character> {
        match direction {
            SwipeDirection::Left => self.characters.first(),
            SwipeDirection::Right => self.characters.last(),
        }
    }

    /// Concatenated glyphs of the resolved characters.
    pub fn character_glyphs(&self) -> String {
        self.characters
            .iter()
            .map(|c| c.character.as_str())
            .collect()
    }
}

/// Word counts for one grade.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeStats {
    pub total: usize,
    pub memorized: usize,
}

/// Per-grade statistics covering every grade, zero-filled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GradeStatistics(BTreeMap<Grade, GradeStats>);

impl Default for GradeStatistics {
    fn default() -> Self {
        Self(Grade::ALL.into_iter().map(|g| (g, GradeStats::default())).collect())
    }
}

impl GradeStatistics {
    pub fn get(&self, grade: Grade) -> GradeStats {
        self.0.get(&grade).copied().unwrap_or_default()
    }

    pub fn set(&mut self, grade: Grade, stats: GradeStats) {
        self.0.insert(grade, stats);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Grade, GradeStats)> + '_ {
        self.0.iter().map(|(g, s)| (*g, *s))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Size of a multi-grade pool and how it splits across grades.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiGradeStatistics {
    pub total_words: usize,
    pub grade_breakdown: BTreeMap<Grade, usize>,
}

/// Candidate counts for the related-word tiers of one glyph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedWordsStats {
    pub same_character_count: usize,
    pub same_radical_count: usize,
    pub total_available: usize,
}
