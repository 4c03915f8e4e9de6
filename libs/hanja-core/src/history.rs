//! Bounded card histories kept by a study session.

use crate::types::{SwipeDirection, WordCard};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Default size of both the recent window and the undo history.
pub const DEFAULT_HISTORY_SIZE: usize = 10;

/// Sliding window of recently shown cards, newest first.
///
/// Related-word resolution treats the window as an opaque exclusion list
/// of ids and literal words.
#[derive(Debug, Clone)]
pub struct RecentHistory {
    capacity: usize,
    ids: VecDeque<String>,
    words: VecDeque<String>,
}

impl Default for RecentHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_SIZE)
    }
}

impl RecentHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            ids: VecDeque::with_capacity(capacity),
            words: VecDeque::with_capacity(capacity),
        }
    }

    /// Push a card to the front, evicting the oldest entry past capacity.
    pub fn record(&mut self, card: &WordCard) {
        if self.capacity == 0 {
            return;
        }
        self.ids.push_front(card.id.clone());
        self.words.push_front(card.word.clone());
        self.ids.truncate(self.capacity);
        self.words.truncate(self.capacity);
    }

    pub fn ids(&self) -> Vec<String> {
        self.ids.iter().cloned().collect()
    }

    pub fn words(&self) -> Vec<String> {
        self.words.iter().cloned().collect()
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.ids.iter().any(|i| i == id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
        self.words.clear();
    }
}

/// A card that left the screen and the direction it went.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardHistoryItem {
    pub card: WordCard,
    pub swipe_direction: SwipeDirection,
}

/// Outcome of stepping back through the swipe history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoBack {
    /// The card is still in the stack at `index`.
    InStack { item: CardHistoryItem, index: usize },
    /// The card left the stack and must be put back in front.
    Reinsert { item: CardHistoryItem },
}

impl GoBack {
    pub fn item(&self) -> &CardHistoryItem {
        match self {
            Self::InStack { item, .. } | Self::Reinsert { item } => item,
        }
    }
}

/// Bounded undo history of swiped cards, oldest first.
#[derive(Debug, Clone)]
pub struct CardHistory {
    capacity: usize,
    items: Vec<CardHistoryItem>,
}

impl Default for CardHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_SIZE)
    }
}

impl CardHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            items: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, card: WordCard, swipe_direction: SwipeDirection) {
        if self.capacity == 0 {
            return;
        }
        self.items.push(CardHistoryItem {
            card,
            swipe_direction,
        });
        if self.items.len() > self.capacity {
            let overflow = self.items.len() - self.capacity;
            self.items.drain(..overflow);
        }
    }

    pub fn last(&self) -> Option<&CardHistoryItem> {
        self.items.last()
    }

    pub fn can_go_back(&self) -> bool {
        !self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Pop the most recent item and locate it in `stack`.
    pub fn go_back(&mut self, stack: &[WordCard]) -> Option<GoBack> {
        let item = self.items.pop()?;
        match stack.iter().position(|card| card.id == item.card.id) {
            Some(index) => Some(GoBack::InStack { item, index }),
            None => Some(GoBack::Reinsert { item }),
        }
    }
}
