//! Character order reconciliation.
//!
//! Relation rows carry a seed-time `position`, but the order a card shows
//! its characters in is derived from the word's literal string. Each glyph
//! of the word, left to right, claims the first unclaimed resolved character
//! with that glyph. Resolved characters the literal never claims are kept
//! and appended in their incoming order, so nothing resolved is dropped.

use crate::types::Character;

/// Reorder `characters` to follow the glyph order of `word`.
///
/// Single-glyph words are returned untouched. The result always has the
/// same length as the input, and applying the function to its own output
/// returns the same list.
pub fn reconcile_character_order(word: &str, characters: Vec<Character>) -> Vec<Character> {
    if word.chars().count() <= 1 || characters.len() <= 1 {
        return characters;
    }

    let mut pending: Vec<Option<Character>> = characters.into_iter().map(Some).collect();
    let mut ordered = Vec::with_capacity(pending.len());

    let mut buf = [0u8; 4];
    for glyph in word.chars() {
        let glyph = glyph.encode_utf8(&mut buf);
        let slot = pending
            .iter_mut()
            .find(|slot| matches!(slot, Some(c) if c.character == *glyph));
        if let Some(slot) = slot {
            if let Some(character) = slot.take() {
                ordered.push(character);
            }
        }
    }

    // Anomaly: relation points at a glyph the literal does not contain.
    ordered.extend(pending.into_iter().flatten());
    ordered
}
