//! Flip-card practice.
//!
//! Cards cycle endlessly; the host decides when the learner is done.

use crate::known::KnownSet;
use crate::lexicon::Lexicon;
use crate::pool::mode_candidates;
use crate::types::{Mode, VocabularyEntry};
use rand::seq::SliceRandom;
use rand::Rng;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardDeck {
    cards: Vec<VocabularyEntry>,
    index: usize,
    passed: u32,
    revealed: bool,
}

impl CardDeck {
    /// Shuffle every entry eligible for `mode`.
    pub fn prepare<K: KnownSet + ?Sized, R: Rng + ?Sized>(
        lexicon: &Lexicon,
        known: &K,
        mode: Mode,
        rng: &mut R,
    ) -> Self {
        let mut cards = mode_candidates(lexicon, known, mode);
        cards.shuffle(rng);
        tracing::debug!(%mode, count = cards.len(), "prepared cards");
        Self {
            cards,
            index: 0,
            passed: 0,
            revealed: false,
        }
    }

    pub fn current(&self) -> Option<&VocabularyEntry> {
        self.cards.get(self.index)
    }

    /// Show the back of the current card.
    pub fn reveal(&mut self) -> Option<&VocabularyEntry> {
        if self.cards.is_empty() {
            return None;
        }
        self.revealed = true;
        self.current()
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Count the current card as passed and move on, wrapping around.
    pub fn next(&mut self) -> Option<&VocabularyEntry> {
        if self.cards.is_empty() {
            return None;
        }
        self.passed += 1;
        self.index = (self.index + 1) % self.cards.len();
        self.revealed = false;
        self.current()
    }

    /// Cards passed so far, counting repeats.
    pub fn passed(&self) -> u32 {
        self.passed
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
