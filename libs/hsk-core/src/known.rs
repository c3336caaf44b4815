//! The learner's set of mastered words.

use crate::lexicon::Lexicon;
use crate::types::EntryId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Known words required before cards and tests unlock.
pub const PRACTICE_UNLOCK_THRESHOLD: usize = 10;

/// Repository of known entry ids. Persistence is up to the host.
pub trait KnownSet {
    fn contains(&self, id: EntryId) -> bool;

    /// Mark as known. Returns false if it already was.
    fn add(&mut self, id: EntryId) -> bool;

    /// Unmark. Returns false if it was not known.
    fn remove(&mut self, id: EntryId) -> bool;

    fn all(&self) -> Vec<EntryId>;

    fn len(&self) -> usize {
        self.all().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory known set. Serializes as a plain JSON array of ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemorySet {
    ids: BTreeSet<EntryId>,
}

impl MemorySet {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FromIterator<EntryId> for MemorySet {
    fn from_iter<I: IntoIterator<Item = EntryId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

impl KnownSet for MemorySet {
    fn contains(&self, id: EntryId) -> bool {
        self.ids.contains(&id)
    }

    fn add(&mut self, id: EntryId) -> bool {
        self.ids.insert(id)
    }

    fn remove(&mut self, id: EntryId) -> bool {
        self.ids.remove(&id)
    }

    fn all(&self) -> Vec<EntryId> {
        self.ids.iter().copied().collect()
    }

    fn len(&self) -> usize {
        self.ids.len()
    }
}

/// Whether enough words are known to practice with cards or tests.
pub fn practice_unlocked<K: KnownSet + ?Sized>(known: &K) -> bool {
    known.len() >= PRACTICE_UNLOCK_THRESHOLD
}

/// Dictionary progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub known: usize,
    pub total: usize,
    /// Rounded to the nearest whole percent.
    pub percent: u32,
}

impl Progress {
    /// Only ids present in the lexicon count as known.
    pub fn of<K: KnownSet + ?Sized>(lexicon: &Lexicon, known: &K) -> Self {
        let total = lexicon.len();
        let known = lexicon.iter().filter(|e| known.contains(e.id)).count();
        let percent = if total == 0 {
            0
        } else {
            ((known as f64 / total as f64) * 100.0).round() as u32
        };
        Self {
            known,
            total,
            percent,
        }
    }
}
