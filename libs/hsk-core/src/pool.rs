//! Question pool construction.

use crate::config::SessionConfig;
use crate::error::ConfigError;
use crate::known::KnownSet;
use crate::lexicon::Lexicon;
use crate::types::{Mode, VocabularyEntry};
use rand::seq::SliceRandom;
use rand::Rng;

/// Ordered, immutable list of questions for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionPool {
    entries: Vec<VocabularyEntry>,
}

impl QuestionPool {
    /// Wrap entries in the given order.
    pub fn new(entries: Vec<VocabularyEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[VocabularyEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&VocabularyEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Entries eligible for `mode`, in lexicon order.
///
/// Mixed mode takes the first ceil(n/2) known and the first ceil(n/2)
/// unknown entries, n being the lexicon size. An empty selection falls back
/// to the whole lexicon.
pub fn mode_candidates<K: KnownSet + ?Sized>(
    lexicon: &Lexicon,
    known: &K,
    mode: Mode,
) -> Vec<VocabularyEntry> {
    let (known_words, new_words): (Vec<&VocabularyEntry>, Vec<&VocabularyEntry>) =
        lexicon.iter().partition(|e| known.contains(e.id));

    let selected: Vec<&VocabularyEntry> = match mode {
        Mode::Review => known_words,
        Mode::Learn => new_words,
        Mode::Mixed => {
            let half = lexicon.len().div_ceil(2);
            known_words
                .into_iter()
                .take(half)
                .chain(new_words.into_iter().take(half))
                .collect()
        }
    };

    if selected.is_empty() {
        tracing::debug!(%mode, "mode filter is empty, using the whole lexicon");
        return lexicon.entries().to_vec();
    }
    selected.into_iter().cloned().collect()
}

/// Build the shuffled question pool for a run.
pub fn build_pool<K: KnownSet + ?Sized, R: Rng + ?Sized>(
    lexicon: &Lexicon,
    known: &K,
    config: &SessionConfig,
    rng: &mut R,
) -> Result<QuestionPool, ConfigError> {
    config.validate()?;

    let mut candidates = mode_candidates(lexicon, known, config.mode);
    candidates.shuffle(rng);
    candidates.truncate(config.requested_count as usize);

    tracing::debug!(
        mode = %config.mode,
        requested = config.requested_count,
        count = candidates.len(),
        "prepared question pool"
    );
    Ok(QuestionPool::new(candidates))
}
