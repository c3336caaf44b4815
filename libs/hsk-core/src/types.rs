//! Core types for the vocabulary trainer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable lexicon primary key.
pub type EntryId = u32;

/// A single vocabulary record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VocabularyEntry {
    pub id: EntryId,
    /// Logographic form (hanzi).
    pub written: String,
    /// Romanized pronunciation, may carry tone marks and spaces.
    pub phonetic: String,
    /// Free-text gloss, possibly several comma separated senses.
    pub translation: String,
}

impl VocabularyEntry {
    pub fn new(
        id: EntryId,
        written: impl Into<String>,
        phonetic: impl Into<String>,
        translation: impl Into<String>,
    ) -> Self {
        Self {
            id,
            written: written.into(),
            phonetic: phonetic.into(),
            translation: translation.into(),
        }
    }

    /// The text shown for this entry on the given side.
    pub fn side(&self, side: Side) -> &str {
        match side {
            Side::Written => &self.written,
            Side::Phonetic => &self.phonetic,
            Side::Translation => &self.translation,
        }
    }
}

/// Which field of an entry a question or an option displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Written,
    Phonetic,
    Translation,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Written => "written",
            Self::Phonetic => "phonetic",
            Self::Translation => "translation",
        }
    }

    /// Parse from string. Accepts the hanzi/pinyin/russian aliases too.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "written" | "hanzi" => Some(Self::Written),
            "phonetic" | "pinyin" => Some(Self::Phonetic),
            "translation" | "russian" => Some(Self::Translation),
            _ => None,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a question pool is drawn relative to the learner's known words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Only words already marked as known.
    Review,
    /// Only words not yet known.
    Learn,
    /// A prefix of known words followed by a prefix of unknown words.
    Mixed,
}

impl Default for Mode {
    fn default() -> Self {
        Self::Mixed
    }
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Review => "review",
            Self::Learn => "learn",
            Self::Mixed => "mixed",
        }
    }

    /// Parse from string. Accepts the repeat/new/mix aliases too.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "review" | "repeat" => Some(Self::Review),
            "learn" | "new" => Some(Self::Learn),
            "mixed" | "mix" => Some(Self::Mixed),
            _ => None,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
