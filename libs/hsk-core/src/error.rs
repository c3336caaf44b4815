//! Error types for hsk-core.
//!
//! Wrong answers are gameplay, not errors: they come back as
//! [`AnswerOutcome`](crate::session::AnswerOutcome) values.

use crate::session::Phase;
use thiserror::Error;

/// Result type alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing lexicon text or building a lexicon.
///
/// `line` is a 1-based line of lexicon text; `position` is a 0-based index
/// into the entry list given to [`Lexicon::new`](crate::lexicon::Lexicon::new).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LexiconError {
    #[error("missing {field} field in entry starting at line {line}")]
    MissingField { field: &'static str, line: usize },

    #[error("invalid ID format at line {line}: {value}")]
    InvalidId { line: usize, value: String },

    #[error("duplicate ID {id} at line {line}")]
    DuplicateId { id: u32, line: usize },

    #[error("field at line {line} appears before any ID line")]
    OrphanField { line: usize },

    #[error("entry {position} has ID 0, IDs must be positive")]
    ZeroEntryId { position: usize },

    #[error("entry {position} has an empty {field} field")]
    EmptyEntryField { field: &'static str, position: usize },

    #[error("duplicate ID {id} at entry {position}")]
    DuplicateEntryId { id: u32, position: usize },
}

/// Invalid session configuration, reported before a session starts.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("question side and answer side must differ (both are {0})")]
    SameSides(crate::types::Side),

    #[error("requested question count must be positive")]
    ZeroQuestionCount,
}

/// A transition was called in a state that does not allow it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("session is not active (phase: {phase:?})")]
    NotActive { phase: Phase },

    #[error("session has no time limit")]
    NoTimeLimit,

    #[error("question is waiting for an explicit continue")]
    AwaitingContinue,

    #[error("nothing to continue: the current question is not waiting")]
    NothingToContinue,

    #[error("no option at index {index} (question has {available})")]
    NoSuchOption { index: usize, available: usize },
}

/// Crate-level error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Lexicon(#[from] LexiconError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Session(#[from] SessionError),
}
