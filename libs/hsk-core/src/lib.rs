//! Quiz engine for the HSK vocabulary trainer.
//!
//! Provides:
//! - The HSK-1 lexicon and its text format
//! - Similarity heuristics and distractor selection
//! - Question pool building from the learner's known words
//! - The timed, life-limited quiz session state machine
//! - Flip-card practice decks

pub mod config;
pub mod deck;
pub mod distractor;
pub mod error;
pub mod known;
pub mod lexicon;
pub mod pool;
pub mod session;
pub mod similarity;
pub mod types;

pub use config::{SessionConfig, Step};
pub use deck::CardDeck;
pub use distractor::{select_options, OPTION_COUNT};
pub use error::{ConfigError, Error, LexiconError, Result, SessionError};
pub use known::{practice_unlocked, KnownSet, MemorySet, Progress, PRACTICE_UNLOCK_THRESHOLD};
pub use lexicon::Lexicon;
pub use pool::{build_pool, mode_candidates, QuestionPool};
pub use session::{
    AnswerOutcome, Phase, Question, QuizSession, SessionResult, Snapshot, TickOutcome, TimerUrgency,
};
pub use similarity::{first_syllable, normalize_phonetic, shared_written_count, token_overlap, tokenize};
pub use types::{EntryId, Mode, Side, VocabularyEntry};
