//! Shared helpers for session scenario tests.

pub mod fixtures;

use hsk_core::{build_pool, KnownSet, Lexicon, QuizSession, SessionConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Build a pool from `known` and start a seeded session over `lexicon`.
pub fn start_session<K: KnownSet>(
    lexicon: &Lexicon,
    known: &K,
    config: SessionConfig,
    seed: u64,
) -> QuizSession {
    let mut rng = StdRng::seed_from_u64(seed);
    let pool = build_pool(lexicon, known, &config, &mut rng).expect("valid config");
    QuizSession::start_with_rng(lexicon.clone(), pool, config, rng).expect("valid config")
}

/// Index of the option that answers the current question.
pub fn correct_option(session: &QuizSession) -> usize {
    let question = session.current_question().expect("active question");
    let side = question.answer_side;
    question
        .options
        .iter()
        .position(|o| o.side(side) == question.entry.side(side))
        .expect("correct entry among options")
}

/// Index of an option that reads differently from the correct answer.
pub fn wrong_option(session: &QuizSession) -> usize {
    let question = session.current_question().expect("active question");
    let side = question.answer_side;
    question
        .options
        .iter()
        .position(|o| o.side(side) != question.entry.side(side))
        .expect("at least one distinct distractor")
}
