//! End-to-end quiz scenarios over the built-in HSK-1 lexicon.

mod common;

use common::fixtures;
use common::{correct_option, start_session, wrong_option};
use hsk_core::{
    build_pool, AnswerOutcome, Lexicon, MemorySet, Mode, Phase, SessionConfig, SessionError,
    Side, TickOutcome,
};
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn hsk1() -> Lexicon {
    Lexicon::hsk1().expect("built-in lexicon parses")
}

#[test]
fn single_life_fails_on_first_miss() {
    let lexicon = hsk1();
    let config = fixtures::written_to_phonetic().with_lives(1);
    let mut session = start_session(&lexicon, &MemorySet::new(), config, 1);
    assert_eq!(session.pool().len(), 5);

    let idx = wrong_option(&session);
    assert_eq!(session.submit_option(idx), Ok(AnswerOutcome::SessionFailed));
    assert_eq!(session.lives_remaining(), Some(0));
    assert_eq!(session.phase(), Phase::Failed);

    let result = session.result().expect("session ended");
    assert_eq!(result.outcome, Phase::Failed);
    assert_eq!(result.correct, 0);
    assert_eq!(result.total, 5);
}

#[test]
fn hint_then_second_miss_costs_a_life_and_advances() {
    let lexicon = hsk1();
    let config = fixtures::written_to_phonetic().with_hints(true).with_lives(2);
    let mut session = start_session(&lexicon, &MemorySet::new(), config, 2);

    let idx = wrong_option(&session);
    assert_eq!(session.submit_option(idx), Ok(AnswerOutcome::WrongHintShown));
    assert_eq!(session.lives_remaining(), Some(2));
    assert_eq!(session.phase(), Phase::Active);
    assert_eq!(session.snapshot().hint, Some(correct_option(&session)));

    assert_eq!(session.submit_option(idx), Ok(AnswerOutcome::WrongWithLifeLost));
    assert_eq!(session.lives_remaining(), Some(1));
    assert_eq!(session.current_index(), 1);
    assert_eq!(session.phase(), Phase::Active);
}

#[test]
fn unlimited_lives_never_fail() {
    let lexicon = hsk1();
    let config = fixtures::written_to_phonetic().with_questions(10);
    let mut session = start_session(&lexicon, &MemorySet::new(), config, 3);

    while session.phase() == Phase::Active {
        let idx = wrong_option(&session);
        assert_eq!(session.submit_option(idx), Ok(AnswerOutcome::WrongWithLifeLost));
        assert_eq!(session.lives_remaining(), None);
        session.proceed().expect("waiting for continue");
    }

    assert_eq!(session.phase(), Phase::Completed);
    assert_eq!(session.correct_count(), 0);
}

#[test]
fn unlimited_lives_with_hints_never_fail() {
    let lexicon = hsk1();
    let config = fixtures::written_to_phonetic().with_hints(true);
    let mut session = start_session(&lexicon, &MemorySet::new(), config, 4);

    let mut last = None;
    while session.phase() == Phase::Active {
        let idx = wrong_option(&session);
        session.submit_option(idx).expect("hint shown");
        last = Some(session.submit_option(idx).expect("life spent"));
    }

    assert_eq!(last, Some(AnswerOutcome::SessionCompleted));
    assert_eq!(session.phase(), Phase::Completed);
}

#[test]
fn timer_expires_on_last_tick() {
    let lexicon = hsk1();
    let config = fixtures::written_to_phonetic().with_time_limit(30);
    let mut session = start_session(&lexicon, &MemorySet::new(), config, 5);

    for expected in (1..30).rev() {
        assert_eq!(session.tick(), Ok(TickOutcome::Running { remaining: expected }));
        assert_eq!(session.phase(), Phase::Active);
    }
    assert_eq!(session.tick(), Ok(TickOutcome::Expired));
    assert_eq!(session.phase(), Phase::Failed);

    let not_active = SessionError::NotActive {
        phase: Phase::Failed,
    };
    assert_eq!(session.tick(), Err(not_active.clone()));
    assert_eq!(session.submit_option(0), Err(not_active.clone()));
    assert_eq!(session.proceed(), Err(not_active));
}

#[test]
fn all_correct_answers_complete_every_pool() {
    let lexicon = hsk1();
    let known: MemorySet = (1..=40).collect();

    for (seed, (question_side, answer_side)) in fixtures::side_pairs().into_iter().enumerate() {
        for mode in [Mode::Review, Mode::Learn, Mode::Mixed] {
            let config = SessionConfig::new(mode, question_side, answer_side)
                .expect("sides differ")
                .with_questions(12)
                .with_lives(1);
            let mut session = start_session(&lexicon, &known, config, seed as u64);
            let total = session.pool().len();

            for _ in 0..total {
                let idx = correct_option(&session);
                session.submit_option(idx).expect("active session");
            }

            assert_eq!(session.phase(), Phase::Completed);
            assert_eq!(session.correct_count() as usize, total);
        }
    }
}

#[test]
fn review_without_known_words_uses_whole_lexicon() {
    let lexicon = hsk1();
    let config = SessionConfig::new(Mode::Review, Side::Translation, Side::Written)
        .expect("sides differ")
        .with_questions(50);
    let pool = build_pool(&lexicon, &MemorySet::new(), &config, &mut StdRng::seed_from_u64(6))
        .expect("valid config");
    assert_eq!(pool.len(), 50);
}

#[test]
fn snapshot_tracks_progress() {
    let lexicon = hsk1();
    let config = fixtures::written_to_phonetic().with_lives(3).with_time_limit(60);
    let mut session = start_session(&lexicon, &MemorySet::new(), config, 7);

    let idx = correct_option(&session);
    session.submit_option(idx).expect("active session");
    session.tick().expect("timer running");

    let snapshot = session.snapshot();
    assert_eq!(snapshot.index, 1);
    assert_eq!(snapshot.total, 5);
    assert_eq!(snapshot.questions_left(), 4);
    assert_eq!(snapshot.correct_count, 1);
    assert_eq!(snapshot.lives_remaining, Some(3));
    assert_eq!(snapshot.time_remaining, Some(59));
    assert_eq!(snapshot.phase, Phase::Active);
    assert!(!snapshot.awaiting_continue);
}

#[test]
fn options_follow_the_current_question() {
    let lexicon = hsk1();
    let mut session = start_session(&lexicon, &MemorySet::new(), fixtures::written_to_phonetic(), 8);

    for _ in 0..session.pool().len() {
        let question = session.current_question().expect("active");
        assert_eq!(question.options.len(), hsk_core::OPTION_COUNT);
        assert!(question.options.iter().any(|o| o.id == question.entry.id));

        let idx = correct_option(&session);
        session.submit_option(idx).expect("active session");
    }
    assert!(session.current_question().is_none());
}
