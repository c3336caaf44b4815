//! Quiz session state machine.
//!
//! A session is driven by two external cadences: answers from the learner
//! and a once-per-second [`QuizSession::tick`] from the host when a time
//! limit is set. The session does no locking; hosts must serialize calls.
//!
//! ```text
//! Active ──(pool exhausted)──────────▶ Completed
//! Active ──(lives or time run out)───▶ Failed
//! Active ──(end)─────────────────────▶ Aborted
//! ```

use crate::config::SessionConfig;
use crate::distractor::select_options;
use crate::error::{ConfigError, SessionError};
use crate::lexicon::Lexicon;
use crate::pool::QuestionPool;
use crate::types::{Side, VocabularyEntry};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Remaining seconds at or below which the timer is critical.
pub const CRITICAL_SECONDS: u32 = 10;

/// Session lifecycle phase. Everything but `Active` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Active,
    Completed,
    Failed,
    /// Ended by the host before completion.
    Aborted,
}

impl Phase {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Active)
    }
}

/// Result of submitting an answer. None of these are errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerOutcome {
    /// Right answer, moved to the next question.
    Correct,
    /// A life was spent. Without hints the question now waits for
    /// [`QuizSession::proceed`]; with hints it already advanced.
    WrongWithLifeLost,
    /// First miss with hints on: the correct option is revealed, no life
    /// spent.
    WrongHintShown,
    SessionFailed,
    SessionCompleted,
}

/// Result of a timer tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Running { remaining: u32 },
    Expired,
}

/// How urgent the remaining time looks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerUrgency {
    Calm,
    /// Half the time limit or less.
    Warning,
    /// [`CRITICAL_SECONDS`] or less.
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuestionState {
    Fresh,
    HintShown,
    AwaitingContinue,
}

/// The question currently on screen.
#[derive(Debug, Clone, Copy)]
pub struct Question<'a> {
    pub entry: &'a VocabularyEntry,
    pub options: &'a [VocabularyEntry],
    pub question_side: Side,
    pub answer_side: Side,
}

impl<'a> Question<'a> {
    /// Text of the prompt.
    pub fn prompt(&self) -> &'a str {
        self.entry.side(self.question_side)
    }

    /// Text of each option button.
    pub fn labels(&self) -> Vec<&'a str> {
        self.options.iter().map(|o| o.side(self.answer_side)).collect()
    }
}

/// UI-facing view of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub index: usize,
    pub total: usize,
    pub correct_count: u32,
    /// `None` when lives are unlimited.
    pub lives_remaining: Option<u32>,
    /// `None` when time is unlimited.
    pub time_remaining: Option<u32>,
    pub timer_urgency: Option<TimerUrgency>,
    pub phase: Phase,
    /// Option index revealed by a hint on the current question.
    pub hint: Option<usize>,
    pub awaiting_continue: bool,
}

impl Snapshot {
    pub fn questions_left(&self) -> usize {
        self.total.saturating_sub(self.index)
    }
}

/// Final summary of a finished session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResult {
    pub outcome: Phase,
    pub correct: u32,
    pub total: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub elapsed_seconds: i64,
}

/// One quiz run.
#[derive(Debug, Clone)]
pub struct QuizSession<R = StdRng> {
    config: SessionConfig,
    lexicon: Lexicon,
    pool: QuestionPool,
    current_index: usize,
    correct_count: u32,
    lives_remaining: Option<u32>,
    time_remaining: Option<u32>,
    started_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
    phase: Phase,
    question_state: QuestionState,
    options: Vec<VocabularyEntry>,
    rng: R,
}

impl QuizSession<StdRng> {
    /// Start a session with an entropy-seeded generator.
    ///
    /// Distractors are drawn from `lexicon`.
    pub fn start(
        lexicon: Lexicon,
        pool: QuestionPool,
        config: SessionConfig,
    ) -> Result<Self, ConfigError> {
        Self::start_with_rng(lexicon, pool, config, StdRng::from_entropy())
    }
}

impl<R: Rng> QuizSession<R> {
    /// Start a session and prepare the first question's options.
    /// An empty pool completes immediately.
    pub fn start_with_rng(
        lexicon: Lexicon,
        pool: QuestionPool,
        config: SessionConfig,
        rng: R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let lives_remaining = config.has_lives_limit().then_some(config.lives_limit);
        let time_remaining = config.has_time_limit().then_some(config.time_limit_seconds);

        let mut session = Self {
            config,
            lexicon,
            pool,
            current_index: 0,
            correct_count: 0,
            lives_remaining,
            time_remaining,
            started_at: Utc::now(),
            finished_at: None,
            phase: Phase::Active,
            question_state: QuestionState::Fresh,
            options: Vec::new(),
            rng,
        };

        tracing::debug!(
            total = session.pool.len(),
            lives = ?session.lives_remaining,
            time = ?session.time_remaining,
            hints = session.config.hints_enabled,
            "session started"
        );

        if session.pool.is_empty() {
            session.finish(Phase::Completed);
        } else {
            session.prepare_options();
        }
        Ok(session)
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn pool(&self) -> &QuestionPool {
        &self.pool
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    pub fn lives_remaining(&self) -> Option<u32> {
        self.lives_remaining
    }

    pub fn time_remaining(&self) -> Option<u32> {
        self.time_remaining
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// The question on screen, or `None` once the session has ended.
    pub fn current_question(&self) -> Option<Question<'_>> {
        if self.phase.is_terminal() {
            return None;
        }
        let entry = self.pool.get(self.current_index)?;
        Some(Question {
            entry,
            options: &self.options,
            question_side: self.config.question_side,
            answer_side: self.config.answer_side,
        })
    }

    pub fn snapshot(&self) -> Snapshot {
        let hint = match self.question_state {
            QuestionState::HintShown if !self.phase.is_terminal() => self.correct_option_index(),
            _ => None,
        };

        Snapshot {
            index: self.current_index,
            total: self.pool.len(),
            correct_count: self.correct_count,
            lives_remaining: self.lives_remaining,
            time_remaining: self.time_remaining,
            timer_urgency: self.timer_urgency(),
            phase: self.phase,
            hint,
            awaiting_continue: self.question_state == QuestionState::AwaitingContinue
                && !self.phase.is_terminal(),
        }
    }

    /// Count one second down. Reaching zero fails the session.
    pub fn tick(&mut self) -> Result<TickOutcome, SessionError> {
        self.ensure_active()?;
        let remaining = self.time_remaining.as_mut().ok_or(SessionError::NoTimeLimit)?;

        *remaining = remaining.saturating_sub(1);
        if *remaining == 0 {
            tracing::debug!("time is up");
            self.finish(Phase::Failed);
            return Ok(TickOutcome::Expired);
        }
        Ok(TickOutcome::Running {
            remaining: *remaining,
        })
    }

    /// Answer the current question with the option at `index`.
    pub fn submit_option(&mut self, index: usize) -> Result<AnswerOutcome, SessionError> {
        self.ensure_active()?;
        let chosen = self
            .options
            .get(index)
            .cloned()
            .ok_or(SessionError::NoSuchOption {
                index,
                available: self.options.len(),
            })?;
        self.submit_answer(&chosen)
    }

    /// Answer the current question.
    ///
    /// An answer is right when it reads the same as the correct entry on the
    /// answer side, even if it is a different entry.
    pub fn submit_answer(&mut self, chosen: &VocabularyEntry) -> Result<AnswerOutcome, SessionError> {
        self.ensure_active()?;
        if self.question_state == QuestionState::AwaitingContinue {
            return Err(SessionError::AwaitingContinue);
        }

        let side = self.config.answer_side;
        let is_correct = self
            .pool
            .get(self.current_index)
            .is_some_and(|correct| correct.side(side) == chosen.side(side));

        if is_correct {
            self.correct_count += 1;
            self.advance();
            return Ok(self.progress_outcome(AnswerOutcome::Correct));
        }

        if self.config.hints_enabled && self.question_state == QuestionState::Fresh {
            self.question_state = QuestionState::HintShown;
            return Ok(AnswerOutcome::WrongHintShown);
        }

        if self.spend_life() {
            self.finish(Phase::Failed);
            return Ok(AnswerOutcome::SessionFailed);
        }

        if self.config.hints_enabled {
            self.advance();
            Ok(self.progress_outcome(AnswerOutcome::WrongWithLifeLost))
        } else {
            self.question_state = QuestionState::AwaitingContinue;
            Ok(AnswerOutcome::WrongWithLifeLost)
        }
    }

    /// Move on after a miss that is waiting for an explicit continue.
    pub fn proceed(&mut self) -> Result<Phase, SessionError> {
        self.ensure_active()?;
        if self.question_state != QuestionState::AwaitingContinue {
            return Err(SessionError::NothingToContinue);
        }
        self.advance();
        Ok(self.phase)
    }

    /// Force the session to end. An active session becomes `Aborted`; an
    /// ended one reports its existing result.
    pub fn end(&mut self) -> SessionResult {
        if !self.phase.is_terminal() {
            self.finish(Phase::Aborted);
        }
        self.summary()
    }

    /// Final summary once the session has ended.
    pub fn result(&self) -> Option<SessionResult> {
        self.phase.is_terminal().then(|| self.summary())
    }

    fn summary(&self) -> SessionResult {
        let finished_at = self.finished_at.unwrap_or_else(Utc::now);
        SessionResult {
            outcome: self.phase,
            correct: self.correct_count,
            total: self.pool.len(),
            started_at: self.started_at,
            finished_at,
            elapsed_seconds: (finished_at - self.started_at).num_seconds(),
        }
    }

    fn ensure_active(&self) -> Result<(), SessionError> {
        if self.phase.is_terminal() {
            return Err(SessionError::NotActive { phase: self.phase });
        }
        Ok(())
    }

    /// Spend one life. Returns true when none are left.
    fn spend_life(&mut self) -> bool {
        match self.lives_remaining.as_mut() {
            Some(lives) => {
                *lives = lives.saturating_sub(1);
                *lives == 0
            }
            None => false,
        }
    }

    fn advance(&mut self) {
        self.current_index += 1;
        self.question_state = QuestionState::Fresh;
        if self.current_index >= self.pool.len() {
            self.finish(Phase::Completed);
        } else {
            self.prepare_options();
        }
    }

    fn progress_outcome(&self, otherwise: AnswerOutcome) -> AnswerOutcome {
        if self.phase == Phase::Completed {
            AnswerOutcome::SessionCompleted
        } else {
            otherwise
        }
    }

    fn prepare_options(&mut self) {
        if let Some(correct) = self.pool.get(self.current_index) {
            self.options = select_options(
                correct,
                self.lexicon.entries(),
                self.config.answer_side,
                &mut self.rng,
            );
        }
    }

    fn correct_option_index(&self) -> Option<usize> {
        let correct = self.pool.get(self.current_index)?;
        self.options.iter().position(|o| o.id == correct.id)
    }

    fn timer_urgency(&self) -> Option<TimerUrgency> {
        let remaining = self.time_remaining?;
        let urgency = if remaining <= CRITICAL_SECONDS {
            TimerUrgency::Critical
        } else if remaining <= self.config.time_limit_seconds / 2 {
            TimerUrgency::Warning
        } else {
            TimerUrgency::Calm
        };
        Some(urgency)
    }

    fn finish(&mut self, phase: Phase) {
        self.phase = phase;
        self.finished_at = Some(Utc::now());
        self.options.clear();
        tracing::info!(
            outcome = ?phase,
            correct = self.correct_count,
            total = self.pool.len(),
            "session ended"
        );
    }
}
