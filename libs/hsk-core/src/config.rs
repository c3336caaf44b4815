//! Per-run quiz configuration.

use crate::error::ConfigError;
use crate::types::{Mode, Side};
use serde::{Deserialize, Serialize};

pub const MIN_QUESTIONS: u32 = 1;
pub const MAX_QUESTIONS: u32 = 50;
pub const QUESTION_STEP: u32 = 5;
pub const TIME_STEP_SECONDS: u32 = 30;
pub const MAX_TIME_SECONDS: u32 = 120;

/// Direction of a settings stepper button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Up,
    Down,
}

/// Settings for one quiz run. A zero time limit or lives limit means
/// unlimited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub mode: Mode,
    pub question_side: Side,
    pub answer_side: Side,
    pub hints_enabled: bool,
    pub requested_count: u32,
    pub time_limit_seconds: u32,
    pub lives_limit: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            question_side: Side::Written,
            answer_side: Side::Phonetic,
            hints_enabled: false,
            requested_count: 10,
            time_limit_seconds: 0,
            lives_limit: 0,
        }
    }
}

impl SessionConfig {
    /// Create a config with default limits, rejecting identical sides.
    pub fn new(mode: Mode, question_side: Side, answer_side: Side) -> Result<Self, ConfigError> {
        let config = Self {
            mode,
            question_side,
            answer_side,
            ..Default::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_hints(mut self, enabled: bool) -> Self {
        self.hints_enabled = enabled;
        self
    }

    pub fn with_questions(mut self, count: u32) -> Self {
        self.requested_count = count;
        self
    }

    pub fn with_time_limit(mut self, seconds: u32) -> Self {
        self.time_limit_seconds = seconds;
        self
    }

    pub fn with_lives(mut self, lives: u32) -> Self {
        self.lives_limit = lives;
        self
    }

    /// Check the invariants a session relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.question_side == self.answer_side {
            return Err(ConfigError::SameSides(self.question_side));
        }
        if self.requested_count == 0 {
            return Err(ConfigError::ZeroQuestionCount);
        }
        Ok(())
    }

    pub fn has_time_limit(&self) -> bool {
        self.time_limit_seconds > 0
    }

    pub fn has_lives_limit(&self) -> bool {
        self.lives_limit > 0
    }

    /// Question count stepper: moves by 5 within [1, 50].
    pub fn step_questions(&mut self, step: Step) {
        self.requested_count = match step {
            Step::Up => self.requested_count.saturating_add(QUESTION_STEP).min(MAX_QUESTIONS),
            Step::Down => self.requested_count.saturating_sub(QUESTION_STEP).max(MIN_QUESTIONS),
        };
    }

    /// Time limit stepper: unlimited, then 30..=120 in 30 second steps.
    pub fn step_time_limit(&mut self, step: Step) {
        let current = self.time_limit_seconds;
        self.time_limit_seconds = match step {
            Step::Up if current == 0 => TIME_STEP_SECONDS,
            Step::Up => current.saturating_add(TIME_STEP_SECONDS).min(MAX_TIME_SECONDS),
            Step::Down if current <= TIME_STEP_SECONDS => 0,
            Step::Down => (current - TIME_STEP_SECONDS).max(TIME_STEP_SECONDS),
        };
    }

    /// Lives stepper: unlimited, then 1..=questions+1.
    pub fn step_lives(&mut self, step: Step) {
        let current = self.lives_limit;
        self.lives_limit = match step {
            Step::Up if current == 0 => 1,
            Step::Up => (current + 1).min(self.requested_count.saturating_add(1)),
            Step::Down if current <= 1 => 0,
            Step::Down => current - 1,
        };
    }
}
