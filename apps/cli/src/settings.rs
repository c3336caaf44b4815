//! Environment-driven settings for the terminal trainer.

use hsk_core::{ConfigError, Mode, SessionConfig, Side};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("no data directory available, set HSK_KNOWN_FILE")]
    NoDataDir,
}

/// What the shell runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Practice {
    Test,
    Cards,
    /// Browse the word list and mark words known or unknown.
    Dict,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub practice: Practice,
    pub session: SessionConfig,
    pub known_file: PathBuf,
}

fn default_known_file() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("hsk-trainer").join("known.json"))
}

impl Settings {
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve settings from a key lookup. Unset keys take defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SettingsError> {
        let defaults = SessionConfig::default();

        let practice = match lookup("HSK_PRACTICE").as_deref().map(str::trim) {
            None | Some("test") => Practice::Test,
            Some("cards") => Practice::Cards,
            Some("dict") => Practice::Dict,
            Some(other) => return Err(invalid("HSK_PRACTICE", other)),
        };
        let mode = parse_with(&lookup, "HSK_MODE", Mode::from_str)?.unwrap_or(defaults.mode);
        let question_side = parse_with(&lookup, "HSK_QUESTION_SIDE", Side::from_str)?
            .unwrap_or(defaults.question_side);
        let answer_side =
            parse_with(&lookup, "HSK_ANSWER_SIDE", Side::from_str)?.unwrap_or(defaults.answer_side);
        let hints = parse_with(&lookup, "HSK_HINTS", parse_bool)?.unwrap_or(defaults.hints_enabled);
        let questions = parse_with(&lookup, "HSK_QUESTIONS", parse_u32)?
            .unwrap_or(defaults.requested_count);
        let time_limit = parse_with(&lookup, "HSK_TIME_LIMIT", parse_u32)?
            .unwrap_or(defaults.time_limit_seconds);
        let lives = parse_with(&lookup, "HSK_LIVES", parse_u32)?.unwrap_or(defaults.lives_limit);

        let session = SessionConfig::new(mode, question_side, answer_side)?
            .with_hints(hints)
            .with_questions(questions)
            .with_time_limit(time_limit)
            .with_lives(lives);
        session.validate()?;

        let known_file = match lookup("HSK_KNOWN_FILE") {
            Some(path) if !path.trim().is_empty() => PathBuf::from(path.trim()),
            _ => default_known_file().ok_or(SettingsError::NoDataDir)?,
        };

        Ok(Self {
            practice,
            session,
            known_file,
        })
    }
}

fn invalid(key: &'static str, value: &str) -> SettingsError {
    SettingsError::InvalidValue {
        key,
        value: value.to_string(),
    }
}

fn parse_with<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<Option<T>, SettingsError> {
    match lookup(key) {
        None => Ok(None),
        Some(raw) => parse(raw.trim()).map(Some).ok_or_else(|| invalid(key, &raw)),
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_u32(s: &str) -> Option<u32> {
    s.parse().ok()
}
