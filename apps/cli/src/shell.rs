//! Terminal front end for quiz sessions, flip cards and the dictionary.
//!
//! Answers and timer ticks arrive on one task through `select!`, so the
//! session only ever sees one call at a time.

use hsk_core::session::CRITICAL_SECONDS;
use hsk_core::{
    AnswerOutcome, CardDeck, EntryId, KnownSet, Lexicon, Phase, Progress, QuizSession, SessionError,
    SessionResult, TickOutcome,
};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::time::{interval, Interval, MissedTickBehavior};

/// A line of learner input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Zero-based option index.
    Choose(usize),
    Continue,
    MarkKnown,
    Quit,
    Unknown,
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        match line {
            "" => Self::Continue,
            "k" | "K" => Self::MarkKnown,
            "q" | "Q" => Self::Quit,
            _ => match line.parse::<usize>() {
                Ok(n) if n >= 1 => Self::Choose(n - 1),
                _ => Self::Unknown,
            },
        }
    }
}

pub type InputLines = Lines<BufReader<Stdin>>;

pub fn stdin_lines() -> InputLines {
    BufReader::new(tokio::io::stdin()).lines()
}

fn render_question(session: &QuizSession) {
    let Some(question) = session.current_question() else {
        return;
    };
    let snapshot = session.snapshot();

    let lives = snapshot
        .lives_remaining
        .map_or_else(|| "∞".to_string(), |l| l.to_string());
    let time = snapshot
        .time_remaining
        .map_or_else(|| "-".to_string(), |t| format!("{t}s"));
    println!();
    println!(
        "[{}/{}] lives: {} time: {}",
        snapshot.index + 1,
        snapshot.total,
        lives,
        time
    );
    println!("  {}", question.prompt());
    for (idx, label) in question.labels().iter().enumerate() {
        let marker = if snapshot.hint == Some(idx) { " <- hint" } else { "" };
        println!("  {}) {}{}", idx + 1, label, marker);
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

fn report_outcome(session: &QuizSession, outcome: AnswerOutcome) {
    match outcome {
        AnswerOutcome::Correct => {
            println!("Correct!");
            render_question(session);
        }
        AnswerOutcome::WrongHintShown => {
            println!("Wrong. The right answer is marked.");
            render_question(session);
        }
        AnswerOutcome::WrongWithLifeLost if session.snapshot().awaiting_continue => {
            println!("Wrong. Press Enter to continue.");
        }
        AnswerOutcome::WrongWithLifeLost => {
            println!("Wrong.");
            render_question(session);
        }
        AnswerOutcome::SessionFailed | AnswerOutcome::SessionCompleted => {}
    }
}

/// Apply one command to the session.
pub fn handle_command<K: KnownSet + ?Sized>(
    session: &mut QuizSession,
    known: &mut K,
    command: Command,
) -> Result<(), SessionError> {
    match command {
        Command::Choose(idx) => {
            let outcome = session.submit_option(idx)?;
            report_outcome(session, outcome);
        }
        Command::Continue => {
            session.proceed()?;
            render_question(session);
        }
        Command::MarkKnown => {
            if let Some(question) = session.current_question() {
                let id = question.entry.id;
                if known.add(id) {
                    println!("Added {} to known words.", question.entry.written);
                }
            }
        }
        Command::Quit => {
            session.end();
        }
        Command::Unknown => {
            println!("Type 1-4 to answer, Enter to continue, k to mark known, q to quit.");
        }
    }
    Ok(())
}

/// Drive a session until it ends or input closes.
pub async fn run_quiz<K: KnownSet + ?Sized>(
    session: &mut QuizSession,
    known: &mut K,
    lines: &mut InputLines,
) -> anyhow::Result<SessionResult> {
    let mut ticker = session.config().has_time_limit().then(|| {
        let mut ticker = interval(Duration::from_secs(1));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker
    });
    if let Some(ticker) = ticker.as_mut() {
        // The first tick resolves immediately.
        ticker.tick().await;
    }

    render_question(session);
    while session.phase() == Phase::Active {
        tokio::select! {
            _ = next_tick(&mut ticker) => {
                match session.tick()? {
                    TickOutcome::Expired => println!("\nTime is up!"),
                    TickOutcome::Running { remaining } if remaining == CRITICAL_SECONDS => {
                        println!("{remaining} seconds left!");
                    }
                    TickOutcome::Running { .. } => {}
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    tracing::debug!("input closed");
                    break;
                };
                if let Err(err) = handle_command(session, known, Command::parse(&line)) {
                    tracing::debug!(error = %err, "rejected input");
                    println!("{err}");
                }
            }
        }
    }

    Ok(session.end())
}

/// Flip-card loop: Enter reveals, Enter again moves on.
pub async fn run_cards<K: KnownSet + ?Sized>(
    deck: &mut CardDeck,
    known: &mut K,
    lines: &mut InputLines,
) -> anyhow::Result<u32> {
    let Some(card) = deck.current() else {
        println!("No cards to show.");
        return Ok(0);
    };
    println!("\n  {}", card.written);

    while let Some(line) = lines.next_line().await? {
        match Command::parse(&line) {
            Command::Quit => break,
            Command::MarkKnown => {
                if let Some(card) = deck.current() {
                    if known.add(card.id) {
                        println!("Added {} to known words.", card.written);
                    }
                }
            }
            _ if !deck.is_revealed() => {
                if let Some(card) = deck.reveal() {
                    println!("  {} ({})", card.phonetic, card.translation);
                }
            }
            _ => {
                if let Some(card) = deck.next() {
                    println!("\n  {}", card.written);
                }
            }
        }
    }

    Ok(deck.passed())
}

/// A line of input on the dictionary screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DictCommand {
    /// Flip the known mark of the word with this id.
    Toggle(EntryId),
    List,
    Quit,
    Unknown,
}

impl DictCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        match line {
            "" | "l" | "L" => Self::List,
            "q" | "Q" => Self::Quit,
            _ => match line.parse::<EntryId>() {
                Ok(id) if id > 0 => Self::Toggle(id),
                _ => Self::Unknown,
            },
        }
    }
}

/// Flip one word's known mark. Returns the new state, or `None` when the
/// id is not in the lexicon.
pub fn toggle_known<K: KnownSet + ?Sized>(
    lexicon: &Lexicon,
    known: &mut K,
    id: EntryId,
) -> Option<bool> {
    lexicon.get(id)?;
    if known.remove(id) {
        Some(false)
    } else {
        known.add(id);
        Some(true)
    }
}

fn render_progress<K: KnownSet + ?Sized>(lexicon: &Lexicon, known: &K) {
    let progress = Progress::of(lexicon, known);
    println!(
        "You know {}% of the words ({}/{})",
        progress.percent, progress.known, progress.total
    );
}

fn render_dict<K: KnownSet + ?Sized>(lexicon: &Lexicon, known: &K) {
    for entry in lexicon {
        let mark = if known.contains(entry.id) { "x" } else { " " };
        println!(
            "[{mark}] {:>3}  {}  {}  {}",
            entry.id, entry.written, entry.phonetic, entry.translation
        );
    }
    render_progress(lexicon, known);
}

/// Apply one dictionary command. Returns false once the learner quits.
pub fn handle_dict_command<K: KnownSet + ?Sized>(
    lexicon: &Lexicon,
    known: &mut K,
    command: DictCommand,
) -> bool {
    match command {
        DictCommand::Toggle(id) => match toggle_known(lexicon, known, id) {
            Some(now_known) => {
                tracing::debug!(id, now_known, "toggled known mark");
                if let Some(entry) = lexicon.get(id) {
                    let verb = if now_known { "Marked" } else { "Unmarked" };
                    println!("{verb} {} ({})", entry.written, entry.phonetic);
                }
                render_progress(lexicon, &*known);
            }
            None => println!("No word with ID {id}."),
        },
        DictCommand::List => render_dict(lexicon, &*known),
        DictCommand::Quit => return false,
        DictCommand::Unknown => {
            println!("Type a word ID to toggle it, Enter to list, q to quit.");
        }
    }
    true
}

/// Dictionary loop: list every word and toggle known marks by id.
pub async fn run_dict<K: KnownSet + ?Sized>(
    lexicon: &Lexicon,
    known: &mut K,
    lines: &mut InputLines,
) -> anyhow::Result<()> {
    render_dict(lexicon, &*known);
    while let Some(line) = lines.next_line().await? {
        if !handle_dict_command(lexicon, known, DictCommand::parse(&line)) {
            break;
        }
    }
    Ok(())
}
