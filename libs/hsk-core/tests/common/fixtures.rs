//! Configurations used across scenario tests.

use hsk_core::{Mode, SessionConfig, Side};

/// Mixed mode, written prompts with phonetic options, five questions.
pub fn written_to_phonetic() -> SessionConfig {
    SessionConfig::new(Mode::Mixed, Side::Written, Side::Phonetic)
        .expect("sides differ")
        .with_questions(5)
}

/// Every ordered pair of distinct sides.
pub fn side_pairs() -> Vec<(Side, Side)> {
    let sides = [Side::Written, Side::Phonetic, Side::Translation];
    sides
        .iter()
        .flat_map(|q| sides.iter().map(move |a| (*q, *a)))
        .filter(|(q, a)| q != a)
        .collect()
}
