//! Similarity heuristics used to pick plausible distractors.
//!
//! All functions are pure and deterministic.

use std::collections::HashSet;

const VOWELS: [char; 6] = ['a', 'e', 'i', 'o', 'u', 'ü'];

/// Map a tone-marked vowel to its base letter, keeping case.
fn strip_tone(c: char) -> char {
    match c {
        'ā' | 'á' | 'ǎ' | 'à' => 'a',
        'ē' | 'é' | 'ě' | 'è' => 'e',
        'ī' | 'í' | 'ǐ' | 'ì' => 'i',
        'ō' | 'ó' | 'ǒ' | 'ò' => 'o',
        'ū' | 'ú' | 'ǔ' | 'ù' => 'u',
        'ǖ' | 'ǘ' | 'ǚ' | 'ǜ' => 'ü',
        'Ā' | 'Á' | 'Ǎ' | 'À' => 'A',
        'Ē' | 'É' | 'Ě' | 'È' => 'E',
        'Ī' | 'Í' | 'Ǐ' | 'Ì' => 'I',
        'Ō' | 'Ó' | 'Ǒ' | 'Ò' => 'O',
        'Ū' | 'Ú' | 'Ǔ' | 'Ù' => 'U',
        'Ǖ' | 'Ǘ' | 'Ǚ' | 'Ǜ' => 'Ü',
        other => other,
    }
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '\'' | '’' | '`')
}

/// Strip tone marks, lowercase, drop whitespace and apostrophes.
///
/// `"Běijīng"` and `"bei jing"` both become `"beijing"`.
pub fn normalize_phonetic(s: &str) -> String {
    s.chars()
        .map(strip_tone)
        .flat_map(char::to_lowercase)
        .filter(|c| !is_separator(*c))
        .collect()
}

/// Leading non-vowels plus the first run of vowels of the normalized form,
/// or the whole normalized form when it has no vowel.
pub fn first_syllable(s: &str) -> String {
    let norm = normalize_phonetic(s);
    let is_vowel = |c: &char| VOWELS.contains(c);

    let Some(first_vowel) = norm.char_indices().find(|(_, c)| is_vowel(c)) else {
        return norm;
    };
    let end = norm[first_vowel.0..]
        .char_indices()
        .find(|(_, c)| !is_vowel(c))
        .map(|(idx, _)| first_vowel.0 + idx)
        .unwrap_or(norm.len());

    norm[..end].to_string()
}

fn char_set(s: &str) -> HashSet<char> {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Number of distinct characters the two written forms share.
pub fn shared_written_count(a: &str, b: &str) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    char_set(a).intersection(&char_set(b)).count()
}

fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || ('а'..='я').contains(&c) || c == 'ё'
}

/// Lowercase the gloss and split it into Latin/Cyrillic word tokens.
pub fn tokenize(translation: &str) -> Vec<String> {
    translation
        .to_lowercase()
        .split(|c: char| !is_token_char(c))
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Number of distinct tokens the two glosses share.
pub fn token_overlap(a: &str, b: &str) -> usize {
    let tokens_a: HashSet<String> = tokenize(a).into_iter().collect();
    let tokens_b: HashSet<String> = tokenize(b).into_iter().collect();
    tokens_a.intersection(&tokens_b).count()
}
