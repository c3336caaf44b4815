//! The vocabulary list and its text format.
//!
//! # Format
//! ```text
//! # comment
//! ID: 13
//! W: 打电话
//! P: dǎ diànhuà
//! T: звонить по телефону
//! ```
//!
//! Blocks start at an `ID:` line. A non-prefixed line continues the field
//! above it, joined with a single space.

use crate::error::LexiconError;
use crate::types::{EntryId, VocabularyEntry};
use std::collections::HashSet;
use std::sync::Arc;

const HSK1_SOURCE: &str = include_str!("../data/hsk1.txt");

/// Immutable, ordered vocabulary list. Cloning shares the storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexicon {
    entries: Arc<Vec<VocabularyEntry>>,
}

impl Lexicon {
    /// Build from entries. Ids must be positive and unique, and every
    /// field must hold more than whitespace.
    pub fn new(entries: Vec<VocabularyEntry>) -> Result<Self, LexiconError> {
        let mut seen = HashSet::new();
        for (position, entry) in entries.iter().enumerate() {
            if entry.id == 0 {
                return Err(LexiconError::ZeroEntryId { position });
            }
            for (field, value) in [
                ("W", &entry.written),
                ("P", &entry.phonetic),
                ("T", &entry.translation),
            ] {
                if value.trim().is_empty() {
                    return Err(LexiconError::EmptyEntryField { field, position });
                }
            }
            if !seen.insert(entry.id) {
                return Err(LexiconError::DuplicateEntryId {
                    id: entry.id,
                    position,
                });
            }
        }
        Ok(Self {
            entries: Arc::new(entries),
        })
    }

    /// Parse lexicon text.
    pub fn parse(content: &str) -> Result<Self, LexiconError> {
        let mut parser = Parser::new();
        for (idx, line) in content.lines().enumerate() {
            parser.process_line(line, idx + 1)?;
        }
        let entries = parser.finalize()?;
        Ok(Self {
            entries: Arc::new(entries),
        })
    }

    /// The built-in HSK-1 list.
    pub fn hsk1() -> Result<Self, LexiconError> {
        Self::parse(HSK1_SOURCE)
    }

    pub fn entries(&self) -> &[VocabularyEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, VocabularyEntry> {
        self.entries.iter()
    }

    pub fn get(&self, id: EntryId) -> Option<&VocabularyEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Lexicon {
    type Item = &'a VocabularyEntry;
    type IntoIter = std::slice::Iter<'a, VocabularyEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Field {
    Written,
    Phonetic,
    Translation,
}

struct EntryBuilder {
    id: EntryId,
    written: Option<String>,
    phonetic: Option<String>,
    translation: Option<String>,
    start_line: usize,
}

impl EntryBuilder {
    fn new(id: EntryId, start_line: usize) -> Self {
        Self {
            id,
            written: None,
            phonetic: None,
            translation: None,
            start_line,
        }
    }

    fn slot(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Written => &mut self.written,
            Field::Phonetic => &mut self.phonetic,
            Field::Translation => &mut self.translation,
        }
    }

    fn build(self) -> Result<VocabularyEntry, LexiconError> {
        let line = self.start_line;
        let require = |value: Option<String>, field: &'static str| {
            value
                .filter(|v| !v.trim().is_empty())
                .ok_or(LexiconError::MissingField { field, line })
        };

        Ok(VocabularyEntry {
            id: self.id,
            written: require(self.written, "W")?,
            phonetic: require(self.phonetic, "P")?,
            translation: require(self.translation, "T")?,
        })
    }
}

struct Parser {
    current: Option<EntryBuilder>,
    current_field: Option<Field>,
    entries: Vec<VocabularyEntry>,
    seen_ids: HashSet<EntryId>,
}

impl Parser {
    fn new() -> Self {
        Self {
            current: None,
            current_field: None,
            entries: Vec::new(),
            seen_ids: HashSet::new(),
        }
    }

    fn process_line(&mut self, line: &str, line_num: usize) -> Result<(), LexiconError> {
        match Self::parse_line(line) {
            LineType::Id(id_str) => self.handle_id(id_str, line_num)?,
            LineType::Field(field, text) => self.handle_field(field, text, line_num)?,
            LineType::Text(text) => self.handle_text(text, line_num)?,
            LineType::Empty => self.current_field = None,
            LineType::Comment => {}
        }
        Ok(())
    }

    fn parse_line(line: &str) -> LineType<'_> {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            LineType::Empty
        } else if trimmed.starts_with('#') {
            LineType::Comment
        } else if let Some(rest) = trimmed.strip_prefix("ID:") {
            LineType::Id(rest.trim())
        } else if let Some(rest) = trimmed.strip_prefix("W:") {
            LineType::Field(Field::Written, rest.trim())
        } else if let Some(rest) = trimmed.strip_prefix("P:") {
            LineType::Field(Field::Phonetic, rest.trim())
        } else if let Some(rest) = trimmed.strip_prefix("T:") {
            LineType::Field(Field::Translation, rest.trim())
        } else {
            LineType::Text(trimmed)
        }
    }

    fn handle_id(&mut self, id_str: &str, line_num: usize) -> Result<(), LexiconError> {
        self.flush()?;

        let id = id_str
            .parse::<EntryId>()
            .ok()
            .filter(|id| *id > 0)
            .ok_or_else(|| LexiconError::InvalidId {
                line: line_num,
                value: id_str.to_string(),
            })?;

        if !self.seen_ids.insert(id) {
            return Err(LexiconError::DuplicateId { id, line: line_num });
        }

        self.current = Some(EntryBuilder::new(id, line_num));
        self.current_field = None;
        Ok(())
    }

    fn handle_field(&mut self, field: Field, text: &str, line_num: usize) -> Result<(), LexiconError> {
        let builder = self
            .current
            .as_mut()
            .ok_or(LexiconError::OrphanField { line: line_num })?;
        *builder.slot(field) = Some(text.to_string());
        self.current_field = Some(field);
        Ok(())
    }

    fn handle_text(&mut self, text: &str, line_num: usize) -> Result<(), LexiconError> {
        let (Some(builder), Some(field)) = (self.current.as_mut(), self.current_field) else {
            return Err(LexiconError::OrphanField { line: line_num });
        };
        if let Some(existing) = builder.slot(field) {
            if !existing.is_empty() {
                existing.push(' ');
            }
            existing.push_str(text);
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), LexiconError> {
        if let Some(builder) = self.current.take() {
            self.entries.push(builder.build()?);
        }
        Ok(())
    }

    fn finalize(mut self) -> Result<Vec<VocabularyEntry>, LexiconError> {
        self.flush()?;
        Ok(self.entries)
    }
}

enum LineType<'a> {
    Id(&'a str),
    Field(Field, &'a str),
    Text(&'a str),
    Empty,
    Comment,
}
