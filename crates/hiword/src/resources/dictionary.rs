//! Background word frequency dictionary.

use super::{parse_lines, read_resource};
use crate::{HiwordError, Result};
use ahash::AHashMap;
use std::path::Path;

pub(super) const RESOURCE: &str = "dictionary";

#[derive(Debug, Clone, PartialEq, Eq)]
struct DictEntry {
    /// Occurrences in the reference corpus.
    freq: u64,
    pos: Option<String>,
}

/// Word frequencies from a large reference corpus.
///
/// Used as the "commonness" baseline when ranking candidates. Words missing
/// from the dictionary have a background frequency of 0.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    entries: AHashMap<String, DictEntry>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a dictionary file with one `word freq [pos]` record per line.
    ///
    /// # Errors
    ///
    /// Returns `HiwordError::ResourceLoad` if the file can't be read or a line
    /// lacks an integer frequency.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = read_resource(RESOURCE, path.as_ref())?;
        let dictionary = Self::parse(&content)?;

        tracing::info!(
            "Loaded {} dictionary entries from {}",
            dictionary.len(),
            path.as_ref().display()
        );

        Ok(dictionary)
    }

    /// Parse dictionary records from text.
    pub fn parse(content: &str) -> Result<Self> {
        let mut dictionary = Self::new();

        parse_lines(content, |line_no, fields| {
            let word = fields[0];
            let freq = fields
                .get(1)
                .ok_or_else(|| HiwordError::resource_load(RESOURCE, format!("line {}: missing frequency", line_no)))?;
            let freq = freq.parse::<u64>().map_err(|e| {
                HiwordError::resource_load_with_source(
                    RESOURCE,
                    format!("line {}: invalid frequency '{}'", line_no, freq),
                    e,
                )
            })?;

            dictionary.insert(word, freq, fields.get(2).copied());
            Ok(())
        })?;

        Ok(dictionary)
    }

    /// Add or replace a record.
    pub fn insert(&mut self, word: impl Into<String>, freq: u64, pos: Option<&str>) {
        self.entries.insert(
            word.into(),
            DictEntry {
                freq,
                pos: pos.map(str::to_string),
            },
        );
    }

    /// Background frequency of `word`, 0 when absent.
    #[inline]
    pub fn word_freq(&self, word: &str) -> u64 {
        self.entries.get(word).map_or(0, |entry| entry.freq)
    }

    pub fn word_pos(&self, word: &str) -> Option<&str> {
        self.entries.get(word).and_then(|entry| entry.pos.as_deref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
