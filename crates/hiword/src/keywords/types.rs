//! Shared types for keyword extraction.

use ahash::RandomState;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Candidate string to accumulated occurrence count.
///
/// Iteration follows insertion order, which the pipeline uses as its
/// deterministic tie-break between equally scored candidates.
pub type FrequencyMap = IndexMap<String, u32, RandomState>;

/// Extracted keyword with its relevance score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyword {
    /// The word or phrase. Phrases are tokens concatenated without separator.
    pub text: String,

    /// Relevance score, higher is better.
    pub score: f64,

    /// Occurrences of `text` counted during extraction.
    pub count: u32,
}

impl Keyword {
    pub fn new(text: impl Into<String>, score: f64, count: u32) -> Self {
        Self {
            text: text.into(),
            score,
            count,
        }
    }
}

/// One entry of [`KeywordExtractor::extract`](super::KeywordExtractor::extract).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtractedItem {
    Word(String),
    Weighted(Keyword),
}

impl ExtractedItem {
    pub fn text(&self) -> &str {
        match self {
            Self::Word(text) => text,
            Self::Weighted(keyword) => &keyword.text,
        }
    }

    pub fn score(&self) -> Option<f64> {
        match self {
            Self::Word(_) => None,
            Self::Weighted(keyword) => Some(keyword.score),
        }
    }
}

/// Input to extraction: raw text, or tokens that were already segmented.
#[derive(Debug, Clone, PartialEq)]
pub enum Document<'a> {
    /// Normalized, sanitized and segmented before scoring.
    Text(&'a str),

    /// Used as-is apart from trimming; segmentation is skipped.
    Tokens(Vec<&'a str>),
}

impl Document<'_> {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.trim().is_empty(),
            Self::Tokens(tokens) => tokens.iter().all(|t| t.trim().is_empty()),
        }
    }
}

impl<'a> From<&'a str> for Document<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a String> for Document<'a> {
    fn from(text: &'a String) -> Self {
        Self::Text(text.as_str())
    }
}

impl<'a> From<&'a [&'a str]> for Document<'a> {
    fn from(tokens: &'a [&'a str]) -> Self {
        Self::Tokens(tokens.to_vec())
    }
}

impl<'a, const N: usize> From<&'a [&'a str; N]> for Document<'a> {
    fn from(tokens: &'a [&'a str; N]) -> Self {
        Self::Tokens(tokens.to_vec())
    }
}

impl<'a> From<&'a [String]> for Document<'a> {
    fn from(tokens: &'a [String]) -> Self {
        Self::Tokens(tokens.iter().map(String::as_str).collect())
    }
}

impl<'a> From<&'a Vec<String>> for Document<'a> {
    fn from(tokens: &'a Vec<String>) -> Self {
        Self::from(tokens.as_slice())
    }
}

impl<'a> From<Vec<&'a str>> for Document<'a> {
    fn from(tokens: Vec<&'a str>) -> Self {
        Self::Tokens(tokens)
    }
}
