//! Configuration loading and management.
//!
//! [`ExtractorConfig`] carries every tunable threshold of the extraction
//! pipeline plus the locations of the lexical resource files. It can be built in
//! code with the `with_*` setters or loaded from TOML, YAML or JSON.
//!
//! ```rust,no_run
//! use hiword::ExtractorConfig;
//!
//! # fn main() -> hiword::Result<()> {
//! let config = ExtractorConfig::from_toml_file("hiword.toml")?;
//! assert!(config.min_support >= 1);
//! # Ok(())
//! # }
//! ```

use crate::{HiwordError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Minimum occurrences for a word or phrase to count as significant.
pub const DEFAULT_MIN_SUPPORT: u32 = 3;

/// Upper bound on the number of short keywords considered per document.
pub const DEFAULT_MAX_SHORT_KEYWORDS: usize = 500;

/// Candidates scoring below this are dropped from the final ranking.
pub const DEFAULT_MIN_SCORE: f64 = 0.1;

/// Longest phrase, in tokens, counted inside one keyword run.
pub const DEFAULT_MAX_PHRASE_TOKENS: usize = 8;

/// Name of the file searched for by [`ExtractorConfig::discover`].
pub const CONFIG_FILE_NAME: &str = "hiword.toml";

/// Locations of the lexical resource files.
///
/// `dict_path` and `idf_path` are required when loading resources from disk.
/// Without `stopwords_path` the built-in list is used, and without
/// `script_map_path` script normalization is skipped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceConfig {
    /// Background dictionary, `word freq [pos]` per line.
    pub dict_path: Option<PathBuf>,

    /// IDF table, `word idf` per line.
    pub idf_path: Option<PathBuf>,

    /// Stopword file, or a directory whose `*.txt` files are all read.
    pub stopwords_path: Option<PathBuf>,

    /// Traditional to simplified character map, `trad simp` per line.
    pub script_map_path: Option<PathBuf>,
}

/// Keyword extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Minimum occurrence count for short keywords and phrases (default: 3).
    pub min_support: u32,

    /// Maximum number of short keywords selected per document (default: 500).
    pub max_short_keywords: usize,

    /// Longest phrase candidate in tokens (default: 8, at least 2).
    pub max_phrase_tokens: usize,

    /// Minimum relevance score kept in the result (default: 0.1).
    pub min_score: f64,

    /// Largest count difference at which a contained candidate is still pruned
    /// in favour of the longer one (default: 0, exact equality).
    pub subsumption_tolerance: u32,

    /// Truncate the ranked result to this many keywords.
    pub max_keywords: Option<usize>,

    /// Reject documents longer than this many characters (or tokens, for
    /// pre-segmented input).
    pub max_input_chars: Option<usize>,

    /// Words shorter than this many characters are treated as noise when > 1.
    pub min_word_chars: usize,

    /// Map traditional characters to simplified ones before segmentation.
    pub normalize_script: bool,

    /// Replace characters outside the allowed set with spaces before segmentation.
    pub sanitize: bool,

    /// Lexical resource locations.
    pub resources: ResourceConfig,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            min_support: DEFAULT_MIN_SUPPORT,
            max_short_keywords: DEFAULT_MAX_SHORT_KEYWORDS,
            max_phrase_tokens: DEFAULT_MAX_PHRASE_TOKENS,
            min_score: DEFAULT_MIN_SCORE,
            subsumption_tolerance: 0,
            max_keywords: None,
            max_input_chars: None,
            min_word_chars: 1,
            normalize_script: true,
            sanitize: true,
            resources: ResourceConfig::default(),
        }
    }
}

impl ExtractorConfig {
    /// Set the shared minimum support threshold.
    pub fn with_min_support(mut self, min_support: u32) -> Self {
        self.min_support = min_support;
        self
    }

    /// Set the short keyword budget.
    pub fn with_max_short_keywords(mut self, max: usize) -> Self {
        self.max_short_keywords = max;
        self
    }

    /// Set the phrase length cap in tokens.
    pub fn with_max_phrase_tokens(mut self, max: usize) -> Self {
        self.max_phrase_tokens = max;
        self
    }

    /// Set minimum score threshold.
    pub fn with_min_score(mut self, score: f64) -> Self {
        self.min_score = score;
        self
    }

    /// Set the subsumption count tolerance.
    pub fn with_subsumption_tolerance(mut self, tolerance: u32) -> Self {
        self.subsumption_tolerance = tolerance;
        self
    }

    /// Set maximum number of keywords returned.
    pub fn with_max_keywords(mut self, max: usize) -> Self {
        self.max_keywords = Some(max);
        self
    }

    /// Set the input length limit.
    pub fn with_max_input_chars(mut self, max: usize) -> Self {
        self.max_input_chars = Some(max);
        self
    }

    /// Set the minimum word length in characters.
    pub fn with_min_word_chars(mut self, min: usize) -> Self {
        self.min_word_chars = min;
        self
    }

    /// Set resource file locations.
    pub fn with_resources(mut self, resources: ResourceConfig) -> Self {
        self.resources = resources;
        self
    }

    /// Check that the thresholds describe a usable pipeline.
    ///
    /// # Errors
    ///
    /// Returns `HiwordError::Validation` when `min_support` is 0, the short
    /// keyword budget is 0, the phrase cap is below 2 tokens, or `min_score`
    /// is negative or not finite.
    pub fn validate(&self) -> Result<()> {
        if self.min_support == 0 {
            return Err(HiwordError::validation("min_support must be at least 1"));
        }
        if self.max_short_keywords == 0 {
            return Err(HiwordError::validation("max_short_keywords must be at least 1"));
        }
        if self.max_phrase_tokens < 2 {
            return Err(HiwordError::validation(format!(
                "max_phrase_tokens must be at least 2, got {}",
                self.max_phrase_tokens
            )));
        }
        if !self.min_score.is_finite() || self.min_score < 0.0 {
            return Err(HiwordError::validation(format!(
                "min_score must be a non-negative number, got {}",
                self.min_score
            )));
        }
        Ok(())
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `HiwordError::Validation` if the file can't be read and
    /// `HiwordError::Serialization` if it is not valid TOML.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = read_config(path.as_ref())?;

        toml::from_str(&content)
            .map_err(|e| HiwordError::serialization_with_source(format!("Invalid TOML in {}", path.as_ref().display()), e))
    }

    /// Load configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = read_config(path.as_ref())?;

        serde_yaml_ng::from_str(&content)
            .map_err(|e| HiwordError::serialization_with_source(format!("Invalid YAML in {}", path.as_ref().display()), e))
    }

    /// Load configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = read_config(path.as_ref())?;

        serde_json::from_str(&content)
            .map_err(|e| HiwordError::serialization_with_source(format!("Invalid JSON in {}", path.as_ref().display()), e))
    }

    /// Discover configuration file in parent directories.
    ///
    /// Searches for `hiword.toml` in current directory and parent directories.
    pub fn discover() -> Result<Option<Self>> {
        let current = std::env::current_dir().map_err(HiwordError::Io)?;
        Self::discover_from(&current)
    }

    /// Same as [`discover`](Self::discover), starting at `start`.
    pub fn discover_from(start: &Path) -> Result<Option<Self>> {
        let mut current = start.to_path_buf();

        loop {
            let candidate = current.join(CONFIG_FILE_NAME);
            if candidate.exists() {
                tracing::debug!("Using configuration from {}", candidate.display());
                return Ok(Some(Self::from_toml_file(candidate)?));
            }

            if let Some(parent) = current.parent() {
                current = parent.to_path_buf();
            } else {
                break;
            }
        }

        Ok(None)
    }
}

fn read_config(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .map_err(|e| HiwordError::validation(format!("Failed to read config file {}: {}", path.display(), e)))
}
