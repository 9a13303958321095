//! Lexical resources consumed by keyword extraction.
//!
//! Three read-only tables drive the scoring:
//! - [`Dictionary`] - background word frequencies from a reference corpus
//! - [`IdfTable`] - inverse document frequency weights, median fallback for unknown words
//! - [`StopwordSet`] - words never selected as keywords
//!
//! The extractor reads them through the [`Lexicon`] trait, so tests and callers
//! with their own data sources can substitute any implementation.
//!
//! Resources are loaded once and shared behind an `Arc`. Construct them
//! explicitly with [`LexicalResources::load`] or [`LexicalResources::builder`],
//! or wrap the configuration in [`LazyResources`] to defer the load to first
//! use. Concurrent first use triggers exactly one load.
//!
//! # Example
//!
//! ```rust
//! use hiword::resources::{LexicalResources, Lexicon};
//!
//! let resources = LexicalResources::builder()
//!     .word("发展", 52_000)
//!     .idf("人工", 9.2)
//!     .idf("智能", 8.7)
//!     .stopwords(["的", "了"])
//!     .build();
//!
//! assert_eq!(resources.background_freq("发展"), 52_000);
//! assert_eq!(resources.background_freq("人工智能"), 0);
//! assert!(resources.is_stopword("的"));
//! ```

mod dictionary;
mod idf;
mod stopwords;

pub use dictionary::Dictionary;
pub use idf::IdfTable;
pub use stopwords::StopwordSet;

use crate::core::config::ResourceConfig;
use crate::{HiwordError, Result};
use ahash::AHashSet;
use once_cell::sync::OnceCell;
use std::path::Path;
use std::sync::Arc;

/// IDF weight given to every word by a builder without IDF entries.
pub const UNIFORM_IDF: f64 = 1.0;

/// Read-only lookups the extraction pipeline needs.
///
/// Implementations must be cheap to call and safe to share across threads.
/// None of the methods fail: unknown words fall back to defined values.
pub trait Lexicon: Send + Sync {
    /// Occurrences of `word` in the reference corpus, 0 when absent.
    fn background_freq(&self, word: &str) -> u64;

    /// IDF weight of `word`, or a fallback weight when unknown.
    fn idf(&self, word: &str) -> f64;

    /// The stopword set as of this call.
    ///
    /// Extraction takes one snapshot per call and checks every token against
    /// it, so a concurrent stopword edit is seen entirely or not at all.
    fn stopword_snapshot(&self) -> Arc<AHashSet<String>>;

    fn is_stopword(&self, word: &str) -> bool {
        self.stopword_snapshot().contains(word)
    }
}

/// The dictionary, IDF and stopword tables loaded together.
#[derive(Debug, Clone)]
pub struct LexicalResources {
    dictionary: Dictionary,
    idf: IdfTable,
    stopwords: StopwordSet,
}

impl LexicalResources {
    pub fn new(dictionary: Dictionary, idf: IdfTable, stopwords: StopwordSet) -> Self {
        Self {
            dictionary,
            idf,
            stopwords,
        }
    }

    pub fn builder() -> LexicalResourcesBuilder {
        LexicalResourcesBuilder::default()
    }

    /// Load every configured table from disk.
    ///
    /// The dictionary and IDF table are required. Without `stopwords_path`
    /// the built-in stopword list is used.
    ///
    /// # Errors
    ///
    /// Returns `HiwordError::ResourceLoad` if the dictionary or IDF path is
    /// not configured, or if a configured file is missing or malformed. The
    /// caller should treat the resources as unavailable rather than fall back
    /// to empty tables.
    pub fn load(config: &ResourceConfig) -> Result<Self> {
        let dict_path = required_path(config.dict_path.as_deref(), dictionary::RESOURCE, "dict_path")?;
        let idf_path = required_path(config.idf_path.as_deref(), idf::RESOURCE, "idf_path")?;

        let dictionary = Dictionary::from_path(dict_path)?;
        let idf = IdfTable::from_path(idf_path)?;
        let stopwords = match &config.stopwords_path {
            Some(path) => StopwordSet::from_path(path)?,
            None => {
                tracing::debug!("No stopword path configured, using the built-in list");
                StopwordSet::builtin()
            }
        };

        Ok(Self::new(dictionary, idf, stopwords))
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn idf_table(&self) -> &IdfTable {
        &self.idf
    }

    pub fn stopwords(&self) -> &StopwordSet {
        &self.stopwords
    }

    /// IDF weight of `word` (median fallback for unknown words).
    pub fn word_idf(&self, word: &str) -> f64 {
        self.idf.weight(word)
    }

    /// Part-of-speech tag recorded in the dictionary.
    pub fn word_pos(&self, word: &str) -> Option<&str> {
        self.dictionary.word_pos(word)
    }

    /// Administrative removal of a stopword; see [`StopwordSet`] for the
    /// concurrency guarantees.
    pub fn remove_stopword(&self, word: &str) -> bool {
        self.stopwords.remove_stopword(word)
    }
}

impl Lexicon for LexicalResources {
    #[inline]
    fn background_freq(&self, word: &str) -> u64 {
        self.dictionary.word_freq(word)
    }

    #[inline]
    fn idf(&self, word: &str) -> f64 {
        self.idf.weight(word)
    }

    fn stopword_snapshot(&self) -> Arc<AHashSet<String>> {
        self.stopwords.snapshot()
    }

    #[inline]
    fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }
}

impl<L: Lexicon + ?Sized> Lexicon for Arc<L> {
    fn background_freq(&self, word: &str) -> u64 {
        (**self).background_freq(word)
    }

    fn idf(&self, word: &str) -> f64 {
        (**self).idf(word)
    }

    fn stopword_snapshot(&self) -> Arc<AHashSet<String>> {
        (**self).stopword_snapshot()
    }

    fn is_stopword(&self, word: &str) -> bool {
        (**self).is_stopword(word)
    }
}

/// In-memory construction of [`LexicalResources`].
#[derive(Debug, Default)]
pub struct LexicalResourcesBuilder {
    dictionary: Dictionary,
    idf: Vec<(String, f64)>,
    idf_fallback: Option<f64>,
    stopwords: Vec<String>,
}

impl LexicalResourcesBuilder {
    /// Add a background frequency record.
    pub fn word(mut self, word: impl Into<String>, freq: u64) -> Self {
        self.dictionary.insert(word, freq, None);
        self
    }

    /// Add a background frequency record with a part-of-speech tag.
    pub fn word_with_pos(mut self, word: impl Into<String>, freq: u64, pos: &str) -> Self {
        self.dictionary.insert(word, freq, Some(pos));
        self
    }

    pub fn idf(mut self, word: impl Into<String>, weight: f64) -> Self {
        self.idf.push((word.into(), weight));
        self
    }

    /// Override the weight used for words missing from the IDF table.
    pub fn idf_fallback(mut self, weight: f64) -> Self {
        self.idf_fallback = Some(weight);
        self
    }

    pub fn stopwords<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stopwords.extend(words.into_iter().map(Into::into));
        self
    }

    /// Build the resources. Without IDF entries every word weighs
    /// [`UNIFORM_IDF`]; with entries the fallback is their median unless
    /// overridden.
    pub fn build(self) -> LexicalResources {
        let idf = match IdfTable::from_weights(self.idf) {
            Ok(table) => match self.idf_fallback {
                Some(fallback) => table.with_fallback(fallback),
                None => table,
            },
            Err(_) => IdfTable::uniform(self.idf_fallback.unwrap_or(UNIFORM_IDF)),
        };

        LexicalResources::new(self.dictionary, idf, StopwordSet::from_words(self.stopwords))
    }
}

/// Resources loaded on first use.
///
/// `get_or_load` runs [`LexicalResources::load`] at most once successfully;
/// concurrent callers block until that load finishes and then share the same
/// `Arc`. A failed load is reported to the caller that triggered it and
/// attempted again on the next call.
#[derive(Debug)]
pub struct LazyResources {
    config: ResourceConfig,
    cell: OnceCell<Arc<LexicalResources>>,
}

impl LazyResources {
    pub fn new(config: ResourceConfig) -> Self {
        Self {
            config,
            cell: OnceCell::new(),
        }
    }

    pub fn get_or_load(&self) -> Result<Arc<LexicalResources>> {
        self.cell
            .get_or_try_init(|| {
                tracing::debug!("Loading lexical resources on first use");
                LexicalResources::load(&self.config).map(Arc::new)
            })
            .cloned()
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }
}

fn required_path<'a>(path: Option<&'a Path>, resource: &str, key: &str) -> Result<&'a Path> {
    path.ok_or_else(|| HiwordError::resource_load(resource, format!("no `{}` configured", key)))
}

pub(crate) fn read_resource(resource: &str, path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        HiwordError::resource_load_with_source(resource, format!("cannot read {}", path.display()), e)
    })
}

/// Feed each non-blank line, split on whitespace, to `handle` with its
/// 1-based line number.
pub(crate) fn parse_lines<F>(content: &str, mut handle: F) -> Result<()>
where
    F: FnMut(usize, &[&str]) -> Result<()>,
{
    let mut fields = Vec::with_capacity(3);
    for (idx, line) in content.lines().enumerate() {
        fields.clear();
        fields.extend(line.split_whitespace());
        if fields.is_empty() {
            continue;
        }
        handle(idx + 1, &fields)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::tempdir;

    fn config_with_tables(dir: &Path) -> ResourceConfig {
        let dict_path = dir.join("dict.txt");
        let idf_path = dir.join("idf.txt");
        fs::write(&dict_path, "发展 100\n").unwrap();
        fs::write(&idf_path, "人工 9.0\n智能 8.0\n").unwrap();
        ResourceConfig {
            dict_path: Some(dict_path),
            idf_path: Some(idf_path),
            ..Default::default()
        }
    }

    #[test]
    fn test_builder_defaults() {
        let resources = LexicalResources::builder().build();
        assert_eq!(resources.idf("任何"), UNIFORM_IDF);
        assert_eq!(resources.background_freq("任何"), 0);
        assert!(!resources.is_stopword("的"));
    }

    #[test]
    fn test_builder_idf_median_fallback() {
        let resources = LexicalResources::builder()
            .idf("a", 1.0)
            .idf("b", 2.0)
            .idf("c", 9.0)
            .build();
        assert_eq!(resources.word_idf("unknown"), 2.0);
    }

    #[test]
    fn test_builder_idf_fallback_override() {
        let resources = LexicalResources::builder().idf("a", 1.0).idf_fallback(7.5).build();
        assert_eq!(resources.word_idf("a"), 1.0);
        assert_eq!(resources.word_idf("b"), 7.5);
    }

    #[test]
    fn test_word_pos_lookup() {
        let resources = LexicalResources::builder().word_with_pos("发展", 100, "vn").build();
        assert_eq!(resources.word_pos("发展"), Some("vn"));
    }

    #[test]
    fn test_load_requires_dictionary_and_idf() {
        let err = LexicalResources::load(&ResourceConfig::default()).unwrap_err();
        assert!(err.is_resource_error());
        assert!(err.to_string().contains("dict_path"), "{}", err);

        let dir = tempdir().unwrap();
        let dict_path = dir.path().join("dict.txt");
        fs::write(&dict_path, "发展 100\n").unwrap();
        let err = LexicalResources::load(&ResourceConfig {
            dict_path: Some(dict_path),
            ..Default::default()
        })
        .unwrap_err();
        assert!(err.to_string().contains("idf_path"), "{}", err);
    }

    #[test]
    fn test_load_without_stopword_path_uses_builtin() {
        let dir = tempdir().unwrap();
        let resources = LexicalResources::load(&config_with_tables(dir.path())).unwrap();
        assert!(resources.is_stopword("的"));
        assert_eq!(resources.background_freq("发展"), 100);
        assert_eq!(resources.idf("未知"), 9.0, "upper median of 8.0 and 9.0");
    }

    #[test]
    fn test_load_missing_file_fails() {
        let config = ResourceConfig {
            idf_path: Some("/nonexistent/idf.txt".into()),
            ..Default::default()
        };
        let err = LexicalResources::load(&config).unwrap_err();
        assert!(err.is_resource_error());
    }

    #[test]
    fn test_remove_stopword_through_resources() {
        let resources = LexicalResources::builder().stopwords(["的"]).build();
        assert!(resources.remove_stopword("的"));
        assert!(!resources.is_stopword("的"));
    }

    #[test]
    fn test_lazy_resources_load_once() {
        let dir = tempdir().unwrap();
        let lazy = LazyResources::new(config_with_tables(dir.path()));
        assert!(!lazy.is_loaded());

        let first = lazy.get_or_load().unwrap();
        let second = lazy.get_or_load().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(lazy.is_loaded());
    }

    #[test]
    fn test_lazy_resources_concurrent_first_use() {
        let dir = tempdir().unwrap();
        let lazy = Arc::new(LazyResources::new(config_with_tables(dir.path())));
        let loaded = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let lazy = Arc::clone(&lazy);
                let loaded = Arc::clone(&loaded);
                std::thread::spawn(move || {
                    let resources = lazy.get_or_load().unwrap();
                    loaded.fetch_add(1, Ordering::SeqCst);
                    Arc::as_ptr(&resources) as usize
                })
            })
            .collect();

        let pointers: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(loaded.load(Ordering::SeqCst), 8);
        assert!(pointers.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_lazy_resources_failed_load_is_retried() {
        let lazy = LazyResources::new(ResourceConfig {
            dict_path: Some("/nonexistent/dict.txt".into()),
            ..Default::default()
        });
        assert!(lazy.get_or_load().is_err());
        assert!(!lazy.is_loaded());
        assert!(lazy.get_or_load().is_err());
    }

    #[test]
    fn test_parse_lines_reports_line_numbers() {
        let mut seen = Vec::new();
        parse_lines("a 1\n\nb 2\n", |line_no, fields| {
            seen.push((line_no, fields[0].to_string()));
            Ok(())
        })
        .unwrap();
        assert_eq!(seen, vec![(1, "a".to_string()), (3, "b".to_string())]);
    }
}
