//! Keyword extraction.
//!
//! [`KeywordExtractor`] runs the full pipeline over one document:
//!
//! 1. Pre-process raw text (script normalization, sanitization) and segment it,
//!    or take caller-supplied tokens as-is.
//! 2. Select short keywords by `occurrences * idf` ([`selector`]).
//! 3. Detect recurring phrases built from runs of short keywords ([`phrase`]).
//! 4. Merge both, drop noise words, score against background frequencies,
//!    prune subsumed candidates and apply the score cutoff ([`ranker`]).
//!
//! Each call builds its own frequency maps; the only shared state is the
//! read-only [`Lexicon`], so one extractor can serve many threads.
//!
//! # Examples
//!
//! ```rust
//! use hiword::keywords::{Document, KeywordExtractor};
//! use hiword::resources::LexicalResources;
//! use std::sync::Arc;
//!
//! # fn main() -> hiword::Result<()> {
//! let resources = Arc::new(LexicalResources::builder().word("发展", 80_000).build());
//! let extractor = KeywordExtractor::new(resources);
//!
//! let tokens = ["人工", "智能", "人工", "智能", "人工", "智能", "发展"];
//! let keywords = extractor.extract_keywords(&tokens)?;
//!
//! assert_eq!(keywords[0].text, "人工智能");
//! assert_eq!(keywords[0].count, 3);
//! # Ok(())
//! # }
//! ```

pub mod phrase;
pub mod ranker;
pub mod selector;
pub mod types;

pub use types::{Document, ExtractedItem, FrequencyMap, Keyword};

use crate::core::config::ExtractorConfig;
use crate::filter::{MinLengthFilter, NumericFilter, WordFilter, WordFilterChain};
use crate::resources::{LexicalResources, Lexicon};
use crate::segment::{Segmenter, default_segmenter};
use crate::text::{ScriptNormalizer, sanitize};
use crate::{HiwordError, Result};
use rayon::prelude::*;
use std::borrow::Cow;
use std::sync::Arc;

/// The filter chain implied by `config`: numeric noise, plus a minimum
/// length when `min_word_chars > 1`.
pub fn default_filters(config: &ExtractorConfig) -> WordFilterChain {
    let chain = WordFilterChain::new().with(NumericFilter::new());
    if config.min_word_chars > 1 {
        chain.with(MinLengthFilter::new(config.min_word_chars))
    } else {
        chain
    }
}

/// Extracts ranked keywords and phrases from documents.
#[derive(Clone)]
pub struct KeywordExtractor {
    config: ExtractorConfig,
    lexicon: Arc<dyn Lexicon>,
    segmenter: Arc<dyn Segmenter>,
    filters: WordFilterChain,
    custom_filters: bool,
    appended_filters: Vec<Arc<dyn WordFilter>>,
    normalizer: Option<Arc<ScriptNormalizer>>,
}

impl KeywordExtractor {
    /// Extractor with the default configuration and segmenter.
    pub fn new(lexicon: Arc<dyn Lexicon>) -> Self {
        let config = ExtractorConfig::default();
        Self {
            filters: default_filters(&config),
            config,
            lexicon,
            segmenter: default_segmenter(),
            custom_filters: false,
            appended_filters: Vec::new(),
            normalizer: None,
        }
    }

    /// Load the resources named in `config` and build an extractor over them.
    ///
    /// # Errors
    ///
    /// Returns `HiwordError::Validation` for invalid thresholds and
    /// `HiwordError::ResourceLoad` when a configured file can't be loaded.
    pub fn from_config(config: ExtractorConfig) -> Result<Self> {
        config.validate()?;

        let resources = LexicalResources::load(&config.resources)?;
        let normalizer = config
            .resources
            .script_map_path
            .as_ref()
            .map(ScriptNormalizer::from_path)
            .transpose()?;

        let mut extractor = Self::new(Arc::new(resources)).with_config(config)?;
        extractor.normalizer = normalizer.map(Arc::new);
        Ok(extractor)
    }

    /// Replace the configuration.
    ///
    /// The default filter chain is rebuilt from the new configuration unless
    /// custom filters were installed with [`with_filters`](Self::with_filters).
    /// Filters added with [`with_filter`](Self::with_filter) are kept after
    /// the rebuilt defaults.
    pub fn with_config(mut self, config: ExtractorConfig) -> Result<Self> {
        config.validate()?;
        if !self.custom_filters {
            let mut filters = default_filters(&config);
            for filter in &self.appended_filters {
                filters.push(Arc::clone(filter));
            }
            self.filters = filters;
        }
        self.config = config;
        Ok(self)
    }

    pub fn with_segmenter(mut self, segmenter: Arc<dyn Segmenter>) -> Self {
        self.segmenter = segmenter;
        self
    }

    /// Replace the whole filter chain.
    pub fn with_filters(mut self, filters: WordFilterChain) -> Self {
        self.filters = filters;
        self.custom_filters = true;
        self.appended_filters.clear();
        self
    }

    /// Append one filter to the current chain.
    pub fn with_filter<F: WordFilter + 'static>(mut self, filter: F) -> Self {
        let filter: Arc<dyn WordFilter> = Arc::new(filter);
        self.filters.push(Arc::clone(&filter));
        if !self.custom_filters {
            self.appended_filters.push(filter);
        }
        self
    }

    pub fn with_normalizer(mut self, normalizer: Arc<ScriptNormalizer>) -> Self {
        self.normalizer = Some(normalizer);
        self
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    pub fn lexicon(&self) -> &Arc<dyn Lexicon> {
        &self.lexicon
    }

    /// Ranked keywords with scores, best first.
    ///
    /// Empty or whitespace-only documents yield an empty list.
    pub fn extract_keywords<'a>(&self, doc: impl Into<Document<'a>>) -> Result<Vec<Keyword>> {
        let doc = doc.into();
        let tokens = self.prepare_tokens(&doc)?;
        let candidates = self.candidate_counts(&tokens);

        let ranked = ranker::finalize_ranking(
            ranker::score_candidates(&candidates, self.lexicon.as_ref()),
            self.config.subsumption_tolerance,
            self.config.min_score,
        );
        tracing::debug!("Ranked {} keyword(s)", ranked.len());

        Ok(self.truncate(ranked))
    }

    /// Ranked keywords without scores, best first.
    pub fn extract_words<'a>(&self, doc: impl Into<Document<'a>>) -> Result<Vec<String>> {
        Ok(self.extract_keywords(doc)?.into_iter().map(|k| k.text).collect())
    }

    /// Ranked keywords, with scores attached when `with_weight` is set.
    pub fn extract<'a>(&self, doc: impl Into<Document<'a>>, with_weight: bool) -> Result<Vec<ExtractedItem>> {
        let keywords = self.extract_keywords(doc)?;
        Ok(keywords
            .into_iter()
            .map(|k| {
                if with_weight {
                    ExtractedItem::Weighted(k)
                } else {
                    ExtractedItem::Word(k.text)
                }
            })
            .collect())
    }

    /// Keywords ranked across several documents.
    ///
    /// Each document is analysed independently (in parallel); candidate counts
    /// are then summed and each candidate is weighted by how many documents
    /// contain it:
    ///
    /// ```text
    /// score = f / (f + background) * log2(f + 1) * log2(df + 1) * log2(1 + N / df)
    /// ```
    pub fn extract_corpus_keywords(&self, docs: &[Document<'_>]) -> Result<Vec<Keyword>> {
        let per_doc: Vec<FrequencyMap> = docs
            .par_iter()
            .map(|doc| self.prepare_tokens(doc).map(|tokens| self.candidate_counts(&tokens)))
            .collect::<Result<_>>()?;

        let mut totals: indexmap::IndexMap<String, (u32, u32), ahash::RandomState> = Default::default();
        for counts in per_doc {
            for (word, count) in counts {
                let entry = totals.entry(word).or_insert((0, 0));
                entry.0 += count;
                entry.1 += 1;
            }
        }

        let scored = totals
            .into_iter()
            .map(|(word, (freq, doc_freq))| {
                let background = self.lexicon.background_freq(&word);
                let score = ranker::corpus_score(freq, doc_freq, docs.len(), background);
                Keyword::new(word, score, freq)
            })
            .collect();

        let ranked = ranker::finalize_ranking(scored, self.config.subsumption_tolerance, self.config.min_score);
        tracing::debug!("Ranked {} corpus keyword(s) over {} document(s)", ranked.len(), docs.len());

        Ok(self.truncate(ranked))
    }

    /// Merged, noise-filtered short keyword and phrase counts for one document.
    fn candidate_counts<S: AsRef<str>>(&self, tokens: &[S]) -> FrequencyMap {
        if tokens.is_empty() {
            return FrequencyMap::default();
        }

        let short = selector::select_short_keywords(
            tokens,
            self.lexicon.as_ref(),
            self.config.min_support,
            self.config.max_short_keywords,
        );
        let phrases = phrase::detect_phrases(
            tokens,
            &short,
            self.config.min_support,
            self.config.max_phrase_tokens,
        );

        tracing::debug!(
            tokens = tokens.len(),
            short_keywords = short.len(),
            phrases = phrases.len(),
            "Collected keyword candidates"
        );

        ranker::merge_candidates(short, phrases, &self.filters)
    }

    fn prepare_tokens<'a>(&self, doc: &Document<'a>) -> Result<Vec<Cow<'a, str>>> {
        if doc.is_empty() {
            return Ok(Vec::new());
        }

        match doc {
            Document::Text(text) => {
                self.check_input_len(text.chars().count(), "characters")?;

                let mut prepared: Cow<'_, str> = Cow::Borrowed(*text);
                if self.config.normalize_script
                    && let Some(normalizer) = &self.normalizer
                {
                    prepared = Cow::Owned(normalizer.normalize(&prepared).into_owned());
                }
                if self.config.sanitize {
                    prepared = Cow::Owned(sanitize(&prepared).into_owned());
                }

                if prepared.trim().is_empty() {
                    return Ok(Vec::new());
                }

                Ok(self
                    .segmenter
                    .segment(&prepared)
                    .into_iter()
                    .filter_map(trim_owned)
                    .map(Cow::Owned)
                    .collect())
            }
            Document::Tokens(tokens) => {
                self.check_input_len(tokens.len(), "tokens")?;

                Ok(tokens
                    .iter()
                    .map(|&t| t.trim())
                    .filter(|t| !t.is_empty())
                    .map(Cow::Borrowed)
                    .collect())
            }
        }
    }

    fn check_input_len(&self, len: usize, unit: &str) -> Result<()> {
        match self.config.max_input_chars {
            Some(max) if len > max => Err(HiwordError::validation(format!(
                "document has {} {}, limit is {}",
                len, unit, max
            ))),
            _ => Ok(()),
        }
    }

    fn truncate(&self, mut ranked: Vec<Keyword>) -> Vec<Keyword> {
        if let Some(max) = self.config.max_keywords {
            ranked.truncate(max);
        }
        ranked
    }
}

impl std::fmt::Debug for KeywordExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeywordExtractor")
            .field("config", &self.config)
            .field("segmenter", &self.segmenter.name())
            .field("filters", &self.filters)
            .field("normalizer", &self.normalizer.is_some())
            .finish()
    }
}

fn trim_owned(token: String) -> Option<String> {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == token.len() {
        Some(token)
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::WhitespaceSegmenter;

    fn extractor() -> KeywordExtractor {
        let resources = LexicalResources::builder()
            .word("发展", 50_000)
            .idf("人工", 9.0)
            .idf("智能", 8.0)
            .idf("发展", 3.0)
            .stopwords(["的", "了"])
            .build();
        KeywordExtractor::new(Arc::new(resources)).with_segmenter(Arc::new(WhitespaceSegmenter))
    }

    #[test]
    fn test_phrase_subsumes_its_parts() {
        let tokens = ["人工", "智能", "人工", "智能", "人工", "智能", "发展"];
        let keywords = extractor().extract_keywords(&tokens).unwrap();

        let texts: Vec<&str> = keywords.iter().map(|k| k.text.as_str()).collect();
        assert_eq!(texts, vec!["人工智能"]);
        assert_eq!(keywords[0].count, 3);
    }

    #[test]
    fn test_empty_document() {
        let extractor = extractor();
        assert!(extractor.extract_keywords("").unwrap().is_empty());
        assert!(extractor.extract_keywords("   \n").unwrap().is_empty());
        assert!(extractor.extract_keywords(Vec::<&str>::new()).unwrap().is_empty());
    }

    #[test]
    fn test_text_input_is_segmented() {
        let text = "人工 智能 的 人工 智能 了 人工 智能";
        let words = extractor().extract_words(text).unwrap();
        assert_eq!(words, vec!["人工智能"]);
    }

    #[test]
    fn test_whitespace_tokens_are_dropped() {
        let tokens = ["人工", " ", "智能", "人工", "\t", "智能", "人工", "智能"];
        let words = extractor().extract_words(&tokens).unwrap();
        assert_eq!(words, vec!["人工智能"]);
    }

    #[test]
    fn test_extract_with_and_without_weight() {
        let tokens = ["人工", "智能", "人工", "智能", "人工", "智能"];
        let extractor = extractor();

        let plain = extractor.extract(&tokens, false).unwrap();
        assert_eq!(plain, vec![ExtractedItem::Word("人工智能".to_string())]);

        let weighted = extractor.extract(&tokens, true).unwrap();
        assert!(weighted[0].score().unwrap() > 0.0);
    }

    #[test]
    fn test_max_keywords_truncates() {
        let tokens = ["区块链", "区块链", "区块链", "的", "元宇宙", "元宇宙", "元宇宙"];
        let extractor = extractor()
            .with_config(ExtractorConfig::default().with_max_keywords(1))
            .unwrap();

        assert_eq!(extractor.extract_keywords(&tokens).unwrap().len(), 1);
    }

    #[test]
    fn test_input_limit() {
        let extractor = extractor()
            .with_config(ExtractorConfig::default().with_max_input_chars(4))
            .unwrap();

        let err = extractor.extract_keywords("人工智能发展").unwrap_err();
        assert!(matches!(err, HiwordError::Validation { .. }));
        assert!(extractor.extract_keywords("人工智能").is_ok());
    }

    #[test]
    fn test_with_config_rejects_invalid() {
        assert!(extractor().with_config(ExtractorConfig::default().with_min_support(0)).is_err());
    }

    #[test]
    fn test_min_word_chars_rebuilds_filters() {
        let tokens = ["云", "云", "云", "的"];
        let default = extractor();
        assert_eq!(default.extract_words(&tokens).unwrap(), vec!["云"]);

        let strict = extractor()
            .with_config(ExtractorConfig::default().with_min_word_chars(2))
            .unwrap();
        assert!(strict.extract_words(&tokens).unwrap().is_empty());
    }

    #[test]
    fn test_custom_filters_survive_config_change() {
        let extractor = extractor()
            .with_filters(WordFilterChain::new())
            .with_config(ExtractorConfig::default())
            .unwrap();

        let tokens = ["2024", "2024", "2024"];
        assert_eq!(extractor.extract_words(&tokens).unwrap(), vec!["2024"]);
    }

    struct Block(&'static str);

    impl WordFilter for Block {
        fn name(&self) -> &str {
            "block"
        }

        fn is_noise(&self, word: &str) -> bool {
            word == self.0
        }
    }

    #[test]
    fn test_appended_filter_survives_config_change() {
        let tokens = ["区块链", "区块链", "区块链", "的", "云", "云", "云"];
        let extractor = extractor().with_filter(Block("区块链"));
        assert_eq!(extractor.extract_words(&tokens).unwrap(), vec!["云"]);

        let extractor = extractor
            .with_config(ExtractorConfig::default().with_min_word_chars(2))
            .unwrap();
        assert!(extractor.extract_words(&tokens).unwrap().is_empty());

        let extractor = extractor.with_config(ExtractorConfig::default()).unwrap();
        assert_eq!(extractor.extract_words(&tokens).unwrap(), vec!["云"]);
    }

    #[test]
    fn test_with_filters_drops_appended_filters() {
        let tokens = ["区块链", "区块链", "区块链"];
        let extractor = extractor()
            .with_filter(Block("区块链"))
            .with_filters(WordFilterChain::new())
            .with_config(ExtractorConfig::default())
            .unwrap();

        assert_eq!(extractor.extract_words(&tokens).unwrap(), vec!["区块链"]);
    }

    #[test]
    fn test_equal_scores_keep_first_occurrence_order() {
        let forward = ["区块链", "的", "元宇宙", "的", "区块链", "的", "元宇宙", "的", "区块链", "的", "元宇宙"];
        assert_eq!(extractor().extract_words(&forward).unwrap(), vec!["区块链", "元宇宙"]);

        let backward = ["元宇宙", "的", "区块链", "的", "元宇宙", "的", "区块链", "的", "元宇宙", "的", "区块链"];
        assert_eq!(extractor().extract_words(&backward).unwrap(), vec!["元宇宙", "区块链"]);
    }

    #[test]
    fn test_phrase_cap_limits_candidates() {
        let tokens = ["人工", "智能", "技术", "的", "人工", "智能", "技术", "的", "人工", "智能", "技术"];
        assert_eq!(extractor().extract_words(&tokens).unwrap(), vec!["人工智能技术"]);

        let capped = extractor()
            .with_config(ExtractorConfig::default().with_max_phrase_tokens(2))
            .unwrap();
        let mut words = capped.extract_words(&tokens).unwrap();
        words.sort();
        assert_eq!(words, vec!["人工智能", "智能技术"]);
    }

    #[test]
    fn test_normalizer_applies_to_text() {
        let normalizer = ScriptNormalizer::from_pairs([('網', '网'), ('絡', '络')]);
        let extractor = extractor().with_normalizer(Arc::new(normalizer));

        let words = extractor.extract_words("網絡 網絡 网络").unwrap();
        assert_eq!(words, vec!["网络"]);
    }

    #[test]
    fn test_corpus_extraction() {
        let a = ["人工", "智能", "人工", "智能", "人工", "智能"];
        let b = ["区块链", "区块链", "区块链"];
        let docs = vec![Document::from(&a), Document::from(&b)];

        let keywords = extractor().extract_corpus_keywords(&docs).unwrap();
        let texts: Vec<&str> = keywords.iter().map(|k| k.text.as_str()).collect();
        assert!(texts.contains(&"人工智能"));
        assert!(texts.contains(&"区块链"));
        assert!(!texts.contains(&"人工"));
    }

    #[test]
    fn test_corpus_extraction_empty() {
        assert!(extractor().extract_corpus_keywords(&[]).unwrap().is_empty());
    }
}
