//! Word segmentation.
//!
//! Chinese text has no whitespace between words, so raw documents must be cut
//! into tokens before scoring. The extractor only depends on the [`Segmenter`]
//! trait; two implementations ship with the crate:
//!
//! - [`WhitespaceSegmenter`] - splits on whitespace, for text that is already
//!   segmented or for languages that use spaces
//! - [`JiebaSegmenter`] - dictionary and HMM based segmentation via `jieba-rs`
//!   (feature `jieba`, enabled by default)

#[cfg(feature = "jieba")]
mod jieba;

#[cfg(feature = "jieba")]
pub use jieba::JiebaSegmenter;

/// Converts text into an ordered sequence of word tokens.
///
/// Tokens may include whitespace-only entries; the extractor trims every token
/// and drops the empty ones.
pub trait Segmenter: Send + Sync {
    /// Name used in log output.
    fn name(&self) -> &str;

    fn segment(&self, text: &str) -> Vec<String>;
}

/// Splits text on Unicode whitespace.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceSegmenter;

impl Segmenter for WhitespaceSegmenter {
    fn name(&self) -> &str {
        "whitespace"
    }

    fn segment(&self, text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }
}

#[cfg(feature = "jieba")]
static SHARED_JIEBA: once_cell::sync::Lazy<JiebaSegmenter> = once_cell::sync::Lazy::new(JiebaSegmenter::new);

/// The default segmenter for the enabled feature set.
///
/// With `jieba` enabled, every call shares one process-wide dictionary.
pub fn default_segmenter() -> std::sync::Arc<dyn Segmenter> {
    #[cfg(feature = "jieba")]
    return std::sync::Arc::new(SHARED_JIEBA.clone());

    #[cfg(not(feature = "jieba"))]
    return std::sync::Arc::new(WhitespaceSegmenter);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_segmenter() {
        let tokens = WhitespaceSegmenter.segment("人工 智能\t发展\n");
        assert_eq!(tokens, vec!["人工", "智能", "发展"]);
    }

    #[test]
    fn test_whitespace_segmenter_empty() {
        assert!(WhitespaceSegmenter.segment("   ").is_empty());
    }
}
