use super::Segmenter;
use jieba_rs::Jieba;
use std::sync::Arc;

/// Chinese segmentation backed by `jieba-rs`.
///
/// Building the default dictionary is expensive, so clones share one
/// `Jieba` instance.
#[derive(Clone)]
pub struct JiebaSegmenter {
    jieba: Arc<Jieba>,
    hmm: bool,
}

impl JiebaSegmenter {
    /// Segmenter with the bundled jieba dictionary and HMM enabled for
    /// out-of-vocabulary words.
    pub fn new() -> Self {
        tracing::debug!("Initializing jieba segmenter");
        Self::with_jieba(Arc::new(Jieba::new()))
    }

    /// Wrap an existing instance, e.g. one built from a custom dictionary.
    pub fn with_jieba(jieba: Arc<Jieba>) -> Self {
        Self { jieba, hmm: true }
    }

    /// Toggle HMM recognition of words missing from the dictionary.
    pub fn with_hmm(mut self, hmm: bool) -> Self {
        self.hmm = hmm;
        self
    }
}

impl Default for JiebaSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for JiebaSegmenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JiebaSegmenter").field("hmm", &self.hmm).finish()
    }
}

impl Segmenter for JiebaSegmenter {
    fn name(&self) -> &str {
        "jieba"
    }

    fn segment(&self, text: &str) -> Vec<String> {
        self.jieba
            .cut(text, self.hmm)
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}
