//! Noise word filters.
//!
//! A [`WordFilter`] flags candidate words that should never be reported as
//! keywords. Filters compose into a [`WordFilterChain`], which flags a word as
//! soon as any member does. New filters plug in by implementing the trait;
//! existing filters need no changes.
//!
//! ```rust
//! use hiword::filter::{NumericFilter, WordFilter, WordFilterChain};
//!
//! let chain = WordFilterChain::new().with(NumericFilter::new());
//! assert!(chain.is_noise("12345"));
//! assert!(chain.is_noise("3万元"));
//! assert!(!chain.is_noise("人工智能"));
//! ```

mod numeric;

pub use numeric::NumericFilter;

use std::sync::Arc;

/// Predicate over a single candidate word.
pub trait WordFilter: Send + Sync {
    /// Name used in log output.
    fn name(&self) -> &str;

    /// Returns `true` when `word` should be dropped.
    fn is_noise(&self, word: &str) -> bool;
}

/// Flags words shorter than a minimum number of characters.
#[derive(Debug, Clone, Copy)]
pub struct MinLengthFilter {
    min_chars: usize,
}

impl MinLengthFilter {
    pub fn new(min_chars: usize) -> Self {
        Self { min_chars }
    }
}

impl WordFilter for MinLengthFilter {
    fn name(&self) -> &str {
        "min-length"
    }

    fn is_noise(&self, word: &str) -> bool {
        word.chars().count() < self.min_chars
    }
}

/// Ordered composition of filters, short-circuiting on the first match.
#[derive(Clone, Default)]
pub struct WordFilterChain {
    filters: Vec<Arc<dyn WordFilter>>,
}

impl WordFilterChain {
    /// An empty chain flags nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a filter.
    pub fn with<F: WordFilter + 'static>(mut self, filter: F) -> Self {
        self.filters.push(Arc::new(filter));
        self
    }

    /// Append a shared filter.
    pub fn push(&mut self, filter: Arc<dyn WordFilter>) {
        self.filters.push(filter);
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Names of the member filters in evaluation order.
    pub fn names(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.name()).collect()
    }
}

impl WordFilter for WordFilterChain {
    fn name(&self) -> &str {
        "chain"
    }

    fn is_noise(&self, word: &str) -> bool {
        self.filters.iter().any(|f| f.is_noise(word))
    }
}

impl std::fmt::Debug for WordFilterChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WordFilterChain").field("filters", &self.names()).finish()
    }
}
