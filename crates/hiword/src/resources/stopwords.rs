//! Stopword sets.
//!
//! A [`StopwordSet`] is read on every extraction call and mutated only by the
//! administrative `add_*`/`remove_*` operations. Mutation clones the current
//! set, edits the clone and swaps it in under a write lock, so a concurrent
//! reader sees either the old set or the new one, never a half-edited table.
//! Extraction takes one [`snapshot`](StopwordSet::snapshot) per call and
//! checks every token against that `Arc` without touching the lock again.

use super::read_resource;
use crate::{HiwordError, Result};
use ahash::AHashSet;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const RESOURCE: &str = "stopwords";

/// Built-in Chinese stopword list, embedded at compile time.
static BUILTIN_STOPWORDS: Lazy<Arc<AHashSet<String>>> = Lazy::new(|| {
    const JSON: &str = include_str!("../../data/stopwords/zh_stopwords.json");
    match serde_json::from_str::<Vec<String>>(JSON) {
        Ok(words) => Arc::new(words.into_iter().collect()),
        Err(e) => {
            panic!(
                "Failed to parse embedded Chinese stopwords: {}. \
                This indicates corrupted JSON in the embedded stopword data.",
                e
            );
        }
    }
});

/// Set of words excluded from keyword selection.
#[derive(Debug)]
pub struct StopwordSet {
    words: RwLock<Arc<AHashSet<String>>>,
}

impl StopwordSet {
    /// An empty set: nothing is a stopword.
    pub fn empty() -> Self {
        Self::from_set(AHashSet::new())
    }

    /// The embedded Chinese stopword list.
    pub fn builtin() -> Self {
        Self {
            words: RwLock::new(Arc::clone(&BUILTIN_STOPWORDS)),
        }
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_set(words.into_iter().map(Into::into).collect())
    }

    fn from_set(set: AHashSet<String>) -> Self {
        Self {
            words: RwLock::new(Arc::new(set)),
        }
    }

    /// Load stopwords from a file, or from every `*.txt` file in a directory.
    ///
    /// Files hold one word per line; lines are trimmed and blank lines skipped.
    /// Directory entries are read in name order.
    ///
    /// # Errors
    ///
    /// Returns `HiwordError::ResourceLoad` if the path or any file in it can't be read.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let files = if path.is_dir() {
            list_text_files(path)?
        } else {
            vec![path.to_path_buf()]
        };

        if files.is_empty() {
            tracing::warn!("Stopword directory {} contains no .txt files", path.display());
        }

        let mut set = AHashSet::new();
        for file in &files {
            let content = read_resource(RESOURCE, file)?;
            set.extend(
                content
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(str::to_string),
            );
        }

        tracing::info!(
            "Loaded {} stopwords from {} file(s) under {}",
            set.len(),
            files.len(),
            path.display()
        );

        Ok(Self::from_set(set))
    }

    #[inline]
    pub fn contains(&self, word: &str) -> bool {
        self.words.read().contains(word)
    }

    /// The current set. Later mutations do not affect the returned snapshot.
    pub fn snapshot(&self) -> Arc<AHashSet<String>> {
        Arc::clone(&self.words.read())
    }

    /// Remove one stopword. Returns whether it was present.
    pub fn remove_stopword(&self, word: &str) -> bool {
        self.remove_stopwords(&[word]) > 0
    }

    /// Remove several stopwords in one swap. Returns how many were present.
    pub fn remove_stopwords(&self, words: &[&str]) -> usize {
        let mut guard = self.words.write();
        if !words.iter().any(|w| guard.contains(*w)) {
            return 0;
        }

        let mut next = AHashSet::clone(&guard);
        let removed = words.iter().filter(|w| next.remove(**w)).count();
        *guard = Arc::new(next);

        tracing::debug!("Removed {} stopword(s)", removed);
        removed
    }

    /// Add one stopword. Returns whether it was newly inserted.
    pub fn add_stopword(&self, word: &str) -> bool {
        self.add_stopwords(&[word]) > 0
    }

    /// Add several stopwords in one swap. Returns how many were new.
    pub fn add_stopwords(&self, words: &[&str]) -> usize {
        let mut guard = self.words.write();
        if words.iter().all(|w| guard.contains(*w)) {
            return 0;
        }

        let mut next = AHashSet::clone(&guard);
        let added = words.iter().filter(|w| next.insert((**w).to_string())).count();
        *guard = Arc::new(next);

        added
    }

    pub fn len(&self) -> usize {
        self.words.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.read().is_empty()
    }
}

impl Clone for StopwordSet {
    fn clone(&self) -> Self {
        Self {
            words: RwLock::new(self.snapshot()),
        }
    }
}

impl Default for StopwordSet {
    fn default() -> Self {
        Self::builtin()
    }
}

fn list_text_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| {
        HiwordError::resource_load_with_source(RESOURCE, format!("cannot read directory {}", dir.display()), e)
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| {
            HiwordError::resource_load_with_source(RESOURCE, format!("cannot read directory {}", dir.display()), e)
        })?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "txt") {
            files.push(path);
        }
    }
    files.sort();

    Ok(files)
}
