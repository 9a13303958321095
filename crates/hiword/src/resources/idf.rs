//! Inverse document frequency table.

use super::{parse_lines, read_resource};
use crate::{HiwordError, Result};
use ahash::AHashMap;
use std::path::Path;

pub(super) const RESOURCE: &str = "idf table";

/// IDF weights with a fallback for unknown words.
///
/// When built from real data the fallback is the median of all known weights,
/// so an unseen word is treated as neither rare nor common.
#[derive(Debug, Clone)]
pub struct IdfTable {
    weights: AHashMap<String, f64>,
    fallback: f64,
}

impl IdfTable {
    /// A table without entries where every word weighs `weight`.
    pub fn uniform(weight: f64) -> Self {
        Self {
            weights: AHashMap::new(),
            fallback: weight,
        }
    }

    /// Build a table from known weights; the fallback is their median.
    ///
    /// # Errors
    ///
    /// Returns `HiwordError::ResourceLoad` when `weights` is empty.
    pub fn from_weights<I, S>(weights: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let weights: AHashMap<String, f64> = weights.into_iter().map(|(w, v)| (w.into(), v)).collect();
        if weights.is_empty() {
            return Err(HiwordError::resource_load(
                RESOURCE,
                "no entries, median fallback is undefined",
            ));
        }

        let fallback = median(weights.values().copied());
        Ok(Self { weights, fallback })
    }

    /// Replace the fallback weight for unknown words.
    pub fn with_fallback(mut self, fallback: f64) -> Self {
        self.fallback = fallback;
        self
    }

    /// Load an IDF file with one `word idf` record per line.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = read_resource(RESOURCE, path.as_ref())?;
        let table = Self::parse(&content)?;

        tracing::info!(
            "Loaded {} IDF weights from {} (median {:.4})",
            table.len(),
            path.as_ref().display(),
            table.fallback
        );

        Ok(table)
    }

    /// Parse IDF records from text.
    pub fn parse(content: &str) -> Result<Self> {
        let mut weights = Vec::new();

        parse_lines(content, |line_no, fields| {
            let raw = fields
                .get(1)
                .ok_or_else(|| HiwordError::resource_load(RESOURCE, format!("line {}: missing weight", line_no)))?;
            let weight = raw.parse::<f64>().map_err(|e| {
                HiwordError::resource_load_with_source(
                    RESOURCE,
                    format!("line {}: invalid weight '{}'", line_no, raw),
                    e,
                )
            })?;
            if !weight.is_finite() {
                return Err(HiwordError::resource_load(
                    RESOURCE,
                    format!("line {}: weight must be finite, got {}", line_no, raw),
                ));
            }

            weights.push((fields[0].to_string(), weight));
            Ok(())
        })?;

        Self::from_weights(weights)
    }

    /// Weight of `word`, or the fallback when unknown.
    #[inline]
    pub fn weight(&self, word: &str) -> f64 {
        self.weights.get(word).copied().unwrap_or(self.fallback)
    }

    pub fn fallback(&self) -> f64 {
        self.fallback
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

/// Upper median: the element at index `len / 2` of the sorted values.
fn median(values: impl Iterator<Item = f64>) -> f64 {
    let mut sorted: Vec<f64> = values.collect();
    sorted.sort_by(f64::total_cmp);
    sorted[sorted.len() / 2]
}
