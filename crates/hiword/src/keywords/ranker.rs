//! Candidate merging, scoring and deduplication.
//!
//! Short keywords and phrases are merged into one frequency map, noise words
//! are dropped, and each survivor is scored against the background dictionary:
//!
//! ```text
//! score = log2(freq + 0.5) * freq / (freq + background_freq)
//! ```
//!
//! The first factor rewards in-document frequency with logarithmic damping.
//! The second is a rarity ratio: near 1 for words the reference corpus rarely
//! uses, near 0 for common ones.
//!
//! After sorting, a candidate contained in a longer candidate with the same
//! count is pruned, since every occurrence of the short form is part of the
//! long one. Finally candidates below the minimum score are dropped.

use super::types::{FrequencyMap, Keyword};
use crate::filter::WordFilter;
use crate::resources::Lexicon;

/// Merge short keyword and phrase counts, dropping noise words.
///
/// A key present in both maps gets the sum of its counts. Order is short
/// keywords first, then phrases, each in their incoming order.
pub fn merge_candidates(short_keywords: FrequencyMap, phrases: FrequencyMap, filter: &dyn WordFilter) -> FrequencyMap {
    let mut merged = FrequencyMap::with_capacity_and_hasher(short_keywords.len() + phrases.len(), Default::default());

    for (word, count) in short_keywords.into_iter().chain(phrases) {
        if filter.is_noise(&word) {
            continue;
        }
        *merged.entry(word).or_insert(0) += count;
    }

    merged
}

/// Relevance of a single-document candidate.
#[inline]
pub fn candidate_score(freq: u32, background_freq: u64) -> f64 {
    let freq = f64::from(freq);
    (freq + 0.5).log2() * (freq / (freq + background_freq as f64))
}

/// Relevance of a candidate aggregated over `total_docs` documents, of which
/// `doc_freq` contain it.
#[inline]
pub fn corpus_score(freq: u32, doc_freq: u32, total_docs: usize, background_freq: u64) -> f64 {
    let f = f64::from(freq);
    let df = f64::from(doc_freq);
    let rarity = f / (f + background_freq as f64);
    rarity * (f + 1.0).log2() * (df + 1.0).log2() * (1.0 + total_docs as f64 / df).log2()
}

/// Score every candidate against the lexicon's background frequencies.
pub fn score_candidates(candidates: &FrequencyMap, lexicon: &dyn Lexicon) -> Vec<Keyword> {
    candidates
        .iter()
        .map(|(word, &count)| Keyword::new(word.as_str(), candidate_score(count, lexicon.background_freq(word)), count))
        .collect()
}

/// Sort descending, prune subsumed candidates, apply the score cutoff.
///
/// The sort is stable, so equal scores keep their incoming order.
pub fn finalize_ranking(mut candidates: Vec<Keyword>, subsumption_tolerance: u32, min_score: f64) -> Vec<Keyword> {
    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));

    let mut ranked = prune_subsumed(candidates, subsumption_tolerance);
    ranked.retain(|k| k.score >= min_score);
    ranked
}

/// Drop every candidate that is a substring of a longer candidate whose count
/// differs by at most `tolerance`.
///
/// Each candidate is checked against the full incoming set, so pruning does
/// not depend on order.
pub fn prune_subsumed(candidates: Vec<Keyword>, tolerance: u32) -> Vec<Keyword> {
    let subsumed: Vec<bool> = candidates
        .iter()
        .map(|short| {
            candidates.iter().any(|long| {
                long.text.len() > short.text.len()
                    && long.count.abs_diff(short.count) <= tolerance
                    && long.text.contains(short.text.as_str())
            })
        })
        .collect();

    let before = candidates.len();
    let kept: Vec<Keyword> = candidates
        .into_iter()
        .zip(subsumed)
        .filter_map(|(keyword, subsumed)| (!subsumed).then_some(keyword))
        .collect();

    if kept.len() < before {
        tracing::debug!("Pruned {} subsumed candidate(s)", before - kept.len());
    }
    kept
}
