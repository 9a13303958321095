//! Phrase detection over runs of short keywords.
//!
//! Phrase boundaries are not determined linguistically. A run is a maximal
//! stretch of consecutive tokens that are all short keywords; every contiguous
//! sub-span of two to `max_tokens` tokens in a run is a phrase candidate. Candidates
//! are keyed by their concatenated surface form and counted across the whole
//! document, so the same phrase text accumulates even when it occurs in
//! unrelated runs. A candidate counts as a real phrase once its total reaches
//! the minimum support.
//!
//! The length cap keeps the work per run linear in run length, even for a
//! long stretch of repeated keywords.

use super::types::FrequencyMap;

/// Count recurring multi-token phrases built from short keywords.
///
/// Only `keywords` membership is consulted; its counts are ignored. Phrases
/// span at most `max_tokens` tokens. The result holds phrases with at least
/// `min_support` occurrences, in the order they were first seen.
pub fn detect_phrases<S: AsRef<str>>(
    tokens: &[S],
    keywords: &FrequencyMap,
    min_support: u32,
    max_tokens: usize,
) -> FrequencyMap {
    let mut counts = FrequencyMap::default();
    let mut run_start: Option<usize> = None;

    for (idx, token) in tokens.iter().enumerate() {
        if keywords.contains_key(token.as_ref()) {
            run_start.get_or_insert(idx);
        } else if let Some(start) = run_start.take() {
            count_run_phrases(&tokens[start..idx], max_tokens, &mut counts);
        }
    }
    if let Some(start) = run_start {
        count_run_phrases(&tokens[start..], max_tokens, &mut counts);
    }

    counts.retain(|_, count| *count >= min_support);
    counts
}

/// Add every sub-span of `run` between 2 and `max_tokens` tokens long to `counts`.
fn count_run_phrases<S: AsRef<str>>(run: &[S], max_tokens: usize, counts: &mut FrequencyMap) {
    if run.len() < 2 || max_tokens < 2 {
        return;
    }

    for start in 0..run.len() - 1 {
        let end = run.len().min(start + max_tokens);
        let mut phrase = String::from(run[start].as_ref());
        for token in &run[start + 1..end] {
            phrase.push_str(token.as_ref());
            if let Some(count) = counts.get_mut(phrase.as_str()) {
                *count += 1;
            } else {
                counts.insert(phrase.clone(), 1);
            }
        }
    }
}
