//! Short keyword selection.
//!
//! Single tokens are scored by `occurrences * idf`. The score is deliberately
//! not normalized by document length so it stays comparable to the background
//! frequency term used during ranking. Only tokens with at least `min_support`
//! occurrences are kept, which stops one-off rare words with extreme IDF from
//! dominating the selection.

use super::types::FrequencyMap;
use crate::resources::Lexicon;

/// Select statistically salient single tokens.
///
/// Returns the kept tokens mapped to their raw occurrence counts, in
/// descending score order. Stopwords are never counted. At most `budget`
/// tokens are returned. Ties keep first-occurrence order.
pub fn select_short_keywords<S: AsRef<str>>(
    tokens: &[S],
    lexicon: &dyn Lexicon,
    min_support: u32,
    budget: usize,
) -> FrequencyMap {
    let mut counts = FrequencyMap::default();
    for token in tokens {
        let token = token.as_ref();
        if let Some(count) = counts.get_mut(token) {
            *count += 1;
        } else {
            counts.insert(token.to_string(), 1);
        }
    }
    let stopwords = lexicon.stopword_snapshot();
    counts.retain(|word, _| !stopwords.contains(word.as_str()));

    let mut scored: Vec<(&str, u32, f64)> = counts
        .iter()
        .map(|(word, &count)| (word.as_str(), count, f64::from(count) * lexicon.idf(word)))
        .collect();
    scored.sort_by(|a, b| b.2.total_cmp(&a.2));

    scored
        .into_iter()
        .filter(|&(_, count, _)| count >= min_support)
        .take(budget)
        .map(|(word, count, _)| (word.to_string(), count))
        .collect()
}
