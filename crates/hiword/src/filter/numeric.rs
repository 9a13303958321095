use super::WordFilter;

/// Digits and Chinese numeral/currency glyphs counted as numeric.
const NUMERIC_CHARS: &str = "0123456789〇一二三四五六七八九十百千万亿元角分";

/// Flags numbers and words dominated by numeral characters.
///
/// A word is noise when it parses as a number once surrounding `%` signs are
/// stripped ("12345", "3.5%"), or when at least half of its characters are
/// digits or numeral glyphs ("3万元", "十二").
#[derive(Debug, Clone, Copy, Default)]
pub struct NumericFilter;

impl NumericFilter {
    pub fn new() -> Self {
        Self
    }

    fn is_number(word: &str) -> bool {
        word.trim_matches('%').parse::<f64>().is_ok()
    }

    #[inline]
    fn is_numeric_char(c: char) -> bool {
        NUMERIC_CHARS.contains(c)
    }
}

impl WordFilter for NumericFilter {
    fn name(&self) -> &str {
        "numeric"
    }

    fn is_noise(&self, word: &str) -> bool {
        if Self::is_number(word) {
            return true;
        }

        let (total, numeric) = word.chars().fold((0usize, 0usize), |(total, numeric), c| {
            (total + 1, numeric + usize::from(Self::is_numeric_char(c)))
        });

        2 * numeric >= total
    }
}
