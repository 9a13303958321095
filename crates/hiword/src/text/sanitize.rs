use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

// Han ideographs (incl. U+3007 〇 and extension blocks), ASCII alphanumerics,
// percent sign, period, whitespace.
static DISALLOWED_RUN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^\u{3007}\u{3400}-\u{4DBF}\u{4E00}-\u{9FFF}\u{F900}-\u{FAFF}\u{20000}-\u{2FA1F}A-Za-z0-9%.\s]+")
        .expect("Disallowed charset regex pattern is valid and should compile")
});

/// Whether `c` survives [`sanitize`].
#[inline]
pub fn is_allowed_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || c == '%'
        || c == '.'
        || c.is_whitespace()
        || matches!(c as u32,
            0x3007 | 0x3400..=0x4DBF | 0x4E00..=0x9FFF | 0xF900..=0xFAFF | 0x20000..=0x2FA1F)
}

/// Replace every run of disallowed characters with one space.
///
/// Punctuation, emoji and symbols become token boundaries instead of being
/// glued onto neighbouring words by the segmenter.
pub fn sanitize(text: &str) -> Cow<'_, str> {
    if text.chars().all(is_allowed_char) {
        return Cow::Borrowed(text);
    }

    DISALLOWED_RUN.replace_all(text, " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_allowed_text() {
        let text = "人工智能 AI 发展 3.5% 〇";
        assert!(matches!(sanitize(text), Cow::Borrowed(_)));
    }

    #[test]
    fn test_punctuation_becomes_space() {
        assert_eq!(sanitize("人工智能，发展。"), "人工智能 发展 ");
    }

    #[test]
    fn test_runs_collapse_to_single_space() {
        assert_eq!(sanitize("人工——「智能」"), "人工 智能 ");
    }

    #[test]
    fn test_is_allowed_char() {
        assert!(is_allowed_char('智'));
        assert!(is_allowed_char('7'));
        assert!(is_allowed_char('%'));
        assert!(!is_allowed_char('，'));
        assert!(!is_allowed_char('é'));
    }
}
