//! Language detection
//!
//! Detection is an external collaborator behind [`LanguageDetector`]; the
//! built-in [`ScriptDetector`] votes on Unicode script histograms, which
//! is enough to separate the CJK/Cyrillic/Latin voice families without
//! pulling in a statistical model.

/// Language detection collaborator
///
/// Returns a short language code ("en", "zh") or `None` when no dominant
/// language can be determined. Never errors.
pub trait LanguageDetector: Send + Sync {
    fn detect(&self, text: &str) -> Option<String>;
}

impl<F> LanguageDetector for F
where
    F: Fn(&str) -> Option<String> + Send + Sync,
{
    fn detect(&self, text: &str) -> Option<String> {
        self(text)
    }
}

/// Script-histogram language detector
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptDetector;

impl ScriptDetector {
    pub fn new() -> Self {
        Self
    }
}

impl LanguageDetector for ScriptDetector {
    fn detect(&self, text: &str) -> Option<String> {
        let mut hanzi = 0usize;
        let mut kana = 0usize;
        let mut hangul = 0usize;
        let mut cyrillic = 0usize;
        let mut arabic = 0usize;
        let mut thai = 0usize;
        let mut latin = 0usize;

        for c in text.chars() {
            match c {
                '\u{4e00}'..='\u{9fff}' => hanzi += 1,
                '\u{3040}'..='\u{309f}' | '\u{30a0}'..='\u{30ff}' => kana += 1,
                '\u{ac00}'..='\u{d7af}' => hangul += 1,
                '\u{0400}'..='\u{04ff}' => cyrillic += 1,
                '\u{0600}'..='\u{06ff}' => arabic += 1,
                '\u{0e00}'..='\u{0e7f}' => thai += 1,
                'a'..='z' | 'A'..='Z' => latin += 1,
                _ => {}
            }
        }

        let counts = [
            (kana, "ja"),
            (hangul, "ko"),
            (hanzi, "zh"),
            (cyrillic, "ru"),
            (arabic, "ar"),
            (thai, "th"),
            (latin, "en"),
        ];

        counts
            .into_iter()
            .filter(|(count, _)| *count > 0)
            .max_by_key(|(count, _)| *count)
            .map(|(_, code)| code.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_major_scripts() {
        let detector = ScriptDetector::new();
        assert_eq!(detector.detect("Hello, world!").as_deref(), Some("en"));
        assert_eq!(detector.detect("你好世界").as_deref(), Some("zh"));
        assert_eq!(detector.detect("こんにちは").as_deref(), Some("ja"));
        assert_eq!(detector.detect("안녕하세요").as_deref(), Some("ko"));
        assert_eq!(detector.detect("Привет, мир").as_deref(), Some("ru"));
    }

    #[test]
    fn test_kana_wins_over_kanji_in_japanese_text() {
        let detector = ScriptDetector::new();
        // Japanese prose mixes kanji with kana; kana presence decides
        assert_eq!(detector.detect("日本語のテキストです").as_deref(), Some("ja"));
    }

    #[test]
    fn test_no_letters_yields_none() {
        let detector = ScriptDetector::new();
        assert_eq!(detector.detect("1234 !?"), None);
        assert_eq!(detector.detect(""), None);
    }

    #[test]
    fn test_closure_detector() {
        let fixed = |_: &str| Some("fr".to_string());
        assert_eq!(fixed.detect("anything").as_deref(), Some("fr"));
    }
}
