//! Language tags
//!
//! A [`LanguageTag`] is a normalized BCP 47-style identifier ("en-US")
//! used for voice matching and detection. Two tags match loosely when
//! their primary subtags are equal, exactly when the full tags are equal.

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Short detector codes mapped to full region-qualified tags. Unknown
/// codes pass through unchanged.
static LANGUAGE_MAPPING: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("zh", "zh-CN"),
        ("zh-Hans", "zh-CN"),
        ("zh-Hant", "zh-TW"),
        ("en", "en-US"),
        ("ja", "ja-JP"),
        ("ko", "ko-KR"),
        ("fr", "fr-FR"),
        ("de", "de-DE"),
        ("es", "es-ES"),
        ("it", "it-IT"),
        ("pt", "pt-BR"),
        ("ru", "ru-RU"),
        ("ar", "ar-SA"),
        ("th", "th-TH"),
        ("vi", "vi-VN"),
    ])
});

/// English display names for the primary subtags the mapping table knows.
static LANGUAGE_NAMES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("zh", "Chinese"),
        ("en", "English"),
        ("ja", "Japanese"),
        ("ko", "Korean"),
        ("fr", "French"),
        ("de", "German"),
        ("es", "Spanish"),
        ("it", "Italian"),
        ("pt", "Portuguese"),
        ("ru", "Russian"),
        ("ar", "Arabic"),
        ("th", "Thai"),
        ("vi", "Vietnamese"),
    ])
});

/// Normalize a detector-reported language code to a region-qualified tag
///
/// Known short codes ("zh", "en") map through a static table; codes with a
/// region keep it unless their base maps; underscore separators are
/// canonicalized to hyphens; unknown codes pass through unchanged.
pub fn normalize_language_code(code: &str) -> String {
    if code.contains('_') {
        return normalize_language_code(&code.replace('_', "-"));
    }

    if let Some(mapped) = LANGUAGE_MAPPING.get(code) {
        return (*mapped).to_string();
    }

    // Region-qualified tags pass through as given
    code.to_string()
}

/// A normalized locale-like language identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageTag {
    tag: String,
}

impl LanguageTag {
    /// Create a tag, canonicalizing underscores to hyphens
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().replace('_', "-"),
        }
    }

    /// The full tag string ("en-US")
    pub fn as_str(&self) -> &str {
        &self.tag
    }

    /// Primary subtag ("en"), lowercased
    pub fn language_code(&self) -> Option<String> {
        self.tag
            .split('-')
            .next()
            .filter(|s| !s.is_empty())
            .map(str::to_ascii_lowercase)
    }

    /// Region subtag ("US"): two letters or three digits, uppercased
    pub fn region_code(&self) -> Option<String> {
        self.tag.split('-').skip(1).find_map(|part| {
            let is_alpha_region = part.len() == 2 && part.chars().all(|c| c.is_ascii_alphabetic());
            let is_digit_region = part.len() == 3 && part.chars().all(|c| c.is_ascii_digit());
            (is_alpha_region || is_digit_region).then(|| part.to_ascii_uppercase())
        })
    }

    /// Script subtag ("Hans"): four letters, title-cased
    pub fn script_code(&self) -> Option<String> {
        self.tag.split('-').skip(1).find_map(|part| {
            (part.len() == 4 && part.chars().all(|c| c.is_ascii_alphabetic())).then(|| {
                let mut chars = part.chars();
                let first = chars.next().unwrap().to_ascii_uppercase();
                format!("{first}{}", chars.as_str().to_ascii_lowercase())
            })
        })
    }

    /// Loose match: equal primary subtags
    pub fn matches(&self, other: &LanguageTag) -> bool {
        match (self.language_code(), other.language_code()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    /// Exact match: equal full tags
    pub fn matches_exactly(&self, other: &LanguageTag) -> bool {
        self.tag == other.tag
    }

    /// Drop the region and any further subtags ("zh-Hans-CN" -> "zh")
    pub fn removing_region(&self) -> LanguageTag {
        LanguageTag::new(self.language_code().unwrap_or_default())
    }

    /// English description, e.g. "Chinese (CN)"; falls back to the raw tag
    pub fn english_name(&self) -> String {
        let Some(code) = self.language_code() else {
            return self.tag.clone();
        };
        match LANGUAGE_NAMES.get(code.as_str()) {
            Some(name) => match self.region_code() {
                Some(region) => format!("{name} ({region})"),
                None => (*name).to_string(),
            },
            None => self.tag.clone(),
        }
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag)
    }
}

impl From<&str> for LanguageTag {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for LanguageTag {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtag_extraction() {
        let tag = LanguageTag::new("zh-Hans-CN");
        assert_eq!(tag.language_code().as_deref(), Some("zh"));
        assert_eq!(tag.script_code().as_deref(), Some("Hans"));
        assert_eq!(tag.region_code().as_deref(), Some("CN"));

        let tag = LanguageTag::new("en-US");
        assert_eq!(tag.language_code().as_deref(), Some("en"));
        assert_eq!(tag.region_code().as_deref(), Some("US"));
        assert_eq!(tag.script_code(), None);
    }

    #[test]
    fn test_loose_and_exact_match() {
        let us: LanguageTag = "en-US".into();
        let gb: LanguageTag = "en-GB".into();
        let cn: LanguageTag = "zh-CN".into();

        assert!(us.matches(&gb));
        assert!(!us.matches_exactly(&gb));
        assert!(us.matches_exactly(&"en-US".into()));
        assert!(!us.matches(&cn));
    }

    #[test]
    fn test_underscore_canonicalization() {
        let tag = LanguageTag::new("zh_CN");
        assert_eq!(tag.as_str(), "zh-CN");
        assert_eq!(tag.region_code().as_deref(), Some("CN"));
    }

    #[test]
    fn test_normalize_short_codes() {
        assert_eq!(normalize_language_code("zh"), "zh-CN");
        assert_eq!(normalize_language_code("en"), "en-US");
        assert_eq!(normalize_language_code("zh-Hant"), "zh-TW");
        assert_eq!(normalize_language_code("pt"), "pt-BR");
    }

    #[test]
    fn test_normalize_preserves_qualified_and_unknown() {
        assert_eq!(normalize_language_code("en-GB"), "en-GB");
        assert_eq!(normalize_language_code("zh_CN"), "zh-CN");
        assert_eq!(normalize_language_code("tlh"), "tlh");
    }

    #[test]
    fn test_ordering_is_by_full_tag() {
        let mut tags: Vec<LanguageTag> = vec!["zh-CN".into(), "en-US".into(), "en-GB".into()];
        tags.sort();
        let strings: Vec<&str> = tags.iter().map(|t| t.as_str()).collect();
        assert_eq!(strings, vec!["en-GB", "en-US", "zh-CN"]);
    }

    #[test]
    fn test_english_name() {
        assert_eq!(LanguageTag::new("zh-CN").english_name(), "Chinese (CN)");
        assert_eq!(LanguageTag::new("en").english_name(), "English");
        assert_eq!(LanguageTag::new("tlh").english_name(), "tlh");
    }
}
