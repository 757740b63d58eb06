//! Voice catalog
//!
//! Holds the set of known voices and answers filtering and selection
//! queries. The backing load runs once and is memoized; construct a fresh
//! catalog to reload. Absence of voices is an empty result, never an
//! error.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use tracing::debug;

use crate::voice::detect::{LanguageDetector, ScriptDetector};
use crate::voice::language::{normalize_language_code, LanguageTag};
use crate::voice::types::{Gender, Voice, VoiceQuality};

/// Loader producing the catalog's voice inventory
pub type VoiceLoader = Box<dyn Fn() -> Vec<Voice> + Send + Sync>;

/// Voice catalog with memoized inventory and language detection
pub struct VoiceCatalog {
    loader: VoiceLoader,
    detector: Arc<dyn LanguageDetector>,
    cache: OnceCell<Vec<Voice>>,
}

impl VoiceCatalog {
    /// Create a catalog over a lazy voice loader
    pub fn new(loader: VoiceLoader) -> Self {
        Self {
            loader,
            detector: Arc::new(ScriptDetector::new()),
            cache: OnceCell::new(),
        }
    }

    /// Create a catalog over a fixed inventory
    pub fn from_voices(voices: Vec<Voice>) -> Self {
        Self::new(Box::new(move || voices.clone()))
    }

    /// Replace the language detection collaborator
    pub fn with_detector(mut self, detector: Arc<dyn LanguageDetector>) -> Self {
        self.detector = detector;
        self
    }

    /// All known voices, sorted by language tag; loaded once and cached
    pub fn all_voices(&self) -> &[Voice] {
        self.cache.get_or_init(|| {
            let mut voices = (self.loader)();
            voices.sort_by(|a, b| a.language.cmp(&b.language));
            debug!(count = voices.len(), "voice catalog loaded");
            voices
        })
    }

    /// Find a voice by id
    pub fn find_voice(&self, id: &str) -> Option<&Voice> {
        self.all_voices().iter().find(|v| v.id == id)
    }

    /// Voices matching the tag loosely (primary subtag) or exactly
    pub fn voices_for_language(&self, language: &LanguageTag) -> Vec<Voice> {
        self.all_voices()
            .iter()
            .filter(|v| v.language.matches(language) || v.language.matches_exactly(language))
            .cloned()
            .collect()
    }

    /// Voices whose primary subtag equals the given tag's
    pub fn voices_for_language_family(&self, language: &LanguageTag) -> Vec<Voice> {
        self.all_voices()
            .iter()
            .filter(|v| v.language.language_code() == language.language_code())
            .cloned()
            .collect()
    }

    /// Voices whose region subtag equals the given region code
    pub fn voices_for_region(&self, region_code: &str) -> Vec<Voice> {
        self.all_voices()
            .iter()
            .filter(|v| v.language.region_code().as_deref() == Some(region_code))
            .cloned()
            .collect()
    }

    /// Default voice for a language
    ///
    /// Tie-break priority: female + enhanced quality, any female, first
    /// available. `None` when no voice matches the language.
    pub fn default_voice(&self, language: &LanguageTag) -> Option<Voice> {
        let voices = self.voices_for_language(language);

        voices
            .iter()
            .find(|v| v.gender == Gender::Female && v.quality == VoiceQuality::Enhanced)
            .or_else(|| voices.iter().find(|v| v.gender == Gender::Female))
            .or_else(|| voices.first())
            .cloned()
    }

    /// Detect the dominant language of a text and normalize the tag
    ///
    /// `None` when the detector has no confident answer; never an error.
    pub fn detect_language(&self, text: &str) -> Option<LanguageTag> {
        let code = self.detector.detect(text)?;
        Some(LanguageTag::new(normalize_language_code(&code)))
    }

    /// Case-insensitive substring search over name, tag, and language
    /// description
    pub fn search_voices(&self, query: &str) -> Vec<Voice> {
        let query = query.to_lowercase();
        self.all_voices()
            .iter()
            .filter(|v| {
                v.name.to_lowercase().contains(&query)
                    || v.language.as_str().to_lowercase().contains(&query)
                    || v.language.english_name().to_lowercase().contains(&query)
            })
            .cloned()
            .collect()
    }

    /// Group voices by region subtag; tagless voices land under "Unknown"
    pub fn grouped_by_region(&self) -> HashMap<String, Vec<Voice>> {
        let mut groups: HashMap<String, Vec<Voice>> = HashMap::new();
        for voice in self.all_voices() {
            let key = voice
                .language
                .region_code()
                .unwrap_or_else(|| "Unknown".to_string());
            groups.entry(key).or_default().push(voice.clone());
        }
        groups
    }

    /// Group voices by primary subtag; tagless voices land under "Unknown"
    pub fn grouped_by_language(&self) -> HashMap<String, Vec<Voice>> {
        let mut groups: HashMap<String, Vec<Voice>> = HashMap::new();
        for voice in self.all_voices() {
            let key = voice
                .language
                .language_code()
                .unwrap_or_else(|| "Unknown".to_string());
            groups.entry(key).or_default().push(voice.clone());
        }
        groups
    }

    /// Distinct languages present in the catalog, sorted by full tag
    pub fn available_languages(&self) -> Vec<LanguageTag> {
        let mut languages: Vec<LanguageTag> = self
            .all_voices()
            .iter()
            .map(|v| v.language.clone())
            .collect();
        languages.sort();
        languages.dedup();
        languages
    }

    /// Distinct region codes present in the catalog, sorted
    pub fn available_regions(&self) -> Vec<String> {
        let mut regions: Vec<String> = self
            .all_voices()
            .iter()
            .filter_map(|v| v.language.region_code())
            .collect();
        regions.sort();
        regions.dedup();
        regions
    }
}
