//! Voice value types
//!
//! A [`Voice`] is an immutable descriptor of a synthesis identity. Voices
//! are produced once by an engine or catalog load and never mutated.

use serde::{Deserialize, Serialize};

use crate::voice::language::LanguageTag;

/// Voice gender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Neutral,
    Unspecified,
}

/// Which backend produced the voice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceSource {
    /// On-device synthesizer
    Local,
    /// Remote AI voice-synthesis API
    Remote,
}

/// Voice rendering quality tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceQuality {
    Standard,
    Enhanced,
    Premium,
}

/// An immutable synthesis identity
///
/// Identity is `id`; equality is full structural equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Voice {
    pub id: String,
    pub name: String,
    pub language: LanguageTag,
    pub gender: Gender,
    pub source: VoiceSource,
    #[serde(default = "default_quality")]
    pub quality: VoiceQuality,
}

fn default_quality() -> VoiceQuality {
    VoiceQuality::Standard
}

impl Voice {
    /// Create a voice with standard quality
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        language: impl Into<LanguageTag>,
        gender: Gender,
        source: VoiceSource,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            language: language.into(),
            gender,
            source,
            quality: VoiceQuality::Standard,
        }
    }

    /// Set the quality tier
    pub fn with_quality(mut self, quality: VoiceQuality) -> Self {
        self.quality = quality;
        self
    }

    /// The synthetic fallback voice used when no catalog voice is available
    pub fn fallback() -> Self {
        Self::new(
            crate::DEFAULT_VOICE_ID,
            "Default",
            "en-US",
            Gender::Neutral,
            VoiceSource::Local,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voice_equality_is_structural() {
        let a = Voice::new("v1", "Ava", "en-US", Gender::Female, VoiceSource::Local);
        let b = a.clone();
        assert_eq!(a, b);

        let c = b.with_quality(VoiceQuality::Enhanced);
        assert_ne!(a, c);
    }

    #[test]
    fn test_voice_serde_round_trip() {
        let voice = Voice::new("v1", "Ava", "en-US", Gender::Female, VoiceSource::Remote)
            .with_quality(VoiceQuality::Premium);
        let json = serde_json::to_string(&voice).unwrap();
        let back: Voice = serde_json::from_str(&json).unwrap();
        assert_eq!(voice, back);
    }

    #[test]
    fn test_voice_quality_defaults_when_missing() {
        let json = r#"{"id":"v1","name":"Ava","language":"en-US","gender":"female","source":"local"}"#;
        let voice: Voice = serde_json::from_str(json).unwrap();
        assert_eq!(voice.quality, VoiceQuality::Standard);
    }
}
