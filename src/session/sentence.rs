//! Queued sentence

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::PlaybackConfig;
use crate::voice::types::Voice;

/// One unit of playback
///
/// A sentence may pin a voice and a parameter override; both fall back to
/// session-level resolution when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentence {
    /// Stable identity, assigned at creation
    pub id: Uuid,
    /// Text to synthesize
    pub text: String,
    /// Pinned voice, overrides session-level selection
    #[serde(default)]
    pub voice: Option<Voice>,
    /// Per-sentence parameter override
    #[serde(default)]
    pub config: Option<PlaybackConfig>,
}

impl Sentence {
    /// Sentence using session-level voice and parameters
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            voice: None,
            config: None,
        }
    }

    /// Pin a voice
    pub fn with_voice(mut self, voice: Voice) -> Self {
        self.voice = Some(voice);
        self
    }

    /// Attach a parameter override
    pub fn with_config(mut self, config: PlaybackConfig) -> Self {
        self.config = Some(config);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voice::types::{Gender, VoiceSource};

    #[test]
    fn test_ids_are_unique() {
        let a = Sentence::new("hello");
        let b = Sentence::new("hello");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_builders() {
        let voice = Voice::new("v1", "Ava", "en-US", Gender::Female, VoiceSource::Local);
        let sentence = Sentence::new("hello").with_voice(voice.clone());
        assert_eq!(sentence.voice, Some(voice));
        assert!(sentence.config.is_none());
    }
}
