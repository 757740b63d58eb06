//! Playback configuration and persistence
//!
//! [`PlaybackConfig`] is the live, mutable parameter set consumed by the
//! playback session. [`ConfigStore`] persists it (and the per-language
//! preferred-voice map) through a pluggable key-value store. Persistence
//! is best-effort: failures are logged and the caller falls back to
//! defaults rather than halting.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::voice::language::LanguageTag;
use crate::voice::types::Voice;

const CONFIG_KEY: &str = "orator.configuration";
const PREFERRED_VOICES_KEY: &str = "orator.preferred_voices";

/// Mutable playback parameters
///
/// Values are not clamped here; engines interpret them. Defaults match
/// the documented baseline: rate 0.5, pitch 1.0, volume 1.0, half-second
/// inter-sentence pause, auto language detection on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Speaking rate, nominally 0.0 - 1.0
    #[serde(default = "default_rate")]
    pub rate: f32,
    /// Pitch multiplier, nominally 0.5 - 2.0
    #[serde(default = "default_pitch")]
    pub pitch: f32,
    /// Volume, nominally 0.0 - 1.0
    #[serde(default = "default_volume")]
    pub volume: f32,
    /// Pause between queued sentences, in seconds
    #[serde(default = "default_pause")]
    pub pause_between_sentences: f64,
    /// Detect each sentence's language when no voice is chosen
    #[serde(default = "default_auto_detect")]
    pub auto_language_detection: bool,
    /// Single-slot preferred voice, independent of the per-language map
    #[serde(default)]
    pub preferred_voice: Option<Voice>,
}

fn default_rate() -> f32 {
    0.5
}
fn default_pitch() -> f32 {
    1.0
}
fn default_volume() -> f32 {
    1.0
}
fn default_pause() -> f64 {
    0.5
}
fn default_auto_detect() -> bool {
    true
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            rate: default_rate(),
            pitch: default_pitch(),
            volume: default_volume(),
            pause_between_sentences: default_pause(),
            auto_language_detection: default_auto_detect(),
            preferred_voice: None,
        }
    }
}

impl PlaybackConfig {
    /// Inter-sentence pause as a [`Duration`]; negative values clamp to zero
    pub fn pause_duration(&self) -> Duration {
        Duration::from_secs_f64(self.pause_between_sentences.max(0.0))
    }
}

/// Key-value persistence collaborator
///
/// Absence is `None`, never an error; write failures surface as io errors
/// which [`ConfigStore`] swallows and logs.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<Vec<u8>>;
    fn set(&self, key: &str, value: Vec<u8>) -> std::io::Result<()>;
    fn remove(&self, key: &str) -> std::io::Result<()>;
}

/// In-memory key-value store
#[derive(Default)]
pub struct MemoryStore {
    map: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.map.read().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: Vec<u8>) -> std::io::Result<()> {
        self.map.write().unwrap().insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> std::io::Result<()> {
        self.map.write().unwrap().remove(key);
        Ok(())
    }
}

/// Configuration persistence
pub struct ConfigStore {
    store: Arc<dyn KeyValueStore>,
}

impl ConfigStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Load the persisted configuration, or defaults when nothing is
    /// persisted or the payload fails to deserialize
    pub fn load(&self) -> PlaybackConfig {
        let Some(bytes) = self.store.get(CONFIG_KEY) else {
            return PlaybackConfig::default();
        };

        match serde_json::from_slice(&bytes) {
            Ok(config) => config,
            Err(err) => {
                warn!(%err, "failed to deserialize configuration, using defaults");
                PlaybackConfig::default()
            }
        }
    }

    /// Persist the configuration; failures are logged, not surfaced
    pub fn save(&self, config: &PlaybackConfig) {
        match serde_json::to_vec(config) {
            Ok(bytes) => {
                if let Err(err) = self.store.set(CONFIG_KEY, bytes) {
                    warn!(%err, "failed to persist configuration");
                }
            }
            Err(err) => warn!(%err, "failed to serialize configuration"),
        }
    }

    /// Load the per-language preferred-voice map, keyed by full tag string
    pub fn load_preferred_voices(&self) -> HashMap<String, Voice> {
        let Some(bytes) = self.store.get(PREFERRED_VOICES_KEY) else {
            return HashMap::new();
        };

        match serde_json::from_slice(&bytes) {
            Ok(map) => map,
            Err(err) => {
                warn!(%err, "failed to deserialize preferred voices");
                HashMap::new()
            }
        }
    }

    /// Persist the per-language preferred-voice map
    pub fn save_preferred_voices(&self, voices: &HashMap<String, Voice>) {
        match serde_json::to_vec(voices) {
            Ok(bytes) => {
                if let Err(err) = self.store.set(PREFERRED_VOICES_KEY, bytes) {
                    warn!(%err, "failed to persist preferred voices");
                }
            }
            Err(err) => warn!(%err, "failed to serialize preferred voices"),
        }
    }

    /// Remember a preferred voice for a language
    pub fn set_preferred_voice(&self, voice: Voice, language: &LanguageTag) {
        let mut voices = self.load_preferred_voices();
        voices.insert(language.as_str().to_string(), voice);
        self.save_preferred_voices(&voices);
    }

    /// Look up the preferred voice for a language
    pub fn get_preferred_voice(&self, language: &LanguageTag) -> Option<Voice> {
        self.load_preferred_voices().remove(language.as_str())
    }

    /// Drop the persisted configuration
    pub fn reset_configuration(&self) {
        if let Err(err) = self.store.remove(CONFIG_KEY) {
            warn!(%err, "failed to reset configuration");
        }
    }

    /// Drop the persisted preferred-voice map
    pub fn reset_preferred_voices(&self) {
        if let Err(err) = self.store.remove(PREFERRED_VOICES_KEY) {
            warn!(%err, "failed to reset preferred voices");
        }
    }

    /// Drop all persisted state
    pub fn reset_all(&self) {
        self.reset_configuration();
        self.reset_preferred_voices();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voice::types::{Gender, VoiceSource};

    fn store() -> ConfigStore {
        ConfigStore::new(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn test_defaults() {
        let config = PlaybackConfig::default();
        assert_eq!(config.rate, 0.5);
        assert_eq!(config.pitch, 1.0);
        assert_eq!(config.volume, 1.0);
        assert_eq!(config.pause_between_sentences, 0.5);
        assert!(config.auto_language_detection);
        assert!(config.preferred_voice.is_none());
    }

    #[test]
    fn test_load_without_persisted_state_returns_defaults() {
        assert_eq!(store().load(), PlaybackConfig::default());
    }

    #[test]
    fn test_save_load_round_trip() {
        let store = store();
        let config = PlaybackConfig {
            rate: 0.8,
            pitch: 1.4,
            volume: 0.6,
            pause_between_sentences: 0.25,
            auto_language_detection: false,
            preferred_voice: Some(Voice::new(
                "v1",
                "Ava",
                "en-US",
                Gender::Female,
                VoiceSource::Local,
            )),
        };

        store.save(&config);
        let loaded = store.load();

        assert!((loaded.rate - config.rate).abs() < 0.01);
        assert!((loaded.pitch - config.pitch).abs() < 0.01);
        assert!((loaded.volume - config.volume).abs() < 0.01);
        assert!((loaded.pause_between_sentences - config.pause_between_sentences).abs() < 0.01);
        assert_eq!(loaded.auto_language_detection, config.auto_language_detection);
        assert_eq!(loaded.preferred_voice, config.preferred_voice);
    }

    #[test]
    fn test_corrupt_payload_degrades_to_defaults() {
        let kv = Arc::new(MemoryStore::new());
        kv.set(CONFIG_KEY, b"not json".to_vec()).unwrap();
        let store = ConfigStore::new(kv);
        assert_eq!(store.load(), PlaybackConfig::default());
    }

    #[test]
    fn test_partial_payload_fills_defaults() {
        let kv = Arc::new(MemoryStore::new());
        kv.set(CONFIG_KEY, br#"{"rate":0.9}"#.to_vec()).unwrap();
        let store = ConfigStore::new(kv);

        let config = store.load();
        assert_eq!(config.rate, 0.9);
        assert_eq!(config.pitch, 1.0);
        assert!(config.auto_language_detection);
    }

    #[test]
    fn test_per_language_preferred_voices() {
        let store = store();
        let en: LanguageTag = "en-US".into();
        let zh: LanguageTag = "zh-CN".into();
        let ava = Voice::new("v1", "Ava", "en-US", Gender::Female, VoiceSource::Local);
        let mei = Voice::new("v2", "Mei", "zh-CN", Gender::Female, VoiceSource::Local);

        store.set_preferred_voice(ava.clone(), &en);
        store.set_preferred_voice(mei.clone(), &zh);

        assert_eq!(store.get_preferred_voice(&en), Some(ava));
        assert_eq!(store.get_preferred_voice(&zh), Some(mei));
        assert_eq!(store.get_preferred_voice(&"fr-FR".into()), None);

        store.reset_preferred_voices();
        assert_eq!(store.get_preferred_voice(&en), None);
    }

    #[test]
    fn test_reset_all() {
        let store = store();
        store.save(&PlaybackConfig {
            rate: 0.9,
            ..Default::default()
        });
        store.reset_all();
        assert_eq!(store.load(), PlaybackConfig::default());
    }

    #[test]
    fn test_pause_duration_clamps_negative() {
        let config = PlaybackConfig {
            pause_between_sentences: -1.0,
            ..Default::default()
        };
        assert_eq!(config.pause_duration(), Duration::ZERO);
    }
}
