//! Remote HTTP speech engine
//!
//! Synthesizes audio through a cloud TTS endpoint and hands the bytes to
//! an [`AudioSink`] for playback. The HTTP surface follows the common
//! bearer-token JSON shape: POST a synthesis request, receive either raw
//! audio bytes or a JSON envelope with base64 audio.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::PlaybackConfig;
use crate::core::error::{Result, TtsError};
use crate::engine::traits::{ProgressCallback, SpeechEngine};
use crate::voice::types::Voice;

/// How the endpoint returns synthesized audio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteAudioEncoding {
    /// Response body is the audio bytes
    Binary,
    /// Response body is JSON with a base64 `audio` field
    Base64Json,
}

/// Connection settings for a remote engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteEngineConfig {
    /// Short provider name, forms the engine id as `remote:<name>`
    pub name: String,
    /// Bearer token sent with every request
    pub api_key: String,
    /// Synthesis endpoint URL
    pub base_url: String,
    /// Model identifier passed through to the provider
    pub model: String,
    /// Request timeout
    #[serde(default = "default_timeout", with = "duration_secs")]
    pub timeout: Duration,
    /// Response shape
    pub encoding: RemoteAudioEncoding,
    /// Voices the provider supports; empty means unrestricted
    #[serde(default)]
    pub voices: Vec<Voice>,
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

mod duration_secs {
    use super::*;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> std::result::Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        d: D,
    ) -> std::result::Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_secs)
    }
}

/// Playback destination for synthesized audio
#[async_trait]
pub trait AudioSink: Send + Sync {
    /// Play a complete audio buffer, resolving when playback ends
    async fn play(&self, audio: &[u8]) -> Result<()>;
    fn pause(&self);
    fn resume(&self);
    fn stop(&self);
    fn is_playing(&self) -> bool;
    fn is_paused(&self) -> bool;
}

/// Sink that discards audio immediately; placeholder until a real audio
/// device binding is wired in
pub struct NullSink {
    playing: AtomicBool,
    paused: AtomicBool,
}

impl NullSink {
    pub fn new() -> Self {
        Self {
            playing: AtomicBool::new(false),
            paused: AtomicBool::new(false),
        }
    }
}

impl Default for NullSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AudioSink for NullSink {
    async fn play(&self, audio: &[u8]) -> Result<()> {
        debug!(bytes = audio.len(), "discarding synthesized audio");
        Ok(())
    }

    fn pause(&self) {
        self.paused.store(true, Ordering::SeqCst);
    }

    fn resume(&self) {
        self.paused.store(false, Ordering::SeqCst);
    }

    fn stop(&self) {
        self.playing.store(false, Ordering::SeqCst);
        self.paused.store(false, Ordering::SeqCst);
    }

    fn is_playing(&self) -> bool {
        self.playing.load(Ordering::SeqCst)
    }

    fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Serialize)]
struct SynthesisRequest<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
    speed: f32,
    pitch: f32,
    volume: f32,
}

#[derive(Debug, Deserialize)]
struct SynthesisEnvelope {
    audio: String,
}

/// HTTP-backed speech engine
pub struct RemoteEngine {
    id: String,
    config: RemoteEngineConfig,
    client: reqwest::Client,
    sink: Arc<dyn AudioSink>,
}

impl RemoteEngine {
    /// Build an engine for the given provider, playing through `sink`
    pub fn new(config: RemoteEngineConfig, sink: Arc<dyn AudioSink>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let bearer = format!("Bearer {}", config.api_key);
        let auth = HeaderValue::from_str(&bearer)
            .map_err(|_| TtsError::config("API key contains invalid header characters"))?;
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| TtsError::config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            id: format!("remote:{}", config.name),
            config,
            client,
            sink,
        })
    }

    /// Synthesize one utterance to audio bytes
    #[instrument(skip(self, text), fields(engine = %self.id))]
    pub async fn synthesize(&self, text: &str, voice: &Voice, config: &PlaybackConfig) -> Result<Vec<u8>> {
        let request = SynthesisRequest {
            model: &self.config.model,
            input: text,
            voice: &voice.id,
            speed: config.rate,
            pitch: config.pitch,
            volume: config.volume,
        };

        let response = self
            .client
            .post(&self.config.base_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| TtsError::network(e.to_string()))?;

        let status = response.status();
        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(TtsError::auth(&self.config.name));
        }
        if status.as_u16() == 429 {
            return Err(TtsError::QuotaExceeded {
                engine: self.config.name.clone(),
            });
        }
        if status.is_server_error() {
            return Err(TtsError::server(&self.config.name, status.as_u16()));
        }
        if !status.is_success() {
            return Err(TtsError::invalid_response(
                &self.config.name,
                format!("unexpected status {status}"),
            ));
        }

        match self.config.encoding {
            RemoteAudioEncoding::Binary => {
                let bytes = response
                    .bytes()
                    .await
                    .map_err(|e| TtsError::network(e.to_string()))?;
                debug!(bytes = bytes.len(), "received audio");
                Ok(bytes.to_vec())
            }
            RemoteAudioEncoding::Base64Json => {
                let envelope: SynthesisEnvelope = response
                    .json()
                    .await
                    .map_err(|e| TtsError::invalid_response(&self.config.name, e.to_string()))?;
                base64::engine::general_purpose::STANDARD
                    .decode(envelope.audio.as_bytes())
                    .map_err(|e| TtsError::audio(format!("base64 decode failed: {e}")))
            }
        }
    }
}

#[async_trait]
impl SpeechEngine for RemoteEngine {
    fn id(&self) -> &str {
        &self.id
    }

    async fn speak(
        &self,
        text: &str,
        voice: &Voice,
        config: &PlaybackConfig,
        _progress: Option<ProgressCallback>,
    ) -> Result<()> {
        if !self.supports_voice(voice) {
            return Err(TtsError::voice_not_supported(&self.config.name, &voice.id));
        }
        let audio = self.synthesize(text, voice, config).await?;
        self.sink.play(&audio).await
    }

    fn pause(&self) {
        self.sink.pause();
    }

    fn resume(&self) {
        self.sink.resume();
    }

    fn stop(&self) {
        self.sink.stop();
    }

    fn is_playing(&self) -> bool {
        self.sink.is_playing()
    }

    fn is_paused(&self) -> bool {
        self.sink.is_paused()
    }

    fn voices(&self) -> Vec<Voice> {
        self.config.voices.clone()
    }

    fn supports_voice(&self, voice: &Voice) -> bool {
        self.config.voices.is_empty() || self.config.voices.iter().any(|v| v.id == voice.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voice::language::LanguageTag;
    use crate::voice::types::{Gender, VoiceSource};

    fn config_with_voices(voices: Vec<Voice>) -> RemoteEngineConfig {
        RemoteEngineConfig {
            name: "acme".to_string(),
            api_key: "key".to_string(),
            base_url: "https://tts.example.com/v1/speech".to_string(),
            model: "standard-1".to_string(),
            timeout: Duration::from_secs(5),
            encoding: RemoteAudioEncoding::Binary,
            voices,
        }
    }

    fn voice(id: &str) -> Voice {
        Voice::new(id, id, LanguageTag::from("en-US"), Gender::Neutral, VoiceSource::Remote)
    }

    #[test]
    fn test_engine_id_is_prefixed() {
        let engine = RemoteEngine::new(config_with_voices(vec![]), Arc::new(NullSink::new())).unwrap();
        assert_eq!(engine.id(), "remote:acme");
    }

    #[test]
    fn test_empty_inventory_accepts_any_voice() {
        let engine = RemoteEngine::new(config_with_voices(vec![]), Arc::new(NullSink::new())).unwrap();
        assert!(engine.supports_voice(&voice("anything")));
    }

    #[test]
    fn test_inventory_restricts_voices() {
        let engine = RemoteEngine::new(
            config_with_voices(vec![voice("alloy"), voice("echo")]),
            Arc::new(NullSink::new()),
        )
        .unwrap();
        assert!(engine.supports_voice(&voice("alloy")));
        assert!(!engine.supports_voice(&voice("nova")));
    }

    #[tokio::test]
    async fn test_unsupported_voice_is_rejected_before_any_request() {
        let engine = RemoteEngine::new(
            config_with_voices(vec![voice("alloy")]),
            Arc::new(NullSink::new()),
        )
        .unwrap();
        let err = engine
            .speak("hi", &voice("nova"), &PlaybackConfig::default(), None)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            TtsError::VoiceNotSupported {
                engine: "acme".to_string(),
                voice_id: "nova".to_string(),
            }
        );
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = config_with_voices(vec![voice("alloy")]);
        let json = serde_json::to_string(&config).unwrap();
        let back: RemoteEngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.name, "acme");
        assert_eq!(back.timeout, Duration::from_secs(5));
        assert_eq!(back.encoding, RemoteAudioEncoding::Binary);
    }
}
