//! Speech engine capability contract
//!
//! Every backend, on-device or remote, implements [`SpeechEngine`]. The
//! playback session relies on `speak` resolving exactly once per
//! utterance to sequence the queue; an engine must never run two
//! overlapping utterances on the same instance.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::PlaybackConfig;
use crate::core::error::Result;
use crate::voice::types::Voice;

/// Incremental progress callback, fractional in [0, 1]
///
/// Best-effort: engines without granular progress never invoke it.
pub type ProgressCallback = Arc<dyn Fn(f32) + Send + Sync>;

/// Uniform capability surface for speech backends
#[async_trait]
pub trait SpeechEngine: Send + Sync {
    /// Stable engine identifier used by the registry ("local",
    /// "remote:acme", ...)
    fn id(&self) -> &str;

    /// Speak one utterance, resolving when playback finishes or fails
    ///
    /// Resolves exactly once. After [`stop`](Self::stop) the in-flight
    /// future may still resolve, but the caller's generation guard
    /// discards the outcome.
    async fn speak(
        &self,
        text: &str,
        voice: &Voice,
        config: &PlaybackConfig,
        progress: Option<ProgressCallback>,
    ) -> Result<()>;

    /// Pause the current utterance; no-op when nothing is in flight
    fn pause(&self);

    /// Resume a paused utterance; no-op otherwise
    fn resume(&self);

    /// Terminate the current utterance immediately and reset engine
    /// state so a fresh `speak` can be issued
    fn stop(&self);

    /// Engine-local playing state (not the session's mirrored state)
    fn is_playing(&self) -> bool;

    /// Engine-local paused state
    fn is_paused(&self) -> bool;

    /// Voices this engine can synthesize; empty when the engine does not
    /// enumerate its inventory
    fn voices(&self) -> Vec<Voice> {
        Vec::new()
    }

    /// Whether the engine can synthesize with the given voice
    fn supports_voice(&self, _voice: &Voice) -> bool {
        true
    }
}
