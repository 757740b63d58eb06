//! On-device synthesizer shim
//!
//! Stands in for a platform speech synthesizer: it paces through the
//! estimated utterance duration in small ticks, honors pause/resume by
//! freezing the clock, and aborts cleanly when stopped. Useful both as
//! the always-available default engine and as a deterministic stand-in
//! in tests.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::config::PlaybackConfig;
use crate::core::error::Result;
use crate::engine::traits::{ProgressCallback, SpeechEngine};
use crate::text::estimate_duration;
use crate::voice::types::Voice;

const TICK: Duration = Duration::from_millis(20);

/// Local playback engine
pub struct LocalEngine {
    id: String,
    voices: Vec<Voice>,
    playing: AtomicBool,
    paused: AtomicBool,
    epoch: AtomicU64,
}

impl LocalEngine {
    /// Engine with the canonical "local" identifier and no inventory
    pub fn new() -> Self {
        Self::with_id("local")
    }

    /// Engine with a custom identifier, mainly for tests
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            voices: Vec::new(),
            playing: AtomicBool::new(false),
            paused: AtomicBool::new(false),
            epoch: AtomicU64::new(0),
        }
    }

    /// Attach the voice inventory this engine reports
    pub fn with_voices(mut self, voices: Vec<Voice>) -> Self {
        self.voices = voices;
        self
    }
}

impl Default for LocalEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SpeechEngine for LocalEngine {
    fn id(&self) -> &str {
        &self.id
    }

    async fn speak(
        &self,
        text: &str,
        _voice: &Voice,
        config: &PlaybackConfig,
        progress: Option<ProgressCallback>,
    ) -> Result<()> {
        let epoch = self.epoch.load(Ordering::SeqCst);
        self.playing.store(true, Ordering::SeqCst);
        self.paused.store(false, Ordering::SeqCst);

        let total_secs = estimate_duration(text, config.rate);
        let ticks = (total_secs / TICK.as_secs_f64()).ceil().max(1.0) as u64;

        let mut elapsed = 0u64;
        while elapsed < ticks {
            tokio::time::sleep(TICK).await;

            // A stop invalidated this utterance
            if self.epoch.load(Ordering::SeqCst) != epoch {
                return Ok(());
            }

            // Paused ticks do not advance the clock
            if self.paused.load(Ordering::SeqCst) {
                continue;
            }

            elapsed += 1;
            if let Some(callback) = &progress {
                callback(elapsed as f32 / ticks as f32);
            }
        }

        self.playing.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn pause(&self) {
        if self.playing.load(Ordering::SeqCst) {
            self.paused.store(true, Ordering::SeqCst);
        }
    }

    fn resume(&self) {
        self.paused.store(false, Ordering::SeqCst);
    }

    fn stop(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        self.playing.store(false, Ordering::SeqCst);
        self.paused.store(false, Ordering::SeqCst);
    }

    fn is_playing(&self) -> bool {
        self.playing.load(Ordering::SeqCst)
    }

    fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    fn voices(&self) -> Vec<Voice> {
        self.voices.clone()
    }
}
