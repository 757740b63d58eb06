//! Playback session
//!
//! Drives the sentence queue through the active engine. All mutable state
//! lives behind one mutex that is never held across an await; every
//! playback run carries a generation number, and any continuation whose
//! generation is stale drops its effects silently. `stop` invalidates by
//! bumping the generation, so a slow engine future resolving afterwards
//! cannot emit events or touch state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tracing::{debug, error, info, instrument};

use crate::config::{ConfigStore, PlaybackConfig};
use crate::core::error::{Result, TtsError};
use crate::core::event_bus::{EventBus, EventHandler, SubscriptionId};
use crate::engine::registry::EngineRegistry;
use crate::engine::traits::ProgressCallback;
use crate::session::events::PlaybackEvent;
use crate::session::sentence::Sentence;
use crate::text::normalizer::preprocess;
use crate::text::segmenter::split_into_sentences;
use crate::voice::catalog::VoiceCatalog;
use crate::voice::types::Voice;

#[derive(Default)]
struct SessionState {
    queue: Vec<Sentence>,
    current_index: usize,
    current_sentence: Option<Sentence>,
    is_playing: bool,
    is_paused: bool,
    current_progress: f32,
}

/// Point-in-time view of the session state
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackSnapshot {
    pub is_playing: bool,
    pub is_paused: bool,
    pub queue_len: usize,
    pub current_index: usize,
    pub current_sentence: Option<Sentence>,
    pub current_progress: f32,
}

struct SessionInner {
    state: Mutex<SessionState>,
    generation: AtomicU64,
    registry: Arc<EngineRegistry>,
    catalog: Arc<VoiceCatalog>,
    config: Mutex<PlaybackConfig>,
    store: Arc<ConfigStore>,
    events: EventBus<PlaybackEvent>,
}

impl SessionInner {
    fn bump_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn generation_is(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Voice resolution priority: explicit choice, session preference,
    /// detected language, first catalog voice, synthetic fallback.
    fn resolve_voice(
        &self,
        explicit: Option<&Voice>,
        text: &str,
        config: &PlaybackConfig,
    ) -> Voice {
        if let Some(voice) = explicit {
            return voice.clone();
        }
        if let Some(voice) = &config.preferred_voice {
            return voice.clone();
        }
        if config.auto_language_detection {
            if let Some(tag) = self.catalog.detect_language(text) {
                if let Some(voice) = self.catalog.voices_for_language(&tag).first() {
                    debug!(language = %tag, voice = %voice.id, "voice selected by detection");
                    return voice.clone();
                }
            }
        }
        if let Some(voice) = self.catalog.all_voices().first() {
            return voice.clone();
        }
        Voice::fallback()
    }

    /// Progress sink for one utterance; stale generations are dropped
    fn progress_callback(self: &Arc<Self>, generation: u64) -> ProgressCallback {
        let inner = Arc::clone(self);
        Arc::new(move |value: f32| {
            if !inner.generation_is(generation) {
                return;
            }
            inner.state.lock().unwrap().current_progress = value;
            inner.events.publish(&PlaybackEvent::ProgressChanged { value });
        })
    }

    fn halt_with_error(&self, cause: TtsError) {
        error!(%cause, "utterance failed, halting playback");
        {
            let mut state = self.state.lock().unwrap();
            state.is_playing = false;
            state.is_paused = false;
        }
        self.events.publish(&PlaybackEvent::Error { cause });
    }
}

/// Queued sentence playback over the active speech engine
pub struct PlaybackSession {
    inner: Arc<SessionInner>,
}

impl PlaybackSession {
    /// Create a session; the persisted configuration is loaded eagerly
    pub fn new(
        registry: Arc<EngineRegistry>,
        catalog: Arc<VoiceCatalog>,
        store: Arc<ConfigStore>,
    ) -> Self {
        let config = store.load();
        Self {
            inner: Arc::new(SessionInner {
                state: Mutex::new(SessionState::default()),
                generation: AtomicU64::new(0),
                registry,
                catalog,
                config: Mutex::new(config),
                store,
                events: EventBus::new(),
            }),
        }
    }

    // ---- event stream ----

    /// Subscribe a lifecycle event handler
    pub fn subscribe(&self, handler: Arc<dyn EventHandler<PlaybackEvent>>) -> SubscriptionId {
        self.inner.events.subscribe(handler)
    }

    /// Subscribe a closure to lifecycle events
    pub fn subscribe_fn<F>(&self, f: F) -> SubscriptionId
    where
        F: Fn(&PlaybackEvent) + Send + Sync + 'static,
    {
        self.inner.events.subscribe_fn(f)
    }

    /// Detach a subscriber
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.events.unsubscribe(id)
    }

    // ---- queue management ----

    /// Append one sentence to the queue
    pub fn add_to_queue(&self, sentence: Sentence) {
        self.inner.state.lock().unwrap().queue.push(sentence);
    }

    /// Append each text as one sentence, verbatim
    pub fn add_texts<I, S>(&self, texts: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut state = self.inner.state.lock().unwrap();
        for text in texts {
            state.queue.push(Sentence::new(text));
        }
    }

    /// Preprocess a block of text and enqueue its sentences; returns the
    /// number of sentences added
    pub fn enqueue_text(&self, text: &str) -> usize {
        let sentences = split_into_sentences(&preprocess(text));
        let count = sentences.len();
        let mut state = self.inner.state.lock().unwrap();
        for sentence in sentences {
            state.queue.push(Sentence::new(sentence));
        }
        count
    }

    /// Empty the queue without touching in-flight playback
    pub fn clear_queue(&self) {
        let mut state = self.inner.state.lock().unwrap();
        state.queue.clear();
        state.current_index = 0;
    }

    /// Current queue contents
    pub fn queue(&self) -> Vec<Sentence> {
        self.inner.state.lock().unwrap().queue.clone()
    }

    /// Number of queued sentences
    pub fn queue_len(&self) -> usize {
        self.inner.state.lock().unwrap().queue.len()
    }

    // ---- playback lifecycle ----

    /// Speak one ad-hoc text outside the queue, resolving when it finishes
    ///
    /// Any in-flight playback is stopped first, so `Stopped` precedes the
    /// new `Started`.
    #[instrument(skip(self, text, voice))]
    pub async fn speak(&self, text: &str, voice: Option<Voice>) -> Result<()> {
        self.stop();
        let generation = self.inner.bump_generation();

        let engine = self
            .inner
            .registry
            .active()
            .ok_or_else(|| TtsError::config("no engine registered"))?;
        let config = self.inner.config.lock().unwrap().clone();
        let voice = self.inner.resolve_voice(voice.as_ref(), text, &config);

        {
            let mut state = self.inner.state.lock().unwrap();
            state.is_playing = true;
            state.is_paused = false;
            state.current_progress = 0.0;
            state.current_sentence = Some(Sentence::new(text));
        }
        self.inner
            .events
            .publish(&PlaybackEvent::Started { text: text.to_string() });

        let progress = self.inner.progress_callback(generation);
        let result = engine.speak(text, &voice, &config, Some(progress)).await;

        if !self.inner.generation_is(generation) {
            return Ok(());
        }

        match result {
            Ok(()) => {
                self.inner.state.lock().unwrap().current_progress = 1.0;
                self.inner
                    .events
                    .publish(&PlaybackEvent::Completed { text: text.to_string() });
                Ok(())
            }
            Err(cause) => {
                self.inner.halt_with_error(cause.clone());
                Err(cause)
            }
        }
    }

    /// Start traversing the queue from the beginning
    ///
    /// No-op when the queue is empty. Any previous run is invalidated; the
    /// engine itself is not stopped here, mirroring the registry's
    /// switch-does-not-stop rule.
    #[instrument(skip(self))]
    pub fn play_queue(&self) {
        let generation = {
            let mut state = self.inner.state.lock().unwrap();
            if state.queue.is_empty() {
                debug!("play_queue on empty queue, nothing to do");
                return;
            }
            state.current_index = 0;
            state.is_playing = true;
            state.is_paused = false;
            state.current_progress = 0.0;
            self.inner.bump_generation()
        };

        info!(queued = self.queue_len(), "queue playback starting");
        let inner = Arc::clone(&self.inner);
        tokio::spawn(run_queue(inner, generation));
    }

    /// Pause the current utterance; no-op unless playing and not paused
    pub fn pause(&self) {
        let paused = {
            let mut state = self.inner.state.lock().unwrap();
            if !state.is_playing || state.is_paused {
                false
            } else {
                state.is_paused = true;
                true
            }
        };
        if paused {
            if let Some(engine) = self.inner.registry.active() {
                engine.pause();
            }
            self.inner.events.publish(&PlaybackEvent::Paused);
        }
    }

    /// Resume a paused utterance; no-op unless paused
    pub fn resume(&self) {
        let resumed = {
            let mut state = self.inner.state.lock().unwrap();
            if !state.is_paused {
                false
            } else {
                state.is_paused = false;
                true
            }
        };
        if resumed {
            if let Some(engine) = self.inner.registry.active() {
                engine.resume();
            }
            self.inner.events.publish(&PlaybackEvent::Resumed);
        }
    }

    /// Stop playback, leaving the queue position where it was
    ///
    /// Always emits `Stopped`, even when nothing was playing.
    pub fn stop(&self) {
        self.inner.bump_generation();
        if let Some(engine) = self.inner.registry.active() {
            engine.stop();
        }
        {
            let mut state = self.inner.state.lock().unwrap();
            state.is_playing = false;
            state.is_paused = false;
            state.current_sentence = None;
            state.current_progress = 0.0;
        }
        self.inner.events.publish(&PlaybackEvent::Stopped);
    }

    /// Stop, move to the next queued sentence, and restart dispatch
    /// there; no-op at the end of the queue
    pub fn skip_to_next(&self) {
        self.skip_to(1)
    }

    /// Stop, move to the previous queued sentence, and restart dispatch
    /// there; no-op at the start
    pub fn skip_to_previous(&self) {
        self.skip_to(-1)
    }

    fn skip_to(&self, delta: isize) {
        let target = {
            let state = self.inner.state.lock().unwrap();
            let target = state.current_index as isize + delta;
            if target < 0 || target as usize >= state.queue.len() {
                return;
            }
            target as usize
        };

        self.stop();
        let generation = {
            let mut state = self.inner.state.lock().unwrap();
            state.current_index = target;
            state.is_playing = true;
            state.is_paused = false;
            state.current_progress = 0.0;
            self.inner.bump_generation()
        };
        let inner = Arc::clone(&self.inner);
        tokio::spawn(run_queue(inner, generation));
    }

    // ---- configuration ----

    /// Current playback parameters
    pub fn configuration(&self) -> PlaybackConfig {
        self.inner.config.lock().unwrap().clone()
    }

    /// Replace the playback parameters and persist them
    pub fn update_configuration(&self, config: PlaybackConfig) {
        self.inner.store.save(&config);
        *self.inner.config.lock().unwrap() = config;
    }

    /// Set the session-level preferred voice, persisting both the
    /// configuration slot and the per-language map
    pub fn set_preferred_voice(&self, voice: Voice) {
        let config = {
            let mut config = self.inner.config.lock().unwrap();
            config.preferred_voice = Some(voice.clone());
            config.clone()
        };
        self.inner.store.save(&config);
        self.inner
            .store
            .set_preferred_voice(voice.clone(), &voice.language);
    }

    // ---- introspection ----

    pub fn is_playing(&self) -> bool {
        self.inner.state.lock().unwrap().is_playing
    }

    pub fn is_paused(&self) -> bool {
        self.inner.state.lock().unwrap().is_paused
    }

    pub fn current_index(&self) -> usize {
        self.inner.state.lock().unwrap().current_index
    }

    pub fn current_progress(&self) -> f32 {
        self.inner.state.lock().unwrap().current_progress
    }

    /// The sentence currently dispatched, if any
    pub fn current_sentence(&self) -> Option<Sentence> {
        self.inner.state.lock().unwrap().current_sentence.clone()
    }

    /// Consistent view of the whole session state
    pub fn snapshot(&self) -> PlaybackSnapshot {
        let state = self.inner.state.lock().unwrap();
        PlaybackSnapshot {
            is_playing: state.is_playing,
            is_paused: state.is_paused,
            queue_len: state.queue.len(),
            current_index: state.current_index,
            current_sentence: state.current_sentence.clone(),
            current_progress: state.current_progress,
        }
    }
}

/// Queue traversal task for one playback generation
async fn run_queue(inner: Arc<SessionInner>, generation: u64) {
    loop {
        let sentence = {
            let state = inner.state.lock().unwrap();
            if !inner.generation_is(generation) {
                return;
            }
            state.queue.get(state.current_index).cloned()
        };
        let Some(sentence) = sentence else { break };

        let config = sentence
            .config
            .clone()
            .unwrap_or_else(|| inner.config.lock().unwrap().clone());
        let voice = inner.resolve_voice(sentence.voice.as_ref(), &sentence.text, &config);

        let Some(engine) = inner.registry.active() else {
            inner.halt_with_error(TtsError::config("no engine registered"));
            return;
        };

        // Re-assert the playing flags per sentence: a pause issued during
        // the inter-sentence delay must not outlive the delay.
        {
            let mut state = inner.state.lock().unwrap();
            state.is_playing = true;
            state.is_paused = false;
            state.current_progress = 0.0;
            state.current_sentence = Some(sentence.clone());
        }
        inner.events.publish(&PlaybackEvent::Started {
            text: sentence.text.clone(),
        });

        let progress = inner.progress_callback(generation);
        let result = engine
            .speak(&sentence.text, &voice, &config, Some(progress))
            .await;

        if !inner.generation_is(generation) {
            return;
        }

        match result {
            Ok(()) => {
                inner.state.lock().unwrap().current_progress = 1.0;
                inner.events.publish(&PlaybackEvent::Completed {
                    text: sentence.text.clone(),
                });
                let exhausted = {
                    let mut state = inner.state.lock().unwrap();
                    state.current_index += 1;
                    state.current_index >= state.queue.len()
                };
                if exhausted {
                    break;
                }

                let pause = config.pause_duration();
                if !pause.is_zero() {
                    tokio::time::sleep(pause).await;
                    if !inner.generation_is(generation) {
                        return;
                    }
                }
            }
            Err(cause) => {
                inner.halt_with_error(cause);
                return;
            }
        }
    }

    {
        let mut state = inner.state.lock().unwrap();
        state.is_playing = false;
        state.is_paused = false;
        state.current_sentence = None;
        state.current_progress = 0.0;
    }
    info!("queue playback finished");
    inner.events.publish(&PlaybackEvent::QueueCompleted);
}
