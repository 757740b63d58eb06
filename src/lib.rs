//! # Orator - TTS Playback Orchestration
//!
//! A client-side orchestration layer for text-to-speech playback. Orator
//! accepts text, splits it into sentences, assigns a voice per sentence
//! (explicit choice, saved preference, or automatic language detection),
//! and drives a pluggable speech engine through a play/pause/resume/stop
//! lifecycle with queued multi-sentence playback.
//!
//! ## Features
//!
//! - **Queued playback**: sentence-by-sentence queue traversal with
//!   configurable inter-sentence pauses
//! - **Multi-engine dispatch**: on-device synthesizer shim plus remote
//!   HTTP voice-synthesis engines behind one capability trait
//! - **Voice selection**: per-sentence override, saved preference, or
//!   automatic language detection against the voice catalog
//! - **Lifecycle events**: started/paused/resumed/stopped/completed/error
//!   plus queue completion and incremental progress on a multicast bus
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use orator::{PlaybackSession, EngineRegistry, VoiceCatalog, ConfigStore, MemoryStore};
//!
//! let registry = Arc::new(EngineRegistry::with_local_default());
//! let catalog = Arc::new(VoiceCatalog::from_voices(my_voices));
//! let store = Arc::new(ConfigStore::new(Arc::new(MemoryStore::new())));
//!
//! let session = PlaybackSession::new(registry, catalog, store);
//! session.subscribe_fn(|event| println!("{event:?}"));
//!
//! session.add_texts(["First sentence.", "Second sentence."]);
//! session.play_queue();
//! ```
//!
//! ## Engine Registry
//!
//! ```rust,ignore
//! use orator::{EngineRegistry, RemoteEngine, RemoteEngineConfig};
//!
//! let registry = EngineRegistry::with_local_default();
//! registry.register(Arc::new(remote_engine));
//! registry.set_active("remote:acme");
//! ```

#![allow(missing_docs)]
#![allow(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod core;
pub mod engine;
pub mod session;
pub mod text;
pub mod voice;

// Core framework re-exports
pub use crate::core::{
    error::{Result, TtsError},
    event_bus::{EventBus, EventHandler, PublishStats, SubscriptionId},
};

// Voice re-exports
pub use crate::voice::{
    catalog::VoiceCatalog,
    detect::{LanguageDetector, ScriptDetector},
    language::{normalize_language_code, LanguageTag},
    types::{Gender, Voice, VoiceQuality, VoiceSource},
};

// Engine re-exports
pub use crate::engine::{
    local::LocalEngine,
    registry::EngineRegistry,
    remote::{AudioSink, NullSink, RemoteAudioEncoding, RemoteEngine, RemoteEngineConfig},
    traits::{ProgressCallback, SpeechEngine},
};

// Session re-exports
pub use crate::session::{
    events::PlaybackEvent,
    playback::{PlaybackSession, PlaybackSnapshot},
    sentence::Sentence,
};

// Configuration re-exports
pub use crate::config::{ConfigStore, KeyValueStore, MemoryStore, PlaybackConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Synthetic fallback voice id used when the catalog is empty
pub const DEFAULT_VOICE_ID: &str = "default";
