//! Speech engines: the capability trait every backend implements, the
//! registry that tracks the active engine, the on-device synthesizer
//! shim, and the remote HTTP engine.

pub mod local;
pub mod registry;
pub mod remote;
pub mod traits;

pub use local::LocalEngine;
pub use registry::EngineRegistry;
pub use remote::{AudioSink, NullSink, RemoteAudioEncoding, RemoteEngine, RemoteEngineConfig};
pub use traits::{ProgressCallback, SpeechEngine};
