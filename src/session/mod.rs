//! Playback session: the queue of sentences, the lifecycle state
//! machine, and the event stream observers subscribe to.

pub mod events;
pub mod playback;
pub mod sentence;

pub use events::PlaybackEvent;
pub use playback::{PlaybackSession, PlaybackSnapshot};
pub use sentence::Sentence;
