//! Playback lifecycle events
//!
//! Published on the session's [`EventBus`](crate::core::event_bus::EventBus)
//! in the order the transitions occur. Events are plain values; listeners
//! must not assume delivery on any particular thread.

use crate::core::error::TtsError;

/// Lifecycle notification from a playback session
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackEvent {
    /// An utterance began speaking
    Started { text: String },
    /// Playback was paused mid-utterance
    Paused,
    /// Playback resumed after a pause
    Resumed,
    /// Playback was stopped; always follows a `stop` call, even when idle
    Stopped,
    /// An utterance finished speaking
    Completed { text: String },
    /// An utterance failed; queue traversal halts here
    Error { cause: TtsError },
    /// The whole queue finished without error
    QueueCompleted,
    /// Fractional progress through the current utterance, in [0, 1]
    ProgressChanged { value: f32 },
}

impl PlaybackEvent {
    /// Whether this event terminates the current playback run
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Stopped | Self::Error { .. } | Self::QueueCompleted
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_classification() {
        assert!(PlaybackEvent::Stopped.is_terminal());
        assert!(PlaybackEvent::QueueCompleted.is_terminal());
        assert!(PlaybackEvent::Error {
            cause: TtsError::network("down")
        }
        .is_terminal());

        assert!(!PlaybackEvent::Paused.is_terminal());
        assert!(!PlaybackEvent::Started {
            text: "hi".into()
        }
        .is_terminal());
    }
}
