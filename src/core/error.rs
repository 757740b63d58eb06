//! Structured error handling for Orator
//!
//! A closed error taxonomy shared by all speech engines, surfaced to
//! listeners through `PlaybackEvent::Error`. Transport-specific failures
//! from remote vendors are mapped into these variants and never leak out.

use thiserror::Error;

/// Result type alias with TtsError
pub type Result<T> = std::result::Result<T, TtsError>;

/// Main error type for Orator
///
/// The engine-facing variants form a closed set; catalog and configuration
/// lookups never produce errors (absence is an empty collection or `None`).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TtsError {
    /// Transport-level failure reaching a remote engine
    #[error("Network error: {message}")]
    Network { message: String },

    /// Credentials rejected by a remote engine
    #[error("Authentication failed for engine '{engine}'")]
    AuthenticationFailed { engine: String },

    /// Response body could not be understood
    #[error("Invalid response from engine '{engine}': {message}")]
    InvalidResponse { engine: String, message: String },

    /// The requested voice is not supported by the dispatched engine
    #[error("Voice '{voice_id}' not supported by engine '{engine}'")]
    VoiceNotSupported { engine: String, voice_id: String },

    /// Vendor-side usage quota exhausted
    #[error("Quota exceeded for engine '{engine}'")]
    QuotaExceeded { engine: String },

    /// Vendor returned a server-side error status
    #[error("Server error from engine '{engine}': HTTP {status}")]
    ServerError { engine: String, status: u16 },

    /// Synthesized audio could not be decoded or played
    #[error("Audio conversion failed: {message}")]
    AudioConversionFailed { message: String },

    /// Construction-time misuse (missing api key, bad base url, ...)
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl TtsError {
    /// Create a network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create an authentication error
    pub fn auth(engine: impl Into<String>) -> Self {
        Self::AuthenticationFailed {
            engine: engine.into(),
        }
    }

    /// Create an invalid-response error
    pub fn invalid_response(engine: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            engine: engine.into(),
            message: message.into(),
        }
    }

    /// Create a voice-not-supported error
    pub fn voice_not_supported(engine: impl Into<String>, voice_id: impl Into<String>) -> Self {
        Self::VoiceNotSupported {
            engine: engine.into(),
            voice_id: voice_id.into(),
        }
    }

    /// Create a server error with status code
    pub fn server(engine: impl Into<String>, status: u16) -> Self {
        Self::ServerError {
            engine: engine.into(),
            status,
        }
    }

    /// Create an audio conversion error
    pub fn audio(message: impl Into<String>) -> Self {
        Self::AudioConversionFailed {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Check if retrying the same request could succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network { .. } => true,
            Self::QuotaExceeded { .. } => true,
            Self::ServerError { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl From<std::io::Error> for TtsError {
    fn from(err: std::io::Error) -> Self {
        TtsError::Network {
            message: err.to_string(),
        }
    }
}

impl From<anyhow::Error> for TtsError {
    fn from(err: anyhow::Error) -> Self {
        TtsError::Config {
            message: err.to_string(),
        }
    }
}
