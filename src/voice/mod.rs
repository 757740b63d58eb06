//! Voice inventory: value types, language tags, catalog queries, and
//! language detection.

pub mod catalog;
pub mod detect;
pub mod language;
pub mod types;

pub use catalog::VoiceCatalog;
pub use detect::{LanguageDetector, ScriptDetector};
pub use language::{normalize_language_code, LanguageTag};
pub use types::{Gender, Voice, VoiceQuality, VoiceSource};
