//! Core infrastructure: error taxonomy and event bus.

pub mod error;
pub mod event_bus;

pub use error::{Result, TtsError};
pub use event_bus::{EventBus, EventHandler, PublishStats, SubscriptionId};
