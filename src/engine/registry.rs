//! Engine registry
//!
//! An ordered, append-only table of registered engines with one
//! designated active. Engines are never removed; switching the active
//! engine does not stop whatever the previous engine is playing.

use std::sync::{Arc, RwLock};

use tracing::{info, warn};

use crate::engine::local::LocalEngine;
use crate::engine::traits::SpeechEngine;

/// Registry of speech engines
pub struct EngineRegistry {
    engines: RwLock<Vec<Arc<dyn SpeechEngine>>>,
    active: RwLock<usize>,
}

impl EngineRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            engines: RwLock::new(Vec::new()),
            active: RwLock::new(0),
        }
    }

    /// Create a registry seeded with the always-available local engine,
    /// which becomes the default active engine
    pub fn with_local_default() -> Self {
        let registry = Self::new();
        registry.register(Arc::new(LocalEngine::default()));
        registry
    }

    /// Append an engine; does not affect the active engine
    pub fn register(&self, engine: Arc<dyn SpeechEngine>) {
        info!(engine = engine.id(), "engine registered");
        self.engines.write().unwrap().push(engine);
    }

    /// Switch the active engine by identifier
    ///
    /// Unknown identifiers leave the active engine unchanged.
    pub fn set_active(&self, id: &str) {
        let engines = self.engines.read().unwrap();
        match engines.iter().position(|e| e.id() == id) {
            Some(index) => {
                *self.active.write().unwrap() = index;
                info!(engine = id, "active engine switched");
            }
            None => warn!(engine = id, "unknown engine id, active engine unchanged"),
        }
    }

    /// The currently active engine; the first registered engine by
    /// default. `None` only for an empty registry.
    pub fn active(&self) -> Option<Arc<dyn SpeechEngine>> {
        let engines = self.engines.read().unwrap();
        let index = *self.active.read().unwrap();
        engines.get(index).or_else(|| engines.first()).cloned()
    }

    /// Identifier of the active engine
    pub fn active_id(&self) -> Option<String> {
        self.active().map(|e| e.id().to_string())
    }

    /// Identifiers of all registered engines, in registration order
    pub fn list(&self) -> Vec<String> {
        self.engines
            .read()
            .unwrap()
            .iter()
            .map(|e| e.id().to_string())
            .collect()
    }

    /// Number of registered engines
    pub fn len(&self) -> usize {
        self.engines.read().unwrap().len()
    }

    /// Whether no engine is registered
    pub fn is_empty(&self) -> bool {
        self.engines.read().unwrap().is_empty()
    }
}

impl Default for EngineRegistry {
    fn default() -> Self {
        Self::new()
    }
}
