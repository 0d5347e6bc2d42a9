use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};

use tracing::debug;

use crate::{DEFAULT_ENGINE_NAME, EngineConfig, Evaluator, RhaiEngine};

/// Named scripting engines shared by the lambdas compiled on them.
///
/// A registry is an ordinary value: callers create one and pass it to
/// wherever lambdas are built. The engine named [`DEFAULT_ENGINE_NAME`] is
/// created with default limits the first time it is asked for.
///
/// Engines are handed out as `Arc`s, so lambdas keep their engine alive after
/// it is replaced or the registry is dropped.
#[derive(Debug, Default)]
pub struct EngineRegistry {
    engines: RwLock<HashMap<String, Arc<RhaiEngine>>>,
}

impl EngineRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the engine registered under `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<RhaiEngine>> {
        self.engines
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    /// Registers `engine` under its own name, replacing any earlier engine.
    ///
    /// Lambdas already compiled on a replaced engine keep using it.
    pub fn insert(&self, engine: RhaiEngine) -> Arc<RhaiEngine> {
        let engine = Arc::new(engine);
        let name = engine.name().to_string();

        let replaced = self
            .engines
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.clone(), Arc::clone(&engine))
            .is_some();

        debug!(name = %name, replaced, "registered engine");
        engine
    }

    /// Returns the engine named by `config`, creating it if needed.
    ///
    /// An engine already registered under that name is returned as is, even
    /// if it was built with different limits.
    pub fn get_or_create(&self, config: &EngineConfig) -> Arc<RhaiEngine> {
        let mut engines = self.engines.write().unwrap_or_else(PoisonError::into_inner);
        let engine = engines
            .entry(config.name().to_string())
            .or_insert_with(|| Arc::new(RhaiEngine::new(config)));
        Arc::clone(engine)
    }

    /// Returns the default engine, creating it if needed.
    pub fn default_engine(&self) -> Arc<RhaiEngine> {
        if let Some(engine) = self.get(DEFAULT_ENGINE_NAME) {
            return engine;
        }
        self.get_or_create(&EngineConfig::default())
    }

    /// Returns the names of all registered engines, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .engines
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }
}
