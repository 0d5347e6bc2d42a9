#![allow(dead_code)]

use std::sync::{Arc, Mutex, Once};

use globfn_script::{EngineConfig, RhaiEngine};
use rhai::Dynamic;

static INIT_LOGGING: Once = Once::new();

/// Turns on log output for a test run when `TEST_LOG` is set.
pub fn init_test_logging() {
    INIT_LOGGING.call_once(|| {
        if std::env::var("TEST_LOG").is_ok() {
            let filter = std::env::var("RUST_LOG");
            tracing_subscriber::fmt()
                .with_test_writer()
                .with_env_filter(filter.as_deref().unwrap_or("debug"))
                .init();
        }
    });
}

/// A host collection scripts can push into.
///
/// Clones share storage, so a sink bound into an engine can be read back
/// from the test after scripts have run.
#[derive(Debug, Clone, Default)]
pub struct Sink(Arc<Mutex<Vec<Dynamic>>>);

impl Sink {
    pub fn add(&mut self, value: Dynamic) {
        self.0.lock().unwrap().push(value);
    }

    pub fn len(&self) -> usize {
        self.0.lock().unwrap().len()
    }

    pub fn ints(&self) -> Vec<i64> {
        self.0
            .lock()
            .unwrap()
            .iter()
            .map(|value| value.as_int().unwrap())
            .collect()
    }

    pub fn pairs(&self) -> Vec<Vec<i64>> {
        self.0
            .lock()
            .unwrap()
            .iter()
            .map(|value| {
                value
                    .clone()
                    .into_array()
                    .unwrap()
                    .iter()
                    .map(|item| item.as_int().unwrap())
                    .collect()
            })
            .collect()
    }
}

/// A default engine that knows the [`Sink`] type.
pub fn engine() -> RhaiEngine {
    let mut engine = RhaiEngine::new(&EngineConfig::default());
    engine
        .engine_mut()
        .register_type_with_name::<Sink>("Sink")
        .register_fn("add", Sink::add);
    engine
}

pub fn int(value: i64) -> Dynamic {
    Dynamic::from(value)
}
