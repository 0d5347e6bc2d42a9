//! Script-backed glob functions.
//!
//! A [`ScriptLambda`] compiles one closure from source text and answers every
//! [`GlobFunction`](globfn_core::GlobFunction) call shape by invoking it. The
//! closure runs on an [`Evaluator`]; [`RhaiEngine`] is the one provided here.
//! Engines are shared through an [`EngineRegistry`] and configured with an
//! [`EngineConfig`].

mod config;
mod error;
mod evaluator;
mod lambda;
mod registry;
mod rhai_engine;

pub use config::{ConfigError, DEFAULT_ENGINE_NAME, EngineConfig};
pub use error::ScriptError;
pub use evaluator::Evaluator;
pub use lambda::ScriptLambda;
pub use registry::EngineRegistry;
pub use rhai_engine::{RhaiClosure, RhaiEngine};
