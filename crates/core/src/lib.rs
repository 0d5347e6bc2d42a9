//! Core traits and types for glob functions.
//!
//! A glob function is one callable that can stand in for many single-method
//! call shapes at once, so one dynamically defined closure can be handed to
//! any stage of a typed pipeline:
//!
//! - [`GlobFunction`]: the capability contract, eight call shapes plus
//!   composition
//! - [`Decorator`]: a base for glob functions that wrap another and forward
//!   to it by default
//! - [`AndThen`]: runs a [`Continuation`] after its base
//! - [`Negate`]: inverts both predicate shapes of its base
//! - [`CallShape`], [`ContinuationKind`], [`UnsupportedShape`]: the
//!   vocabulary for describing and rejecting mismatched calls
//!
//! Leaves that bind real closures live outside this crate; the
//! [`testing`] module (behind the `test-support` feature) provides a native
//! one for exercising chains.

mod and_then;
mod continuation;
mod decorator;
mod glob;
mod negate;
mod shape;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use and_then::AndThen;
pub use continuation::Continuation;
pub use decorator::Decorator;
pub use glob::{ErrorOf, GlobError, GlobFunction, ValueOf};
pub use negate::Negate;
pub use shape::{CallShape, ContinuationKind, UnsupportedShape};
