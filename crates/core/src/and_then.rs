use std::fmt;

use crate::{CallShape, Continuation, Decorator, ErrorOf, GlobFunction, UnsupportedShape, ValueOf};

/// A glob function that runs a continuation after its base.
///
/// Created by [`GlobFunction::and_then()`] and its siblings.
///
/// Only the function and consumer shapes are sequenced:
///
/// - `apply(a)` and `apply(a, b)` feed the base's result into the
///   continuation's unary function.
/// - `accept(a)` runs the base's `accept(a)`, then the continuation with the
///   same argument; `accept(a, b)` does the same with two arguments.
/// - `get()`, `test(..)`, and `accept(a, b, c)` go to the base unchanged.
///
/// A sequenced shape the continuation cannot follow, such as `apply` on a
/// decorator built with a consumer, fails with [`UnsupportedShape`] without
/// calling the base.
pub struct AndThen<B>
where
    B: GlobFunction,
{
    base: B,
    then: Continuation<ValueOf<B>, ErrorOf<B>>,
}

impl<B> AndThen<B>
where
    B: GlobFunction,
{
    pub(crate) fn new(base: B, then: Continuation<ValueOf<B>, ErrorOf<B>>) -> Self {
        Self { base, then }
    }

    /// Returns the continuation run after the base.
    pub fn continuation(&self) -> &Continuation<ValueOf<B>, ErrorOf<B>> {
        &self.then
    }

    /// Builds the error for a shape the continuation cannot follow.
    fn unsupported(&self, shape: CallShape) -> ErrorOf<B> {
        let continuation = self.then.kind();
        tracing::debug!(%shape, %continuation, chain = %self, "unsupported call shape");
        UnsupportedShape {
            shape,
            continuation,
        }
        .into()
    }
}

impl<B> Decorator for AndThen<B>
where
    B: GlobFunction,
{
    type Base = B;

    fn base(&self) -> &B {
        &self.base
    }

    fn on_apply(&self, a: ValueOf<B>) -> Result<ValueOf<B>, ErrorOf<B>> {
        match &self.then {
            Continuation::Function { body, .. } => body(self.base.apply(a)?),
            Continuation::Glob(glob) => glob.apply(self.base.apply(a)?),
            Continuation::Consumer { .. } | Continuation::BiConsumer { .. } => {
                Err(self.unsupported(CallShape::Apply))
            }
        }
    }

    fn on_apply_bi(&self, a: ValueOf<B>, b: ValueOf<B>) -> Result<ValueOf<B>, ErrorOf<B>> {
        match &self.then {
            Continuation::Function { body, .. } => body(self.base.apply_bi(a, b)?),
            Continuation::Glob(glob) => glob.apply(self.base.apply_bi(a, b)?),
            Continuation::Consumer { .. } | Continuation::BiConsumer { .. } => {
                Err(self.unsupported(CallShape::ApplyBi))
            }
        }
    }

    fn on_accept(&self, a: ValueOf<B>) -> Result<(), ErrorOf<B>> {
        match &self.then {
            Continuation::Consumer { body, .. } => {
                self.base.accept(a.clone())?;
                body(a)
            }
            Continuation::Glob(glob) => {
                self.base.accept(a.clone())?;
                glob.accept(a)
            }
            Continuation::Function { .. } | Continuation::BiConsumer { .. } => {
                Err(self.unsupported(CallShape::Accept))
            }
        }
    }

    fn on_accept_bi(&self, a: ValueOf<B>, b: ValueOf<B>) -> Result<(), ErrorOf<B>> {
        match &self.then {
            Continuation::BiConsumer { body, .. } => {
                self.base.accept_bi(a.clone(), b.clone())?;
                body(a, b)
            }
            Continuation::Glob(glob) => {
                self.base.accept_bi(a.clone(), b.clone())?;
                glob.accept_bi(a, b)
            }
            Continuation::Function { .. } | Continuation::Consumer { .. } => {
                Err(self.unsupported(CallShape::AcceptBi))
            }
        }
    }
}

impl<B> fmt::Display for AndThen<B>
where
    B: GlobFunction,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} then {}", self.base, self.then)
    }
}

impl<B> fmt::Debug for AndThen<B>
where
    B: GlobFunction + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AndThen")
            .field("base", &self.base)
            .field("then", &self.then)
            .finish()
    }
}
