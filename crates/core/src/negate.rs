use std::fmt;

use crate::{Decorator, ErrorOf, GlobFunction, ValueOf};

/// A glob function that inverts its base's predicate results.
///
/// Created by [`GlobFunction::negate()`]. Both `test` shapes return the
/// complement of the base's answer; every other shape goes to the base
/// unchanged.
pub struct Negate<B> {
    base: B,
}

impl<B> Negate<B>
where
    B: GlobFunction,
{
    pub(crate) fn new(base: B) -> Self {
        Self { base }
    }
}

impl<B> Decorator for Negate<B>
where
    B: GlobFunction,
{
    type Base = B;

    fn base(&self) -> &B {
        &self.base
    }

    fn on_test(&self, a: ValueOf<B>) -> Result<bool, ErrorOf<B>> {
        self.base.test(a).map(|v| !v)
    }

    fn on_test_bi(&self, a: ValueOf<B>, b: ValueOf<B>) -> Result<bool, ErrorOf<B>> {
        self.base.test_bi(a, b).map(|v| !v)
    }
}

impl<B> fmt::Display for Negate<B>
where
    B: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "-({})", self.base)
    }
}

impl<B> fmt::Debug for Negate<B>
where
    B: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Negate").field(&self.base).finish()
    }
}
