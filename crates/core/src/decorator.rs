use std::fmt;

use crate::{ErrorOf, GlobFunction, ValueOf};

/// A glob function that wraps another and forwards to it by default.
///
/// Each call shape is backed by an `on_*` hook (`on_apply` backs `apply`, and
/// so on) whose provided implementation passes its arguments unchanged to the
/// same shape of [`base()`](Decorator::base) and returns its result unchanged.
/// A decorator overrides only the hooks for the shapes it changes.
///
/// Every `Decorator` that implements [`Display`](fmt::Display) is a
/// [`GlobFunction`] through a blanket implementation, so decorators compose
/// like any other glob function.
///
/// # Example
///
/// ```
/// use std::fmt;
///
/// use globfn_core::{Decorator, ErrorOf, GlobFunction, testing::Lambda};
///
/// /// Clamps unary function results at zero.
/// struct NonNegative<B>(B);
///
/// impl<B: GlobFunction<Value = i64>> Decorator for NonNegative<B> {
///     type Base = B;
///
///     fn base(&self) -> &B {
///         &self.0
///     }
///
///     fn on_apply(&self, a: i64) -> Result<i64, ErrorOf<B>> {
///         self.0.apply(a).map(|v| v.max(0))
///     }
/// }
///
/// impl<B: fmt::Display> fmt::Display for NonNegative<B> {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         write!(f, "max(0, {})", self.0)
///     }
/// }
///
/// let clamped = NonNegative(Lambda::unary("dec", |x| x - 1));
/// assert_eq!(clamped.apply(0).unwrap(), 0);
/// assert!(clamped.apply_bi(1, 2).is_err());
/// assert_eq!(clamped.to_string(), "max(0, dec)");
/// ```
pub trait Decorator {
    /// The wrapped glob function's type.
    type Base: GlobFunction;

    /// Returns the wrapped glob function.
    fn base(&self) -> &Self::Base;

    /// Backs [`GlobFunction::apply`].
    fn on_apply(&self, a: ValueOf<Self::Base>) -> Result<ValueOf<Self::Base>, ErrorOf<Self::Base>> {
        self.base().apply(a)
    }

    /// Backs [`GlobFunction::apply_bi`].
    fn on_apply_bi(
        &self,
        a: ValueOf<Self::Base>,
        b: ValueOf<Self::Base>,
    ) -> Result<ValueOf<Self::Base>, ErrorOf<Self::Base>> {
        self.base().apply_bi(a, b)
    }

    /// Backs [`GlobFunction::get`].
    fn on_get(&self) -> Result<ValueOf<Self::Base>, ErrorOf<Self::Base>> {
        self.base().get()
    }

    /// Backs [`GlobFunction::accept`].
    fn on_accept(&self, a: ValueOf<Self::Base>) -> Result<(), ErrorOf<Self::Base>> {
        self.base().accept(a)
    }

    /// Backs [`GlobFunction::accept_bi`].
    fn on_accept_bi(
        &self,
        a: ValueOf<Self::Base>,
        b: ValueOf<Self::Base>,
    ) -> Result<(), ErrorOf<Self::Base>> {
        self.base().accept_bi(a, b)
    }

    /// Backs [`GlobFunction::accept_tri`].
    fn on_accept_tri(
        &self,
        a: ValueOf<Self::Base>,
        b: ValueOf<Self::Base>,
        c: ValueOf<Self::Base>,
    ) -> Result<(), ErrorOf<Self::Base>> {
        self.base().accept_tri(a, b, c)
    }

    /// Backs [`GlobFunction::test`].
    fn on_test(&self, a: ValueOf<Self::Base>) -> Result<bool, ErrorOf<Self::Base>> {
        self.base().test(a)
    }

    /// Backs [`GlobFunction::test_bi`].
    fn on_test_bi(
        &self,
        a: ValueOf<Self::Base>,
        b: ValueOf<Self::Base>,
    ) -> Result<bool, ErrorOf<Self::Base>> {
        self.base().test_bi(a, b)
    }
}

impl<D> GlobFunction for D
where
    D: Decorator + fmt::Display,
{
    type Value = ValueOf<D::Base>;
    type Error = ErrorOf<D::Base>;

    fn apply(&self, a: Self::Value) -> Result<Self::Value, Self::Error> {
        self.on_apply(a)
    }

    fn apply_bi(&self, a: Self::Value, b: Self::Value) -> Result<Self::Value, Self::Error> {
        self.on_apply_bi(a, b)
    }

    fn get(&self) -> Result<Self::Value, Self::Error> {
        self.on_get()
    }

    fn accept(&self, a: Self::Value) -> Result<(), Self::Error> {
        self.on_accept(a)
    }

    fn accept_bi(&self, a: Self::Value, b: Self::Value) -> Result<(), Self::Error> {
        self.on_accept_bi(a, b)
    }

    fn accept_tri(
        &self,
        a: Self::Value,
        b: Self::Value,
        c: Self::Value,
    ) -> Result<(), Self::Error> {
        self.on_accept_tri(a, b, c)
    }

    fn test(&self, a: Self::Value) -> Result<bool, Self::Error> {
        self.on_test(a)
    }

    fn test_bi(&self, a: Self::Value, b: Self::Value) -> Result<bool, Self::Error> {
        self.on_test_bi(a, b)
    }
}
