use std::{error::Error, fmt, sync::Arc};

use crate::{AndThen, Continuation, Negate, UnsupportedShape};

/// Error types a [`GlobFunction`] may fail with.
///
/// Every glob error must be able to carry an [`UnsupportedShape`], since any
/// chain may contain a sequencing decorator invoked through a shape its
/// continuation cannot follow.
///
/// Implemented automatically for every qualifying type.
pub trait GlobError: Error + From<UnsupportedShape> + Send + Sync + 'static {}

impl<E: Error + From<UnsupportedShape> + Send + Sync + 'static> GlobError for E {}

/// A single callable usable wherever any of eight call shapes is expected.
///
/// A glob function can stand in for a unary or binary function, a supplier,
/// a unary, binary, or ternary consumer, and a unary or binary predicate.
/// Every implementer provides all eight shapes, though a given instance need
/// not give each of them meaning; calling a shape the underlying callable was
/// never built for fails at call time rather than being rejected up front.
///
/// ## Composing
///
/// - [`and_then()`](GlobFunction::and_then) and its siblings sequence a
///   continuation after this function.
/// - [`negate()`](GlobFunction::negate) inverts both predicate shapes.
///
/// Composition never calls the underlying callables and never mutates `self`;
/// it wraps `self` in a new decorator.
///
/// ## Diagnostics
///
/// [`Display`](fmt::Display) renders the whole composition tree, e.g.
/// `-(ScriptLambda(|x| x < 100)) then ScriptLambda(|x| x * 10)`.
pub trait GlobFunction: fmt::Display {
    /// The dynamic value flowing through arguments and results.
    type Value: Clone;

    /// The error every call shape fails with.
    type Error: GlobError;

    /// Unary function shape.
    ///
    /// # Errors
    ///
    /// Fails if the underlying callable cannot be invoked with one argument.
    fn apply(&self, a: Self::Value) -> Result<Self::Value, Self::Error>;

    /// Binary function shape.
    ///
    /// # Errors
    ///
    /// Fails if the underlying callable cannot be invoked with two arguments.
    fn apply_bi(&self, a: Self::Value, b: Self::Value) -> Result<Self::Value, Self::Error>;

    /// Supplier shape.
    ///
    /// # Errors
    ///
    /// Fails if the underlying callable cannot be invoked without arguments.
    fn get(&self) -> Result<Self::Value, Self::Error>;

    /// Unary consumer shape; any result is discarded.
    ///
    /// # Errors
    ///
    /// Fails if the underlying callable cannot be invoked with one argument.
    fn accept(&self, a: Self::Value) -> Result<(), Self::Error>;

    /// Binary consumer shape.
    ///
    /// # Errors
    ///
    /// Fails if the underlying callable cannot be invoked with two arguments.
    fn accept_bi(&self, a: Self::Value, b: Self::Value) -> Result<(), Self::Error>;

    /// Ternary consumer shape.
    ///
    /// # Errors
    ///
    /// Fails if the underlying callable cannot be invoked with three arguments.
    fn accept_tri(&self, a: Self::Value, b: Self::Value, c: Self::Value)
    -> Result<(), Self::Error>;

    /// Unary predicate shape.
    ///
    /// # Errors
    ///
    /// Fails if the underlying callable cannot be invoked with one argument or
    /// its result is not a boolean.
    fn test(&self, a: Self::Value) -> Result<bool, Self::Error>;

    /// Binary predicate shape.
    ///
    /// # Errors
    ///
    /// Fails if the underlying callable cannot be invoked with two arguments or
    /// its result is not a boolean.
    fn test_bi(&self, a: Self::Value, b: Self::Value) -> Result<bool, Self::Error>;

    /// Sequences another glob function after this one.
    ///
    /// The result can follow every sequenced shape: function calls feed this
    /// function's result into `then.apply`, consumer calls run `then.accept`
    /// or `then.accept_bi` with the same arguments.
    ///
    /// # Example
    ///
    /// ```
    /// use globfn_core::{GlobFunction, testing::Lambda};
    ///
    /// let add_two = Lambda::unary("add two", |x: i64| x + 2);
    /// let times_ten = Lambda::unary("times ten", |x: i64| x * 10);
    ///
    /// let chain = add_two.and_then(times_ten);
    /// assert_eq!(chain.apply(5).unwrap(), 70);
    /// assert_eq!(chain.to_string(), "add two then times ten");
    /// ```
    fn and_then<G>(self, then: G) -> AndThen<Self>
    where
        Self: Sized,
        G: GlobFunction<Value = Self::Value, Error = Self::Error> + Send + Sync + 'static,
    {
        AndThen::new(self, Continuation::glob(then))
    }

    /// Sequences a unary function after this one's `apply` shapes.
    ///
    /// The consumer shapes of the result fail with [`UnsupportedShape`].
    fn and_then_fn<F>(self, then: F) -> AndThen<Self>
    where
        Self: Sized,
        F: Fn(Self::Value) -> Result<Self::Value, Self::Error> + Send + Sync + 'static,
    {
        AndThen::new(self, Continuation::function(then))
    }

    /// Sequences a unary consumer after this one's `accept(a)`.
    ///
    /// Every other sequenced shape of the result fails with [`UnsupportedShape`].
    fn and_then_consumer<F>(self, then: F) -> AndThen<Self>
    where
        Self: Sized,
        F: Fn(Self::Value) -> Result<(), Self::Error> + Send + Sync + 'static,
    {
        AndThen::new(self, Continuation::consumer(then))
    }

    /// Sequences a binary consumer after this one's `accept(a, b)`.
    ///
    /// Every other sequenced shape of the result fails with [`UnsupportedShape`].
    fn and_then_bi_consumer<F>(self, then: F) -> AndThen<Self>
    where
        Self: Sized,
        F: Fn(Self::Value, Self::Value) -> Result<(), Self::Error> + Send + Sync + 'static,
    {
        AndThen::new(self, Continuation::bi_consumer(then))
    }

    /// Sequences an already-built continuation after this function.
    fn and_then_with(self, then: Continuation<Self::Value, Self::Error>) -> AndThen<Self>
    where
        Self: Sized,
    {
        AndThen::new(self, then)
    }

    /// Inverts the result of both predicate shapes.
    ///
    /// Negating twice behaves like the original for `test` calls but builds a
    /// new, distinct chain.
    fn negate(self) -> Negate<Self>
    where
        Self: Sized,
    {
        Negate::new(self)
    }
}

/// Type alias for the value type of a [`GlobFunction`].
pub type ValueOf<G> = <G as GlobFunction>::Value;

/// Type alias for the error type of a [`GlobFunction`].
pub type ErrorOf<G> = <G as GlobFunction>::Error;

/// Shared glob functions are glob functions, so one leaf can sit in several
/// chains.
impl<G> GlobFunction for Arc<G>
where
    G: GlobFunction + ?Sized,
{
    type Value = G::Value;
    type Error = G::Error;

    fn apply(&self, a: Self::Value) -> Result<Self::Value, Self::Error> {
        (**self).apply(a)
    }

    fn apply_bi(&self, a: Self::Value, b: Self::Value) -> Result<Self::Value, Self::Error> {
        (**self).apply_bi(a, b)
    }

    fn get(&self) -> Result<Self::Value, Self::Error> {
        (**self).get()
    }

    fn accept(&self, a: Self::Value) -> Result<(), Self::Error> {
        (**self).accept(a)
    }

    fn accept_bi(&self, a: Self::Value, b: Self::Value) -> Result<(), Self::Error> {
        (**self).accept_bi(a, b)
    }

    fn accept_tri(
        &self,
        a: Self::Value,
        b: Self::Value,
        c: Self::Value,
    ) -> Result<(), Self::Error> {
        (**self).accept_tri(a, b, c)
    }

    fn test(&self, a: Self::Value) -> Result<bool, Self::Error> {
        (**self).test(a)
    }

    fn test_bi(&self, a: Self::Value, b: Self::Value) -> Result<bool, Self::Error> {
        (**self).test_bi(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::testing::{Lambda, LambdaError};

    #[test]
    fn shared_leaf_sits_in_two_chains() {
        let small = Arc::new(Lambda::unary_test("small", |x: i64| x < 10));

        let negated = Arc::clone(&small).negate();
        let double = Lambda::unary("double", |x: i64| x * 2);
        let doubled = Arc::clone(&small).and_then(double);

        assert!(small.test(3).unwrap());
        assert!(!negated.test(3).unwrap());
        assert!(doubled.test(3).unwrap());
        assert_eq!(negated.to_string(), "-(small)");
    }

    #[test]
    fn trait_objects_are_glob_functions() {
        let boxed: Arc<dyn GlobFunction<Value = i64, Error = LambdaError> + Send + Sync> =
            Arc::new(Lambda::unary("inc", |x: i64| x + 1));

        assert_eq!(boxed.apply(1).unwrap(), 2);
        assert_eq!(boxed.to_string(), "inc");
    }
}
