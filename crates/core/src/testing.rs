//! Native glob functions for exercising chains without a script engine.
//!
//! Available under `cfg(test)` and the `test-support` feature.

use std::{
    fmt,
    sync::atomic::{AtomicUsize, Ordering},
};

use thiserror::Error;

use crate::{GlobFunction, UnsupportedShape};

/// Errors raised by a [`Lambda`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LambdaError {
    #[error("`{label}` takes {expected} argument(s) but was called with {got}")]
    Arity {
        label: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("`{label}` returns a value, not a boolean")]
    NotBoolean { label: &'static str },

    #[error("`{label}` returns a boolean, not a value")]
    NotValue { label: &'static str },

    #[error(transparent)]
    Shape(#[from] UnsupportedShape),
}

type ValueBody = Box<dyn Fn(&[i64]) -> i64 + Send + Sync>;
type TestBody = Box<dyn Fn(&[i64]) -> bool + Send + Sync>;

enum Body {
    Value(ValueBody),
    Test(TestBody),
}

/// A fixed-arity closure over `i64` values, standing in for a dynamic closure.
///
/// Like a script closure, a `Lambda` accepts every call shape but only
/// succeeds for the arity it was built with, and counts every invocation.
pub struct Lambda {
    label: &'static str,
    arity: usize,
    body: Body,
    calls: AtomicUsize,
}

impl Lambda {
    fn new(label: &'static str, arity: usize, body: Body) -> Self {
        Self {
            label,
            arity,
            body,
            calls: AtomicUsize::new(0),
        }
    }

    /// A zero-argument closure producing a value.
    pub fn supplier<F>(label: &'static str, f: F) -> Self
    where
        F: Fn() -> i64 + Send + Sync + 'static,
    {
        let body = move |_: &[i64]| f();
        Self::new(label, 0, Body::Value(Box::new(body)))
    }

    /// A one-argument closure producing a value.
    pub fn unary<F>(label: &'static str, f: F) -> Self
    where
        F: Fn(i64) -> i64 + Send + Sync + 'static,
    {
        let body = move |args: &[i64]| f(args[0]);
        Self::new(label, 1, Body::Value(Box::new(body)))
    }

    /// A two-argument closure producing a value.
    pub fn binary<F>(label: &'static str, f: F) -> Self
    where
        F: Fn(i64, i64) -> i64 + Send + Sync + 'static,
    {
        let body = move |args: &[i64]| f(args[0], args[1]);
        Self::new(label, 2, Body::Value(Box::new(body)))
    }

    /// A three-argument closure producing a value.
    pub fn ternary<F>(label: &'static str, f: F) -> Self
    where
        F: Fn(i64, i64, i64) -> i64 + Send + Sync + 'static,
    {
        let body = move |args: &[i64]| f(args[0], args[1], args[2]);
        Self::new(label, 3, Body::Value(Box::new(body)))
    }

    /// A one-argument closure producing a boolean.
    pub fn unary_test<F>(label: &'static str, f: F) -> Self
    where
        F: Fn(i64) -> bool + Send + Sync + 'static,
    {
        let body = move |args: &[i64]| f(args[0]);
        Self::new(label, 1, Body::Test(Box::new(body)))
    }

    /// A two-argument closure producing a boolean.
    pub fn binary_test<F>(label: &'static str, f: F) -> Self
    where
        F: Fn(i64, i64) -> bool + Send + Sync + 'static,
    {
        let body = move |args: &[i64]| f(args[0], args[1]);
        Self::new(label, 2, Body::Test(Box::new(body)))
    }

    /// Returns how many times the closure body has run.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn check_arity(&self, args: &[i64]) -> Result<(), LambdaError> {
        if args.len() == self.arity {
            Ok(())
        } else {
            Err(LambdaError::Arity {
                label: self.label,
                expected: self.arity,
                got: args.len(),
            })
        }
    }

    fn value(&self, args: &[i64]) -> Result<i64, LambdaError> {
        self.check_arity(args)?;
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.body {
            Body::Value(f) => Ok(f(args)),
            Body::Test(_) => Err(LambdaError::NotValue { label: self.label }),
        }
    }

    fn truth(&self, args: &[i64]) -> Result<bool, LambdaError> {
        self.check_arity(args)?;
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.body {
            Body::Test(f) => Ok(f(args)),
            Body::Value(_) => Err(LambdaError::NotBoolean { label: self.label }),
        }
    }

    fn run(&self, args: &[i64]) -> Result<(), LambdaError> {
        self.check_arity(args)?;
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.body {
            Body::Value(f) => {
                f(args);
            }
            Body::Test(f) => {
                f(args);
            }
        }
        Ok(())
    }
}

impl fmt::Display for Lambda {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label)
    }
}

impl GlobFunction for Lambda {
    type Value = i64;
    type Error = LambdaError;

    fn apply(&self, a: i64) -> Result<i64, LambdaError> {
        self.value(&[a])
    }

    fn apply_bi(&self, a: i64, b: i64) -> Result<i64, LambdaError> {
        self.value(&[a, b])
    }

    fn get(&self) -> Result<i64, LambdaError> {
        self.value(&[])
    }

    fn accept(&self, a: i64) -> Result<(), LambdaError> {
        self.run(&[a])
    }

    fn accept_bi(&self, a: i64, b: i64) -> Result<(), LambdaError> {
        self.run(&[a, b])
    }

    fn accept_tri(&self, a: i64, b: i64, c: i64) -> Result<(), LambdaError> {
        self.run(&[a, b, c])
    }

    fn test(&self, a: i64) -> Result<bool, LambdaError> {
        self.truth(&[a])
    }

    fn test_bi(&self, a: i64, b: i64) -> Result<bool, LambdaError> {
        self.truth(&[a, b])
    }
}
