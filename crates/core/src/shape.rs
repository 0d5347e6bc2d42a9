use std::fmt;

use thiserror::Error;

/// One of the eight ways a [`GlobFunction`] can be invoked.
///
/// [`GlobFunction`]: crate::GlobFunction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallShape {
    /// Unary function, `apply(a) -> value`.
    Apply,
    /// Binary function, `apply(a, b) -> value`.
    ApplyBi,
    /// Supplier, `get() -> value`.
    Get,
    /// Unary consumer, `accept(a)`.
    Accept,
    /// Binary consumer, `accept(a, b)`.
    AcceptBi,
    /// Ternary consumer, `accept(a, b, c)`.
    AcceptTri,
    /// Unary predicate, `test(a) -> bool`.
    Test,
    /// Binary predicate, `test(a, b) -> bool`.
    TestBi,
}

impl CallShape {
    /// Every call shape, in declaration order.
    pub const ALL: [CallShape; 8] = [
        CallShape::Apply,
        CallShape::ApplyBi,
        CallShape::Get,
        CallShape::Accept,
        CallShape::AcceptBi,
        CallShape::AcceptTri,
        CallShape::Test,
        CallShape::TestBi,
    ];

    /// Returns the number of positional arguments this shape passes.
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            CallShape::Get => 0,
            CallShape::Apply | CallShape::Accept | CallShape::Test => 1,
            CallShape::ApplyBi | CallShape::AcceptBi | CallShape::TestBi => 2,
            CallShape::AcceptTri => 3,
        }
    }

    /// Returns the method name this shape is invoked through.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            CallShape::Apply | CallShape::ApplyBi => "apply",
            CallShape::Get => "get",
            CallShape::Accept | CallShape::AcceptBi | CallShape::AcceptTri => "accept",
            CallShape::Test | CallShape::TestBi => "test",
        }
    }
}

impl fmt::Display for CallShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name(), self.arity())
    }
}

/// The form of continuation a sequencing decorator was built with.
///
/// Fixed when `and_then` is called; decides which call shapes the resulting
/// decorator can sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContinuationKind {
    /// A unary function fed the base's result.
    Function,
    /// A unary consumer run after the base's `accept(a)`.
    Consumer,
    /// A binary consumer run after the base's `accept(a, b)`.
    BiConsumer,
    /// Another glob function, usable for every sequenced shape.
    Glob,
}

impl ContinuationKind {
    /// Returns `true` if this continuation can follow the given call shape.
    ///
    /// Only the function and consumer shapes are sequenced; the rest are
    /// forwarded to the base and never reach a continuation.
    #[must_use]
    pub const fn supports(self, shape: CallShape) -> bool {
        match self {
            ContinuationKind::Glob => true,
            ContinuationKind::Function => matches!(shape, CallShape::Apply | CallShape::ApplyBi),
            ContinuationKind::Consumer => matches!(shape, CallShape::Accept),
            ContinuationKind::BiConsumer => matches!(shape, CallShape::AcceptBi),
        }
    }
}

impl fmt::Display for ContinuationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ContinuationKind::Function => "function",
            ContinuationKind::Consumer => "consumer",
            ContinuationKind::BiConsumer => "bi-consumer",
            ContinuationKind::Glob => "glob function",
        };
        f.write_str(name)
    }
}

/// A sequencing decorator was invoked through a shape its continuation cannot
/// follow.
///
/// Raised before the wrapped base runs, so the failed call has no side
/// effects.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("cannot sequence `{shape}` onto a {continuation} continuation")]
pub struct UnsupportedShape {
    pub shape: CallShape,
    pub continuation: ContinuationKind,
}
