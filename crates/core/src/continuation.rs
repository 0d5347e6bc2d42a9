use std::{any::type_name, borrow::Cow, fmt};

use crate::{ContinuationKind, GlobError, GlobFunction};

type FunctionBody<V, E> = Box<dyn Fn(V) -> Result<V, E> + Send + Sync>;
type ConsumerBody<V, E> = Box<dyn Fn(V) -> Result<(), E> + Send + Sync>;
type BiConsumerBody<V, E> = Box<dyn Fn(V, V) -> Result<(), E> + Send + Sync>;

/// The second operand of a sequencing composition.
///
/// Which variant a continuation is decides, once and for all, which call
/// shapes the resulting [`AndThen`](crate::AndThen) can sequence; see
/// [`ContinuationKind::supports`].
///
/// Closure-shaped continuations carry a label used in diagnostic text. The
/// constructors default it to the function's name, or to the continuation
/// kind for closures and function pointers;
/// [`with_label()`](Continuation::with_label) replaces it.
pub enum Continuation<V, E>
where
    V: Clone,
    E: GlobError,
{
    /// A unary function fed the base's result.
    Function {
        label: Cow<'static, str>,
        body: FunctionBody<V, E>,
    },
    /// A unary consumer run after the base's `accept(a)`.
    Consumer {
        label: Cow<'static, str>,
        body: ConsumerBody<V, E>,
    },
    /// A binary consumer run after the base's `accept(a, b)`.
    BiConsumer {
        label: Cow<'static, str>,
        body: BiConsumerBody<V, E>,
    },
    /// Another glob function, usable for every sequenced shape.
    Glob(Box<dyn GlobFunction<Value = V, Error = E> + Send + Sync>),
}

impl<V, E> Continuation<V, E>
where
    V: Clone,
    E: GlobError,
{
    /// A unary function continuation.
    pub fn function<F>(f: F) -> Self
    where
        F: Fn(V) -> Result<V, E> + Send + Sync + 'static,
    {
        Continuation::Function {
            label: closure_label::<F>(ContinuationKind::Function),
            body: Box::new(f),
        }
    }

    /// A unary consumer continuation.
    pub fn consumer<F>(f: F) -> Self
    where
        F: Fn(V) -> Result<(), E> + Send + Sync + 'static,
    {
        Continuation::Consumer {
            label: closure_label::<F>(ContinuationKind::Consumer),
            body: Box::new(f),
        }
    }

    /// A binary consumer continuation.
    pub fn bi_consumer<F>(f: F) -> Self
    where
        F: Fn(V, V) -> Result<(), E> + Send + Sync + 'static,
    {
        Continuation::BiConsumer {
            label: closure_label::<F>(ContinuationKind::BiConsumer),
            body: Box::new(f),
        }
    }

    /// A full glob function continuation.
    pub fn glob<G>(g: G) -> Self
    where
        G: GlobFunction<Value = V, Error = E> + Send + Sync + 'static,
    {
        Continuation::Glob(Box::new(g))
    }

    /// Replaces the diagnostic label of a closure-shaped continuation.
    ///
    /// Glob continuations describe themselves and are returned unchanged.
    #[must_use]
    pub fn with_label(self, label: impl Into<Cow<'static, str>>) -> Self {
        let label = label.into();
        match self {
            Continuation::Function { body, .. } => Continuation::Function { label, body },
            Continuation::Consumer { body, .. } => Continuation::Consumer { label, body },
            Continuation::BiConsumer { body, .. } => Continuation::BiConsumer { label, body },
            glob @ Continuation::Glob(_) => glob,
        }
    }

    /// Returns which form of continuation this is.
    #[must_use]
    pub fn kind(&self) -> ContinuationKind {
        match self {
            Continuation::Function { .. } => ContinuationKind::Function,
            Continuation::Consumer { .. } => ContinuationKind::Consumer,
            Continuation::BiConsumer { .. } => ContinuationKind::BiConsumer,
            Continuation::Glob(_) => ContinuationKind::Glob,
        }
    }
}

impl<V, E> fmt::Display for Continuation<V, E>
where
    V: Clone,
    E: GlobError,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Continuation::Function { label, .. }
            | Continuation::Consumer { label, .. }
            | Continuation::BiConsumer { label, .. } => f.write_str(label),
            Continuation::Glob(glob) => fmt::Display::fmt(glob, f),
        }
    }
}

impl<V, E> fmt::Debug for Continuation<V, E>
where
    V: Clone,
    E: GlobError,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Continuation")
            .field("kind", &self.kind())
            .field("description", &self.to_string())
            .finish()
    }
}

/// Labels a closure-shaped continuation by its function's name, e.g. `double`
/// for the function item `my_crate::double` or `Ok` for `Result::<T, E>::Ok`.
///
/// Closures and function pointers have no name of their own and are labeled
/// by `kind` instead.
fn closure_label<F>(kind: ContinuationKind) -> Cow<'static, str> {
    let full = type_name::<F>();
    if full.contains("{{closure}}") || full.contains('(') {
        return Cow::Owned(kind.to_string());
    }

    let mut depth = 0_usize;
    let path: String = full
        .chars()
        .filter(|&c| match c {
            '<' => {
                depth += 1;
                false
            }
            '>' => {
                depth = depth.saturating_sub(1);
                false
            }
            _ => depth == 0,
        })
        .collect();

    match path.rsplit("::").next() {
        Some(name) if !name.is_empty() => Cow::Owned(name.to_string()),
        _ => Cow::Owned(kind.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::testing::{Lambda, LambdaError};

    fn double(x: i64) -> Result<i64, LambdaError> {
        Ok(x * 2)
    }

    #[test]
    fn kinds_follow_constructors() {
        let function = Continuation::<i64, LambdaError>::function(double);
        let consumer = Continuation::<i64, LambdaError>::consumer(|_| Ok(()));
        let bi_consumer = Continuation::<i64, LambdaError>::bi_consumer(|_, _| Ok(()));
        let glob = Continuation::glob(Lambda::unary("inc", |x| x + 1));

        assert_eq!(function.kind(), ContinuationKind::Function);
        assert_eq!(consumer.kind(), ContinuationKind::Consumer);
        assert_eq!(bi_consumer.kind(), ContinuationKind::BiConsumer);
        assert_eq!(glob.kind(), ContinuationKind::Glob);
    }

    #[test]
    fn function_items_are_labeled_by_name() {
        let function = Continuation::<i64, LambdaError>::function(double);
        assert_eq!(function.to_string(), "double");
    }

    #[test]
    fn generic_function_items_drop_their_parameters() {
        let function = Continuation::<i64, LambdaError>::function(Ok);
        assert_eq!(function.to_string(), "Ok");
    }

    #[test]
    fn closures_and_pointers_are_labeled_by_kind() {
        let pointer: fn(i64) -> Result<i64, LambdaError> = double;
        let function = Continuation::function(pointer);
        assert_eq!(function.to_string(), "function");

        let closure = Continuation::<i64, LambdaError>::function(|x| Ok(x + 1));
        assert_eq!(closure.to_string(), "function");

        let consumer = Continuation::<i64, LambdaError>::consumer(|_| Ok(()));
        assert_eq!(consumer.to_string(), "consumer");

        let bi_consumer = Continuation::<i64, LambdaError>::bi_consumer(|_, _| Ok(()));
        assert_eq!(bi_consumer.to_string(), "bi-consumer");
    }

    #[test]
    fn pointer_continuation_renders_in_chain() {
        let pointer: fn(i64) -> Result<i64, LambdaError> = double;
        let chain = Lambda::unary("inc", |x| x + 1).and_then_fn(pointer);

        assert_eq!(chain.to_string(), "inc then function");
        assert_eq!(chain.apply(1), Ok(4));
    }

    #[test]
    fn labels_can_be_replaced() {
        let consumer = Continuation::<i64, LambdaError>::consumer(|_| Ok(()));
        let consumer = consumer.with_label("sink");
        assert_eq!(consumer.to_string(), "sink");
        assert_eq!(consumer.kind(), ContinuationKind::Consumer);
    }

    #[test]
    fn globs_describe_themselves() {
        let inc = Lambda::unary("inc", |x| x + 1);
        let glob = Continuation::glob(inc).with_label("ignored");
        assert_eq!(glob.to_string(), "inc");
    }
}
