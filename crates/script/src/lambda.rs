use std::{fmt, sync::Arc};

use globfn_core::GlobFunction;
use tracing::debug;

use crate::{EngineRegistry, Evaluator, RhaiEngine, ScriptError};

/// A glob function backed by one script closure.
///
/// The source text is compiled once, when the lambda is built. Every call
/// shape then invokes the resulting closure with its own arguments:
///
/// - `apply` and `get` return the closure's result unchanged.
/// - `test` reads the result as a boolean, failing with
///   [`ScriptError::NotBoolean`] otherwise.
/// - `accept` discards the result.
///
/// The closure decides which argument counts it accepts. Calling a shape it
/// was not written for fails with the engine's [`ScriptError::Arity`] rather
/// than returning a default.
///
/// # Example
///
/// ```
/// use globfn_core::GlobFunction;
/// use globfn_script::{EngineRegistry, ScriptLambda};
///
/// let registry = EngineRegistry::new();
///
/// let add_two = ScriptLambda::from_registry("|x| x + 2", &registry).unwrap();
/// let times_ten = ScriptLambda::from_registry("|x| x * 10", &registry).unwrap();
///
/// let chain = add_two.and_then(times_ten);
/// assert_eq!(chain.apply(5_i64.into()).unwrap().as_int(), Ok(70));
/// assert_eq!(
///     chain.to_string(),
///     "ScriptLambda(|x| x + 2) then ScriptLambda(|x| x * 10)"
/// );
/// ```
pub struct ScriptLambda<E: Evaluator = RhaiEngine> {
    source: String,
    evaluator: Arc<E>,
    closure: E::Closure,
}

impl<E: Evaluator> ScriptLambda<E> {
    /// Compiles `source` with `evaluator`.
    ///
    /// # Errors
    ///
    /// Returns an error if the source does not compile, fails to evaluate, or
    /// does not evaluate to a closure.
    pub fn new(source: impl Into<String>, evaluator: &Arc<E>) -> Result<Self, ScriptError> {
        let source = source.into();
        let closure = evaluator.compile(&source)?;

        debug!(engine = evaluator.name(), source = %source, "built script lambda");

        Ok(Self {
            source,
            evaluator: Arc::clone(evaluator),
            closure,
        })
    }

    /// Returns the source text the closure was compiled from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the evaluator the closure runs on.
    #[must_use]
    pub fn evaluator(&self) -> &Arc<E> {
        &self.evaluator
    }

    fn call(&self, args: Vec<E::Value>) -> Result<E::Value, ScriptError> {
        self.evaluator.invoke(&self.closure, args)
    }

    fn call_test(&self, args: Vec<E::Value>) -> Result<bool, ScriptError> {
        let value = self.call(args)?;
        self.evaluator.to_bool(value)
    }
}

impl ScriptLambda<RhaiEngine> {
    /// Compiles `source` with the registry's default engine.
    ///
    /// # Errors
    ///
    /// Returns an error if the source does not compile, fails to evaluate, or
    /// does not evaluate to a closure.
    pub fn from_registry(
        source: impl Into<String>,
        registry: &EngineRegistry,
    ) -> Result<Self, ScriptError> {
        Self::new(source, &registry.default_engine())
    }
}

impl<E: Evaluator> GlobFunction for ScriptLambda<E> {
    type Value = E::Value;
    type Error = ScriptError;

    fn apply(&self, a: E::Value) -> Result<E::Value, ScriptError> {
        self.call(vec![a])
    }

    fn apply_bi(&self, a: E::Value, b: E::Value) -> Result<E::Value, ScriptError> {
        self.call(vec![a, b])
    }

    fn get(&self) -> Result<E::Value, ScriptError> {
        self.call(Vec::new())
    }

    fn accept(&self, a: E::Value) -> Result<(), ScriptError> {
        self.call(vec![a]).map(drop)
    }

    fn accept_bi(&self, a: E::Value, b: E::Value) -> Result<(), ScriptError> {
        self.call(vec![a, b]).map(drop)
    }

    fn accept_tri(&self, a: E::Value, b: E::Value, c: E::Value) -> Result<(), ScriptError> {
        self.call(vec![a, b, c]).map(drop)
    }

    fn test(&self, a: E::Value) -> Result<bool, ScriptError> {
        self.call_test(vec![a])
    }

    fn test_bi(&self, a: E::Value, b: E::Value) -> Result<bool, ScriptError> {
        self.call_test(vec![a, b])
    }
}

impl<E: Evaluator> Clone for ScriptLambda<E>
where
    E::Closure: Clone,
{
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            evaluator: Arc::clone(&self.evaluator),
            closure: self.closure.clone(),
        }
    }
}

impl<E: Evaluator> fmt::Display for ScriptLambda<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScriptLambda({})", self.source)
    }
}

impl<E: Evaluator> fmt::Debug for ScriptLambda<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptLambda")
            .field("source", &self.source)
            .field("engine", &self.evaluator.name())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::{Cell, RefCell};

    /// Evaluates closures written as `add:N`, `lt:N`, or `pair` over `i64`.
    #[derive(Default)]
    struct Arith {
        compiled: Cell<usize>,
        invoked: RefCell<Vec<usize>>,
    }

    enum ArithClosure {
        Add(i64),
        LessThan(i64),
        Pair,
    }

    impl Evaluator for Arith {
        type Value = i64;
        type Closure = ArithClosure;

        fn name(&self) -> &str {
            "arith"
        }

        fn compile(&self, source: &str) -> Result<ArithClosure, ScriptError> {
            self.compiled.set(self.compiled.get() + 1);
            let parse = |n: &str| {
                n.parse::<i64>().map_err(|_| ScriptError::Compile {
                    source_text: source.to_string(),
                    message: format!("bad number `{n}`"),
                })
            };
            match source.split_once(':') {
                Some(("add", n)) => Ok(ArithClosure::Add(parse(n)?)),
                Some(("lt", n)) => Ok(ArithClosure::LessThan(parse(n)?)),
                None if source == "pair" => Ok(ArithClosure::Pair),
                _ => Err(ScriptError::NotAClosure {
                    source_text: source.to_string(),
                    type_name: "text".into(),
                }),
            }
        }

        fn invoke(&self, closure: &ArithClosure, args: Vec<i64>) -> Result<i64, ScriptError> {
            self.invoked.borrow_mut().push(args.len());
            match (closure, args.as_slice()) {
                (ArithClosure::Add(n), [x]) => Ok(x + n),
                (ArithClosure::LessThan(n), [x]) => Ok(i64::from(x < n)),
                (ArithClosure::Pair, [x, y]) => Ok(x * 10 + y),
                _ => Err(ScriptError::Arity {
                    closure: "arith".into(),
                    args: args.len(),
                    message: "no such overload".into(),
                }),
            }
        }

        fn to_bool(&self, value: i64) -> Result<bool, ScriptError> {
            match value {
                0 => Ok(false),
                1 => Ok(true),
                _ => Err(ScriptError::NotBoolean {
                    type_name: "i64".into(),
                }),
            }
        }
    }

    #[test]
    fn compiles_once_and_invokes_per_call() {
        let arith = Arc::new(Arith::default());
        let add = ScriptLambda::new("add:2", &arith).unwrap();

        assert_eq!(arith.compiled.get(), 1);
        assert!(arith.invoked.borrow().is_empty());

        assert_eq!(add.apply(5), Ok(7));
        add.accept(1).unwrap();
        assert_eq!(arith.compiled.get(), 1);
        assert_eq!(*arith.invoked.borrow(), [1, 1]);
    }

    #[test]
    fn shapes_pass_their_argument_count() {
        let arith = Arc::new(Arith::default());
        let pair = ScriptLambda::new("pair", &arith).unwrap();

        assert_eq!(pair.apply_bi(4, 2), Ok(42));
        pair.accept_bi(1, 2).unwrap();
        let empty = pair.get();
        assert!(matches!(empty, Err(ScriptError::Arity { args: 0, .. })));
        assert!(matches!(
            pair.accept_tri(1, 2, 3),
            Err(ScriptError::Arity { args: 3, .. })
        ));
        assert_eq!(*arith.invoked.borrow(), [2, 2, 0, 3]);
    }

    #[test]
    fn predicates_coerce_results() {
        let arith = Arc::new(Arith::default());
        let small = ScriptLambda::new("lt:100", &arith).unwrap();
        let add = ScriptLambda::new("add:5", &arith).unwrap();

        assert_eq!(small.test(0), Ok(true));
        assert_eq!(small.test(150), Ok(false));
        assert!(matches!(add.test(1), Err(ScriptError::NotBoolean { .. })));
        let two = small.test_bi(1, 2);
        assert!(matches!(two, Err(ScriptError::Arity { args: 2, .. })));
    }

    #[test]
    fn construction_errors_surface_immediately() {
        let arith = Arc::new(Arith::default());

        assert!(matches!(
            ScriptLambda::new("add:two", &arith),
            Err(ScriptError::Compile { .. })
        ));
        assert!(matches!(
            ScriptLambda::new("hello", &arith),
            Err(ScriptError::NotAClosure { .. })
        ));
    }

    #[test]
    fn renders_source_in_label() {
        let arith = Arc::new(Arith::default());
        let add = ScriptLambda::new("add:2", &arith).unwrap();

        assert_eq!(add.source(), "add:2");
        assert_eq!(add.to_string(), "ScriptLambda(add:2)");
        assert_eq!(
            format!("{add:?}"),
            r#"ScriptLambda { source: "add:2", engine: "arith", .. }"#
        );
        assert_eq!(add.negate().to_string(), "-(ScriptLambda(add:2))");
    }
}
