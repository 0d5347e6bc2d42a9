use std::fmt;

use rhai::{AST, Dynamic, Engine, EvalAltResult, FnPtr, Scope};
use tracing::{debug, trace};

use crate::{EngineConfig, Evaluator, ScriptError};

/// An [`Evaluator`] backed by the [Rhai](https://rhai.rs) scripting engine.
///
/// Closures are written in Rhai's closure syntax, e.g. `|x| x + 2`,
/// `|a, b| a < b`, or `|| 42`. Values are [`rhai::Dynamic`].
///
/// Named host values can be bound with [`put()`](RhaiEngine::put) before
/// lambdas are compiled; closures capture them by name. Host types and
/// functions are registered on the underlying engine through
/// [`engine_mut()`](RhaiEngine::engine_mut).
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use globfn_core::GlobFunction;
/// use globfn_script::{EngineConfig, RhaiEngine, ScriptLambda};
///
/// let mut engine = RhaiEngine::new(&EngineConfig::default());
/// engine.put("limit", 100_i64);
/// let engine = Arc::new(engine);
///
/// let below = ScriptLambda::new("|x| x < limit", &engine).unwrap();
/// assert!(below.test(5_i64.into()).unwrap());
/// ```
pub struct RhaiEngine {
    name: String,
    engine: Engine,
    bindings: Vec<(String, Dynamic)>,
}

/// A closure compiled by a [`RhaiEngine`].
///
/// Keeps the script it came from so it can be called after evaluation ends.
#[derive(Debug, Clone)]
pub struct RhaiClosure {
    fn_ptr: FnPtr,
    ast: AST,
}

impl RhaiClosure {
    /// Returns the name Rhai assigned to the closure's function.
    #[must_use]
    pub fn fn_name(&self) -> &str {
        self.fn_ptr.fn_name()
    }
}

impl RhaiEngine {
    /// Creates an engine with the limits from `config`.
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        let mut engine = Engine::new();
        engine.set_max_operations(config.max_operations());
        engine.set_max_call_levels(config.max_call_levels());
        let depth = config.max_expr_depth();
        engine.set_max_expr_depths(depth, depth);
        engine.set_strict_variables(config.strict_variables());

        debug!(name = config.name(), "created rhai engine");

        Self {
            name: config.name().to_string(),
            engine,
            bindings: Vec::new(),
        }
    }

    /// Binds a named host value visible to closures compiled afterwards.
    ///
    /// Rebinding a name replaces the earlier value. Closures already compiled
    /// keep the value they captured.
    pub fn put<T>(&mut self, name: impl Into<String>, value: T) -> &mut Self
    where
        T: Clone + Send + Sync + 'static,
    {
        let name = name.into();
        let value = Dynamic::from(value);
        match self.bindings.iter_mut().find(|(bound, _)| *bound == name) {
            Some((_, slot)) => *slot = value,
            None => self.bindings.push((name, value)),
        }
        self
    }

    /// Returns the underlying Rhai engine for registering host types and
    /// functions.
    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }

    /// Returns the underlying Rhai engine.
    #[must_use]
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    fn scope(&self) -> Scope<'static> {
        let mut scope = Scope::new();
        for (name, value) in &self.bindings {
            scope.push_dynamic(name.as_str(), value.clone());
        }
        scope
    }
}

impl Evaluator for RhaiEngine {
    type Value = Dynamic;
    type Closure = RhaiClosure;

    fn name(&self) -> &str {
        &self.name
    }

    fn compile(&self, source: &str) -> Result<RhaiClosure, ScriptError> {
        let mut scope = self.scope();

        let ast = self
            .engine
            .compile_with_scope(&scope, source)
            .map_err(|err| ScriptError::Compile {
                source_text: source.to_string(),
                message: err.to_string(),
            })?;

        let value = self
            .engine
            .eval_ast_with_scope::<Dynamic>(&mut scope, &ast)
            .map_err(|err| ScriptError::Eval {
                source_text: source.to_string(),
                message: err.to_string(),
            })?;

        let type_name = value.type_name();
        let fn_ptr = value
            .try_cast::<FnPtr>()
            .ok_or_else(|| ScriptError::NotAClosure {
                source_text: source.to_string(),
                type_name: type_name.to_string(),
            })?;

        debug!(engine = %self.name, closure = fn_ptr.fn_name(), "compiled closure");
        Ok(RhaiClosure { fn_ptr, ast })
    }

    fn invoke(&self, closure: &RhaiClosure, args: Vec<Dynamic>) -> Result<Dynamic, ScriptError> {
        let arity = args.len();
        trace!(closure = closure.fn_name(), arity, "invoking closure");

        closure
            .fn_ptr
            .call::<Dynamic>(&self.engine, &closure.ast, args)
            .map_err(|err| classify(closure, arity, *err))
    }

    fn to_bool(&self, value: Dynamic) -> Result<bool, ScriptError> {
        match value.as_bool() {
            Ok(truth) => Ok(truth),
            Err(type_name) => Err(ScriptError::NotBoolean {
                type_name: type_name.to_string(),
            }),
        }
    }
}

/// Sorts a Rhai failure into an argument-count error or a general one.
///
/// Rhai reports a closure called with the wrong number of arguments as a
/// missing function whose signature starts with the closure's own name.
fn classify(closure: &RhaiClosure, args: usize, err: EvalAltResult) -> ScriptError {
    match err {
        EvalAltResult::ErrorFunctionNotFound(ref signature, _)
            if signature.starts_with(closure.fn_name()) =>
        {
            ScriptError::Arity {
                closure: closure.fn_name().to_string(),
                args,
                message: err.to_string(),
            }
        }
        other => ScriptError::Invoke {
            closure: closure.fn_name().to_string(),
            message: other.to_string(),
        },
    }
}

impl fmt::Debug for RhaiEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = self.bindings.iter().map(|(name, _)| name.as_str());
        let bindings: Vec<&str> = names.collect();
        f.debug_struct("RhaiEngine")
            .field("name", &self.name)
            .field("bindings", &bindings)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> RhaiEngine {
        RhaiEngine::new(&EngineConfig::default())
    }

    #[test]
    fn compiles_closures() {
        let engine = engine();
        let closure = engine.compile("|x| x + 2").unwrap();

        let args = vec![Dynamic::from(5_i64)];
        let result = engine.invoke(&closure, args).unwrap();
        assert_eq!(result.as_int(), Ok(7));
    }

    #[test]
    fn rejects_non_closures() {
        let error = engine().compile("40 + 2").unwrap_err();
        assert_eq!(
            error,
            ScriptError::NotAClosure {
                source_text: "40 + 2".into(),
                type_name: "i64".into(),
            }
        );
    }

    #[test]
    fn reports_parse_errors_at_compile() {
        let error = engine().compile("|x| x +").unwrap_err();
        assert!(matches!(error, ScriptError::Compile { .. }), "{error}");
    }

    #[test]
    fn reports_evaluation_errors_at_compile() {
        let error = engine().compile(r#"throw "boom""#).unwrap_err();
        assert!(matches!(error, ScriptError::Eval { .. }), "{error}");
        assert!(error.to_string().contains("boom"));
    }

    #[test]
    fn wrong_argument_count_is_an_arity_error() {
        let engine = engine();
        let closure = engine.compile("|x| x < 100").unwrap();

        let error = engine
            .invoke(&closure, vec![Dynamic::from(1_i64), Dynamic::from(2_i64)])
            .unwrap_err();
        assert!(
            matches!(error, ScriptError::Arity { args: 2, .. }),
            "{error}"
        );
    }

    #[test]
    fn runtime_failures_are_invoke_errors() {
        let engine = engine();
        let closure = engine.compile(r#"|x| { throw "bad input"; }"#).unwrap();

        let args = vec![Dynamic::from(1_i64)];
        let error = engine.invoke(&closure, args).unwrap_err();
        assert!(matches!(error, ScriptError::Invoke { .. }), "{error}");
        assert!(error.to_string().contains("bad input"));
    }

    #[test]
    fn bindings_are_captured() {
        let mut engine = engine();
        engine.put("offset", 10_i64);
        engine.put("offset", 20_i64);

        let closure = engine.compile("|x| x + offset").unwrap();
        let args = vec![Dynamic::from(1_i64)];
        let result = engine.invoke(&closure, args).unwrap();

        assert_eq!(result.as_int(), Ok(21));
        assert_eq!(
            format!("{engine:?}"),
            r#"RhaiEngine { name: "rhai", bindings: ["offset"], .. }"#
        );
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Limit(i64);

    #[test]
    fn host_structs_can_be_bound() {
        let mut engine = engine();
        engine.put("limit", Limit(7));

        let closure = engine.compile("|| limit").unwrap();
        let result = engine.invoke(&closure, Vec::new()).unwrap();

        assert_eq!(result.flatten().try_cast::<Limit>(), Some(Limit(7)));
    }

    #[test]
    fn bool_coercion() {
        let engine = engine();
        assert_eq!(engine.to_bool(Dynamic::TRUE), Ok(true));
        assert_eq!(engine.to_bool(Dynamic::FALSE), Ok(false));
        assert!(matches!(
            engine.to_bool(Dynamic::from(1_i64)),
            Err(ScriptError::NotBoolean { .. })
        ));
    }

    #[test]
    fn operation_limit_stops_runaway_closures() {
        let config = EngineConfig::new("bounded", 1_000, 64, 64).unwrap();
        let engine = RhaiEngine::new(&config);
        let runaway = "|| { let n = 0; loop { n += 1; } }";
        let closure = engine.compile(runaway).unwrap();

        let error = engine.invoke(&closure, Vec::new()).unwrap_err();
        assert!(matches!(error, ScriptError::Invoke { .. }), "{error}");
    }
}
