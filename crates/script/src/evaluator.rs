use crate::ScriptError;

/// A scripting engine that can turn source text into callable closures.
///
/// This is the only dynamic boundary a [`ScriptLambda`] crosses: it hands
/// source text over once, then passes positional arguments in and reads a
/// dynamic value back out on every call. Evaluators are shared between many
/// lambdas through an `Arc`; whether concurrent calls are safe is up to the
/// evaluator.
///
/// [`ScriptLambda`]: crate::ScriptLambda
pub trait Evaluator {
    /// The dynamic value closures take and return.
    type Value: Clone;

    /// A compiled, invocable closure.
    type Closure;

    /// Returns the name this evaluator is registered under.
    fn name(&self) -> &str;

    /// Compiles and evaluates `source`, which must produce a closure.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::Compile`] if the source does not parse,
    /// [`ScriptError::Eval`] if evaluating it fails, and
    /// [`ScriptError::NotAClosure`] if it evaluates to anything else.
    fn compile(&self, source: &str) -> Result<Self::Closure, ScriptError>;

    /// Calls `closure` with positional `args`.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::Arity`] if the closure does not take
    /// `args.len()` arguments and [`ScriptError::Invoke`] for any other
    /// failure raised while it runs.
    fn invoke(
        &self,
        closure: &Self::Closure,
        args: Vec<Self::Value>,
    ) -> Result<Self::Value, ScriptError>;

    /// Reads a closure result as a boolean.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::NotBoolean`] if the value is not boolean-like.
    fn to_bool(&self, value: Self::Value) -> Result<bool, ScriptError>;
}
