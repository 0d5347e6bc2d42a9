use globfn_core::UnsupportedShape;
use thiserror::Error;

/// Errors raised while building or calling a script-backed glob function.
///
/// The first three variants occur at construction, when the source text is
/// compiled. The rest occur when a call shape is invoked.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScriptError {
    #[error("failed to compile `{source_text}`: {message}")]
    Compile {
        source_text: String,
        message: String,
    },

    #[error("failed to evaluate `{source_text}`: {message}")]
    Eval {
        source_text: String,
        message: String,
    },

    #[error("`{source_text}` evaluated to {type_name}, not a closure")]
    NotAClosure {
        source_text: String,
        type_name: String,
    },

    /// The closure was not authored for the number of arguments it was given.
    #[error("closure `{closure}` cannot be called with {args} argument(s): {message}")]
    Arity {
        closure: String,
        args: usize,
        message: String,
    },

    #[error("closure `{closure}` failed: {message}")]
    Invoke { closure: String, message: String },

    /// A predicate shape's result could not be read as a boolean.
    #[error("predicate returned {type_name}, not a boolean")]
    NotBoolean { type_name: String },

    #[error(transparent)]
    Shape(#[from] UnsupportedShape),
}

impl ScriptError {
    /// Returns `true` if the error was raised while building the closure.
    #[must_use]
    pub fn is_construction(&self) -> bool {
        matches!(
            self,
            ScriptError::Compile { .. } | ScriptError::Eval { .. } | ScriptError::NotAClosure { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use globfn_core::{CallShape, ContinuationKind};

    #[test]
    fn shape_errors_read_through() {
        let error = ScriptError::from(UnsupportedShape {
            shape: CallShape::AcceptBi,
            continuation: ContinuationKind::Function,
        });

        assert_eq!(
            error.to_string(),
            "cannot sequence `accept/2` onto a function continuation"
        );
        assert!(!error.is_construction());
    }

    #[test]
    fn construction_errors_name_the_source() {
        let error = ScriptError::NotAClosure {
            source_text: "40 + 2".into(),
            type_name: "i64".into(),
        };

        assert_eq!(
            error.to_string(),
            "`40 + 2` evaluated to i64, not a closure"
        );
        assert!(error.is_construction());
    }
}
