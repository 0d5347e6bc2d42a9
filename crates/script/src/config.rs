use thiserror::Error;

/// Name of the engine a registry hands out when none is asked for.
pub const DEFAULT_ENGINE_NAME: &str = "rhai";

/// Configuration for a [`RhaiEngine`](crate::RhaiEngine).
///
/// With the `serde` feature, a config can be deserialized; missing fields take
/// their default values and the result is validated like [`EngineConfig::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(try_from = "RawEngineConfig")
)]
pub struct EngineConfig {
    name: String,
    max_operations: u64,
    max_call_levels: usize,
    max_expr_depth: usize,
    strict_variables: bool,
}

/// Errors that can occur when validating an engine config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("engine name must not be empty")]
    EmptyName,

    #[error("max_call_levels must be positive")]
    CallLevels,

    #[error("max_expr_depth must be positive")]
    ExprDepth,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_ENGINE_NAME.to_string(),
            max_operations: 0,
            max_call_levels: 64,
            max_expr_depth: 64,
            strict_variables: false,
        }
    }
}

impl EngineConfig {
    /// Creates a new config with validated limits.
    ///
    /// A `max_operations` of zero means unlimited.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty or a depth limit is zero.
    pub fn new(
        name: impl Into<String>,
        max_operations: u64,
        max_call_levels: usize,
        max_expr_depth: usize,
    ) -> Result<Self, ConfigError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ConfigError::EmptyName);
        }
        if max_call_levels == 0 {
            return Err(ConfigError::CallLevels);
        }
        if max_expr_depth == 0 {
            return Err(ConfigError::ExprDepth);
        }

        Ok(Self {
            name,
            max_operations,
            max_call_levels,
            max_expr_depth,
            strict_variables: false,
        })
    }

    /// Creates a config with default limits under another name.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty.
    pub fn named(name: impl Into<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Self::new(
            name,
            defaults.max_operations,
            defaults.max_call_levels,
            defaults.max_expr_depth,
        )
    }

    /// Requires every variable a script uses to be defined or bound.
    #[must_use]
    pub fn with_strict_variables(mut self, strict: bool) -> Self {
        self.strict_variables = strict;
        self
    }

    /// Returns the name the engine is registered under.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the operation budget per evaluation, or zero for unlimited.
    #[must_use]
    pub fn max_operations(&self) -> u64 {
        self.max_operations
    }

    /// Returns the maximum function call nesting depth.
    #[must_use]
    pub fn max_call_levels(&self) -> usize {
        self.max_call_levels
    }

    /// Returns the maximum expression nesting depth.
    #[must_use]
    pub fn max_expr_depth(&self) -> usize {
        self.max_expr_depth
    }

    /// Returns whether undefined variables are rejected at compile time.
    #[must_use]
    pub fn strict_variables(&self) -> bool {
        self.strict_variables
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(default)]
struct RawEngineConfig {
    name: String,
    max_operations: u64,
    max_call_levels: usize,
    max_expr_depth: usize,
    strict_variables: bool,
}

#[cfg(feature = "serde")]
impl Default for RawEngineConfig {
    fn default() -> Self {
        let defaults = EngineConfig::default();
        Self {
            name: defaults.name,
            max_operations: defaults.max_operations,
            max_call_levels: defaults.max_call_levels,
            max_expr_depth: defaults.max_expr_depth,
            strict_variables: defaults.strict_variables,
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<RawEngineConfig> for EngineConfig {
    type Error = ConfigError;

    fn try_from(raw: RawEngineConfig) -> Result<Self, Self::Error> {
        Ok(Self::new(
            raw.name,
            raw.max_operations,
            raw.max_call_levels,
            raw.max_expr_depth,
        )?
        .with_strict_variables(raw.strict_variables))
    }
}
