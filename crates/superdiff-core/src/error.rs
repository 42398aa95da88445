use thiserror::Error;

/// Errors that can occur while canonicalizing external data into [`Value`].
///
/// [`Value`]: crate::Value
#[derive(Debug, Error)]
pub enum CanonicalizeError {
    /// The provided JSON input was invalid.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Attempted to construct a [`Number`](crate::Number) that is not finite.
    #[error("non-finite number encountered: {value}")]
    NotFinite {
        /// The offending numeric value.
        value: f64,
    },
}

/// Errors emitted when constructing a [`Config`](crate::Config).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Indentation must advance by at least one column per nesting level.
    #[error("indent width must be at least one column")]
    ZeroIndentWidth,
    /// The collapse threshold must admit at least one column.
    #[error("single-line width budget must be at least one column")]
    ZeroLineWidth,
    /// The recursion budget must admit at least one nesting level.
    #[error("depth budget must be at least one level")]
    ZeroDepthBudget,
}

/// Errors surfaced by the diff and inspection entry points.
///
/// Values are owned and acyclic by construction, so a true reference cycle
/// cannot be expressed. The depth budget stands in as the cycle guard for
/// pathologically nested input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiffError {
    /// Nesting exceeded the per-call depth budget.
    #[error("value nesting exceeded the depth budget of {limit} levels")]
    CycleDetected {
        /// The configured depth budget that was exhausted.
        limit: usize,
    },
}
