//! Core primitives for the Rust port of the `super_diff` structural
//! diff-and-pretty-print engine.
//!
//! `superdiff-core` classifies two arbitrary nested values, diffs them with
//! the strategy their category calls for, and renders a human-readable,
//! optionally colorized explanation of exactly where and how they differ.
//! Every comparison is a pure, stateless function of its two inputs and a
//! [`Config`].
//!
//! ```
//! use superdiff_core::{diff_values, Config, Value};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let expected = Value::map([(Value::symbol("city"), Value::from("Hill Valley"))]);
//!     let actual = Value::map([(Value::symbol("city"), Value::from("Burbank"))]);
//!
//!     let rendered = diff_values(&expected, &actual, &Config::default())?
//!         .expect("values differ");
//!     assert!(rendered.contains("-   city: \"Hill Valley\""));
//!     assert!(rendered.contains("+   city: \"Burbank\""));
//!
//!     assert!(diff_values(&actual, &actual.clone(), &Config::default())?.is_none());
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
pub mod diff;
mod error;
mod hash;
pub mod inspect;
mod number;
mod render;
mod style;
mod value;

pub use config::Config;
pub use diff::{diff_ops, Op, OpSeq, RenderError, SeqKind};
pub use error::{CanonicalizeError, ConfigError, DiffError};
pub use hash::{combine, hash_bytes, HashCode};
pub use inspect::{describe, Described, Entry};
pub use number::Number;
pub use style::{ColorToken, Palette, Role};
pub use value::{Category, Matcher, Value};

/// Inspects a single value: classifies it and renders it, collapsed onto one
/// line when it fits the width budget and expanded otherwise. No comparison
/// takes place.
///
/// ```
/// # use superdiff_core::{inspect_value, Config, Value};
/// let value = Value::map([(Value::symbol("city"), Value::from("Burbank"))]);
/// let rendered = inspect_value(&value, &Config::default())?;
/// assert_eq!(rendered, "{ city: \"Burbank\" }");
/// # Ok::<(), superdiff_core::DiffError>(())
/// ```
pub fn inspect_value(value: &Value, config: &Config) -> Result<String, DiffError> {
    let described = inspect::describe(value, config)?;
    Ok(inspect::render(&described, config, 0))
}

/// Diffs two values and renders the result.
///
/// Returns `Ok(None)` when the values are equal (including when a
/// partial-matcher expectation is satisfied), so the caller can suppress the
/// diff block entirely.
///
/// ```
/// # use superdiff_core::{diff_values, Config, Value};
/// let expected = Value::list([Value::from("milk")]);
/// let rendered = diff_values(&expected, &expected.clone(), &Config::default())?;
/// assert!(rendered.is_none());
/// # Ok::<(), superdiff_core::DiffError>(())
/// ```
pub fn diff_values(
    expected: &Value,
    actual: &Value,
    config: &Config,
) -> Result<Option<String>, DiffError> {
    let ops = diff::diff_ops(expected, actual, config)?;
    if ops.has_changes() {
        Ok(Some(ops.render(config)))
    } else {
        Ok(None)
    }
}

/// Returns the semantic version of the `superdiff-core` crate.
///
/// ```
/// assert!(!superdiff_core::version().is_empty());
/// ```
#[must_use]
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
