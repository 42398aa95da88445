//! Diff data structures and strategies.
//!
//! The module defines the operation tree shared by all diff strategies along
//! with the dispatcher that selects a strategy for an (expected, actual)
//! pair: keyed, ordered, unordered, record, line-based, and the
//! partial-matcher family.

mod keyed;
mod matcher;
mod ordered;
mod unordered;

use serde::{Deserialize, Serialize};

use crate::{
    inspect::{describe_depth, Described},
    value::Budget,
    Category, Config, DiffError, Value,
};

/// A single diff edit.
///
/// Every `Changed` carries exactly two rendered values; `Unchanged`,
/// `Inserted`, and `Deleted` carry exactly one. `Nested` wraps a sub-diff
/// under the key or attribute label that owns it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Op {
    /// Context present on both sides.
    Unchanged {
        /// The key or attribute prefix, empty for sequence elements.
        label: String,
        /// The rendered value.
        value: Described,
    },
    /// Present only on the actual side.
    Inserted {
        /// The key or attribute prefix, empty for sequence elements.
        label: String,
        /// The rendered value.
        value: Described,
    },
    /// Present only on the expected side.
    Deleted {
        /// The key or attribute prefix, empty for sequence elements.
        label: String,
        /// The rendered value.
        value: Described,
    },
    /// The same slot holds different values on the two sides.
    Changed {
        /// The key or attribute prefix, empty for sequence elements.
        label: String,
        /// The rendered expected value.
        expected: Described,
        /// The rendered actual value.
        actual: Described,
    },
    /// A structured slot whose two sides were diffed recursively.
    Nested {
        /// The key or attribute prefix opening the sub-block.
        label: String,
        /// The sub-diff.
        children: OpSeq,
    },
}

impl Op {
    fn is_change(&self) -> bool {
        match self {
            Self::Unchanged { .. } => false,
            Self::Nested { children, .. } => children.has_changes(),
            _ => true,
        }
    }
}

/// The container flavor of an operation sequence, deciding the delimiters
/// and comma rules the renderer applies around it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeqKind {
    /// A bare scalar comparison: no delimiters, no commas.
    Atom,
    /// An ordered collection rendered with `[` and `]`.
    Sequence,
    /// A keyed collection rendered with `{` and `}`.
    Mapping,
    /// An unordered collection rendered as `#<Set: { ... }>`.
    Set,
    /// A record rendered as `#<TypeName { ... }>`.
    Composite(String),
    /// Line-granular string context: raw lines, no delimiters, no commas.
    Lines,
}

/// An ordered list of operations, nestable to arbitrary depth.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OpSeq {
    kind: SeqKind,
    ops: Vec<Op>,
}

impl OpSeq {
    /// Builds a sequence from a container kind and its operations.
    #[must_use]
    pub fn new(kind: SeqKind, ops: Vec<Op>) -> Self {
        Self { kind, ops }
    }

    /// Returns the container flavor.
    #[must_use]
    pub fn kind(&self) -> &SeqKind {
        &self.kind
    }

    /// Returns the operations in render order.
    #[must_use]
    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    /// Indicates whether the sequence contains any Inserted, Deleted, or
    /// Changed operation at any depth. When false the caller suppresses the
    /// diff block entirely.
    ///
    /// ```
    /// # use superdiff_core::{diff_ops, Config, Value};
    /// let ops = diff_ops(&Value::int(1), &Value::int(1), &Config::default())?;
    /// assert!(!ops.has_changes());
    /// # Ok::<(), superdiff_core::DiffError>(())
    /// ```
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.ops.iter().any(Op::is_change)
    }

    /// Renders the sequence using the renderer's marker and indentation
    /// conventions.
    #[must_use]
    pub fn render(&self, config: &Config) -> String {
        crate::render::render_ops(self, config)
    }

    /// Serializes the operation tree as JSON for debugging.
    pub fn render_raw(&self) -> Result<String, RenderError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Errors that can occur while serializing an operation tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderError {
    message: String,
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for RenderError {}

impl From<serde_json::Error> for RenderError {
    fn from(err: serde_json::Error) -> Self {
        Self { message: err.to_string() }
    }
}

/// Computes the structural diff between two values.
///
/// Strategy selection: a partial matcher on the expected side picks its
/// matcher-kind strategy; otherwise both values must share a category for
/// that category's strategy to decompose them; cross-category pairs yield a
/// single atomic `Changed`.
///
/// ```
/// # use superdiff_core::{diff_ops, Config, Value};
/// let ops = diff_ops(&Value::int(1), &Value::int(2), &Config::default())?;
/// assert!(ops.has_changes());
/// # Ok::<(), superdiff_core::DiffError>(())
/// ```
pub fn diff_ops(expected: &Value, actual: &Value, config: &Config) -> Result<OpSeq, DiffError> {
    diff_depth(expected, actual, Budget::new(config.max_depth()))
}

pub(crate) fn diff_depth(
    expected: &Value,
    actual: &Value,
    budget: Budget,
) -> Result<OpSeq, DiffError> {
    if expected.deep_eq(actual) {
        return Ok(atom(Op::Unchanged {
            label: String::new(),
            value: describe_depth(actual, budget)?,
        }));
    }

    if let Value::Matcher(spec) = expected {
        if !matches!(actual, Value::Matcher(_)) {
            return matcher::diff_matcher(spec, actual, budget);
        }
    }

    if expected.category() != actual.category() {
        return atom_changed(expected, actual, budget);
    }

    match (expected, actual) {
        (Value::String(lhs), Value::String(rhs))
            if actual.category() == Category::MultilineString =>
        {
            Ok(ordered::diff_lines(lhs, rhs))
        }
        (Value::List(lhs), Value::List(rhs)) => ordered::diff_lists(lhs, rhs, budget),
        (Value::Set(lhs), Value::Set(rhs)) => {
            unordered::diff_unordered(lhs, rhs, SeqKind::Set, budget)
        }
        (Value::Map(lhs), Value::Map(rhs)) => keyed::diff_maps(lhs, rhs, budget),
        (
            Value::Record { type_name: lhs_name, fields: lhs_fields },
            Value::Record { type_name: rhs_name, fields: rhs_fields },
        ) if lhs_name == rhs_name => keyed::diff_records(rhs_name, lhs_fields, rhs_fields, budget),
        _ => atom_changed(expected, actual, budget),
    }
}

fn atom(op: Op) -> OpSeq {
    OpSeq::new(SeqKind::Atom, vec![op])
}

pub(super) fn atom_changed(
    expected: &Value,
    actual: &Value,
    budget: Budget,
) -> Result<OpSeq, DiffError> {
    Ok(atom(Op::Changed {
        label: String::new(),
        expected: describe_depth(expected, budget)?,
        actual: describe_depth(actual, budget)?,
    }))
}

/// Decides whether a keyed slot recurses instead of collapsing to a
/// `Changed` pair: both sides structured and of matching category, or an
/// expected-side matcher whose shape is compatible with the actual value.
pub(super) fn should_nest(expected: &Value, actual: &Value) -> bool {
    if let Value::Matcher(spec) = expected {
        return matcher::compatible(spec, actual);
    }
    let category = expected.category();
    if category != actual.category() || !category.is_structured() {
        return false;
    }
    match (expected, actual) {
        (
            Value::Record { type_name: lhs, .. },
            Value::Record { type_name: rhs, .. },
        ) => lhs == rhs,
        _ => true,
    }
}
