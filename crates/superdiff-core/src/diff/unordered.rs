//! Unordered-collection diffing: multiset cancellation.
//!
//! Deeply equal elements cancel one-to-one regardless of position. Actual
//! elements render first in their original order as context; Deleted entries
//! for unmatched expected elements are appended at the end.

use super::{Op, OpSeq, SeqKind};
use crate::{
    inspect::describe_depth,
    value::{cancel_elements, Budget},
    DiffError, Value,
};

/// Symmetric cancellation: leftover expected elements become Deleted and
/// leftover actual elements become Inserted.
pub(super) fn diff_unordered(
    expected: &[Value],
    actual: &[Value],
    kind: SeqKind,
    budget: Budget,
) -> Result<OpSeq, DiffError> {
    let deeper = budget.dive()?;
    let (missing, extras) = cancel_elements(expected, actual);

    let mut ops = Vec::with_capacity(actual.len() + missing.len());
    for (slot, element) in actual.iter().enumerate() {
        let value = describe_depth(element, deeper)?;
        if extras.contains(&slot) {
            ops.push(Op::Inserted { label: String::new(), value });
        } else {
            ops.push(Op::Unchanged { label: String::new(), value });
        }
    }
    for index in missing {
        ops.push(Op::Deleted {
            label: String::new(),
            value: describe_depth(&expected[index], deeper)?,
        });
    }

    Ok(OpSeq::new(kind, ops))
}

/// One-sided cancellation for `a_collection_including`: every actual element
/// is plain context (extras are never a failure) and only required elements
/// missing from the actual side become Deleted.
pub(super) fn diff_including(
    required: &[Value],
    actual: &[Value],
    kind: SeqKind,
    budget: Budget,
) -> Result<OpSeq, DiffError> {
    let deeper = budget.dive()?;
    let (missing, _extras) = cancel_elements(required, actual);

    let mut ops = Vec::with_capacity(actual.len() + missing.len());
    for element in actual {
        ops.push(Op::Unchanged { label: String::new(), value: describe_depth(element, deeper)? });
    }
    for index in missing {
        ops.push(Op::Deleted {
            label: String::new(),
            value: describe_depth(&required[index], deeper)?,
        });
    }

    Ok(OpSeq::new(kind, ops))
}
