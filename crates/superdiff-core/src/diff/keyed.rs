//! Keyed-collection and record diffing.
//!
//! Operations follow the actual side's key order; keys present only on the
//! expected side are appended last in expected order.

use super::{diff_depth, should_nest, Op, OpSeq, SeqKind};
use crate::{
    inspect::{describe_depth, key_prefix},
    value::{lookup, Budget},
    DiffError, Value,
};

pub(super) fn diff_maps(
    expected: &[(Value, Value)],
    actual: &[(Value, Value)],
    budget: Budget,
) -> Result<OpSeq, DiffError> {
    Ok(OpSeq::new(SeqKind::Mapping, diff_entries(expected, actual, budget)?))
}

pub(super) fn diff_records(
    type_name: &str,
    expected_fields: &[(String, Value)],
    actual_fields: &[(String, Value)],
    budget: Budget,
) -> Result<OpSeq, DiffError> {
    let expected = fields_as_entries(expected_fields);
    let actual = fields_as_entries(actual_fields);
    Ok(OpSeq::new(
        SeqKind::Composite(type_name.to_string()),
        diff_entries(&expected, &actual, budget)?,
    ))
}

/// Treats record attributes as a keyed collection, using symbol keys so the
/// labels render as `name: `.
pub(super) fn fields_as_entries(fields: &[(String, Value)]) -> Vec<(Value, Value)> {
    fields.iter().map(|(name, value)| (Value::symbol(name.clone()), value.clone())).collect()
}

pub(super) fn diff_entries(
    expected: &[(Value, Value)],
    actual: &[(Value, Value)],
    budget: Budget,
) -> Result<Vec<Op>, DiffError> {
    let deeper = budget.dive()?;
    let mut ops = Vec::with_capacity(actual.len());

    for (key, actual_value) in actual {
        let label = key_prefix(key, deeper)?;
        match lookup(expected, key) {
            Some(expected_value) if expected_value.deep_eq(actual_value) => {
                ops.push(Op::Unchanged { label, value: describe_depth(actual_value, deeper)? });
            }
            Some(expected_value) if should_nest(expected_value, actual_value) => {
                ops.push(Op::Nested {
                    label,
                    children: diff_depth(expected_value, actual_value, deeper)?,
                });
            }
            Some(expected_value) => {
                ops.push(Op::Changed {
                    label,
                    expected: describe_depth(expected_value, deeper)?,
                    actual: describe_depth(actual_value, deeper)?,
                });
            }
            None => {
                ops.push(Op::Inserted { label, value: describe_depth(actual_value, deeper)? });
            }
        }
    }

    for (key, expected_value) in expected {
        if lookup(actual, key).is_none() {
            ops.push(Op::Deleted {
                label: key_prefix(key, deeper)?,
                value: describe_depth(expected_value, deeper)?,
            });
        }
    }

    Ok(ops)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{diff_ops, Config, Value};

    fn labels(ops: &OpSeq) -> Vec<String> {
        ops.ops()
            .iter()
            .map(|op| match op {
                Op::Unchanged { label, .. }
                | Op::Inserted { label, .. }
                | Op::Deleted { label, .. }
                | Op::Changed { label, .. }
                | Op::Nested { label, .. } => label.clone(),
            })
            .collect()
    }

    #[test]
    fn operations_follow_actual_key_order_then_expected_only_keys() {
        let expected = Value::map([
            (Value::symbol("a"), Value::int(1)),
            (Value::symbol("gone"), Value::int(9)),
            (Value::symbol("b"), Value::int(2)),
        ]);
        let actual = Value::map([
            (Value::symbol("b"), Value::int(2)),
            (Value::symbol("new"), Value::int(5)),
            (Value::symbol("a"), Value::int(3)),
        ]);
        let ops = diff_ops(&expected, &actual, &Config::default()).unwrap();
        assert_eq!(labels(&ops), vec!["b: ", "new: ", "a: ", "gone: "]);
        assert!(matches!(ops.ops()[0], Op::Unchanged { .. }));
        assert!(matches!(ops.ops()[1], Op::Inserted { .. }));
        assert!(matches!(ops.ops()[2], Op::Changed { .. }));
        assert!(matches!(ops.ops()[3], Op::Deleted { .. }));
    }

    #[test]
    fn structured_slots_of_matching_category_nest() {
        let expected = Value::map([(
            Value::symbol("address"),
            Value::map([(Value::symbol("city"), Value::from("Hill Valley"))]),
        )]);
        let actual = Value::map([(
            Value::symbol("address"),
            Value::map([(Value::symbol("city"), Value::from("Burbank"))]),
        )]);
        let ops = diff_ops(&expected, &actual, &Config::default()).unwrap();
        let Op::Nested { label, children } = &ops.ops()[0] else {
            panic!("expected a nested operation");
        };
        assert_eq!(label, "address: ");
        assert!(children.has_changes());
    }

    #[test]
    fn mismatched_category_slots_collapse_to_changed() {
        let expected = Value::map([(Value::symbol("a"), Value::list([Value::int(1)]))]);
        let actual = Value::map([(Value::symbol("a"), Value::int(1))]);
        let ops = diff_ops(&expected, &actual, &Config::default()).unwrap();
        assert!(matches!(ops.ops()[0], Op::Changed { .. }));
    }

    #[test]
    fn record_diff_preserves_attribute_order() {
        let expected = Value::record(
            "Person",
            [("name", Value::from("Marty")), ("age", Value::int(17))],
        );
        let actual = Value::record(
            "Person",
            [("name", Value::from("Marty")), ("age", Value::int(18))],
        );
        let ops = diff_ops(&expected, &actual, &Config::default()).unwrap();
        assert_eq!(ops.kind(), &SeqKind::Composite("Person".to_string()));
        assert_eq!(labels(&ops), vec!["name: ", "age: "]);
    }
}
