//! Partial-matcher diff strategies.
//!
//! A matcher constrains rather than equals: the diff only surfaces what the
//! constraint actually checks. An actual value whose shape is incompatible
//! with the matcher collapses to one atomic Changed pairing the wrapped
//! matcher description with the actual value.

use super::{atom_changed, keyed, unordered, OpSeq, SeqKind};
use crate::{
    value::{collection_elements, lookup, Budget, Matcher},
    DiffError, Value,
};

/// Whether the actual value has the shape the matcher constrains, and may
/// therefore be decomposed by the matcher's strategy.
pub(super) fn compatible(matcher: &Matcher, actual: &Value) -> bool {
    match matcher {
        Matcher::HashIncluding(_) => matches!(actual, Value::Map(_)),
        Matcher::CollectionIncluding(_) | Matcher::CollectionContainingExactly(_) => {
            matches!(actual, Value::List(_) | Value::Set(_))
        }
        Matcher::ObjectHavingAttributes(_) | Matcher::ExceptionMatch { .. } => {
            matches!(actual, Value::Record { .. })
        }
    }
}

pub(super) fn diff_matcher(
    matcher: &Matcher,
    actual: &Value,
    budget: Budget,
) -> Result<OpSeq, DiffError> {
    if !compatible(matcher, actual) {
        return atom_changed(&Value::Matcher(matcher.clone()), actual, budget);
    }

    match (matcher, actual) {
        (Matcher::HashIncluding(subset), Value::Map(actual_entries)) => {
            // Keys outside the subset are invisible: no Inserted for extras.
            let restricted: Vec<(Value, Value)> = actual_entries
                .iter()
                .filter(|(key, _)| lookup(subset, key).is_some())
                .cloned()
                .collect();
            Ok(OpSeq::new(SeqKind::Mapping, keyed::diff_entries(subset, &restricted, budget)?))
        }
        (Matcher::CollectionIncluding(required), _) => {
            let elements = collection_elements(actual).unwrap_or_default();
            unordered::diff_including(required, elements, kind_of(actual), budget)
        }
        (Matcher::CollectionContainingExactly(required), _) => {
            let elements = collection_elements(actual).unwrap_or_default();
            unordered::diff_unordered(required, elements, kind_of(actual), budget)
        }
        (
            Matcher::ObjectHavingAttributes(attrs),
            Value::Record { type_name, fields },
        ) => {
            let required = keyed::fields_as_entries(attrs);
            let restricted: Vec<(Value, Value)> = keyed::fields_as_entries(fields)
                .into_iter()
                .filter(|(key, _)| lookup(&required, key).is_some())
                .collect();
            Ok(OpSeq::new(
                SeqKind::Composite(type_name.clone()),
                keyed::diff_entries(&required, &restricted, budget)?,
            ))
        }
        (
            Matcher::ExceptionMatch { class_name, message },
            Value::Record { type_name, fields },
        ) => {
            if type_name != class_name {
                return atom_changed(&Value::Matcher(matcher.clone()), actual, budget);
            }
            let required = vec![(Value::symbol("message"), Value::string(message.clone()))];
            let restricted: Vec<(Value, Value)> = keyed::fields_as_entries(fields)
                .into_iter()
                .filter(|(key, _)| lookup(&required, key).is_some())
                .collect();
            Ok(OpSeq::new(
                SeqKind::Composite(type_name.clone()),
                keyed::diff_entries(&required, &restricted, budget)?,
            ))
        }
        _ => atom_changed(&Value::Matcher(matcher.clone()), actual, budget),
    }
}

fn kind_of(actual: &Value) -> SeqKind {
    match actual {
        Value::Set(_) => SeqKind::Set,
        _ => SeqKind::Sequence,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{diff_ops, Config, Op, Value};

    fn config() -> Config {
        Config::default()
    }

    #[test]
    fn hash_including_only_surfaces_subset_keys() {
        let expected = Value::a_hash_including([(
            Value::symbol("city"),
            Value::from("Hill Valley"),
        )]);
        let actual = Value::map([
            (Value::symbol("city"), Value::from("Burbank")),
            (Value::symbol("zip"), Value::from("90210")),
        ]);
        let ops = diff_ops(&expected, &actual, &config()).unwrap();
        assert_eq!(ops.ops().len(), 1);
        let Op::Changed { label, .. } = &ops.ops()[0] else {
            panic!("expected a changed operation");
        };
        assert_eq!(label, "city: ");
    }

    #[test]
    fn hash_including_marks_missing_keys_deleted() {
        let expected = Value::a_hash_including([(Value::symbol("city"), Value::from("X"))]);
        let actual = Value::map([(Value::symbol("zip"), Value::from("90210"))]);
        let ops = diff_ops(&expected, &actual, &config()).unwrap();
        assert_eq!(ops.ops().len(), 1);
        assert!(matches!(ops.ops()[0], Op::Deleted { .. }));
    }

    #[test]
    fn collection_including_never_inserts_extras() {
        let expected = Value::a_collection_including([Value::from("milk")]);
        let actual = Value::list([Value::from("toast"), Value::from("jam")]);
        let ops = diff_ops(&expected, &actual, &config()).unwrap();
        assert!(matches!(ops.ops()[0], Op::Unchanged { .. }));
        assert!(matches!(ops.ops()[1], Op::Unchanged { .. }));
        assert!(matches!(ops.ops()[2], Op::Deleted { .. }));
    }

    #[test]
    fn containing_exactly_marks_extras_inserted() {
        let expected = Value::a_collection_containing_exactly([Value::from("milk")]);
        let actual = Value::list([Value::from("milk"), Value::from("jam")]);
        let ops = diff_ops(&expected, &actual, &config()).unwrap();
        assert!(matches!(ops.ops()[0], Op::Unchanged { .. }));
        assert!(matches!(ops.ops()[1], Op::Inserted { .. }));
    }

    #[test]
    fn containing_exactly_ignores_order() {
        let expected = Value::a_collection_containing_exactly([
            Value::from("milk"),
            Value::from("eggs"),
            Value::from("toast"),
        ]);
        let actual = Value::list([Value::from("milk"), Value::from("toast"), Value::from("eggs")]);
        let ops = diff_ops(&expected, &actual, &config()).unwrap();
        assert!(!ops.has_changes());
    }

    #[test]
    fn incompatible_shapes_collapse_to_one_changed() {
        let expected = Value::a_hash_including([(Value::symbol("a"), Value::int(1))]);
        let ops = diff_ops(&expected, &Value::Nil, &config()).unwrap();
        assert_eq!(ops.kind(), &SeqKind::Atom);
        assert_eq!(ops.ops().len(), 1);
        assert!(matches!(ops.ops()[0], Op::Changed { .. }));
    }

    #[test]
    fn object_having_attributes_restricts_to_named_attrs() {
        let expected = Value::an_object_having_attributes([("age", Value::int(17))]);
        let actual = Value::record(
            "Person",
            [("name", Value::from("Marty")), ("age", Value::int(18))],
        );
        let ops = diff_ops(&expected, &actual, &config()).unwrap();
        assert_eq!(ops.kind(), &SeqKind::Composite("Person".to_string()));
        assert_eq!(ops.ops().len(), 1);
        assert!(matches!(ops.ops()[0], Op::Changed { .. }));
    }

    #[test]
    fn exception_match_diffs_the_message() {
        let expected = Value::an_exception("StandardError", "boom");
        let actual = Value::record("StandardError", [("message", Value::from("bang"))]);
        let ops = diff_ops(&expected, &actual, &config()).unwrap();
        assert_eq!(ops.kind(), &SeqKind::Composite("StandardError".to_string()));
        assert!(matches!(ops.ops()[0], Op::Changed { .. }));
    }

    #[test]
    fn exception_match_with_wrong_class_stays_atomic() {
        let expected = Value::an_exception("StandardError", "boom");
        let actual = Value::record("ArgumentError", [("message", Value::from("boom"))]);
        let ops = diff_ops(&expected, &actual, &config()).unwrap();
        assert_eq!(ops.kind(), &SeqKind::Atom);
    }
}
