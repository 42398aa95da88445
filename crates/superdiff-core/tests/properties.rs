use proptest::prelude::*;
use superdiff_core::{diff_ops, diff_values, inspect_value, Config, Value};

fn arb_value() -> impl Strategy<Value = Value> {
    use proptest::{collection, string::string_regex};

    let leaf = prop_oneof![
        Just(Value::Nil),
        any::<bool>().prop_map(Value::from),
        proptest::num::f64::ANY.prop_filter_map("finite", |f| {
            if f.is_finite() {
                Value::float(f).ok()
            } else {
                None
            }
        }),
        string_regex("[a-zA-Z0-9 \\n\\r]{0,8}").unwrap().prop_map(Value::string),
        string_regex("[a-z]{1,6}").unwrap().prop_map(Value::symbol),
    ];

    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            collection::vec(inner.clone(), 0..4).prop_map(Value::list),
            collection::vec(inner.clone(), 0..4).prop_map(Value::set),
            collection::btree_map(string_regex("[a-z]{1,4}").unwrap(), inner, 0..4).prop_map(
                |map| Value::map(map.into_iter().map(|(key, value)| (Value::symbol(key), value))),
            ),
        ]
    })
}

proptest! {
    #[test]
    fn equal_values_produce_no_diff(value in arb_value()) {
        let config = Config::default();
        prop_assert!(value.deep_eq(&value.clone()));
        let rendered = diff_values(&value, &value.clone(), &config).unwrap();
        prop_assert!(rendered.is_none());
    }

    #[test]
    fn diffing_is_deterministic(expected in arb_value(), actual in arb_value()) {
        let config = Config::default();
        let first = diff_ops(&expected, &actual, &config).unwrap();
        let second = diff_ops(&expected, &actual, &config).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn unequal_values_always_surface_a_change(expected in arb_value(), actual in arb_value()) {
        let config = Config::default();
        let ops = diff_ops(&expected, &actual, &config).unwrap();
        prop_assert_eq!(expected.deep_eq(&actual), !ops.has_changes());
    }

    #[test]
    fn equal_values_share_a_hash_code(value in arb_value()) {
        prop_assert_eq!(value.hash_code(), value.clone().hash_code());
    }

    #[test]
    fn inspection_never_fails_within_the_depth_budget(value in arb_value()) {
        let rendered = inspect_value(&value, &Config::default()).unwrap();
        prop_assert!(!rendered.is_empty());
    }

    #[test]
    fn containing_exactly_ignores_element_order(items in proptest::collection::vec(0i64..16, 0..6)) {
        let forward: Vec<Value> = items.iter().copied().map(Value::int).collect();
        let reversed: Vec<Value> = items.iter().rev().copied().map(Value::int).collect();
        let matcher = Value::a_collection_containing_exactly(forward);
        let ops = diff_ops(&matcher, &Value::list(reversed), &Config::default()).unwrap();
        prop_assert!(!ops.has_changes());
    }

    #[test]
    fn rendered_diff_lines_carry_a_marker_column(expected in arb_value(), actual in arb_value()) {
        let config = Config::default();
        let ops = diff_ops(&expected, &actual, &config).unwrap();
        for line in ops.render(&config).lines() {
            prop_assert!(
                line.starts_with("- ") || line.starts_with("+ ") || line.starts_with("  "),
                "line missing marker column: {line:?}"
            );
        }
    }
}
