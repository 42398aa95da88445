use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::{
    hash::{combine, hash_bytes, HashCode},
    CanonicalizeError, DiffError, Number,
};

const NIL_HASH: HashCode = [0xFE, 0x73, 0xAB, 0xCC, 0xE6, 0x32, 0xE0, 0x88];
const BOOL_TRUE_HASH: HashCode = [0x24, 0x6B, 0xE3, 0xE4, 0xAF, 0x59, 0xDC, 0x1C];
const BOOL_FALSE_HASH: HashCode = [0xC6, 0x38, 0x77, 0xD1, 0x0A, 0x7E, 0x1F, 0xBF];
const LIST_SEED: [u8; 8] = [0xF5, 0x18, 0x0A, 0x71, 0xA4, 0xC4, 0x03, 0xF3];
const MAP_SEED: [u8; 8] = [0x00, 0x5D, 0x39, 0xA4, 0x18, 0x10, 0xEA, 0xD5];
const SYMBOL_SEED: [u8; 8] = [0x5A, 0x21, 0x8F, 0x06, 0xD3, 0x4B, 0x7C, 0xE9];
const RECORD_SEED: [u8; 8] = [0x9C, 0x41, 0x02, 0xEE, 0x6A, 0x1D, 0xB0, 0x58];
const MATCHER_SEED: [u8; 8] = [0x37, 0xC8, 0x55, 0x90, 0x0E, 0xF2, 0x6D, 0xA1];

/// The closed classification scheme driving strategy selection.
///
/// ```
/// # use superdiff_core::{Category, Value};
/// assert_eq!(Value::from("one\ntwo").category(), Category::MultilineString);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    /// Nil, booleans, numbers, and symbols.
    Scalar,
    /// A string without line breaks.
    SinglelineString,
    /// A string containing at least one line break.
    MultilineString,
    /// An ordered sequence of elements.
    OrderedCollection,
    /// An order-insensitive collection of elements.
    UnorderedCollection,
    /// An insertion-order-preserving key-to-value mapping.
    KeyedCollection,
    /// A typed bundle of named attributes.
    Record,
    /// An expected-side-only constraint specification.
    PartialMatcher,
}

impl Category {
    /// Indicates whether values of this category decompose into children
    /// during diffing.
    #[must_use]
    pub fn is_structured(self) -> bool {
        matches!(
            self,
            Self::OrderedCollection
                | Self::UnorderedCollection
                | Self::KeyedCollection
                | Self::Record
        )
    }
}

/// A partial-match constraint specification, valid only on the expected side
/// of a comparison.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "spec")]
pub enum Matcher {
    /// Requires at least the given entries to be present.
    HashIncluding(Vec<(Value, Value)>),
    /// Requires each element to appear anywhere in the actual collection.
    CollectionIncluding(Vec<Value>),
    /// Requires the actual collection to contain exactly these elements,
    /// ignoring order.
    CollectionContainingExactly(Vec<Value>),
    /// Requires a record to carry at least the given attributes.
    ObjectHavingAttributes(Vec<(String, Value)>),
    /// Requires a record representing an exception of the given class with
    /// the given message.
    ExceptionMatch {
        /// The expected exception class name.
        class_name: String,
        /// The expected exception message.
        message: String,
    },
}

impl Matcher {
    /// Returns the human-readable description used when the matcher is
    /// rendered as `#<description (...)>`.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::HashIncluding(_) => "a hash including".to_string(),
            Self::CollectionIncluding(_) => "a collection including".to_string(),
            Self::CollectionContainingExactly(_) => {
                "a collection containing exactly".to_string()
            }
            Self::ObjectHavingAttributes(_) => "an object having attributes".to_string(),
            Self::ExceptionMatch { class_name, .. } => {
                format!("an exception {class_name} with message")
            }
        }
    }

    /// Tests whether the constraint is satisfied by `actual`.
    ///
    /// ```
    /// # use superdiff_core::Value;
    /// let matcher = Value::a_collection_including([Value::from("milk")]);
    /// let actual = Value::list([Value::from("milk"), Value::from("eggs")]);
    /// assert!(matcher.deep_eq(&actual));
    /// ```
    #[must_use]
    pub fn matches(&self, actual: &Value) -> bool {
        match self {
            Self::HashIncluding(entries) => {
                let Value::Map(actual_entries) = actual else {
                    return false;
                };
                entries.iter().all(|(key, value)| {
                    lookup(actual_entries, key).is_some_and(|found| value.deep_eq(found))
                })
            }
            Self::CollectionIncluding(required) => {
                let Some(elements) = collection_elements(actual) else {
                    return false;
                };
                cancel_elements(required, elements).0.is_empty()
            }
            Self::CollectionContainingExactly(required) => {
                let Some(elements) = collection_elements(actual) else {
                    return false;
                };
                let (missing, extras) = cancel_elements(required, elements);
                missing.is_empty() && extras.is_empty()
            }
            Self::ObjectHavingAttributes(attrs) => {
                let Value::Record { fields, .. } = actual else {
                    return false;
                };
                attrs.iter().all(|(name, value)| {
                    fields
                        .iter()
                        .find(|(field, _)| field == name)
                        .is_some_and(|(_, found)| value.deep_eq(found))
                })
            }
            Self::ExceptionMatch { class_name, message } => {
                let Value::Record { type_name, fields } = actual else {
                    return false;
                };
                type_name == class_name
                    && fields
                        .iter()
                        .find(|(field, _)| field == "message")
                        .is_some_and(|(_, found)| {
                            matches!(found, Value::String(s) if s == message)
                        })
            }
        }
    }
}

/// Represents any value the diff engine can classify and compare.
///
/// Values are owned, acyclic trees; each comparison is a pure function of the
/// two inputs and a [`Config`](crate::Config).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Value {
    /// The absence of a value (`nil`).
    Nil,
    /// A boolean scalar.
    Bool(bool),
    /// A numeric scalar.
    Number(Number),
    /// An interned identifier scalar, used for idiomatic map keys.
    Symbol(String),
    /// A string scalar; classified as multiline when it contains `\n`.
    String(String),
    /// An ordered collection.
    List(Vec<Value>),
    /// An unordered collection.
    Set(Vec<Value>),
    /// An insertion-order-preserving keyed collection.
    Map(Vec<(Value, Value)>),
    /// A typed record of named attributes in their natural order.
    Record {
        /// The record's type name.
        type_name: String,
        /// The named attributes in declaration order.
        fields: Vec<(String, Value)>,
    },
    /// A partial-match specification, valid only on the expected side.
    Matcher(Matcher),
}

impl Value {
    /// Builds a string value.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    /// Builds a symbol value.
    #[must_use]
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Symbol(name.into())
    }

    /// Builds an integer number value.
    #[must_use]
    pub fn int(value: i64) -> Self {
        Self::Number(Number::from_int(value))
    }

    /// Builds a floating-point number value, rejecting non-finite input.
    pub fn float(value: f64) -> Result<Self, CanonicalizeError> {
        Ok(Self::Number(Number::new(value)?))
    }

    /// Builds an ordered collection.
    #[must_use]
    pub fn list(items: impl IntoIterator<Item = Value>) -> Self {
        Self::List(items.into_iter().collect())
    }

    /// Builds an unordered collection.
    #[must_use]
    pub fn set(items: impl IntoIterator<Item = Value>) -> Self {
        Self::Set(items.into_iter().collect())
    }

    /// Builds a keyed collection preserving insertion order.
    #[must_use]
    pub fn map(entries: impl IntoIterator<Item = (Value, Value)>) -> Self {
        Self::Map(entries.into_iter().collect())
    }

    /// Builds a record with the given type name and attributes.
    #[must_use]
    pub fn record(
        type_name: impl Into<String>,
        fields: impl IntoIterator<Item = (&'static str, Value)>,
    ) -> Self {
        Self::Record {
            type_name: type_name.into(),
            fields: fields.into_iter().map(|(name, value)| (name.to_string(), value)).collect(),
        }
    }

    /// Builds a `hash_including` partial matcher.
    #[must_use]
    pub fn a_hash_including(entries: impl IntoIterator<Item = (Value, Value)>) -> Self {
        Self::Matcher(Matcher::HashIncluding(entries.into_iter().collect()))
    }

    /// Builds a `collection_including` partial matcher.
    #[must_use]
    pub fn a_collection_including(items: impl IntoIterator<Item = Value>) -> Self {
        Self::Matcher(Matcher::CollectionIncluding(items.into_iter().collect()))
    }

    /// Builds a `contain_exactly` partial matcher.
    #[must_use]
    pub fn a_collection_containing_exactly(items: impl IntoIterator<Item = Value>) -> Self {
        Self::Matcher(Matcher::CollectionContainingExactly(items.into_iter().collect()))
    }

    /// Builds an `object_having_attributes` partial matcher.
    #[must_use]
    pub fn an_object_having_attributes(
        attrs: impl IntoIterator<Item = (&'static str, Value)>,
    ) -> Self {
        Self::Matcher(Matcher::ObjectHavingAttributes(
            attrs.into_iter().map(|(name, value)| (name.to_string(), value)).collect(),
        ))
    }

    /// Builds an exception partial matcher.
    #[must_use]
    pub fn an_exception(class_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Matcher(Matcher::ExceptionMatch {
            class_name: class_name.into(),
            message: message.into(),
        })
    }

    /// Parses a JSON string into a [`Value`].
    ///
    /// Objects become string-keyed maps in document order; arrays become
    /// ordered collections.
    ///
    /// ```
    /// # use superdiff_core::Value;
    /// let value = Value::from_json_str("{\"city\":\"Burbank\"}")?;
    /// assert!(matches!(value, Value::Map(_)));
    /// # Ok::<(), superdiff_core::CanonicalizeError>(())
    /// ```
    pub fn from_json_str(input: &str) -> Result<Self, CanonicalizeError> {
        let value: JsonValue = serde_json::from_str(input)?;
        Self::from_json_value(value)
    }

    /// Converts a serde JSON value into a [`Value`].
    pub fn from_json_value(value: JsonValue) -> Result<Self, CanonicalizeError> {
        match value {
            JsonValue::Null => Ok(Self::Nil),
            JsonValue::Bool(v) => Ok(Self::Bool(v)),
            JsonValue::Number(num) => {
                let text = num.to_string();
                let Some(as_f64) = num.as_f64() else {
                    return Err(CanonicalizeError::Json(serde_json::Error::io(
                        std::io::Error::new(
                            std::io::ErrorKind::InvalidData,
                            format!("number {text} cannot be represented as f64"),
                        ),
                    )));
                };
                Ok(Self::Number(Number::new(as_f64)?))
            }
            JsonValue::String(s) => Ok(Self::String(s)),
            JsonValue::Array(values) => {
                let mut items = Vec::with_capacity(values.len());
                for value in values {
                    items.push(Self::from_json_value(value)?);
                }
                Ok(Self::List(items))
            }
            JsonValue::Object(map) => {
                let mut entries = Vec::with_capacity(map.len());
                for (key, value) in map {
                    entries.push((Self::String(key), Self::from_json_value(value)?));
                }
                Ok(Self::Map(entries))
            }
        }
    }

    /// Classifies the value into its [`Category`].
    ///
    /// ```
    /// # use superdiff_core::{Category, Value};
    /// assert_eq!(Value::Nil.category(), Category::Scalar);
    /// assert_eq!(Value::list([]).category(), Category::OrderedCollection);
    /// ```
    #[must_use]
    pub fn category(&self) -> Category {
        match self {
            Self::Nil | Self::Bool(_) | Self::Number(_) | Self::Symbol(_) => Category::Scalar,
            Self::String(s) => {
                if s.contains('\n') {
                    Category::MultilineString
                } else {
                    Category::SinglelineString
                }
            }
            Self::List(_) => Category::OrderedCollection,
            Self::Set(_) => Category::UnorderedCollection,
            Self::Map(_) => Category::KeyedCollection,
            Self::Record { .. } => Category::Record,
            Self::Matcher(_) => Category::PartialMatcher,
        }
    }

    /// Structural deep equality with matcher awareness.
    ///
    /// When `self` is a partial matcher and `other` is a concrete value, the
    /// matcher's constraint decides equality. Two matchers compare
    /// structurally. Keyed collections and unordered collections compare
    /// without regard to entry order.
    ///
    /// ```
    /// # use superdiff_core::Value;
    /// let expected = Value::set([Value::int(1), Value::int(2)]);
    /// let actual = Value::set([Value::int(2), Value::int(1)]);
    /// assert!(expected.deep_eq(&actual));
    /// ```
    #[must_use]
    pub fn deep_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Matcher(a), Self::Matcher(b)) => a == b,
            (Self::Matcher(matcher), _) => matcher.matches(other),
            (Self::Nil, Self::Nil) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Symbol(a), Self::Symbol(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::List(a), Self::List(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.deep_eq(y))
            }
            (Self::Set(a), Self::Set(b)) => {
                let (missing, extras) = cancel_elements(a, b);
                missing.is_empty() && extras.is_empty()
            }
            (Self::Map(a), Self::Map(b)) => {
                a.len() == b.len()
                    && a.iter().all(|(key, value)| {
                        lookup(b, key).is_some_and(|found| value.deep_eq(found))
                    })
            }
            (
                Self::Record { type_name: a_name, fields: a_fields },
                Self::Record { type_name: b_name, fields: b_fields },
            ) => {
                a_name == b_name
                    && a_fields.len() == b_fields.len()
                    && a_fields.iter().all(|(name, value)| {
                        b_fields
                            .iter()
                            .find(|(other_name, _)| other_name == name)
                            .is_some_and(|(_, found)| value.deep_eq(found))
                    })
            }
            _ => false,
        }
    }

    /// Computes the fingerprint used by the ordered-alignment algorithm.
    ///
    /// Agrees with [`Value::deep_eq`] for concrete values: order-insensitive
    /// containers combine child hashes order-insensitively.
    #[must_use]
    pub fn hash_code(&self) -> HashCode {
        match self {
            Self::Nil => NIL_HASH,
            Self::Bool(true) => BOOL_TRUE_HASH,
            Self::Bool(false) => BOOL_FALSE_HASH,
            Self::Number(n) => n.hash_code(),
            Self::Symbol(s) => seeded_hash(&SYMBOL_SEED, s.as_bytes()),
            Self::String(s) => hash_bytes(s.as_bytes()),
            Self::List(values) => {
                let mut bytes = Vec::with_capacity(8 + values.len() * 8);
                bytes.extend_from_slice(&LIST_SEED);
                for value in values {
                    bytes.extend_from_slice(&value.hash_code());
                }
                hash_bytes(&bytes)
            }
            Self::Set(values) => {
                let hashes: Vec<_> = values.iter().map(Value::hash_code).collect();
                combine(hashes)
            }
            Self::Map(entries) => {
                let mut hashes = Vec::with_capacity(entries.len());
                for (key, value) in entries {
                    let mut bytes = Vec::with_capacity(MAP_SEED.len() + 16);
                    bytes.extend_from_slice(&MAP_SEED);
                    bytes.extend_from_slice(&key.hash_code());
                    bytes.extend_from_slice(&value.hash_code());
                    hashes.push(hash_bytes(&bytes));
                }
                combine(hashes)
            }
            Self::Record { type_name, fields } => {
                let mut hashes = Vec::with_capacity(fields.len() + 1);
                hashes.push(seeded_hash(&RECORD_SEED, type_name.as_bytes()));
                for (name, value) in fields {
                    let mut bytes = Vec::with_capacity(16);
                    bytes.extend_from_slice(&hash_bytes(name.as_bytes()));
                    bytes.extend_from_slice(&value.hash_code());
                    hashes.push(hash_bytes(&bytes));
                }
                combine(hashes)
            }
            Self::Matcher(matcher) => {
                // Matchers never hash-match a concrete value; the matcher
                // strategies compare via deep_eq instead.
                let mut bytes = Vec::new();
                bytes.extend_from_slice(&MATCHER_SEED);
                bytes.extend_from_slice(matcher.description().as_bytes());
                match matcher {
                    Matcher::HashIncluding(entries) => {
                        for (key, value) in entries {
                            bytes.extend_from_slice(&key.hash_code());
                            bytes.extend_from_slice(&value.hash_code());
                        }
                    }
                    Matcher::CollectionIncluding(items)
                    | Matcher::CollectionContainingExactly(items) => {
                        for item in items {
                            bytes.extend_from_slice(&item.hash_code());
                        }
                    }
                    Matcher::ObjectHavingAttributes(attrs) => {
                        for (name, value) in attrs {
                            bytes.extend_from_slice(&hash_bytes(name.as_bytes()));
                            bytes.extend_from_slice(&value.hash_code());
                        }
                    }
                    Matcher::ExceptionMatch { class_name, message } => {
                        bytes.extend_from_slice(class_name.as_bytes());
                        bytes.extend_from_slice(message.as_bytes());
                    }
                }
                hash_bytes(&bytes)
            }
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::int(i64::from(value))
    }
}

fn seeded_hash(seed: &[u8; 8], payload: &[u8]) -> HashCode {
    let mut bytes = Vec::with_capacity(8 + payload.len());
    bytes.extend_from_slice(seed);
    bytes.extend_from_slice(payload);
    hash_bytes(&bytes)
}

/// Finds the value stored under `key`, comparing keys by deep equality.
pub(crate) fn lookup<'a>(entries: &'a [(Value, Value)], key: &Value) -> Option<&'a Value> {
    entries.iter().find(|(candidate, _)| candidate.deep_eq(key)).map(|(_, value)| value)
}

/// Returns the elements of an ordered or unordered collection.
pub(crate) fn collection_elements(value: &Value) -> Option<&[Value]> {
    match value {
        Value::List(items) | Value::Set(items) => Some(items),
        _ => None,
    }
}

/// One-to-one multiset cancellation between `required` and `available`.
///
/// Returns the indices of `required` elements left unmatched and the indices
/// of `available` elements left unconsumed. Matching is matcher-aware and
/// leftmost-greedy on both sides.
pub(crate) fn cancel_elements(
    required: &[Value],
    available: &[Value],
) -> (Vec<usize>, Vec<usize>) {
    let mut consumed = vec![false; available.len()];
    let mut missing = Vec::new();
    for (index, requirement) in required.iter().enumerate() {
        let found = available
            .iter()
            .enumerate()
            .position(|(slot, candidate)| !consumed[slot] && requirement.deep_eq(candidate));
        match found {
            Some(slot) => consumed[slot] = true,
            None => missing.push(index),
        }
    }
    let extras =
        consumed.iter().enumerate().filter(|(_, used)| !**used).map(|(slot, _)| slot).collect();
    (missing, extras)
}

/// Tracks the remaining recursion budget for one diff or inspection call.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Budget {
    remaining: usize,
    limit: usize,
}

impl Budget {
    pub(crate) fn new(limit: usize) -> Self {
        Self { remaining: limit, limit }
    }

    /// Consumes one nesting level, failing when the budget is exhausted.
    pub(crate) fn dive(self) -> Result<Self, DiffError> {
        if self.remaining == 0 {
            Err(DiffError::CycleDetected { limit: self.limit })
        } else {
            Ok(Self { remaining: self.remaining - 1, limit: self.limit })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strings_classify_by_line_breaks() {
        assert_eq!(Value::from("plain").category(), Category::SinglelineString);
        assert_eq!(Value::from("one\ntwo").category(), Category::MultilineString);
    }

    #[test]
    fn map_equality_ignores_entry_order() {
        let lhs = Value::map([
            (Value::symbol("a"), Value::int(1)),
            (Value::symbol("b"), Value::int(2)),
        ]);
        let rhs = Value::map([
            (Value::symbol("b"), Value::int(2)),
            (Value::symbol("a"), Value::int(1)),
        ]);
        assert!(lhs.deep_eq(&rhs));
    }

    #[test]
    fn set_hash_ignores_order_but_counts_duplicates() {
        let lhs = Value::set([Value::int(1), Value::int(2), Value::int(2)]);
        let rhs = Value::set([Value::int(2), Value::int(1), Value::int(2)]);
        let skewed = Value::set([Value::int(1), Value::int(1), Value::int(2)]);
        assert_eq!(lhs.hash_code(), rhs.hash_code());
        assert_ne!(lhs.hash_code(), skewed.hash_code());
        assert!(lhs.deep_eq(&rhs));
        assert!(!lhs.deep_eq(&skewed));
    }

    #[test]
    fn hash_including_matches_subset() {
        let matcher = Value::a_hash_including([(
            Value::symbol("city"),
            Value::from("Hill Valley"),
        )]);
        let actual = Value::map([
            (Value::symbol("city"), Value::from("Hill Valley")),
            (Value::symbol("state"), Value::from("CA")),
        ]);
        assert!(matcher.deep_eq(&actual));
        assert!(!matcher.deep_eq(&Value::Nil));
    }

    #[test]
    fn containing_exactly_rejects_extras() {
        let matcher = Value::a_collection_containing_exactly([
            Value::from("milk"),
            Value::from("eggs"),
        ]);
        let exact = Value::list([Value::from("eggs"), Value::from("milk")]);
        let extra = Value::list([Value::from("eggs"), Value::from("milk"), Value::from("jam")]);
        assert!(matcher.deep_eq(&exact));
        assert!(!matcher.deep_eq(&extra));
    }

    #[test]
    fn exception_match_requires_class_and_message() {
        let matcher = Value::an_exception("StandardError", "boom");
        let hit = Value::record("StandardError", [("message", Value::from("boom"))]);
        let miss = Value::record("ArgumentError", [("message", Value::from("boom"))]);
        assert!(matcher.deep_eq(&hit));
        assert!(!matcher.deep_eq(&miss));
    }

    #[test]
    fn json_objects_become_string_keyed_maps() {
        let value = Value::from_json_str("{\"a\":1,\"b\":[true,null]}").unwrap();
        let Value::Map(entries) = &value else {
            panic!("expected a map");
        };
        assert_eq!(entries.len(), 2);
        assert!(entries[0].0.deep_eq(&Value::from("a")));
    }

    #[test]
    fn budget_exhaustion_reports_cycle() {
        let budget = Budget::new(1);
        let deeper = budget.dive().expect("one level available");
        let err = deeper.dive().unwrap_err();
        assert_eq!(err, DiffError::CycleDetected { limit: 1 });
    }
}
