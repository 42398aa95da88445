//! Single-value inspection.
//!
//! The inspector classifies one value and renders it, collapsed onto one
//! line when it fits the configured width budget and expanded one child per
//! line otherwise. It never compares two values; the diff strategies lean on
//! it to render unchanged leaves, and the diff renderer reuses its
//! indentation rules so both agree on layout.

use serde::{Deserialize, Serialize};

use crate::{
    value::{Budget, Matcher},
    Config, DiffError, Value,
};

/// One child of a described container: an optional key prefix (already
/// carrying its separator, e.g. `city: ` or `"city" => `) and the child's
/// own description.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// The rendered key or attribute prefix; empty for sequence elements.
    pub prefix: String,
    /// The child's description.
    pub value: Described,
}

impl Entry {
    fn bare(value: Described) -> Self {
        Self { prefix: String::new(), value }
    }
}

/// The inspector's rendering tree for one value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", content = "body", rename_all = "snake_case")]
pub enum Described {
    /// A leaf rendered verbatim; may span lines for multiline strings.
    Scalar(String),
    /// An ordered collection rendered with `[` and `]`.
    Sequence(Vec<Entry>),
    /// A keyed collection rendered with `{` and `}`.
    Mapping(Vec<Entry>),
    /// An unordered collection rendered as `#<Set: { ... }>`.
    Set(Vec<Entry>),
    /// A record rendered as `#<TypeName { ... }>`.
    Composite {
        /// The record's type name.
        type_name: String,
        /// The record's attributes.
        entries: Vec<Entry>,
    },
    /// A partial matcher rendered as `#<description (...)>`.
    Wrapped {
        /// The matcher description preceding the parenthesized body.
        prefix: String,
        /// The matcher's constraint entries.
        entries: Vec<Entry>,
    },
}

impl Described {
    /// Indicates whether this description can never collapse onto one line.
    ///
    /// Multiline strings always expand, and a container holding one expands
    /// with it.
    #[must_use]
    pub fn requires_expansion(&self) -> bool {
        match self {
            Self::Scalar(text) => text.contains('\n'),
            Self::Sequence(entries)
            | Self::Mapping(entries)
            | Self::Set(entries)
            | Self::Composite { entries, .. }
            | Self::Wrapped { entries, .. } => {
                entries.iter().any(|entry| entry.value.requires_expansion())
            }
        }
    }

    fn delimiters(&self) -> Option<(String, &'static str)> {
        match self {
            Self::Scalar(_) => None,
            Self::Sequence(_) => Some(("[".to_string(), "]")),
            Self::Mapping(_) => Some(("{".to_string(), "}")),
            Self::Set(_) => Some(("#<Set: {".to_string(), "}>")),
            Self::Composite { type_name, .. } => Some((format!("#<{type_name} {{"), "}>")),
            Self::Wrapped { prefix, .. } => Some((format!("#<{prefix} ("), ")>")),
        }
    }

    fn entries(&self) -> &[Entry] {
        match self {
            Self::Scalar(_) => &[],
            Self::Sequence(entries)
            | Self::Mapping(entries)
            | Self::Set(entries)
            | Self::Composite { entries, .. }
            | Self::Wrapped { entries, .. } => entries,
        }
    }

    /// Flattens the description onto a single line, ignoring the width
    /// budget. Callers check [`Described::requires_expansion`] first.
    #[must_use]
    pub fn one_line(&self) -> String {
        match self {
            Self::Scalar(text) => text.clone(),
            Self::Sequence(entries) => format!("[{}]", join_entries(entries)),
            Self::Mapping(entries) => {
                if entries.is_empty() {
                    "{}".to_string()
                } else {
                    format!("{{ {} }}", join_entries(entries))
                }
            }
            Self::Set(entries) => format!("#<Set: {{{}}}>", join_entries(entries)),
            Self::Composite { type_name, entries } => {
                if entries.is_empty() {
                    format!("#<{type_name}>")
                } else {
                    format!("#<{type_name} {{ {} }}>", join_entries(entries))
                }
            }
            Self::Wrapped { prefix, entries } => {
                format!("#<{prefix} ({})>", join_entries(entries))
            }
        }
    }
}

fn join_entries(entries: &[Entry]) -> String {
    entries
        .iter()
        .map(|entry| format!("{}{}", entry.prefix, entry.value.one_line()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Classifies `value` and builds its description tree, recursing into
/// children for collections, records, and matchers.
///
/// ```
/// # use superdiff_core::{describe, Config, Value};
/// let value = Value::map([(Value::symbol("city"), Value::from("Burbank"))]);
/// let described = describe(&value, &Config::default())?;
/// assert_eq!(described.one_line(), "{ city: \"Burbank\" }");
/// # Ok::<(), superdiff_core::DiffError>(())
/// ```
pub fn describe(value: &Value, config: &Config) -> Result<Described, DiffError> {
    describe_depth(value, Budget::new(config.max_depth()))
}

pub(crate) fn describe_depth(value: &Value, budget: Budget) -> Result<Described, DiffError> {
    match value {
        Value::Nil => Ok(Described::Scalar("nil".to_string())),
        Value::Bool(v) => Ok(Described::Scalar(v.to_string())),
        Value::Number(n) => Ok(Described::Scalar(n.to_string())),
        Value::Symbol(name) => Ok(Described::Scalar(format!(":{name}"))),
        Value::String(s) => Ok(Described::Scalar(quote(s))),
        Value::List(items) => Ok(Described::Sequence(describe_items(items, budget)?)),
        Value::Set(items) => Ok(Described::Set(describe_items(items, budget)?)),
        Value::Map(entries) => Ok(Described::Mapping(describe_map_entries(entries, budget)?)),
        Value::Record { type_name, fields } => Ok(Described::Composite {
            type_name: type_name.clone(),
            entries: describe_fields(fields, budget)?,
        }),
        Value::Matcher(matcher) => describe_matcher(matcher, budget),
    }
}

fn describe_items(items: &[Value], budget: Budget) -> Result<Vec<Entry>, DiffError> {
    let deeper = budget.dive()?;
    items
        .iter()
        .map(|item| Ok(Entry::bare(describe_depth(item, deeper)?)))
        .collect()
}

fn describe_map_entries(
    entries: &[(Value, Value)],
    budget: Budget,
) -> Result<Vec<Entry>, DiffError> {
    let deeper = budget.dive()?;
    entries
        .iter()
        .map(|(key, value)| {
            Ok(Entry { prefix: key_prefix(key, deeper)?, value: describe_depth(value, deeper)? })
        })
        .collect()
}

fn describe_fields(fields: &[(String, Value)], budget: Budget) -> Result<Vec<Entry>, DiffError> {
    let deeper = budget.dive()?;
    fields
        .iter()
        .map(|(name, value)| {
            Ok(Entry { prefix: format!("{name}: "), value: describe_depth(value, deeper)? })
        })
        .collect()
}

fn describe_matcher(matcher: &Matcher, budget: Budget) -> Result<Described, DiffError> {
    let entries = match matcher {
        Matcher::HashIncluding(entries) => describe_map_entries(entries, budget)?,
        Matcher::CollectionIncluding(items)
        | Matcher::CollectionContainingExactly(items) => describe_items(items, budget)?,
        Matcher::ObjectHavingAttributes(attrs) => {
            let fields: Vec<(String, Value)> = attrs.clone();
            describe_fields(&fields, budget)?
        }
        Matcher::ExceptionMatch { message, .. } => {
            vec![Entry::bare(Described::Scalar(quote(message)))]
        }
    };
    Ok(Described::Wrapped { prefix: matcher.description(), entries })
}

/// Renders the key prefix shared by the inspector and the keyed diff
/// strategy: symbols read `key: `, everything else `<key> => `.
pub(crate) fn key_prefix(key: &Value, budget: Budget) -> Result<String, DiffError> {
    match key {
        Value::Symbol(name) => Ok(format!("{name}: ")),
        other => Ok(format!("{} => ", describe_depth(other, budget)?.one_line())),
    }
}

/// Quotes a string scalar, escaping quotes and backslashes but preserving
/// line breaks so multiline strings keep forcing expanded rendering.
fn quote(s: &str) -> String {
    let escaped = s.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}

/// Renders a description at the given indent level.
///
/// The first returned line carries no leading indentation (the caller places
/// it after its own prefix); continuation lines are fully indented.
///
/// The collapse check measures indentation plus content only. The diff
/// renderer's two-column marker field is not counted, so inspection and diff
/// output always collapse the same values and a collapsed line in diff
/// output may run two columns past `max_single_line_width`.
pub(crate) fn render_lines(
    described: &Described,
    config: &Config,
    indent_level: usize,
) -> Vec<String> {
    let flat = described.one_line();
    let fits = indent_level * config.indent_width() + flat.chars().count()
        <= config.max_single_line_width();
    let entries = described.entries();
    if (fits || entries.is_empty()) && !described.requires_expansion() {
        return vec![flat];
    }

    let Some((open, close)) = described.delimiters() else {
        // A multiline scalar: emit its physical lines verbatim.
        return flat.split('\n').map(str::to_string).collect();
    };

    let mut lines = vec![open];
    let last = entries.len().saturating_sub(1);
    for (index, entry) in entries.iter().enumerate() {
        let child_lines = render_lines(&entry.value, config, indent_level + 1);
        let mut block: Vec<String> = Vec::with_capacity(child_lines.len());
        for (child_index, child_line) in child_lines.into_iter().enumerate() {
            if child_index == 0 {
                block.push(format!(
                    "{}{}{}",
                    config.indentation(indent_level + 1),
                    entry.prefix,
                    child_line
                ));
            } else {
                block.push(child_line);
            }
        }
        if index < last {
            if let Some(tail) = block.last_mut() {
                tail.push(',');
            }
        }
        lines.extend(block);
    }
    lines.push(format!("{}{close}", config.indentation(indent_level)));
    lines
}

/// Renders a description to text at the given indent level.
#[must_use]
pub fn render(described: &Described, config: &Config, indent_level: usize) -> String {
    let mut lines = render_lines(described, config, indent_level);
    if let Some(first) = lines.first_mut() {
        *first = format!("{}{first}", config.indentation(indent_level));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config::default()
    }

    #[test]
    fn small_map_collapses() {
        let value = Value::map([(Value::symbol("city"), Value::from("Burbank"))]);
        let described = describe(&value, &config()).unwrap();
        assert_eq!(render(&described, &config(), 0), "{ city: \"Burbank\" }");
    }

    #[test]
    fn string_keys_render_with_hash_rockets() {
        let value = Value::map([(Value::from("city"), Value::from("Burbank"))]);
        let described = describe(&value, &config()).unwrap();
        assert_eq!(render(&described, &config(), 0), "{ \"city\" => \"Burbank\" }");
    }

    #[test]
    fn wide_containers_expand_one_child_per_line() {
        let narrow = config().with_max_single_line_width(20).unwrap();
        let value = Value::map([
            (Value::symbol("city"), Value::from("Hill Valley")),
            (Value::symbol("state"), Value::from("CA")),
        ]);
        let described = describe(&value, &narrow).unwrap();
        assert_eq!(
            render(&described, &narrow, 0),
            "{\n  city: \"Hill Valley\",\n  state: \"CA\"\n}"
        );
    }

    #[test]
    fn empty_containers_always_collapse() {
        let narrow = config().with_max_single_line_width(1).unwrap();
        let map = describe(&Value::map([]), &narrow).unwrap();
        let list = describe(&Value::list([]), &narrow).unwrap();
        assert_eq!(render(&map, &narrow, 0), "{}");
        assert_eq!(render(&list, &narrow, 0), "[]");
    }

    #[test]
    fn multiline_strings_never_collapse() {
        let value = Value::map([(Value::symbol("note"), Value::from("one\ntwo"))]);
        let described = describe(&value, &config()).unwrap();
        let rendered = render(&described, &config(), 0);
        assert_eq!(rendered, "{\n  note: \"one\ntwo\"\n}");
    }

    #[test]
    fn records_prefix_the_type_name() {
        let value = Value::record(
            "Person",
            [("name", Value::from("Marty")), ("age", Value::int(17))],
        );
        let described = describe(&value, &config()).unwrap();
        assert_eq!(render(&described, &config(), 0), "#<Person { name: \"Marty\", age: 17 }>");
    }

    #[test]
    fn matchers_render_wrapped() {
        let value = Value::a_hash_including([(
            Value::symbol("city"),
            Value::from("Hill Valley"),
        )]);
        let described = describe(&value, &config()).unwrap();
        assert_eq!(
            render(&described, &config(), 0),
            "#<a hash including (city: \"Hill Valley\")>"
        );
    }

    #[test]
    fn nested_expansion_indents_one_unit_per_level() {
        let narrow = config().with_max_single_line_width(12).unwrap();
        let value = Value::map([(
            Value::symbol("items"),
            Value::list([Value::from("bread"), Value::from("milk")]),
        )]);
        let described = describe(&value, &narrow).unwrap();
        assert_eq!(
            render(&described, &narrow, 0),
            "{\n  items: [\n    \"bread\",\n    \"milk\"\n  ]\n}"
        );
    }

    #[test]
    fn deep_nesting_exhausts_the_budget() {
        let mut value = Value::int(0);
        for _ in 0..80 {
            value = Value::list([value]);
        }
        let err = describe(&value, &config()).unwrap_err();
        assert!(matches!(err, DiffError::CycleDetected { .. }));
    }
}
