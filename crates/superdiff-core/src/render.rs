//! Renders an operation tree to text.
//!
//! Every line starts with a two-column marker field (`- `, `+ `, or two
//! spaces) followed by `indent_level * indent_width` spaces, so the diff
//! output lines up with the inspector's own indentation. The marker field
//! sits outside the width budget: collapse decisions count indentation and
//! content only, so inspection and diff output collapse the same values.
//! Inside an expanded container each comma-unit but the last gets a trailing
//! comma; the two halves of a Changed slot are separate comma-units.

use crate::{
    diff::{Op, OpSeq, SeqKind},
    inspect::{render_lines, Described},
    style::{paint, Role},
    Config,
};

const PLAIN_MARKER: &str = "  ";
const DELETED_MARKER: &str = "- ";
const INSERTED_MARKER: &str = "+ ";

pub(crate) fn render_ops(seq: &OpSeq, config: &Config) -> String {
    let mut lines: Vec<(Role, String)> = Vec::new();
    emit_seq(seq, config, 0, &mut lines);

    let mut output = String::new();
    for (role, text) in lines {
        let token = config.palette().token_for(role);
        output.push_str(&paint(token, &text, config.color_enabled()));
        output.push('\n');
    }
    output
}

fn delimiters(kind: &SeqKind) -> Option<(String, &'static str)> {
    match kind {
        SeqKind::Atom | SeqKind::Lines => None,
        SeqKind::Sequence => Some(("[".to_string(), "]")),
        SeqKind::Mapping => Some(("{".to_string(), "}")),
        SeqKind::Set => Some(("#<Set: {".to_string(), "}>")),
        SeqKind::Composite(type_name) => Some((format!("#<{type_name} {{"), "}>")),
    }
}

fn emit_seq(seq: &OpSeq, config: &Config, indent: usize, out: &mut Vec<(Role, String)>) {
    match delimiters(seq.kind()) {
        Some((open, close)) => {
            let indentation = config.indentation(indent);
            out.push((Role::Plain, format!("{PLAIN_MARKER}{indentation}{open}")));
            emit_ops(seq.ops(), config, indent + 1, true, out);
            out.push((Role::Plain, format!("{PLAIN_MARKER}{indentation}{close}")));
        }
        None => emit_ops(seq.ops(), config, indent, false, out),
    }
}

fn emit_ops(
    ops: &[Op],
    config: &Config,
    indent: usize,
    commas: bool,
    out: &mut Vec<(Role, String)>,
) {
    let mut units: Vec<Vec<(Role, String)>> = Vec::new();
    for op in ops {
        match op {
            Op::Unchanged { label, value } => {
                units.push(value_unit(PLAIN_MARKER, Role::Plain, label, value, config, indent));
            }
            Op::Deleted { label, value } => {
                units.push(value_unit(DELETED_MARKER, Role::Deleted, label, value, config, indent));
            }
            Op::Inserted { label, value } => {
                units.push(value_unit(
                    INSERTED_MARKER,
                    Role::Inserted,
                    label,
                    value,
                    config,
                    indent,
                ));
            }
            Op::Changed { label, expected, actual } => {
                units.push(value_unit(
                    DELETED_MARKER,
                    Role::Expected,
                    label,
                    expected,
                    config,
                    indent,
                ));
                units.push(value_unit(INSERTED_MARKER, Role::Actual, label, actual, config, indent));
            }
            Op::Nested { label, children } => {
                units.push(nested_unit(label, children, config, indent));
            }
        }
    }

    let last = units.len().saturating_sub(1);
    for (index, mut unit) in units.into_iter().enumerate() {
        if commas && index < last {
            if let Some((_, text)) = unit.last_mut() {
                text.push(',');
            }
        }
        out.extend(unit);
    }
}

fn value_unit(
    marker: &str,
    role: Role,
    label: &str,
    value: &Described,
    config: &Config,
    indent: usize,
) -> Vec<(Role, String)> {
    let rendered = render_lines(value, config, indent);
    let indentation = config.indentation(indent);
    let mut unit = Vec::with_capacity(rendered.len());
    for (index, line) in rendered.into_iter().enumerate() {
        if index == 0 {
            unit.push((role, format!("{marker}{indentation}{label}{line}")));
        } else {
            unit.push((role, format!("{marker}{line}")));
        }
    }
    unit
}

fn nested_unit(
    label: &str,
    children: &OpSeq,
    config: &Config,
    indent: usize,
) -> Vec<(Role, String)> {
    let indentation = config.indentation(indent);
    let Some((open, close)) = delimiters(children.kind()) else {
        // Nested sub-diffs always carry a container kind; fall back to
        // emitting the children in place if one ever does not.
        let mut unit = Vec::new();
        emit_ops(children.ops(), config, indent, false, &mut unit);
        return unit;
    };
    let mut unit = vec![(Role::NestedKey, format!("{PLAIN_MARKER}{indentation}{label}{open}"))];
    emit_ops(children.ops(), config, indent + 1, true, &mut unit);
    unit.push((Role::Plain, format!("{PLAIN_MARKER}{indentation}{close}")));
    unit
}
