//! Ordered-sequence diffing.
//!
//! Aligns the two sides with a longest-common-subsequence pass over value
//! fingerprints, then merges left to right: deletions for unmatched expected
//! elements come before insertions for unmatched actual elements at each
//! divergence point. Mismatched elements are never decomposed further.

use super::{Op, OpSeq, SeqKind};
use crate::{
    hash::{hash_bytes, HashCode},
    inspect::{describe_depth, Described},
    value::Budget,
    DiffError, Value,
};

pub(super) fn diff_lists(
    expected: &[Value],
    actual: &[Value],
    budget: Budget,
) -> Result<OpSeq, DiffError> {
    let deeper = budget.dive()?;
    let expected_hashes: Vec<HashCode> = expected.iter().map(Value::hash_code).collect();
    let actual_hashes: Vec<HashCode> = actual.iter().map(Value::hash_code).collect();
    let common = longest_common_subsequence(&expected_hashes, &actual_hashes);

    let mut ops = Vec::with_capacity(expected.len() + actual.len());
    let mut expected_cursor = 0;
    let mut actual_cursor = 0;
    for hash in &common {
        while expected_hashes[expected_cursor] != *hash {
            ops.push(deleted(&expected[expected_cursor], deeper)?);
            expected_cursor += 1;
        }
        while actual_hashes[actual_cursor] != *hash {
            ops.push(inserted(&actual[actual_cursor], deeper)?);
            actual_cursor += 1;
        }
        ops.push(Op::Unchanged {
            label: String::new(),
            value: describe_depth(&actual[actual_cursor], deeper)?,
        });
        expected_cursor += 1;
        actual_cursor += 1;
    }
    while expected_cursor < expected.len() {
        ops.push(deleted(&expected[expected_cursor], deeper)?);
        expected_cursor += 1;
    }
    while actual_cursor < actual.len() {
        ops.push(inserted(&actual[actual_cursor], deeper)?);
        actual_cursor += 1;
    }

    Ok(OpSeq::new(SeqKind::Sequence, ops))
}

/// Diffs two multiline strings at line granularity.
///
/// Keeps `super_diff`'s output here: the sides are swapped relative to
/// collection diffs, so lines found only in the actual string are Deleted
/// and lines found only in the expected string are Inserted.
///
/// Lines are compared with their terminators, so strings differing only in
/// a trailing newline or in `\r\n` versus `\n` endings still diff unequal.
pub(super) fn diff_lines(expected: &str, actual: &str) -> OpSeq {
    let actual_lines = split_retaining_newlines(actual);
    let expected_lines = split_retaining_newlines(expected);
    let actual_hashes: Vec<HashCode> =
        actual_lines.iter().map(|line| hash_bytes(line.as_bytes())).collect();
    let expected_hashes: Vec<HashCode> =
        expected_lines.iter().map(|line| hash_bytes(line.as_bytes())).collect();
    let common = longest_common_subsequence(&actual_hashes, &expected_hashes);

    let mut ops = Vec::with_capacity(actual_lines.len() + expected_lines.len());
    let mut actual_cursor = 0;
    let mut expected_cursor = 0;
    for hash in &common {
        while actual_hashes[actual_cursor] != *hash {
            ops.push(deleted_line(actual_lines[actual_cursor]));
            actual_cursor += 1;
        }
        while expected_hashes[expected_cursor] != *hash {
            ops.push(inserted_line(expected_lines[expected_cursor]));
            expected_cursor += 1;
        }
        ops.push(Op::Unchanged {
            label: String::new(),
            value: Described::Scalar(display_line(actual_lines[actual_cursor])),
        });
        actual_cursor += 1;
        expected_cursor += 1;
    }
    while actual_cursor < actual_lines.len() {
        ops.push(deleted_line(actual_lines[actual_cursor]));
        actual_cursor += 1;
    }
    while expected_cursor < expected_lines.len() {
        ops.push(inserted_line(expected_lines[expected_cursor]));
        expected_cursor += 1;
    }

    OpSeq::new(SeqKind::Lines, ops)
}

fn deleted(value: &Value, budget: Budget) -> Result<Op, DiffError> {
    Ok(Op::Deleted { label: String::new(), value: describe_depth(value, budget)? })
}

fn inserted(value: &Value, budget: Budget) -> Result<Op, DiffError> {
    Ok(Op::Inserted { label: String::new(), value: describe_depth(value, budget)? })
}

fn deleted_line(line: &str) -> Op {
    Op::Deleted { label: String::new(), value: Described::Scalar(display_line(line)) }
}

fn inserted_line(line: &str) -> Op {
    Op::Inserted { label: String::new(), value: Described::Scalar(display_line(line)) }
}

fn split_retaining_newlines(text: &str) -> Vec<&str> {
    text.split_inclusive('\n').collect()
}

/// Strips the terminator the comparison kept, so rendered lines stay flat.
fn display_line(line: &str) -> String {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line).to_string()
}

/// Classic dynamic-programming LCS over fingerprints. The forward scan the
/// callers perform matches the earliest equal elements first, giving the
/// stable leftmost-greedy tie-break among minimal alignments.
fn longest_common_subsequence(lhs: &[HashCode], rhs: &[HashCode]) -> Vec<HashCode> {
    let n = lhs.len();
    let m = rhs.len();
    let mut table = vec![vec![0usize; m + 1]; n + 1];
    for (i, lhs_hash) in lhs.iter().enumerate() {
        for (j, rhs_hash) in rhs.iter().enumerate() {
            if lhs_hash == rhs_hash {
                table[i + 1][j + 1] = table[i][j] + 1;
            } else {
                table[i + 1][j + 1] = table[i][j + 1].max(table[i + 1][j]);
            }
        }
    }

    let mut result = Vec::with_capacity(table[n][m]);
    let mut i = n;
    let mut j = m;
    while i > 0 && j > 0 {
        if lhs[i - 1] == rhs[j - 1] {
            result.push(lhs[i - 1]);
            i -= 1;
            j -= 1;
        } else if table[i - 1][j] >= table[i][j - 1] {
            i -= 1;
        } else {
            j -= 1;
        }
    }
    result.reverse();
    result
}
