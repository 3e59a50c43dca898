//! JSON flattening.
//!
//! Pure conversion of a parsed JSON value into the ordered line sequence
//! the viewer scrolls through. The traversal is pre-order: a member's own
//! row(s) precede all of its descendants' rows, and an opener always
//! appears before its matching closer with every descendant strictly
//! between them at `level + 1` or deeper.
//!
//! The root container itself gets no opener/closer pair; its members are
//! the top of the sequence. Object members flatten in insertion order
//! (serde_json's `preserve_order` feature), array members in index order
//! with their decimal index as the key.

use crate::model::{Bracket, Line};
use serde_json::Value;

/// Literal rendered for explicit null members.
const NULL_LITERAL: &str = "null";

/// Pending traversal work.
///
/// The flattener runs on an explicit work stack instead of recursing, so
/// document depth is bounded by heap, not by the call stack.
enum Task<'a> {
    /// A member still to be emitted (and descended into, for containers).
    Member {
        name: String,
        value: &'a Value,
        level: usize,
    },
    /// A closer row owed once every pushed descendant has been emitted.
    Closer { bracket: Bracket, level: usize },
}

/// Flatten a parsed JSON value into display lines rooted at `start_level`.
///
/// Deterministic and side-effect free: identical input yields an identical
/// sequence on every call.
///
/// A root that is itself a scalar (or null) is a degenerate document; it
/// yields a single keyless row carrying the formatted value.
pub fn flatten(value: &Value, start_level: usize) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut stack: Vec<Task<'_>> = Vec::new();

    match value {
        Value::Object(_) | Value::Array(_) => push_members(&mut stack, value, start_level),
        Value::Null => {
            lines.push(Line::bare(NULL_LITERAL.to_string(), start_level));
            return lines;
        }
        scalar => {
            lines.push(Line::bare(format_scalar(scalar), start_level));
            return lines;
        }
    }

    while let Some(task) = stack.pop() {
        match task {
            Task::Closer { bracket, level } => lines.push(Line::closer(bracket, level)),
            Task::Member { name, value, level } => match value {
                // Explicit null is a scalar entry: one row, no descent,
                // no closer.
                Value::Null => lines.push(Line::scalar(&name, NULL_LITERAL.to_string(), level)),
                Value::Object(_) => {
                    lines.push(Line::opener(&name, Bracket::Brace, level));
                    stack.push(Task::Closer {
                        bracket: Bracket::Brace,
                        level,
                    });
                    push_members(&mut stack, value, level + 1);
                }
                Value::Array(_) => {
                    lines.push(Line::opener(&name, Bracket::Square, level));
                    stack.push(Task::Closer {
                        bracket: Bracket::Square,
                        level,
                    });
                    push_members(&mut stack, value, level + 1);
                }
                scalar => lines.push(Line::scalar(&name, format_scalar(scalar), level)),
            },
        }
    }

    lines
}

/// Push a container's members onto the work stack in reverse, so they pop
/// in iteration order. Scalars have no members and push nothing.
fn push_members<'a>(stack: &mut Vec<Task<'a>>, container: &'a Value, level: usize) {
    match container {
        Value::Object(map) => {
            for (name, member) in map.iter().rev() {
                stack.push(Task::Member {
                    name: name.clone(),
                    value: member,
                    level,
                });
            }
        }
        Value::Array(items) => {
            for (index, member) in items.iter().enumerate().rev() {
                stack.push(Task::Member {
                    name: index.to_string(),
                    value: member,
                    level,
                });
            }
        }
        _ => {}
    }
}

/// Format a non-null scalar for display: strings are wrapped in double
/// quotes, numbers and booleans render via their canonical string form.
fn format_scalar(value: &Value) -> String {
    match value {
        Value::String(text) => format!("\"{text}\""),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn keys(lines: &[Line]) -> Vec<&str> {
        lines.iter().map(|l| l.key.as_str()).collect()
    }

    fn levels(lines: &[Line]) -> Vec<usize> {
        lines.iter().map(|l| l.level).collect()
    }

    #[test]
    fn worked_example_object() {
        // {"a":1,"b":{"c":"x"},"d":[]} -> 6 lines, levels 0,0,1,0,0,0
        let value = json!({"a": 1, "b": {"c": "x"}, "d": []});
        let lines = flatten(&value, 0);

        assert_eq!(keys(&lines), vec!["a:", "b: {", "c:", "}", "d: [", "]"]);
        assert_eq!(levels(&lines), vec![0, 0, 1, 0, 0, 0]);
        assert_eq!(lines[0].value.as_deref(), Some("1"));
        assert_eq!(lines[2].value.as_deref(), Some("\"x\""));
        assert_eq!(lines[1].value, None);
        assert_eq!(lines[3].value, None);
    }

    #[test]
    fn null_member_is_single_row_without_closer() {
        // {"n":null} -> one line, no opener/closer pair
        let value = json!({"n": null});
        let lines = flatten(&value, 0);

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].key, "n:");
        assert_eq!(lines[0].value.as_deref(), Some("null"));
        assert_eq!(lines[0].level, 0);
    }

    #[test]
    fn empty_containers_emit_opener_and_closer() {
        let value = json!({"o": {}, "a": []});
        let lines = flatten(&value, 0);

        assert_eq!(keys(&lines), vec!["o: {", "}", "a: [", "]"]);
        assert_eq!(levels(&lines), vec![0, 0, 0, 0]);
    }

    #[test]
    fn array_members_are_keyed_by_index() {
        let value = json!({"tags": ["x", "y", "z"]});
        let lines = flatten(&value, 0);

        assert_eq!(keys(&lines), vec!["tags: [", "0:", "1:", "2:", "]"]);
        assert_eq!(lines[1].value.as_deref(), Some("\"x\""));
        assert_eq!(lines[3].value.as_deref(), Some("\"z\""));
        assert_eq!(levels(&lines), vec![0, 1, 1, 1, 0]);
    }

    #[test]
    fn root_array_members_flatten_at_start_level() {
        let value = json!([10, {"k": true}]);
        let lines = flatten(&value, 0);

        assert_eq!(keys(&lines), vec!["0:", "1: {", "k:", "}"]);
        assert_eq!(levels(&lines), vec![0, 0, 1, 0]);
    }

    #[test]
    fn scalar_formatting() {
        let value = json!({"s": "text", "i": 42, "f": 1.5, "neg": -7, "t": true, "f2": false});
        let lines = flatten(&value, 0);

        let values: Vec<&str> = lines.iter().map(|l| l.value.as_deref().unwrap()).collect();
        assert_eq!(values, vec!["\"text\"", "42", "1.5", "-7", "true", "false"]);
    }

    #[test]
    fn nested_levels_increase_by_one_per_container() {
        let value = json!({"a": {"b": {"c": 1}}});
        let lines = flatten(&value, 0);

        assert_eq!(keys(&lines), vec!["a: {", "b: {", "c:", "}", "}"]);
        assert_eq!(levels(&lines), vec![0, 1, 2, 2, 1]);
    }

    #[test]
    fn object_members_keep_insertion_order() {
        let value: Value = serde_json::from_str(r#"{"z": 1, "a": 2, "m": 3}"#).unwrap();
        let lines = flatten(&value, 0);

        assert_eq!(keys(&lines), vec!["z:", "a:", "m:"]);
    }

    #[test]
    fn start_level_offsets_all_rows() {
        let value = json!({"a": 1, "b": {"c": 2}});
        let lines = flatten(&value, 3);

        assert_eq!(levels(&lines), vec![3, 3, 4, 3]);
    }

    #[test]
    fn scalar_root_is_single_bare_row() {
        let lines = flatten(&json!("hello"), 0);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].key, "");
        assert_eq!(lines[0].value.as_deref(), Some("\"hello\""));

        let lines = flatten(&json!(12), 2);
        assert_eq!(lines[0].value.as_deref(), Some("12"));
        assert_eq!(lines[0].level, 2);
    }

    #[test]
    fn null_root_is_single_bare_null_row() {
        let lines = flatten(&Value::Null, 0);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].key, "");
        assert_eq!(lines[0].value.as_deref(), Some("null"));
    }

    #[test]
    fn flatten_is_deterministic() {
        let value = json!({"a": [1, {"b": null}, []], "c": {"d": "e"}});
        assert_eq!(flatten(&value, 0), flatten(&value, 0));
    }

    #[test]
    fn deeply_nested_document_does_not_overflow_the_stack() {
        // Build {"a":{"a":{... depth 10_000 ...}}} programmatically; the
        // explicit work stack must handle depth far beyond what recursion
        // would survive.
        const DEPTH: usize = 10_000;
        let mut value = Value::Bool(true);
        for _ in 0..DEPTH {
            let mut map = serde_json::Map::new();
            map.insert("a".to_string(), value);
            value = Value::Object(map);
        }

        let lines = flatten(&value, 0);

        // DEPTH - 1 opener/closer pairs plus the innermost scalar row.
        assert_eq!(lines.len(), 2 * (DEPTH - 1) + 1);
        assert_eq!(lines[DEPTH - 1].key, "a:");
        assert_eq!(lines[DEPTH - 1].value.as_deref(), Some("true"));
        assert_eq!(lines[DEPTH - 1].level, DEPTH - 1);
        assert_eq!(lines.last().unwrap().key, "}");
        assert_eq!(lines.last().unwrap().level, 0);

        // Unwind the tower iteratively so dropping the Value does not
        // recurse to DEPTH either.
        while let Value::Object(mut map) = value {
            value = map.remove("a").unwrap_or(Value::Null);
        }
    }
}
