//! Applying updaters to state snapshots.

use serde_json::{Map, Value};

use crate::updater::Updater;

/// Errors applying an updater. These indicate the updater does not match
/// the shape of the state it was aimed at, which is a contract violation
/// by the caller; they are propagated, never swallowed.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum PatchError {
    #[error("merge applied to non-mapping value ({found}) at '{path}'")]
    MergeIntoNonMapping { path: String, found: &'static str },

    #[error("cannot descend into {found} at '{path}'")]
    DescendIntoNonMapping { path: String, found: &'static str },
}

/// Apply `updater` to `state`, producing a new snapshot. Subtrees the
/// updater does not mention are carried over unchanged.
pub fn apply(state: &Value, updater: &Updater) -> Result<Value, PatchError> {
    apply_at(state, updater, "")
}

fn apply_at(state: &Value, updater: &Updater, path: &str) -> Result<Value, PatchError> {
    match updater {
        Updater::Set(value) => Ok(value.clone()),
        Updater::Merge(entries) => match state {
            Value::Object(existing) => {
                let mut merged = existing.clone();
                for (key, value) in entries {
                    merged.insert(key.clone(), value.clone());
                }
                Ok(Value::Object(merged))
            }
            other => Err(PatchError::MergeIntoNonMapping {
                path: path.to_owned(),
                found: json_kind(other),
            }),
        },
        Updater::Fields(fields) => {
            // Absent and null values are treated as empty mappings so a
            // partial path can reach into subtrees the spec has not
            // populated yet.
            let mut merged = match state {
                Value::Object(existing) => existing.clone(),
                Value::Null => Map::new(),
                other => {
                    return Err(PatchError::DescendIntoNonMapping {
                        path: path.to_owned(),
                        found: json_kind(other),
                    });
                }
            };
            for (key, sub) in fields {
                let child_path = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{path}.{key}")
                };
                let current = merged.get(key).cloned().unwrap_or(Value::Null);
                let next = apply_at(&current, sub, &child_path)?;
                merged.insert(key.clone(), next);
            }
            Ok(Value::Object(merged))
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn path(top: String, depth: usize) -> Vec<String> {
        std::iter::once(top)
            .chain((0..depth).map(|i| format!("k{i}")))
            .collect()
    }

    proptest! {
        // Top-level keys are drawn from disjoint alphabets, so the two
        // paths can never collide.
        #[test]
        fn disjoint_path_updaters_commute(
            top_a in "[a-m]{1,6}",
            top_b in "[n-z]{1,6}",
            depth_a in 0usize..3,
            depth_b in 0usize..3,
            value_a in any::<i64>(),
            value_b in any::<i64>(),
        ) {
            let u1 = Updater::at(path(top_a, depth_a), Updater::set(value_a));
            let u2 = Updater::at(path(top_b, depth_b), Updater::set(value_b));
            let base = json!({"dataset": "flights"});
            let one = apply(&apply(&base, &u1).unwrap(), &u2).unwrap();
            let two = apply(&apply(&base, &u2).unwrap(), &u1).unwrap();
            prop_assert_eq!(one, two);
        }
    }
}
