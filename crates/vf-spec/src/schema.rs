//! Schema model: server-declared constraints on what the spec may contain.
//!
//! Mirrors the spec's shape key for key. The schema is replaced wholesale
//! on every successful round trip; the client never edits it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::spec::{AesKey, SlotKey};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotSchema {
    pub dataset: Vec<String>,
    pub geom: Vec<String>,
    pub aesthetics: BTreeMap<AesKey, AesSchema>,
    #[serde(rename = "where")]
    pub filters: BTreeMap<SlotKey, FilterSchema>,
}

/// Valid choices for one aesthetic. `optional == false` means the UI must
/// always render an input for this key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AesSchema {
    pub col: ColumnChoices,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stat: Option<StatSchema>,
    #[serde(default)]
    pub optional: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnChoices {
    pub name: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatSchema {
    pub name: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opts: Option<StatOptsKind>,
}

/// Tag naming which opts shape the chosen stat accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatOptsKind {
    #[serde(rename = "bin-opts")]
    BinOpts,
}

/// Valid choices for one filter slot. `expr2` is the server's input type
/// tag for the comparison value ("boolean", "number", "text", ...); the
/// tag set is open, so it stays a plain string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSchema {
    pub expr1: Vec<String>,
    pub pred: Vec<String>,
    pub expr2: String,
}

impl FilterSchema {
    pub fn expr2_is_boolean(&self) -> bool {
        self.expr2 == "boolean"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn schema_parses_the_wire_shape() {
        let schema: PlotSchema = serde_json::from_value(json!({
            "dataset": ["flights"],
            "geom": ["histogram", "point"],
            "aesthetics": {
                "x": {
                    "col": {"name": ["Month", "DayOfWeek"]},
                    "stat": {"name": ["bin", "identity"], "opts": "bin-opts"},
                    "optional": false
                },
                "fill": {
                    "col": {"name": ["Month"]},
                    "optional": true
                }
            },
            "where": {
                "a": {"expr1": ["Origin"], "pred": ["=", "in", "not-in"], "expr2": "text"},
                "b": {"expr1": ["Cancelled"], "pred": ["="], "expr2": "boolean"}
            }
        }))
        .unwrap();

        let x = &schema.aesthetics[&AesKey::X];
        assert!(!x.optional);
        assert_eq!(
            x.stat.as_ref().unwrap().opts,
            Some(StatOptsKind::BinOpts)
        );
        assert!(schema.aesthetics[&AesKey::Fill].optional);
        assert!(schema.filters[&SlotKey::B].expr2_is_boolean());
        assert!(!schema.filters[&SlotKey::A].expr2_is_boolean());
    }

    #[test]
    fn empty_schema_is_the_mount_placeholder() {
        let schema = PlotSchema::default();
        let value = serde_json::to_value(&schema).unwrap();
        assert_eq!(
            value,
            json!({"dataset": [], "geom": [], "aesthetics": {}, "where": {}})
        );
    }
}
