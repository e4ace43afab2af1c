//! Plot request model: the client's canonical in-memory spec.
//!
//! Wire field names follow the service contract (`geom`, `where`); the
//! `spec` query parameter at startup and the `spec` parameter of every
//! service request carry this exact JSON shape.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Visual channels a column can be mapped to. Closed set; doubles as the
/// JSON object key inside `aesthetics`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AesKey {
    X,
    Y,
    Fill,
    Color,
    FacetX,
    FacetY,
}

impl AesKey {
    pub const ALL: [AesKey; 6] = [
        AesKey::X,
        AesKey::Y,
        AesKey::Fill,
        AesKey::Color,
        AesKey::FacetX,
        AesKey::FacetY,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AesKey::X => "x",
            AesKey::Y => "y",
            AesKey::Fill => "fill",
            AesKey::Color => "color",
            AesKey::FacetX => "facet_x",
            AesKey::FacetY => "facet_y",
        }
    }
}

impl fmt::Display for AesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filter slot identifier. Eight fixed slots, ordered `a` through `h`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotKey {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}

impl SlotKey {
    pub const ALL: [SlotKey; 8] = [
        SlotKey::A,
        SlotKey::B,
        SlotKey::C,
        SlotKey::D,
        SlotKey::E,
        SlotKey::F,
        SlotKey::G,
        SlotKey::H,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SlotKey::A => "a",
            SlotKey::B => "b",
            SlotKey::C => "c",
            SlotKey::D => "d",
            SlotKey::E => "e",
            SlotKey::F => "f",
            SlotKey::G => "g",
            SlotKey::H => "h",
        }
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The user's current plot request.
///
/// `filters == None` (`"where": null` on the wire) means the filter UI is
/// collapsed; `Some` with an empty map means it is open with zero clauses.
/// A map value of `None` is an explicitly cleared entry awaiting the next
/// reconciliation, distinct from the key being absent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotSpec {
    pub dataset: String,
    pub geom: String,
    pub aesthetics: BTreeMap<AesKey, Option<AestheticMapping>>,
    #[serde(rename = "where")]
    pub filters: Option<BTreeMap<SlotKey, Option<FilterClause>>>,
}

/// One aesthetic: a column and an optional statistic applied to it.
///
/// `col` is optional because a freshly added aesthetic starts as `{}` and
/// is filled in either by a dataset default or by the next reconciliation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AestheticMapping {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub col: Option<ColumnRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stat: Option<Stat>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnRef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factor: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stat {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opts: Option<StatOpts>,
}

/// Statistic options. A tagged union so new opt shapes slot in without
/// loosening the wire format; `Bin` serializes as its bare fields, which
/// the schema identifies by the `"bin-opts"` tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatOpts {
    Bin(BinOpts),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinOpts {
    pub lower: f64,
    pub upper: f64,
    pub nbins: u32,
}

/// One filter clause: column, comparison operator, comparison value. All
/// parts are optional while the user is still assembling the clause.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterClause {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expr1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pred: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expr2: Option<FilterValue>,
}

/// Committed filter comparison value: a scalar, or a list when the
/// predicate is a membership operator. Boolean columns use the literal
/// scalars `"True"` / `"False"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Scalar(String),
    List(Vec<String>),
}

impl FilterValue {
    /// Display form shown in the filter input: lists joined with commas.
    pub fn display(&self) -> String {
        match self {
            FilterValue::Scalar(s) => s.clone(),
            FilterValue::List(items) => items.join(","),
        }
    }
}

impl From<FilterValue> for Value {
    fn from(value: FilterValue) -> Self {
        match value {
            FilterValue::Scalar(s) => Value::String(s),
            FilterValue::List(items) => Value::Array(items.into_iter().map(Value::String).collect()),
        }
    }
}

/// Membership predicates take list-shaped comparison values.
pub fn is_membership(pred: &str) -> bool {
    matches!(pred, "in" | "not-in")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_spec_matches_the_empty_wire_shape() {
        let spec = PlotSpec::default();
        let value = serde_json::to_value(&spec).unwrap();
        assert_eq!(
            value,
            json!({"dataset": "", "geom": "", "aesthetics": {}, "where": null})
        );
    }

    #[test]
    fn collapsed_filters_differ_from_zero_clauses() {
        let collapsed: PlotSpec = serde_json::from_value(json!({"where": null})).unwrap();
        let open: PlotSpec = serde_json::from_value(json!({"where": {}})).unwrap();
        assert_eq!(collapsed.filters, None);
        assert_eq!(open.filters, Some(BTreeMap::new()));
    }

    #[test]
    fn filter_value_is_untagged() {
        let scalar: FilterValue = serde_json::from_value(json!("True")).unwrap();
        let list: FilterValue = serde_json::from_value(json!(["SFO", "LAX"])).unwrap();
        assert_eq!(scalar, FilterValue::Scalar("True".to_owned()));
        assert_eq!(
            list,
            FilterValue::List(vec!["SFO".to_owned(), "LAX".to_owned()])
        );
        assert_eq!(list.display(), "SFO,LAX");
    }

    #[test]
    fn aesthetic_keys_round_trip_as_map_keys() {
        let spec: PlotSpec = serde_json::from_value(json!({
            "dataset": "flights",
            "geom": "bin2d",
            "aesthetics": {
                "facet_x": {"col": {"name": "DayOfWeek", "factor": true}},
                "x": null
            },
            "where": null
        }))
        .unwrap();
        assert!(spec.aesthetics.contains_key(&AesKey::FacetX));
        assert_eq!(spec.aesthetics[&AesKey::X], None);
        let back = serde_json::to_value(&spec).unwrap();
        assert_eq!(back["aesthetics"]["facet_x"]["col"]["factor"], json!(true));
        assert_eq!(back["aesthetics"]["x"], json!(null));
    }

    #[test]
    fn bin_opts_round_trip_bare() {
        let stat: Stat = serde_json::from_value(json!({
            "name": "bin",
            "opts": {"lower": 0.0, "upper": 31.0, "nbins": 31}
        }))
        .unwrap();
        assert_eq!(
            stat.opts,
            Some(StatOpts::Bin(BinOpts {
                lower: 0.0,
                upper: 31.0,
                nbins: 31
            }))
        );
        let back = serde_json::to_value(&stat).unwrap();
        assert_eq!(back["opts"], json!({"lower": 0.0, "upper": 31.0, "nbins": 31}));
    }
}
