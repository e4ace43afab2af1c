//! Updater constructors mirroring the edits the form UI emits.
//!
//! Each constructor builds exactly the path-addressed updater the matching
//! form control would hand to [`FormController::handle_update`]; keeping
//! them here keeps the shape of the spec tree out of view code.
//!
//! [`FormController::handle_update`]: crate::FormController::handle_update

use std::collections::BTreeMap;

use serde_json::{Map, Value, json};
use vf_patch::Updater;
use vf_spec::{AesKey, AesSchema, AestheticMapping, FilterClause, FilterValue, PlotSchema, SlotKey, StatOpts};

pub fn set_dataset(dataset: &str) -> Updater {
    Updater::field("dataset", Updater::set(dataset))
}

pub fn set_geom(geom: &str) -> Updater {
    Updater::field("geom", Updater::set(geom))
}

pub fn add_aesthetic(key: AesKey) -> Updater {
    Updater::at(["aesthetics", key.as_str()], Updater::set(json!({})))
}

/// Add an aesthetic pre-seeded with a per-dataset default column, when one
/// is known; otherwise the mapping starts empty and the next round trip
/// fills it in.
pub fn add_aesthetic_with_default(key: AesKey, dataset: &str) -> Updater {
    match default_column(dataset, key) {
        Some(column) => Updater::at(
            ["aesthetics", key.as_str()],
            Updater::set(json!({"col": {"name": column}})),
        ),
        None => add_aesthetic(key),
    }
}

pub fn remove_aesthetic(key: AesKey) -> Updater {
    Updater::at(["aesthetics", key.as_str()], Updater::clear())
}

pub fn set_column(key: AesKey, name: &str) -> Updater {
    Updater::at(
        ["aesthetics", key.as_str(), "col", "name"],
        Updater::set(name),
    )
}

pub fn set_stat(key: AesKey, name: &str) -> Updater {
    Updater::at(
        ["aesthetics", key.as_str(), "stat", "name"],
        Updater::set(name),
    )
}

pub fn set_stat_opts(key: AesKey, opts: &StatOpts) -> Updater {
    let value = match opts {
        StatOpts::Bin(bin) => json!({
            "lower": bin.lower,
            "upper": bin.upper,
            "nbins": bin.nbins,
        }),
    };
    Updater::at(["aesthetics", key.as_str(), "stat", "opts"], Updater::set(value))
}

pub fn clear_stat_opts(key: AesKey) -> Updater {
    Updater::at(["aesthetics", key.as_str(), "stat", "opts"], Updater::clear())
}

/// Updater clearing opts the schema no longer advertises for the chosen
/// stat, or `None` when the spec and schema agree.
pub fn stale_stat_opts(key: AesKey, mapping: &AestheticMapping, schema: &AesSchema) -> Option<Updater> {
    let spec_has_opts = mapping.stat.as_ref().is_some_and(|s| s.opts.is_some());
    let schema_has_opts = schema.stat.as_ref().is_some_and(|s| s.opts.is_some());
    (spec_has_opts && !schema_has_opts).then(|| clear_stat_opts(key))
}

/// First filter slot available for a new clause, in slot order. A slot
/// whose clause was cleared (`null`) still counts as used until the next
/// reconciliation drops it.
pub fn next_free_slot(
    filters: Option<&BTreeMap<SlotKey, Option<FilterClause>>>,
    schema: &PlotSchema,
) -> Option<SlotKey> {
    match filters {
        None => SlotKey::ALL.first().copied(),
        Some(used) => SlotKey::ALL
            .iter()
            .copied()
            .find(|slot| schema.filters.contains_key(slot) && !used.contains_key(slot)),
    }
}

/// Open a filter slot. When the filter UI is collapsed (`filters == null`)
/// the whole subtree must be set rather than merged, since merging into
/// `null` is a contract violation.
pub fn add_filter(filters_open: bool, slot: SlotKey) -> Updater {
    if filters_open {
        Updater::field(
            "where",
            Updater::merge([(slot.as_str().to_owned(), json!({}))]),
        )
    } else {
        let mut opened = Map::new();
        opened.insert(slot.as_str().to_owned(), json!({}));
        Updater::field("where", Updater::set(Value::Object(opened)))
    }
}

pub fn remove_filter(slot: SlotKey) -> Updater {
    Updater::at(["where", slot.as_str()], Updater::clear())
}

pub fn set_filter_column(slot: SlotKey, name: &str) -> Updater {
    Updater::at(["where", slot.as_str(), "expr1"], Updater::set(name))
}

pub fn set_filter_pred(slot: SlotKey, pred: &str) -> Updater {
    Updater::at(["where", slot.as_str(), "pred"], Updater::set(pred))
}

pub fn set_filter_value(slot: SlotKey, value: FilterValue) -> Updater {
    Updater::at(["where", slot.as_str(), "expr2"], Updater::set(Value::from(value)))
}

fn default_column(dataset: &str, key: AesKey) -> Option<&'static str> {
    match (dataset, key) {
        ("flights", AesKey::X) => Some("Month"),
        ("flights", AesKey::Y) => Some("Month"),
        ("flights", AesKey::Fill) => Some("DayOfMonth"),
        ("flights", AesKey::FacetX) => Some("DayOfWeek"),
        ("flights", AesKey::FacetY) => Some("UniqueCarrier"),
        _ => None,
    }
}
