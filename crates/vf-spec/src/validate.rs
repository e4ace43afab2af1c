//! Spec-vs-schema conformance checks.
//!
//! The service is the authority on what a spec may contain; these checks
//! let the client (and its tests) catch a non-conforming spec without a
//! round trip.

use crate::schema::PlotSchema;
use crate::spec::{AesKey, FilterValue, PlotSpec, SlotKey, is_membership};

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("Unknown dataset: {name}")]
    UnknownDataset { name: String },

    #[error("Unknown geometry: {name}")]
    UnknownGeom { name: String },

    #[error("Aesthetic '{key}' is not declared by the schema")]
    UnknownAesthetic { key: AesKey },

    #[error("Column '{name}' is not a valid choice for aesthetic '{key}'")]
    UnknownColumn { key: AesKey, name: String },

    #[error("Statistic '{name}' is not a valid choice for aesthetic '{key}'")]
    UnknownStat { key: AesKey, name: String },

    #[error("Aesthetic '{key}' carries stat opts the schema does not accept")]
    UnsupportedStatOpts { key: AesKey },

    #[error("Filter slot '{slot}' is not declared by the schema")]
    UnknownFilterSlot { slot: SlotKey },

    #[error("Column '{name}' is not a valid choice for filter slot '{slot}'")]
    UnknownFilterColumn { slot: SlotKey, name: String },

    #[error("Predicate '{pred}' is not a valid choice for filter slot '{slot}'")]
    UnknownPredicate { slot: SlotKey, pred: String },

    #[error("Filter slot '{slot}' with predicate '{pred}' carries the wrong value shape")]
    FilterValueShape { slot: SlotKey, pred: String },
}

/// Check `spec` against `schema`. Empty dataset/geom are uninitialized
/// rather than wrong and pass; explicitly cleared (`null`) entries are
/// awaiting the next reconciliation and pass too.
pub fn validate_spec(spec: &PlotSpec, schema: &PlotSchema) -> Result<(), ValidationError> {
    if !spec.dataset.is_empty() && !schema.dataset.contains(&spec.dataset) {
        return Err(ValidationError::UnknownDataset {
            name: spec.dataset.clone(),
        });
    }
    if !spec.geom.is_empty() && !schema.geom.contains(&spec.geom) {
        return Err(ValidationError::UnknownGeom {
            name: spec.geom.clone(),
        });
    }

    for (key, mapping) in &spec.aesthetics {
        let Some(mapping) = mapping else { continue };
        let Some(aes_schema) = schema.aesthetics.get(key) else {
            return Err(ValidationError::UnknownAesthetic { key: *key });
        };
        if let Some(col) = &mapping.col {
            if !aes_schema.col.name.contains(&col.name) {
                return Err(ValidationError::UnknownColumn {
                    key: *key,
                    name: col.name.clone(),
                });
            }
        }
        if let Some(stat) = &mapping.stat {
            let Some(stat_schema) = &aes_schema.stat else {
                return Err(ValidationError::UnknownStat {
                    key: *key,
                    name: stat.name.clone(),
                });
            };
            if !stat_schema.name.contains(&stat.name) {
                return Err(ValidationError::UnknownStat {
                    key: *key,
                    name: stat.name.clone(),
                });
            }
            if stat.opts.is_some() && stat_schema.opts.is_none() {
                return Err(ValidationError::UnsupportedStatOpts { key: *key });
            }
        }
    }

    if let Some(filters) = &spec.filters {
        for (slot, clause) in filters {
            let Some(clause) = clause else { continue };
            let Some(filter_schema) = schema.filters.get(slot) else {
                return Err(ValidationError::UnknownFilterSlot { slot: *slot });
            };
            if let Some(expr1) = &clause.expr1 {
                if !filter_schema.expr1.contains(expr1) {
                    return Err(ValidationError::UnknownFilterColumn {
                        slot: *slot,
                        name: expr1.clone(),
                    });
                }
            }
            if let Some(pred) = &clause.pred {
                if !filter_schema.pred.contains(pred) {
                    return Err(ValidationError::UnknownPredicate {
                        slot: *slot,
                        pred: pred.clone(),
                    });
                }
                if let Some(value) = &clause.expr2 {
                    let wants_list = is_membership(pred);
                    let is_list = matches!(value, FilterValue::List(_));
                    if wants_list != is_list {
                        return Err(ValidationError::FilterValueShape {
                            slot: *slot,
                            pred: pred.clone(),
                        });
                    }
                }
            }
        }
    }

    Ok(())
}

/// Drop aesthetics the schema no longer declares: the local half of the
/// "stale keys are dropped on the next reconciliation" invariant.
pub fn drop_stale_aesthetics(spec: &PlotSpec, schema: &PlotSchema) -> PlotSpec {
    let mut next = spec.clone();
    next.aesthetics
        .retain(|key, _| schema.aesthetics.contains_key(key));
    next
}
