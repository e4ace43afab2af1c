//! Unidirectional state container for the plot form.
//!
//! The controller owns the current spec and schema and never touches the
//! network itself: [`FormController::handle_update`] decides whether an
//! edit needs a round trip and hands back the request to issue, and the
//! host feeds completions into [`FormController::handle_response`] in the
//! order they arrive. Failures keep the optimistic local spec committed;
//! the operation is idempotent and the user's next edit re-triggers it,
//! so nothing retries here.

use serde_json::{Map, Value};
use vf_patch::{Updater, apply};
use vf_spec::{PlotSchema, PlotSpec};

use crate::error::{SyncError, SyncResult};
use crate::init::SeedState;
use crate::service::{SchemaResponse, ServiceError};

/// Snapshot handed to the transport for one `/schema` round trip.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaRequest {
    pub generation: u64,
    pub spec: PlotSpec,
}

/// Emitted after a successful reconciliation so collaborating panels (the
/// dataset summary) can react to the possibly changed dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciled {
    pub dataset: String,
}

pub struct FormController {
    spec: PlotSpec,
    schema: PlotSchema,
    last_generation: u64,
    merged_generation: Option<u64>,
    in_flight: usize,
    reject_stale: bool,
}

impl FormController {
    /// Build the controller from seeded state. Mounting always issues one
    /// round trip, whether or not the seed came from a query string.
    pub fn mount(seed: SeedState) -> (Self, SchemaRequest) {
        let mut controller = FormController {
            spec: seed.spec,
            schema: seed.schema,
            last_generation: 0,
            merged_generation: None,
            in_flight: 0,
            reject_stale: false,
        };
        let request = controller.issue();
        (controller, request)
    }

    /// Drop responses older than the newest one already merged instead of
    /// letting them overwrite fresher state. Off by default: the stock
    /// behavior is last-arrived-wins.
    pub fn reject_stale(&mut self, on: bool) {
        self.reject_stale = on;
    }

    pub fn spec(&self) -> &PlotSpec {
        &self.spec
    }

    pub fn schema(&self) -> &PlotSchema {
        &self.schema
    }

    pub fn round_trip_pending(&self) -> bool {
        self.in_flight > 0
    }

    /// Apply one updater. Deferred-only edits (filter expression typing)
    /// commit locally and return `None`; anything else commits locally
    /// (optimistically) and returns the round-trip request to issue, built
    /// from the already-updated spec.
    pub fn handle_update(&mut self, updater: &Updater) -> SyncResult<Option<SchemaRequest>> {
        let current = serde_json::to_value(&self.spec).map_err(SyncError::Serialize)?;
        let patched = apply(&current, updater)?;
        self.spec = serde_json::from_value(patched).map_err(SyncError::SpecShape)?;

        if is_deferred_only(updater) {
            return Ok(None);
        }
        Ok(Some(self.issue()))
    }

    /// Feed back one round-trip completion.
    ///
    /// Completions must arrive in network arrival order, which is NOT
    /// guaranteed to match issuance order: by default a stale, slow
    /// response overwrites fresher state (last-arrived-wins).
    pub fn handle_response(
        &mut self,
        generation: u64,
        outcome: Result<SchemaResponse, ServiceError>,
    ) -> Option<Reconciled> {
        self.in_flight = self.in_flight.saturating_sub(1);

        let response = match outcome {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(generation, error = %err, "schema round trip failed; keeping optimistic spec");
                return None;
            }
        };

        if self.reject_stale && self.merged_generation.is_some_and(|newest| generation < newest) {
            tracing::debug!(generation, "dropping stale schema response");
            return None;
        }

        match merge_current(&self.spec, &response.current) {
            Ok(spec) => {
                self.spec = spec;
                self.schema = response.schema;
                self.merged_generation = Some(generation);
                Some(Reconciled {
                    dataset: self.spec.dataset.clone(),
                })
            }
            Err(err) => {
                tracing::warn!(generation, error = %err, "discarding malformed schema response");
                None
            }
        }
    }

    fn issue(&mut self) -> SchemaRequest {
        self.last_generation += 1;
        self.in_flight += 1;
        SchemaRequest {
            generation: self.last_generation,
            spec: self.spec.clone(),
        }
    }
}

/// Shallow top-level merge of the server's partial `current` into the
/// local spec: response fields win, fields it does not mention survive.
fn merge_current(
    spec: &PlotSpec,
    current: &Map<String, Value>,
) -> Result<PlotSpec, serde_json::Error> {
    let mut merged = match serde_json::to_value(spec)? {
        Value::Object(fields) => fields,
        // unreachable: PlotSpec serializes to an object
        _ => Map::new(),
    };
    for (key, value) in current {
        merged.insert(key.clone(), value.clone());
    }
    serde_json::from_value(Value::Object(merged))
}

/// True iff the updater touches only `where.<slot>.expr2` paths: pure
/// typing edits that the schema round trip must not chase.
pub fn is_deferred_only(updater: &Updater) -> bool {
    let Updater::Fields(top) = updater else {
        return false;
    };
    if top.len() != 1 {
        return false;
    }
    let Some(filters) = top.get("where") else {
        return false;
    };
    let Updater::Fields(slots) = filters else {
        return false;
    };
    !slots.is_empty()
        && slots.values().all(|slot| match slot {
            Updater::Fields(fields) => fields.len() == 1 && fields.contains_key("expr2"),
            _ => false,
        })
}
