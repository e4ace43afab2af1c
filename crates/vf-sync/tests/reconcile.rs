use std::sync::Arc;

use serde_json::json;
use vf_spec::{AesKey, PlotSpec};
use vf_sync::{
    FormController, PlotDims, SchemaResponse, SchemaService, ServiceError, ServiceWorker,
    seed_from_param, updates,
};

/// Service double answering every schema request with one canned response.
struct CannedService {
    response: SchemaResponse,
}

impl CannedService {
    fn new(current: serde_json::Value, schema: serde_json::Value) -> Self {
        CannedService {
            response: serde_json::from_value(json!({"current": current, "schema": schema}))
                .unwrap(),
        }
    }
}

impl SchemaService for CannedService {
    fn fetch_schema(&self, _spec: &PlotSpec) -> Result<SchemaResponse, ServiceError> {
        Ok(self.response.clone())
    }

    fn fetch_plot(&self, _spec: &PlotSpec, _dims: PlotDims) -> Result<String, ServiceError> {
        Ok("<svg/>".to_owned())
    }

    fn fetch_head(&self, _dataset: &str) -> Result<String, ServiceError> {
        Ok("<tr><th>Month</th></tr>".to_owned())
    }
}

fn flights_schema() -> serde_json::Value {
    json!({
        "dataset": ["flights"],
        "geom": ["histogram", "stacked-bar", "point"],
        "aesthetics": {
            "x": {
                "col": {"name": ["Month", "DayOfWeek"]},
                "stat": {"name": ["bin"], "opts": "bin-opts"},
                "optional": false
            }
        },
        "where": {
            "a": {"expr1": ["Origin"], "pred": ["=", "in", "not-in"], "expr2": "text"}
        }
    })
}

#[test]
fn mount_from_query_string_reconciles_end_to_end() {
    // Seed the spec from a query-string snapshot, mount, and let the
    // unconditional first round trip merge the server's defaults.
    let seed = seed_from_param(Some(
        r#"{"dataset":"flights","geom":"","aesthetics":{},"where":null}"#,
    ));
    let (mut controller, mount_request) = FormController::mount(seed);
    assert_eq!(controller.spec().dataset, "flights");
    assert!(controller.schema().geom.is_empty());

    let service = Arc::new(CannedService::new(
        json!({"geom": "histogram"}),
        flights_schema(),
    ));
    let worker = ServiceWorker::new(service);
    worker.submit(mount_request);

    let completion = worker.recv().expect("worker hung up");
    let reconciled = controller
        .handle_response(completion.generation, completion.outcome)
        .expect("mount round trip should merge");

    assert_eq!(reconciled.dataset, "flights");
    assert_eq!(controller.spec().dataset, "flights");
    assert_eq!(controller.spec().geom, "histogram");
    assert_eq!(controller.spec().filters, None);
    assert!(controller.schema().aesthetics.contains_key(&AesKey::X));
    assert!(!controller.round_trip_pending());
}

#[test]
fn every_non_deferred_edit_round_trips_through_the_worker() {
    let (mut controller, mount_request) = FormController::mount(Default::default());
    let service = Arc::new(CannedService::new(json!({}), flights_schema()));
    let worker = ServiceWorker::new(Arc::clone(&service) as Arc<dyn SchemaService>);

    worker.submit(mount_request);
    let completion = worker.recv().unwrap();
    controller
        .handle_response(completion.generation, completion.outcome)
        .unwrap();

    let request = controller
        .handle_update(&updates::set_dataset("flights"))
        .unwrap()
        .expect("dataset edits round-trip");
    worker.submit(request);
    let completion = worker.recv().unwrap();
    controller
        .handle_response(completion.generation, completion.outcome)
        .unwrap();
    assert_eq!(controller.spec().dataset, "flights");

    // typing into a filter value stays local: nothing to submit, nothing
    // arrives
    let request = controller
        .handle_update(&updates::set_filter_value(
            vf_spec::SlotKey::A,
            vf_spec::FilterValue::Scalar("SFO".to_owned()),
        ))
        .unwrap();
    assert!(request.is_none());
    assert!(worker.drain().is_empty());
}
