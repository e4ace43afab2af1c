//! Startup seeding from the `spec` query-string parameter.

use vf_spec::{PlotSchema, PlotSpec};

/// Initial spec + schema pair for mounting a
/// [`FormController`](crate::FormController).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SeedState {
    pub spec: PlotSpec,
    pub schema: PlotSchema,
}

/// Seed from the raw (already percent-decoded) `spec` parameter.
///
/// A present, well-formed parameter seeds the spec directly, with the
/// empty-shaped schema as placeholder. Absent or malformed parameters fall
/// back to the default empty spec; the parse failure is logged, never
/// surfaced, and never blocks startup — the unconditional mount round trip
/// repairs state either way.
pub fn seed_from_param(param: Option<&str>) -> SeedState {
    let Some(raw) = param.filter(|p| !p.is_empty()) else {
        return SeedState::default();
    };
    match serde_json::from_str::<PlotSpec>(raw) {
        Ok(spec) => SeedState {
            spec,
            schema: PlotSchema::default(),
        },
        Err(err) => {
            tracing::warn!(error = %err, "malformed spec query parameter; starting from defaults");
            SeedState::default()
        }
    }
}
