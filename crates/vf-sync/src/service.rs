//! Contract with the external Schema/Plot service.
//!
//! Only the request/response shapes matter here; the HTTP plumbing lives
//! in vf-client. Plot and head responses are opaque markup embedded by the
//! host, never parsed.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use vf_spec::{PlotSchema, PlotSpec};

/// One successful `/schema` exchange: a partial spec holding the fields
/// the server normalized or defaulted, plus the full replacement schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaResponse {
    #[serde(default)]
    pub current: Map<String, Value>,
    pub schema: PlotSchema,
}

/// Frame height assumed for embedded pages that do not pass one.
pub const DEFAULT_FRAME_HEIGHT: u32 = 1000;

/// Plot output dimensions, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotDims {
    pub height: u32,
    pub width: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline: Option<bool>,
}

impl PlotDims {
    /// Height left for the plot once the form has taken its share of the
    /// surrounding frame.
    pub fn from_frame(frame_height: Option<u32>, form_height: u32, form_width: u32) -> Self {
        let frame = frame_height.unwrap_or(DEFAULT_FRAME_HEIGHT);
        PlotDims {
            height: frame.saturating_sub(form_height),
            width: form_width,
            inline: None,
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum ServiceError {
    #[error("Transport failure: {0}")]
    Transport(String),

    #[error("Service returned status {code}")]
    Status { code: u16 },

    #[error("Malformed response body: {0}")]
    Parse(String),
}

/// Blocking client-side view of the Schema/Plot service.
pub trait SchemaService: Send + Sync {
    /// `GET /api/v1/schema?spec=<json>`
    fn fetch_schema(&self, spec: &PlotSpec) -> Result<SchemaResponse, ServiceError>;

    /// `GET /api/v1/plot?spec=<json>&height=..&width=..[&inline=..]`
    fn fetch_plot(&self, spec: &PlotSpec, dims: PlotDims) -> Result<String, ServiceError>;

    /// `GET /api/v1/head?dataset=<name>`
    fn fetch_head(&self, dataset: &str) -> Result<String, ServiceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_math_matches_the_embed_layout() {
        let dims = PlotDims::from_frame(Some(800), 250, 640);
        assert_eq!((dims.height, dims.width), (550, 640));

        let defaulted = PlotDims::from_frame(None, 250, 640);
        assert_eq!(defaulted.height, DEFAULT_FRAME_HEIGHT - 250);

        // a form taller than the frame clamps to zero rather than wrapping
        let clamped = PlotDims::from_frame(Some(200), 250, 640);
        assert_eq!(clamped.height, 0);
    }
}
