//! Blocking HTTP implementation of the Schema/Plot service contract.

use reqwest::blocking::{Client, Response};
use vf_spec::PlotSpec;
use vf_sync::{PlotDims, SchemaResponse, SchemaService, ServiceError};

pub struct HttpService {
    base: String,
    client: Client,
}

impl HttpService {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into().trim_end_matches('/').to_owned();
        HttpService {
            base,
            client: Client::new(),
        }
    }

    fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Response, ServiceError> {
        let url = format!("{}{}", self.base, path);
        tracing::debug!(%url, "GET");
        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .map_err(transport)?;
        if !response.status().is_success() {
            return Err(ServiceError::Status {
                code: response.status().as_u16(),
            });
        }
        Ok(response)
    }
}

impl SchemaService for HttpService {
    fn fetch_schema(&self, spec: &PlotSpec) -> Result<SchemaResponse, ServiceError> {
        let response = self.get("/api/v1/schema", &[("spec", spec_json(spec)?)])?;
        response
            .json()
            .map_err(|err| ServiceError::Parse(err.to_string()))
    }

    fn fetch_plot(&self, spec: &PlotSpec, dims: PlotDims) -> Result<String, ServiceError> {
        let mut query = vec![
            ("spec", spec_json(spec)?),
            ("height", dims.height.to_string()),
            ("width", dims.width.to_string()),
        ];
        if let Some(inline) = dims.inline {
            query.push(("inline", inline.to_string()));
        }
        let response = self.get("/api/v1/plot", &query)?;
        response.text().map_err(transport)
    }

    fn fetch_head(&self, dataset: &str) -> Result<String, ServiceError> {
        let response = self.get("/api/v1/head", &[("dataset", dataset.to_owned())])?;
        response.text().map_err(transport)
    }
}

fn transport(err: reqwest::Error) -> ServiceError {
    ServiceError::Transport(err.to_string())
}

fn spec_json(spec: &PlotSpec) -> Result<String, ServiceError> {
    serde_json::to_string(spec).map_err(|err| ServiceError::Parse(err.to_string()))
}
