//! vf-client: HTTP transport for the Schema/Plot service.

pub mod http;
pub mod query;

pub use http::HttpService;
pub use query::{dims_from_url, spec_param};
