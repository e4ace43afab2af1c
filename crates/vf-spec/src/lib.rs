//! vf-spec: canonical plot-request and schema models.

pub mod schema;
pub mod spec;
pub mod validate;

pub use schema::*;
pub use spec::*;
pub use validate::{ValidationError, drop_stale_aesthetics, validate_spec};
