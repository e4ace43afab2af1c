//! vf-sync: client-side state synchronization for the plot form.
//!
//! Owns the reconciliation protocol between the locally edited spec, the
//! server-validated schema, and the per-slot filter text drafts:
//! - [`FormController`] decides which edits stay local and which trigger a
//!   schema round trip, and merges responses in arrival order.
//! - [`FilterDraft`] keeps filter expression text stable under round trips
//!   that echo back a normalized value.
//! - [`init`] seeds the spec from the `spec` query-string parameter.
//! - [`SchemaService`] is the whole contract with the external service;
//!   [`ServiceWorker`] drives it on background threads.

pub mod controller;
pub mod draft;
pub mod error;
pub mod init;
pub mod service;
pub mod updates;
pub mod worker;

pub use controller::{FormController, Reconciled, SchemaRequest, is_deferred_only};
pub use draft::{FilterDraft, to_filter_value};
pub use error::{SyncError, SyncResult};
pub use init::{SeedState, seed_from_param};
pub use service::{PlotDims, SchemaResponse, SchemaService, ServiceError};
pub use worker::{Completion, ServiceWorker};
