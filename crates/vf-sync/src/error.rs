//! Error types for the sync layer.

use vf_patch::PatchError;

/// Errors from applying an updater to the form state. Both variants are
/// contract violations by the caller (the updater does not fit the spec's
/// shape) and are propagated, never swallowed.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("Patch error: {0}")]
    Patch(#[from] PatchError),

    #[error("Updater produced a malformed spec: {0}")]
    SpecShape(#[source] serde_json::Error),

    #[error("Spec serialization failed: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;
