//! vf-patch: path-addressed partial updates over JSON-shaped state.
//!
//! An [`Updater`] describes only the subtree it changes; everything it does
//! not mention is carried over from the previous snapshot. Applying an
//! updater never mutates in place: it always produces a new root value.

pub mod apply;
pub mod updater;

pub use apply::{PatchError, apply};
pub use updater::Updater;
