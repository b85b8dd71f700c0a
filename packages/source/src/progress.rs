//! Progress reporting for record loading.
//!
//! [`ProgressCallback`] keeps the sources independent of any rendering
//! backend. The CLI plugs in an `indicatif` bar; tests and library callers
//! use [`NullProgress`].

use std::sync::Arc;

/// Receives progress updates while records are fetched and normalized.
///
/// Implementations must be `Send + Sync` so they can be shared as
/// `Arc<dyn ProgressCallback>` across tokio tasks.
pub trait ProgressCallback: Send + Sync {
    /// Set the total expected units of work.
    fn set_total(&self, total: u64);

    /// Advance progress by `delta` units.
    fn inc(&self, delta: u64);

    /// Update the message displayed alongside the progress indicator.
    fn set_message(&self, msg: String);

    /// Mark progress as complete with a final message.
    fn finish(&self, msg: String);
}

/// A [`ProgressCallback`] that ignores every update.
pub struct NullProgress;

impl ProgressCallback for NullProgress {
    fn set_total(&self, _total: u64) {}
    fn inc(&self, _delta: u64) {}
    fn set_message(&self, _msg: String) {}
    fn finish(&self, _msg: String) {}
}

/// Returns a shared [`NullProgress`].
#[must_use]
pub fn null_progress() -> Arc<dyn ProgressCallback> {
    Arc::new(NullProgress)
}
