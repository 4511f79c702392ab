//! Shared application state for axum handlers.

use std::sync::Arc;

use pont_app::ports::{ControlChannel, SnapshotStore};
use pont_app::reconciler::Reconciler;

/// Application state shared across all axum handlers.
///
/// Generic over the control channel and snapshot store to avoid dynamic
/// dispatch. `Clone` is implemented manually so the underlying types do not
/// need to be `Clone` — only the `Arc` wrapper is cloned.
pub struct AppState<C, S> {
    /// The reconciliation service driving every request.
    pub reconciler: Arc<Reconciler<C, S>>,
}

impl<C, S> Clone for AppState<C, S> {
    fn clone(&self) -> Self {
        Self {
            reconciler: Arc::clone(&self.reconciler),
        }
    }
}

impl<C, S> AppState<C, S>
where
    C: ControlChannel + 'static,
    S: SnapshotStore + 'static,
{
    /// Create the handler state from a wired reconciler.
    pub fn new(reconciler: Arc<Reconciler<C, S>>) -> Self {
        Self { reconciler }
    }
}
