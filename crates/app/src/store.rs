//! State store — the single locked context holding device state and
//! thresholds.
//!
//! All mutation happens through the one [`tokio::sync::Mutex`] in here; a
//! full reconciliation cycle holds the guard for its in-memory portion so no
//! two cycles can interleave their merges.

use tokio::sync::{Mutex, MutexGuard};

use pont_domain::snapshot::Snapshot;
use pont_domain::state::DeviceState;
use pont_domain::thresholds::ThresholdConfig;

/// The shared mutable state guarded by the store's lock.
#[derive(Debug, Default)]
pub struct SharedState {
    /// Authoritative device state.
    pub device: DeviceState,
    /// Current threshold configuration.
    pub thresholds: ThresholdConfig,
}

impl SharedState {
    /// Serialize the current state and thresholds for persistence.
    #[must_use]
    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.device, &self.thresholds)
    }
}

/// Owner of the [`SharedState`] and its mutual-exclusion lock.
#[derive(Debug, Default)]
pub struct StateStore {
    inner: Mutex<SharedState>,
}

impl StateStore {
    /// Acquire the lock for a multi-step critical section.
    pub async fn lock(&self) -> MutexGuard<'_, SharedState> {
        self.inner.lock().await
    }

    /// Consistent point-in-time copy of the device state.
    pub async fn read(&self) -> DeviceState {
        self.inner.lock().await.device.clone()
    }
}
