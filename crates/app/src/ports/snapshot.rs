//! Snapshot store port — load and persist the shared flat snapshot.

use std::future::Future;

use pont_domain::error::{IngestionError, PersistError};
use pont_domain::snapshot::Snapshot;

/// Access to the snapshot document co-owned with the sensor ingestion side.
pub trait SnapshotStore: Send + Sync {
    /// Load the latest snapshot.
    ///
    /// Returns `Ok(None)` when no snapshot has been written yet (normal at
    /// boot). `Err` covers unreadable and malformed content; callers skip
    /// the merge for that cycle and carry on.
    fn load(&self) -> impl Future<Output = Result<Option<Snapshot>, IngestionError>> + Send;

    /// Persist a snapshot atomically with respect to concurrent readers.
    fn persist(
        &self,
        snapshot: &Snapshot,
    ) -> impl Future<Output = Result<(), PersistError>> + Send;
}
