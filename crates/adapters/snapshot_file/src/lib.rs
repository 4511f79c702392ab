//! # pont-adapter-snapshot-file
//!
//! File-backed [`SnapshotStore`]: the JSON state file is co-owned with the
//! external sensor ingestion process, which rewrites it at its own pace.
//! Reads tolerate a missing or garbled file (the ingestion side may be
//! mid-write); writes go through a sibling temp file and a rename so a
//! concurrent reader never observes a partial document.
//!
//! ## Dependency rule
//! Depends on `pont-app` (port traits) and `pont-domain` only.

use std::path::{Path, PathBuf};

use pont_app::ports::SnapshotStore;
use pont_domain::error::{IngestionError, PersistError};
use pont_domain::snapshot::Snapshot;

/// Snapshot store backed by a single flat JSON file.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    /// Create a store for the given snapshot path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path of the snapshot file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map_or_else(
            || std::ffi::OsString::from("snapshot"),
            std::ffi::OsStr::to_os_string,
        );
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SnapshotStore for FileSnapshotStore {
    async fn load(&self) -> Result<Option<Snapshot>, IngestionError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(IngestionError::Unavailable(err)),
        };
        let snapshot = serde_json::from_slice(&bytes).map_err(IngestionError::Malformed)?;
        Ok(Some(snapshot))
    }

    async fn persist(&self, snapshot: &Snapshot) -> Result<(), PersistError> {
        let bytes = serde_json::to_vec_pretty(snapshot).map_err(PersistError::Encode)?;
        let temp = self.temp_path();
        tokio::fs::write(&temp, &bytes)
            .await
            .map_err(PersistError::Write)?;
        tokio::fs::rename(&temp, &self.path)
            .await
            .map_err(PersistError::Write)?;
        tracing::debug!(path = %self.path.display(), bytes = bytes.len(), "snapshot persisted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pont_domain::state::DeviceState;
    use pont_domain::thresholds::ThresholdConfig;

    fn store_in(dir: &tempfile::TempDir) -> FileSnapshotStore {
        FileSnapshotStore::new(dir.path().join("state.json"))
    }

    #[tokio::test]
    async fn should_return_none_when_file_does_not_exist() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn should_load_sensor_snapshot_written_by_ingestion_side() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        tokio::fs::write(store.path(), r#"{"temperature": "27.5", "humidity": 44}"#)
            .await
            .unwrap();

        let snapshot = store.load().await.unwrap().unwrap();

        assert_eq!(snapshot.temperature, Some(27.5));
        assert_eq!(snapshot.humidity, Some(44.0));
    }

    #[tokio::test]
    async fn should_report_malformed_for_garbled_content() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        tokio::fs::write(store.path(), r#"{"temperature": 2"#)
            .await
            .unwrap();

        let result = store.load().await;

        assert!(matches!(result, Err(IngestionError::Malformed(_))));
    }

    #[tokio::test]
    async fn should_round_trip_a_persisted_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let device = DeviceState {
            temperature: Some(32.0),
            ..DeviceState::default()
        };
        let snapshot = Snapshot::capture(&device, &ThresholdConfig::default());

        store.persist(&snapshot).await.unwrap();
        let loaded = store.load().await.unwrap().unwrap();

        assert_eq!(loaded.temperature, Some(32.0));
        assert_eq!(loaded.thresholds, Some(ThresholdConfig::default()));
    }

    #[tokio::test]
    async fn should_leave_no_temp_file_behind_after_persist() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.persist(&Snapshot::default()).await.unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("state.json")]);
    }

    #[tokio::test]
    async fn should_overwrite_previous_snapshot_wholesale() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        tokio::fs::write(store.path(), r#"{"temperature": 20.0}"#)
            .await
            .unwrap();

        let device = DeviceState::default();
        store
            .persist(&Snapshot::capture(&device, &ThresholdConfig::default()))
            .await
            .unwrap();
        let loaded = store.load().await.unwrap().unwrap();

        // the merge discipline lives in the reconciler, not here
        assert_eq!(loaded.temperature, None);
    }
}
