//! Error taxonomy shared across the workspace.
//!
//! No error in this system is fatal to the process: a missing snapshot
//! skips the merge, a refused or hung control peer leaves the in-memory
//! decision standing, a failed persist keeps the in-memory state
//! authoritative until the next successful write. Each layer defines its
//! typed errors here and callers decide how to degrade. There is no
//! umbrella enum: no caller ever handles more than one of these at a
//! time, so each port surfaces its own type.

/// Failure reading the externally-written sensor snapshot.
#[derive(Debug, thiserror::Error)]
pub enum IngestionError {
    /// The snapshot exists but could not be read.
    #[error("snapshot unreadable")]
    Unavailable(#[source] std::io::Error),

    /// The snapshot content is not valid JSON for the expected layout.
    #[error("snapshot malformed")]
    Malformed(#[source] serde_json::Error),
}

/// Failure on the prompt-delimited control channel.
///
/// Every call is one best-effort attempt; none of these are retried.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    /// The peer is not listening.
    #[error("control peer refused connection")]
    Refused(#[source] std::io::Error),

    /// The prompt sentinel was not observed within the configured timeout.
    #[error("timed out waiting for control prompt")]
    Timeout,

    /// The connection failed mid-transfer.
    #[error("control channel I/O error")]
    Io(#[from] std::io::Error),
}

/// Failure writing the snapshot back to disk.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    /// Snapshot could not be serialized.
    #[error("failed to encode snapshot")]
    Encode(#[source] serde_json::Error),

    /// Snapshot could not be written or moved into place.
    #[error("failed to write snapshot")]
    Write(#[source] std::io::Error),
}
