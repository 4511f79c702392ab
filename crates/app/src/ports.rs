//! Port traits — the IO boundaries of the application layer.

mod control;
mod snapshot;

pub use control::ControlChannel;
pub use snapshot::SnapshotStore;
