//! In-process state broadcast backed by a tokio broadcast channel.
//!
//! Subscribers are the WebSocket connections; the periodic reconcile loop
//! publishes here so passive viewers see timer-driven updates too.

use tokio::sync::broadcast;

use pont_domain::state::DeviceState;

/// Broadcast bus for device-state updates.
///
/// Publishing succeeds even when there are no active subscribers (the
/// update is simply dropped).
#[derive(Debug, Clone)]
pub struct StateBroadcast {
    sender: broadcast::Sender<DeviceState>,
}

impl StateBroadcast {
    /// Create a new bus with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to updates published *after* this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<DeviceState> {
        self.sender.subscribe()
    }

    /// Publish a state update to all current subscribers.
    pub fn publish(&self, state: DeviceState) {
        // send fails only when there are zero receivers, which is fine.
        let _ = self.sender.send(state);
    }
}
