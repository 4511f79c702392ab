//! Reconciler — the read-merge-decide-command-persist cycle.
//!
//! One cycle runs on every `get_state` request and, optionally, on a
//! periodic tick. The in-memory portion (merge, decision, persist) holds the
//! store lock for its whole duration so two cycles can never interleave
//! their merges; control-channel calls happen after the lock is released,
//! with the commands captured beforehand, so a hung peer cannot block the
//! lock. A failed channel call is dropped for that cycle — the in-memory
//! decision stands either way.

use std::sync::Arc;

use tokio::sync::broadcast;

use pont_domain::command::gpio_command;
use pont_domain::engine;
use pont_domain::snapshot::Snapshot;
use pont_domain::state::DeviceState;
use pont_domain::thresholds::{ThresholdConfig, ThresholdUpdate};

use crate::event_bus::StateBroadcast;
use crate::ports::{ControlChannel, SnapshotStore};
use crate::store::{SharedState, StateStore};

/// Orchestrates the store, the threshold engine, the snapshot store and the
/// control channel.
pub struct Reconciler<C, S> {
    store: Arc<StateStore>,
    channel: Arc<C>,
    snapshots: S,
    bus: StateBroadcast,
}

impl<C, S> Reconciler<C, S>
where
    C: ControlChannel,
    S: SnapshotStore,
{
    /// Wire a reconciler from its collaborators.
    pub fn new(store: Arc<StateStore>, channel: Arc<C>, snapshots: S, bus: StateBroadcast) -> Self {
        Self {
            store,
            channel,
            snapshots,
            bus,
        }
    }

    /// Subscribe to state updates published by the broadcast cycle.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<DeviceState> {
        self.bus.subscribe()
    }

    /// Adopt previously-persisted state at startup, if a snapshot exists.
    ///
    /// Thresholds and actuator state survive a restart this way; a missing
    /// or unreadable snapshot leaves the defaults in place.
    pub async fn seed(&self) {
        let mut guard = self.store.lock().await;
        match self.snapshots.load().await {
            Ok(Some(snapshot)) => {
                Self::absorb(&mut guard, &snapshot);
                tracing::info!("seeded state from persisted snapshot");
            }
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(error = %err, "could not seed from persisted snapshot");
            }
        }
    }

    /// Run one full reconciliation cycle and return the resulting state.
    ///
    /// Never fails: ingestion problems skip the merge, channel problems are
    /// logged and the in-memory decision stands, persist problems leave the
    /// in-memory state authoritative until the next successful write.
    pub async fn reconcile(&self) -> DeviceState {
        let mut guard = self.store.lock().await;

        match self.snapshots.load().await {
            Ok(Some(snapshot)) => Self::absorb(&mut guard, &snapshot),
            Ok(None) => tracing::debug!("no snapshot written yet, skipping merge"),
            Err(err) => {
                tracing::warn!(error = %err, "sensor snapshot unreadable, skipping merge");
            }
        }

        let mut commands = Vec::new();
        if let Some(decision) = engine::decide(guard.device.temperature, &guard.thresholds) {
            // One command per actuator whose on/off direction changes.
            if decision.led_on != guard.device.led.value {
                commands.push(gpio_command(&guard.device.led.id, decision.led_on));
            }
            let fan_on = decision.fan_speed > 0;
            if fan_on != guard.device.fan.is_running() {
                commands.push(gpio_command(&guard.device.fan.id, fan_on));
            }
            guard.device.led.value = decision.led_on;
            guard.device.fan.speed = decision.fan_speed;
        }
        guard.device.refresh_fan_status();

        let snapshot = guard.to_snapshot();
        if let Err(err) = self.snapshots.persist(&snapshot).await {
            tracing::warn!(error = %err, "failed to persist snapshot");
        }
        let device = guard.device.clone();
        drop(guard);

        for command in &commands {
            if let Err(err) = self.channel.send(command).await {
                tracing::warn!(error = %err, command = %command, "control command not delivered");
            }
        }

        device
    }

    /// Run one cycle and push the result to all broadcast subscribers.
    ///
    /// Used by the periodic tick; request-driven cycles reply to the
    /// triggering connection directly instead.
    pub async fn reconcile_and_broadcast(&self) -> DeviceState {
        let device = self.reconcile().await;
        self.bus.publish(device.clone());
        device
    }

    /// Merge the latest sensor values without actuating or persisting.
    ///
    /// Backs the dashboard page render: the view should be fresh, but a
    /// plain page load must not issue device commands.
    pub async fn refresh(&self) -> DeviceState {
        let mut guard = self.store.lock().await;
        match self.snapshots.load().await {
            Ok(Some(snapshot)) => guard.device.merge(&snapshot),
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(error = %err, "sensor snapshot unreadable, rendering held state");
            }
        }
        guard.device.clone()
    }

    /// Apply a partial threshold update and persist the result.
    ///
    /// The latest sensor snapshot is merged first so the write-back does not
    /// clobber values the ingestion side just wrote. Thresholds present in
    /// the file are ignored here — the update being applied wins.
    pub async fn set_thresholds(&self, update: &ThresholdUpdate) -> ThresholdConfig {
        let mut guard = self.store.lock().await;
        match self.snapshots.load().await {
            Ok(Some(snapshot)) => guard.device.merge(&snapshot),
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(error = %err, "sensor snapshot unreadable during threshold update");
            }
        }
        guard.thresholds.apply(update);
        tracing::info!(
            temperature_led = guard.thresholds.temperature_led,
            temperature_fan = guard.thresholds.temperature_fan,
            "thresholds updated"
        );
        let snapshot = guard.to_snapshot();
        if let Err(err) = self.snapshots.persist(&snapshot).await {
            tracing::warn!(error = %err, "failed to persist thresholds");
        }
        guard.thresholds.clone()
    }

    /// Forward an ad-hoc terminal command to the device.
    ///
    /// An empty command is a no-op returning just the prompt sentinel, with
    /// no channel call. Errors come back as plain text formatted like
    /// command output.
    pub async fn interactive_command(&self, command: &str) -> String {
        let command = command.trim();
        if command.is_empty() {
            return self.channel.prompt().to_string();
        }
        match self.channel.send_interactive(command).await {
            Ok(output) => output,
            Err(err) => {
                tracing::warn!(error = %err, command = %command, "interactive command failed");
                format!("{}{}\r\nError: {}\r\n", self.channel.prompt(), command, err)
            }
        }
    }

    /// Merge a loaded snapshot, adopting its thresholds when present.
    fn absorb(guard: &mut SharedState, snapshot: &Snapshot) {
        if let Some(thresholds) = &snapshot.thresholds {
            guard.thresholds = thresholds.clone();
        }
        guard.device.merge(snapshot);
    }
}
