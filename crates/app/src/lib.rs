//! # pont-app
//!
//! Application layer for pont: the reconciliation use-cases and the port
//! traits adapters implement.
//!
//! ## Responsibilities
//! - [`ports`] — IO boundaries as traits ([`ControlChannel`](ports::ControlChannel),
//!   [`SnapshotStore`](ports::SnapshotStore)) so tests can substitute fakes
//!   without opening sockets or touching disk
//! - [`store`] — the single locked context object holding device state and
//!   thresholds
//! - [`reconciler`] — the read-merge-decide-command-persist cycle
//! - [`event_bus`] — in-process broadcast of state updates to subscribers
//!
//! ## Dependency rule
//! Depends on `pont-domain` only. Never imports adapter crates.

pub mod event_bus;
pub mod ports;
pub mod reconciler;
pub mod store;
