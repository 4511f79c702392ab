//! # pont-domain
//!
//! Pure domain model for pont, a dashboard bridging a simulated embedded
//! device to browser clients.
//!
//! ## Responsibilities
//! - [`state`] — the authoritative in-memory [`DeviceState`](state::DeviceState)
//!   and its derived fan status
//! - [`snapshot`] — the flat persisted document exchanged with the sensor
//!   ingestion side, and the typed merge rules applied to it
//! - [`thresholds`] — the LED/fan trip points and partial updates to them
//! - [`engine`] — the pure threshold decision function
//! - [`command`] — construction of control-channel command strings
//! - [`error`] — the error taxonomy shared across the workspace
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod command;
pub mod engine;
pub mod error;
pub mod snapshot;
pub mod state;
pub mod thresholds;
