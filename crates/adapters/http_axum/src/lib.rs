//! # pont-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the server-rendered dashboard page at `/`
//! - Serve the threshold configuration API (`POST /api/set_threshold`)
//! - Serve the realtime channels: `/ws` for state updates and
//!   `/ws/terminal` for the interactive monitor terminal
//! - Map requests into reconciler calls and results back into HTTP/WS
//!   payloads; handlers never surface internal errors to clients — they
//!   reflect whatever state is currently held
//!
//! ## Dependency rule
//! Depends on `pont-app` (port traits and the reconciler) and `pont-domain`
//! (payload types). Never leaks axum types into the domain.

pub mod api;
pub mod dashboard;
pub mod router;
pub mod state;
pub mod ws;
