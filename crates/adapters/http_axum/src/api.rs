//! JSON API handlers.

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use pont_app::ports::{ControlChannel, SnapshotStore};
use pont_domain::thresholds::{ThresholdConfig, ThresholdUpdate};

use crate::state::AppState;

/// Response body for `POST /api/set_threshold`.
#[derive(Debug, Serialize)]
pub struct SetThresholdResponse {
    pub ok: bool,
    pub thresholds: ThresholdConfig,
}

/// `POST /api/set_threshold`
///
/// Accepts a JSON body with zero or more recognized threshold keys.
/// Unrecognized keys are ignored and the response is `200` with the current
/// configuration regardless of whether any key matched.
pub async fn set_threshold<C, S>(
    State(state): State<AppState<C, S>>,
    Json(update): Json<ThresholdUpdate>,
) -> Json<SetThresholdResponse>
where
    C: ControlChannel + 'static,
    S: SnapshotStore + 'static,
{
    let thresholds = state.reconciler.set_thresholds(&update).await;
    Json(SetThresholdResponse {
        ok: true,
        thresholds,
    })
}
