//! Server-rendered dashboard page (no JavaScript).
//!
//! One askama-templated HTML page, refreshed with
//! `<meta http-equiv="refresh">`; the WebSocket channel is the live path for
//! richer clients. Rendering merges the latest sensor values first but never
//! actuates — a page load must not issue device commands.

use askama::Template;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Response};

use pont_app::ports::{ControlChannel, SnapshotStore};
use pont_domain::state::DeviceState;

use crate::state::AppState;

/// Dashboard page template.
#[derive(Template)]
#[template(path = "index.html")]
pub struct DashboardTemplate {
    refresh_seconds: u32,
    temperature: String,
    humidity: String,
    pressure: String,
    led_id: String,
    led_on: bool,
    fan_id: String,
    fan_speed: u8,
    fan_status: String,
}

impl DashboardTemplate {
    fn from_device(device: &DeviceState) -> Self {
        Self {
            refresh_seconds: 2,
            temperature: sensor(device.temperature, "°C"),
            humidity: sensor(device.humidity, "%"),
            pressure: sensor(device.pressure, "hPa"),
            led_id: device.led.id.clone(),
            led_on: device.led.value,
            fan_id: device.fan.id.clone(),
            fan_speed: device.fan.speed,
            fan_status: device.fan_status.to_string(),
        }
    }
}

impl IntoResponse for DashboardTemplate {
    fn into_response(self) -> Response {
        Html(self.to_string()).into_response()
    }
}

/// `GET /` — current device state.
pub async fn index<C, S>(State(state): State<AppState<C, S>>) -> DashboardTemplate
where
    C: ControlChannel + 'static,
    S: SnapshotStore + 'static,
{
    let device = state.reconciler.refresh().await;
    DashboardTemplate::from_device(&device)
}

fn sensor(value: Option<f64>, unit: &str) -> String {
    value.map_or_else(|| "—".to_string(), |v| format!("{v:.1} {unit}"))
}
