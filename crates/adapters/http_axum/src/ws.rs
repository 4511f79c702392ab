//! WebSocket channels — realtime state updates and the interactive
//! terminal.
//!
//! Frames are JSON text messages with an `event` discriminator, mirroring
//! the browser client's expectations:
//!
//! - `/ws`: client sends `{"event": "get_state"}`; the server runs one
//!   reconciliation cycle and replies to *that* connection with
//!   `{"event": "state_update", "data": <DeviceState>}`. The connection also
//!   receives `state_update` frames for cycles triggered elsewhere (the
//!   periodic tick) through the broadcast bus.
//! - `/ws/terminal`: client sends
//!   `{"event": "terminal_command", "command": "..."}`; the server replies
//!   with `{"event": "terminal_output", "data": "..."}` to that connection
//!   only. Errors arrive as plain text formatted like command output.
//!
//! Unknown or unparseable frames are ignored.

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast::error::RecvError;

use pont_app::ports::{ControlChannel, SnapshotStore};
use pont_domain::state::DeviceState;

use crate::state::AppState;

/// A frame received from a client.
#[derive(Debug, Deserialize)]
struct ClientFrame {
    event: String,
    #[serde(default)]
    command: Option<String>,
}

#[derive(Serialize)]
struct StateUpdateFrame<'a> {
    event: &'static str,
    data: &'a DeviceState,
}

#[derive(Serialize)]
struct TerminalOutputFrame<'a> {
    event: &'static str,
    data: &'a str,
}

fn parse_frame(text: &str) -> Option<ClientFrame> {
    match serde_json::from_str(text) {
        Ok(frame) => Some(frame),
        Err(err) => {
            tracing::debug!(error = %err, "ignoring unparseable client frame");
            None
        }
    }
}

fn state_update_frame(device: &DeviceState) -> String {
    serde_json::to_string(&StateUpdateFrame {
        event: "state_update",
        data: device,
    })
    .unwrap_or_default()
}

fn terminal_output_frame(output: &str) -> String {
    serde_json::to_string(&TerminalOutputFrame {
        event: "terminal_output",
        data: output,
    })
    .unwrap_or_default()
}

/// `GET /ws` — upgrade to the state-update channel.
pub async fn state_socket<C, S>(
    ws: WebSocketUpgrade,
    State(state): State<AppState<C, S>>,
) -> Response
where
    C: ControlChannel + 'static,
    S: SnapshotStore + 'static,
{
    ws.on_upgrade(move |socket| run_state_socket(socket, state))
}

async fn run_state_socket<C, S>(mut socket: WebSocket, state: AppState<C, S>)
where
    C: ControlChannel + 'static,
    S: SnapshotStore + 'static,
{
    let mut updates = state.reconciler.subscribe();
    loop {
        tokio::select! {
            incoming = socket.recv() => {
                match incoming {
                    Some(Ok(Message::Text(text))) => {
                        let Some(frame) = parse_frame(&text) else {
                            continue;
                        };
                        if frame.event == "get_state" {
                            let device = state.reconciler.reconcile().await;
                            let reply = state_update_frame(&device);
                            if socket.send(Message::Text(reply.into())).await.is_err() {
                                break;
                            }
                        }
                    }
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    Some(Ok(_)) => {}
                }
            }
            update = updates.recv() => {
                match update {
                    Ok(device) => {
                        let frame = state_update_frame(&device);
                        if socket.send(Message::Text(frame.into())).await.is_err() {
                            break;
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "state subscriber lagged, updates dropped");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        }
    }
}

/// `GET /ws/terminal` — upgrade to the interactive terminal channel.
pub async fn terminal_socket<C, S>(
    ws: WebSocketUpgrade,
    State(state): State<AppState<C, S>>,
) -> Response
where
    C: ControlChannel + 'static,
    S: SnapshotStore + 'static,
{
    ws.on_upgrade(move |socket| run_terminal_socket(socket, state))
}

async fn run_terminal_socket<C, S>(mut socket: WebSocket, state: AppState<C, S>)
where
    C: ControlChannel + 'static,
    S: SnapshotStore + 'static,
{
    while let Some(incoming) = socket.recv().await {
        match incoming {
            Ok(Message::Text(text)) => {
                let Some(frame) = parse_frame(&text) else {
                    continue;
                };
                if frame.event == "terminal_command" {
                    let command = frame.command.unwrap_or_default();
                    let output = state.reconciler.interactive_command(&command).await;
                    let reply = terminal_output_frame(&output);
                    if socket.send(Message::Text(reply.into())).await.is_err() {
                        break;
                    }
                }
            }
            Ok(Message::Close(_)) | Err(_) => break,
            Ok(_) => {}
        }
    }
}
