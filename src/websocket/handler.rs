use crate::{
    game::GameEngine,
    websocket::{
        messages::{ClientMessage, ServerMessage},
        session::run_session,
    },
    AppState, SessionInfo,
};
use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use futures::{sink::SinkExt, stream::StreamExt};
use std::{sync::Arc, time::Instant};
use tokio::sync::mpsc;
use uuid::Uuid;

/// WebSocket upgrade handler
pub async fn handle_websocket(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle individual WebSocket connection. Each connection plays its own game.
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let session_id = Uuid::new_v4();
    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::channel::<ServerMessage>(100);
    let (command_tx, command_rx) = mpsc::channel::<ClientMessage>(100);

    state.sessions.insert(
        session_id,
        SessionInfo {
            session_id,
            connected_at: Instant::now(),
        },
    );
    tracing::info!(
        "Session {} connected ({} active)",
        session_id,
        state.sessions.len()
    );

    // Spawn a task to send messages to the client
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            match serde_json::to_string(&msg) {
                Ok(json) => {
                    if sender.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!("Failed to serialize message: {}", e);
                }
            }
        }
    });

    // The game itself runs in its own task
    let engine = GameEngine::new(state.dictionary.clone(), state.store.clone());
    let mut session_task = tokio::spawn(run_session(engine, command_rx, tx.clone()));

    // Handle incoming messages from the client
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            match msg {
                Message::Text(text) => match serde_json::from_str::<ClientMessage>(&text) {
                    Ok(client_msg) => {
                        if command_tx.send(client_msg).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse message: {}", e);
                        let error_msg = ServerMessage::Error {
                            message: format!("Invalid message format: {}", e),
                        };
                        let _ = tx.send(error_msg).await;
                    }
                },
                Message::Close(_) => {
                    tracing::info!("Client {} disconnected", session_id);
                    break;
                }
                _ => {}
            }
        }
    });

    // Wait for any task to finish
    tokio::select! {
        _ = (&mut send_task) => {
            recv_task.abort();
            session_task.abort();
        }
        _ = (&mut recv_task) => {
            // Dropping the command sender lets the session shut its engine down
            let _ = session_task.await;
            send_task.abort();
        }
        _ = (&mut session_task) => {
            recv_task.abort();
            send_task.abort();
        }
    }

    if let Some((_, info)) = state.sessions.remove(&session_id) {
        tracing::info!(
            "Session {} closed after {:?} ({} active)",
            info.session_id,
            info.connected_at.elapsed(),
            state.sessions.len()
        );
    }
}
