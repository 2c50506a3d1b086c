use crate::state::AppState;
use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use interview_core::events::{ServerEvent, parse_frame};
use interview_core::{ConnectionId, Outbox, Relay};
use tokio::sync::mpsc::Receiver;
use tracing::{debug, info, warn};

/// Handles WebSocket upgrade requests for the interview channel.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    debug!("WebSocket upgrade request received");
    ws.on_upgrade(move |socket| handle_socket(socket, state.relay))
}

/// Drives one connection.
///
/// Frames are read and handled strictly in order, each to completion before the
/// next. Outbound events go through the connection's outbox to a separate writer
/// task. However the read loop ends, the session is discarded.
async fn handle_socket(socket: WebSocket, relay: Relay) {
    let connection_id = ConnectionId::new();
    info!(%connection_id, "User connected");

    let (sink, mut stream) = socket.split();
    let (outbox, outbound) = Outbox::channel();
    let writer = tokio::spawn(write_events(sink, outbound, connection_id));

    while let Some(msg) = stream.next().await {
        match msg {
            Ok(Message::Text(text)) => match parse_frame(text.as_str()) {
                Ok(event) => {
                    debug!(%connection_id, "Received {:?}", event);
                    relay.handle(connection_id, event, &outbox);
                }
                Err(e) => {
                    warn!(%connection_id, "Rejected frame: {}", e);
                    outbox.deliver(ServerEvent::Error {
                        message: e.to_string(),
                    });
                }
            },
            Ok(Message::Binary(_)) => debug!(%connection_id, "Ignoring binary frame"),
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                info!(%connection_id, "WebSocket error: {}", e);
                break;
            }
        }
    }

    relay.disconnect(connection_id);
    drop(outbox);
    if let Err(e) = writer.await {
        warn!(%connection_id, "Writer task failed: {}", e);
    }
    info!(%connection_id, "User disconnected");
}

async fn write_events(
    mut sink: futures_util::stream::SplitSink<WebSocket, Message>,
    mut outbound: Receiver<ServerEvent>,
    connection_id: ConnectionId,
) {
    while let Some(event) = outbound.recv().await {
        let frame = match event.to_frame() {
            Ok(frame) => frame,
            Err(e) => {
                warn!(%connection_id, "Failed to encode {:?}: {}", event, e);
                continue;
            }
        };
        if sink.send(Message::Text(frame.into())).await.is_err() {
            // Client disconnected.
            break;
        }
    }
}
