//! Per-connection session.
//!
//! ```text
//! Connected ──join──▶ Joined ──history sent──▶ Reading ──read error / close / eviction──▶ Closed
//! ```
//!
//! Two tasks run while `Reading`: the read loop (inbound frames → room) and
//! the pusher loop (outbound queue → socket). Whichever ends first aborts the
//! other, then the membership is released exactly once.
//!
//! Every socket write is bounded by the configured write timeout, so a peer
//! whose TCP stalls cannot keep its session alive after it stops reading.

use std::{sync::Arc, time::Duration};

use axum::extract::ws::{Message, WebSocket};
use futures_util::{
    sink::{Sink, SinkExt},
    stream::{SplitStream, StreamExt},
};
use thiserror::Error;
use tokio::{sync::mpsc, task::JoinHandle};

use crate::{
    domain::{ConnectionHandle, ConnectionId, RawMessage, Room, RoomId},
    infrastructure::{
        dto::websocket::{encode_history, parse_event},
        message_pusher::WebSocketMessagePusher,
    },
    usecase::{JoinedRoom, LeaveRoomUseCase, SubmitEventUseCase},
};

use super::state::AppState;

pub struct ConnectionSession {
    state: Arc<AppState>,
    room_id: RoomId,
    connection_id: ConnectionId,
}

impl ConnectionSession {
    pub fn new(state: Arc<AppState>, room_id: RoomId) -> Self {
        Self {
            state,
            room_id,
            connection_id: ConnectionId::generate(),
        }
    }

    pub async fn run(self, socket: WebSocket) {
        let (mut sink, stream) = socket.split();
        let (pusher, rx) = WebSocketMessagePusher::channel(self.state.queue_capacity.get());
        let handle = ConnectionHandle::new(self.connection_id, Arc::new(pusher));

        let JoinedRoom { room, snapshot } = self
            .state
            .join_room_usecase
            .execute(&self.room_id, handle)
            .await;
        let guard = MembershipGuard {
            leave_room_usecase: self.state.leave_room_usecase.clone(),
            room: room.clone(),
            connection_id: self.connection_id,
            released: false,
        };

        let history = match encode_history(&snapshot) {
            Ok(history) => history,
            Err(e) => {
                tracing::error!(
                    "Failed to encode history for room '{}': {}",
                    self.room_id,
                    e
                );
                guard.release().await;
                return;
            }
        };
        let write_timeout = self.state.write_timeout;
        if let Err(e) =
            send_with_timeout(&mut sink, Message::Text(history.into()), write_timeout).await
        {
            tracing::warn!(
                "Failed to send history to '{}': {}",
                self.connection_id,
                e
            );
            guard.release().await;
            return;
        }
        tracing::debug!(
            "Sent history ({} commands) to '{}'",
            snapshot.commands.len(),
            self.connection_id
        );

        let mut send_task = pusher_loop(rx, sink, self.connection_id, write_timeout);
        let mut recv_task = tokio::spawn(read_loop(
            stream,
            self.state.submit_event_usecase.clone(),
            room,
            self.connection_id,
        ));

        // If any one of the tasks completes, abort the other
        tokio::select! {
            _ = &mut recv_task => send_task.abort(),
            _ = &mut send_task => recv_task.abort(),
        };

        guard.release().await;
    }
}

/// Socket write failure.
#[derive(Debug, Error)]
enum WriteError {
    #[error("write did not complete within {0:?}")]
    TimedOut(Duration),

    #[error(transparent)]
    Socket(#[from] axum::Error),
}

async fn send_with_timeout<S>(
    sink: &mut S,
    message: Message,
    write_timeout: Duration,
) -> Result<(), WriteError>
where
    S: Sink<Message, Error = axum::Error> + Unpin,
{
    tokio::time::timeout(write_timeout, sink.send(message))
        .await
        .map_err(|_| WriteError::TimedOut(write_timeout))?
        .map_err(WriteError::from)
}

/// Drains this connection's outbound queue into the socket.
///
/// Ends when a write fails or times out, or when the queue's sender is gone,
/// which happens when a broadcast evicted this connection from its room.
fn pusher_loop<S>(
    mut rx: mpsc::Receiver<RawMessage>,
    mut sink: S,
    connection_id: ConnectionId,
    write_timeout: Duration,
) -> JoinHandle<()>
where
    S: Sink<Message, Error = axum::Error> + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            let frame = Message::Text(message.as_str().into());
            if let Err(e) = send_with_timeout(&mut sink, frame, write_timeout).await {
                tracing::debug!("Write to '{}' failed: {}", connection_id, e);
                return;
            }
        }
        tracing::info!("Outbound queue of '{}' closed, closing socket", connection_id);
        let _ = tokio::time::timeout(write_timeout, sink.close()).await;
    })
}

/// Reads frames in arrival order and hands each one to the room.
async fn read_loop(
    mut stream: SplitStream<WebSocket>,
    submit_event_usecase: Arc<SubmitEventUseCase>,
    room: Arc<Room>,
    connection_id: ConnectionId,
) {
    while let Some(message) = stream.next().await {
        let message = match message {
            Ok(message) => message,
            Err(e) => {
                tracing::debug!("WebSocket error on '{}': {}", connection_id, e);
                break;
            }
        };

        let raw = match message {
            Message::Text(text) => RawMessage::from(text.as_str()),
            Message::Binary(bytes) => match std::str::from_utf8(&bytes) {
                Ok(text) => RawMessage::from(text),
                Err(e) => {
                    tracing::warn!(
                        "Discarding non UTF-8 binary frame from '{}': {}",
                        connection_id,
                        e
                    );
                    continue;
                }
            },
            Message::Close(_) => {
                tracing::info!("Connection '{}' requested close", connection_id);
                break;
            }
            Message::Ping(_) | Message::Pong(_) => continue,
        };

        let event = match parse_event(raw) {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!(
                    "Discarding malformed message from '{}': {}",
                    connection_id,
                    e
                );
                continue;
            }
        };

        if let Err(e) = submit_event_usecase
            .execute(&room, &connection_id, event)
            .await
        {
            tracing::info!("Stopping reads from '{}': {}", connection_id, e);
            break;
        }
    }
}

/// Room membership of one session. Released exactly once: explicitly on
/// every normal exit path, or from `Drop` if the session future is dropped
/// before reaching one.
struct MembershipGuard {
    leave_room_usecase: Arc<LeaveRoomUseCase>,
    room: Arc<Room>,
    connection_id: ConnectionId,
    released: bool,
}

impl MembershipGuard {
    async fn release(mut self) {
        let outcome = self
            .leave_room_usecase
            .execute(&self.room, &self.connection_id)
            .await;
        self.released = true;
        tracing::info!(
            "Connection '{}' disconnected from room '{}' (room released: {})",
            self.connection_id,
            self.room.id(),
            outcome.room_released
        );
    }
}

impl Drop for MembershipGuard {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!(
                "No runtime to release '{}' from room '{}'",
                self.connection_id,
                self.room.id()
            );
            return;
        };
        let leave_room_usecase = self.leave_room_usecase.clone();
        let room = self.room.clone();
        let connection_id = self.connection_id;
        runtime.spawn(async move {
            leave_room_usecase.execute(&room, &connection_id).await;
        });
    }
}
