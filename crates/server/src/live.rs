// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Live ticket event streaming.
//!
//! Committed outbox events are pushed to every connected WebSocket client
//! once, after the transaction that wrote them. Clients only listen; the
//! HTTP API stays the source of truth.

use axum::{
    extract::{
        State as AxumState, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::Response,
};
use futures::{SinkExt, stream::StreamExt};
use serde::Serialize;
use servicedesk_audit::DomainEvent;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

/// Maximum number of events to buffer in the broadcast channel.
/// Slow clients lose the oldest events.
const EVENT_BUFFER_SIZE: usize = 256;

/// First message sent on every connection.
#[derive(Debug, Clone, Serialize)]
struct ConnectionNotice {
    #[serde(rename = "type")]
    kind: &'static str,
    timestamp: String,
}

/// Broadcaster for ticket events.
#[derive(Clone)]
pub struct LiveEventBroadcaster {
    tx: broadcast::Sender<DomainEvent>,
}

impl LiveEventBroadcaster {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(EVENT_BUFFER_SIZE);
        Self { tx }
    }

    /// Sends an event to all connected clients.
    ///
    /// Returns the number of clients reached. With no clients connected
    /// the event is dropped, which still counts as delivered.
    pub fn broadcast(&self, event: &DomainEvent) -> usize {
        self.tx.send(event.clone()).map_or_else(
            |_| {
                debug!(event_type = %event.event_type, "No receivers for live event");
                0
            },
            |count| {
                debug!(
                    event_type = %event.event_type,
                    ticket_number = %event.ticket_number,
                    receivers = count,
                    "Broadcast live event"
                );
                count
            },
        )
    }

    pub(crate) fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.tx.subscribe()
    }
}

impl Default for LiveEventBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

/// Upgrades the connection and streams ticket events to it.
pub async fn live_events_handler(
    ws: WebSocketUpgrade,
    AxumState(broadcaster): AxumState<Arc<LiveEventBroadcaster>>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, broadcaster))
}

async fn handle_socket(socket: WebSocket, broadcaster: Arc<LiveEventBroadcaster>) {
    info!("Client connected to live event stream");

    let (mut sender, mut receiver) = socket.split();
    let mut rx: broadcast::Receiver<DomainEvent> = broadcaster.subscribe();

    let notice = ConnectionNotice {
        kind: "CONNECTED",
        timestamp: time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap_or_else(|_| String::from("unknown")),
    };

    if let Ok(json) = serde_json::to_string(&notice)
        && sender.send(Message::Text(json.into())).await.is_err()
    {
        warn!("Failed to send connection notice");
        return;
    }

    let mut send_task = tokio::spawn(async move {
        loop {
            let event: DomainEvent = match rx.recv().await {
                Ok(event) => event,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Live client fell behind; events dropped");
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => break,
            };
            match serde_json::to_string(&event) {
                Ok(json) => {
                    if sender.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    error!(?e, "Failed to serialize live event");
                }
            }
        }
    });

    // Clients never send commands; only close frames matter.
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Text(_) | Message::Binary(_)) => {
                    warn!("Received unexpected message from client, ignoring");
                }
                Ok(Message::Close(_)) => {
                    debug!("Client sent close frame");
                    break;
                }
                Ok(Message::Ping(_) | Message::Pong(_)) => {}
                Err(e) => {
                    error!(?e, "WebSocket receive error");
                    break;
                }
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => {
            debug!("Send task completed");
            recv_task.abort();
        }
        _ = &mut recv_task => {
            debug!("Receive task completed");
            send_task.abort();
        }
    }

    info!("Client disconnected from live event stream");
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use servicedesk_audit::{Actor, EventType};
    use servicedesk_domain::Role;
    use time::macros::datetime;

    fn status_changed() -> DomainEvent {
        DomainEvent::new(
            EventType::StatusChanged,
            Some(7),
            "TKT-2026-000007",
            &Actor::new("sam", Role::SupportStaff),
            datetime!(2026-03-02 09:00 UTC),
            serde_json::json!({"from": "NEW", "to": "OPEN"}),
        )
    }

    #[test]
    fn test_broadcast_without_receivers_is_dropped() {
        let broadcaster = LiveEventBroadcaster::new();
        assert_eq!(broadcaster.broadcast(&status_changed()), 0);
    }

    #[test]
    fn test_every_receiver_gets_the_event() {
        let broadcaster = LiveEventBroadcaster::new();
        let mut rx1 = broadcaster.subscribe();
        let mut rx2 = broadcaster.subscribe();

        assert_eq!(broadcaster.broadcast(&status_changed()), 2);

        assert_eq!(rx1.try_recv().unwrap(), status_changed());
        assert_eq!(rx2.try_recv().unwrap().ticket_id, Some(7));
    }

    #[test]
    fn test_event_wire_shape() {
        let json = serde_json::to_value(status_changed()).unwrap();
        assert_eq!(json["type"], "STATUS_CHANGED");
        assert_eq!(json["ticket_id"], 7);
        assert_eq!(json["actor_id"], "sam");
        assert_eq!(json["timestamp"], "2026-03-02T09:00:00Z");
        assert_eq!(json["payload"]["to"], "OPEN");
    }
}
