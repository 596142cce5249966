// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared application state and post-commit event dispatch.

use axum::extract::FromRef;
use servicedesk_api::AttachmentPolicy;
use servicedesk_audit::RecordedEvent;
use servicedesk_domain::SlaPolicy;
use servicedesk_persistence::{Persistence, PersistenceError};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::live::LiveEventBroadcaster;

/// Application state shared across handlers.
///
/// The store sits behind a mutex so that writes to `SQLite` are
/// serialized.
#[derive(Clone)]
pub struct AppState {
    pub persistence: Arc<Mutex<Persistence>>,
    pub sla_policy: SlaPolicy,
    pub attachment_policy: AttachmentPolicy,
    pub broadcaster: Arc<LiveEventBroadcaster>,
}

impl AppState {
    #[must_use]
    pub fn new(persistence: Persistence, config: ServerConfig) -> Self {
        Self {
            persistence: Arc::new(Mutex::new(persistence)),
            sla_policy: config.sla,
            attachment_policy: config.attachments,
            broadcaster: Arc::new(LiveEventBroadcaster::new()),
        }
    }

    /// Publishes committed events and marks them dispatched.
    ///
    /// Runs after the transaction that wrote `events` has committed. A
    /// failure here is logged and never undoes the change; the events stay
    /// in the outbox and are picked up by [`Self::dispatch_pending`].
    pub async fn dispatch(&self, events: Vec<RecordedEvent>) {
        if events.is_empty() {
            return;
        }

        for recorded in &events {
            self.broadcaster.broadcast(&recorded.event);
        }

        let ids: Vec<i64> = events.iter().map(|e| e.event_id).collect();
        let mut persistence = self.persistence.lock().await;
        if let Err(err) = persistence.mark_events_dispatched(&ids) {
            warn!(error = %err, count = ids.len(), "Failed to mark events dispatched");
        }
    }

    /// Publishes every event still waiting in the outbox.
    ///
    /// # Errors
    ///
    /// Returns an error if the outbox cannot be read.
    pub async fn dispatch_pending(&self) -> Result<usize, PersistenceError> {
        let pending: Vec<RecordedEvent> = self.persistence.lock().await.list_undispatched_events()?;
        let count: usize = pending.len();
        if count > 0 {
            info!(count, "Dispatching pending outbox events");
        }
        self.dispatch(pending).await;
        Ok(count)
    }
}

impl FromRef<AppState> for Arc<LiveEventBroadcaster> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.broadcaster)
    }
}
