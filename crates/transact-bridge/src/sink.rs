// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Per-session event sinks and the registry of live sessions.
//
// Every presented session gets one `EventSink`. The native SDK may call
// `emit` from any thread; events from all sessions land, in call order, on
// the plugin's single queue. The first terminal event closes the sink and
// removes the session from the registry, so a finished session leaves no
// registration behind and later events are dropped. A sink abandoned
// without a terminal event deregisters when its last clone is dropped.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info};
use uuid::Uuid;

use transact_core::TransactEvent;

/// Unique identifier for a presented session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An event tagged with the session that produced it.
pub(crate) type Envelope = (SessionId, TransactEvent);

/// Set of sessions whose sinks are still open.
#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    active: Arc<Mutex<HashSet<SessionId>>>,
}

impl SessionRegistry {
    pub fn register(&self, id: SessionId) {
        self.lock().insert(id);
    }

    /// Returns `false` if the session was not registered.
    pub fn deregister(&self, id: SessionId) -> bool {
        self.lock().remove(&id)
    }

    pub fn is_active(&self, id: SessionId) -> bool {
        self.lock().contains(&id)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashSet<SessionId>> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Callback slot handed to the native SDK for one session.
///
/// Cheap to clone; all clones share the same open/closed state. Dropping
/// the last clone of an open sink releases the session's registration.
#[derive(Debug, Clone)]
pub struct EventSink {
    inner: Arc<SinkInner>,
}

#[derive(Debug)]
struct SinkInner {
    id: SessionId,
    tx: Mutex<Option<UnboundedSender<Envelope>>>,
    registry: SessionRegistry,
}

impl SinkInner {
    fn slot(&self) -> std::sync::MutexGuard<'_, Option<UnboundedSender<Envelope>>> {
        self.tx.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for SinkInner {
    fn drop(&mut self) {
        let slot = self.tx.get_mut().unwrap_or_else(PoisonError::into_inner);
        if slot.take().is_some() {
            self.registry.deregister(self.id);
            debug!(session = %self.id, "event sink abandoned without completion");
        }
    }
}

impl EventSink {
    /// Open a sink for a new session and register it.
    pub(crate) fn open(tx: UnboundedSender<Envelope>, registry: SessionRegistry) -> Self {
        let id = SessionId::new();
        registry.register(id);
        debug!(session = %id, "event sink registered");
        Self {
            inner: Arc::new(SinkInner {
                id,
                tx: Mutex::new(Some(tx)),
                registry,
            }),
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.inner.id
    }

    /// Queue an event for the host.
    ///
    /// Returns `false` when the event was dropped: the session already
    /// ended, or the plugin's event pump is gone.
    pub fn emit(&self, event: TransactEvent) -> bool {
        let id = self.inner.id;
        // Held across the send so concurrent emitters keep a total order.
        let mut slot = self.inner.slot();

        let Some(tx) = slot.as_ref() else {
            debug!(
                session = %id,
                method = event.method(),
                "event after session end dropped"
            );
            return false;
        };

        let terminal = event.is_terminal();
        let delivered = tx.send((id, event)).is_ok();

        if terminal {
            slot.take();
            self.inner.registry.deregister(id);
            info!(session = %id, "session ended; sink deregistered");
        }
        delivered
    }

    /// Release the registration without delivering anything.
    pub(crate) fn close(&self) {
        if self.inner.slot().take().is_some() {
            self.inner.registry.deregister(self.inner.id);
            debug!(session = %self.inner.id, "event sink closed");
        }
    }

    pub fn is_open(&self) -> bool {
        self.inner.slot().is_some()
    }
}
