//! Best-effort cross-instance broadcast channel for favorites and
//! search-state updates.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use tokio::sync::broadcast;
use tracing::warn;

use crate::{core::store::SessionSnapshot, drink::Drink};

/// Unique identifier for one connected instance (one "tab").
pub type InstanceId = u64;

/// Message kinds carried on the sync channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncMessage {
    /// A peer's favorites list changed; the sender already persisted it.
    FavoritesUpdated {
        /// Full replacement favorites list.
        favorites: Vec<Drink>,
    },
    /// A peer's search settled successfully.
    SearchStateUpdated {
        /// Term and results of the settled search.
        snapshot: SessionSnapshot,
    },
}

#[derive(Debug, Clone)]
struct Frame {
    sender: InstanceId,
    message: SyncMessage,
}

/// Process-wide channel registry; one hub stands in for one origin.
///
/// Every connected [`SyncChannel`] sees every other channel's messages but
/// never its own.
#[derive(Debug, Clone)]
pub struct SyncHub {
    tx: broadcast::Sender<Frame>,
    next_id: Arc<AtomicU64>,
}

impl SyncHub {
    /// Creates a hub with the given buffered capacity per receiver.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self {
            tx,
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Connects a new instance and returns its channel.
    pub fn connect(&self) -> SyncChannel {
        SyncChannel {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            tx: self.tx.clone(),
            rx: self.tx.subscribe(),
        }
    }
}

impl Default for SyncHub {
    fn default() -> Self {
        Self::new(64)
    }
}

/// One instance's endpoint on the sync hub.
///
/// Held open for the application lifetime and dropped on teardown; delivery
/// is best-effort and message loss is tolerated.
#[derive(Debug)]
pub struct SyncChannel {
    id: InstanceId,
    tx: broadcast::Sender<Frame>,
    rx: broadcast::Receiver<Frame>,
}

impl SyncChannel {
    /// This instance's id.
    pub fn instance_id(&self) -> InstanceId {
        self.id
    }

    /// Posts a message to all other instances. Best-effort: a hub with no
    /// other listeners swallows the message.
    pub fn post(&self, message: SyncMessage) {
        let _ = self.tx.send(Frame {
            sender: self.id,
            message,
        });
    }

    /// Receives the next message from a peer, skipping this instance's own
    /// frames. Returns `None` once the hub is gone.
    pub async fn recv(&mut self) -> Option<SyncMessage> {
        loop {
            match self.rx.recv().await {
                Ok(frame) if frame.sender != self.id => return Some(frame.message),
                Ok(_) => continue,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "sync channel lagged, messages dropped");
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Releases the channel.
    pub fn close(self) {}
}
