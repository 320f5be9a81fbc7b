//! Read-only connection status for dashboards.

use crate::lifecycle::ConnectionState;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::watch;

/// Snapshot of the connection as shown to operators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionStatus {
    /// Current lifecycle state.
    pub state: ConnectionState,
    /// Pairing code or QR payload while pairing.
    pub pairing_artifact: Option<String>,
    /// When `state` or `pairing_artifact` last changed.
    pub changed_at: DateTime<Utc>,
}

impl Default for ConnectionStatus {
    fn default() -> Self {
        Self {
            state: ConnectionState::Disconnected,
            pairing_artifact: None,
            changed_at: Utc::now(),
        }
    }
}

/// Publishing side of the status channel.
#[derive(Debug)]
pub struct StatusBoard {
    sender: watch::Sender<ConnectionStatus>,
}

impl StatusBoard {
    /// Creates a board showing `Disconnected`.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = watch::channel(ConnectionStatus::default());
        Self { sender }
    }

    /// Publishes `state` and `artifact` if either differs from what is shown.
    /// Returns whether subscribers were notified.
    pub fn publish(&self, state: ConnectionState, artifact: Option<&str>) -> bool {
        self.sender.send_if_modified(|status| {
            if status.state == state && status.pairing_artifact.as_deref() == artifact {
                return false;
            }
            status.state = state;
            status.pairing_artifact = artifact.map(str::to_string);
            status.changed_at = Utc::now();
            true
        })
    }

    /// Returns a read-only view of the status.
    #[must_use]
    pub fn subscribe(&self) -> StatusHandle {
        StatusHandle {
            receiver: self.sender.subscribe(),
        }
    }
}

impl Default for StatusBoard {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only view of the connection status.
#[derive(Debug, Clone)]
pub struct StatusHandle {
    receiver: watch::Receiver<ConnectionStatus>,
}

impl StatusHandle {
    /// Returns the latest status.
    #[must_use]
    pub fn current(&self) -> ConnectionStatus {
        self.receiver.borrow().clone()
    }

    /// Waits for the next change and returns it. Returns `None` once the
    /// publisher is gone.
    pub async fn changed(&mut self) -> Option<ConnectionStatus> {
        self.receiver.changed().await.ok()?;
        Some(self.receiver.borrow_and_update().clone())
    }
}
