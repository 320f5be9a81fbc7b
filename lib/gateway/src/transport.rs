//! Messaging transport abstraction.
//!
//! The transport is an external collaborator: it owns the wire protocol and
//! reports what happens on the connection as [`TransportEvent`]s over a
//! channel. Everything in this crate talks to it through [`Transport`].

use crate::auth_state::AuthBlob;
use crate::error::TransportError;
use crate::intake::InboundEvent;
use async_trait::async_trait;
use nukkad_conversation::{Action, Section};
use nukkad_core::{Result, SenderId};
use std::fmt;

/// Presence indicator shown to the other side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Online, no activity.
    Available,
    /// Typing.
    Composing,
    /// Stopped typing.
    Paused,
}

/// Why the connection closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisconnectCause {
    /// The network went away.
    NetworkDrop,
    /// The remote side stopped answering.
    TimedOut,
    /// The connection was lost mid-stream.
    ConnectionLost,
    /// Another client took over the session.
    ConnectionReplaced,
    /// The remote side asked for a restart.
    RestartRequired,
    /// The account was logged out from another device.
    LoggedOut,
    /// The account is not allowed to connect.
    Forbidden,
    /// The stored session is corrupt.
    BadSession,
    /// A close code we do not know.
    Unknown(u16),
}

impl DisconnectCause {
    /// Maps a close status code from the messaging service.
    #[must_use]
    pub fn from_status_code(code: u16) -> Self {
        match code {
            401 => Self::LoggedOut,
            403 => Self::Forbidden,
            408 => Self::TimedOut,
            428 => Self::NetworkDrop,
            440 => Self::ConnectionReplaced,
            500 => Self::BadSession,
            503 => Self::ConnectionLost,
            515 => Self::RestartRequired,
            other => Self::Unknown(other),
        }
    }

    /// Returns true if reconnecting cannot help and a fresh pairing is needed.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::LoggedOut | Self::Forbidden | Self::BadSession)
    }
}

impl fmt::Display for DisconnectCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NetworkDrop => write!(f, "network_drop"),
            Self::TimedOut => write!(f, "timed_out"),
            Self::ConnectionLost => write!(f, "connection_lost"),
            Self::ConnectionReplaced => write!(f, "connection_replaced"),
            Self::RestartRequired => write!(f, "restart_required"),
            Self::LoggedOut => write!(f, "logged_out"),
            Self::Forbidden => write!(f, "forbidden"),
            Self::BadSession => write!(f, "bad_session"),
            Self::Unknown(code) => write!(f, "unknown({code})"),
        }
    }
}

/// Something that happened on the connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// A pairing code or QR payload is ready to show.
    PairingArtifact(String),
    /// The connection is open and authenticated.
    Opened,
    /// The connection closed.
    Closed(DisconnectCause),
    /// The credentials changed and should be persisted.
    CredentialsUpdated(AuthBlob),
    /// A message arrived.
    Message(InboundEvent),
}

/// Trait for messaging transports.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Starts connecting, using stored credentials when available.
    ///
    /// Returning `Ok` means the attempt started; its outcome arrives as a
    /// [`TransportEvent`].
    async fn connect(&self, credentials: Option<AuthBlob>) -> Result<(), TransportError>;

    /// Sends a plain text message.
    async fn send_text(&self, to: &SenderId, body: &str) -> Result<(), TransportError>;

    /// Sends a message with buttons.
    async fn send_buttons(
        &self,
        to: &SenderId,
        body: &str,
        actions: &[Action],
        footer: &str,
    ) -> Result<(), TransportError>;

    /// Sends a message with a sectioned list picker.
    async fn send_list(
        &self,
        to: &SenderId,
        body: &str,
        button_text: &str,
        sections: &[Section],
        footer: &str,
    ) -> Result<(), TransportError>;

    /// Marks a received message as read.
    async fn mark_read(&self, from: &SenderId, message_id: &str) -> Result<(), TransportError>;

    /// Updates presence, either towards one chat or globally.
    async fn send_presence(
        &self,
        to: Option<&SenderId>,
        presence: Presence,
    ) -> Result<(), TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_causes() {
        assert!(DisconnectCause::LoggedOut.is_terminal());
        assert!(DisconnectCause::Forbidden.is_terminal());
        assert!(DisconnectCause::BadSession.is_terminal());
        assert!(!DisconnectCause::NetworkDrop.is_terminal());
        assert!(!DisconnectCause::TimedOut.is_terminal());
        assert!(!DisconnectCause::Unknown(499).is_terminal());
    }

    #[test]
    fn status_codes_map_to_causes() {
        assert_eq!(DisconnectCause::from_status_code(401), DisconnectCause::LoggedOut);
        assert_eq!(DisconnectCause::from_status_code(428), DisconnectCause::NetworkDrop);
        assert_eq!(DisconnectCause::from_status_code(515), DisconnectCause::RestartRequired);
        assert_eq!(DisconnectCause::from_status_code(999), DisconnectCause::Unknown(999));
    }
}
