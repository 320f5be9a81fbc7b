//! Error types for the gateway crate.
//!
//! Errors are designed for layered context using rootcause:
//! - `TransportError`: Errors from the messaging transport
//! - `CredentialError`: Errors from the auth-state store
//! - `DeliveryError`: A response could not be delivered in any form
//! - `TurnError`: High-level wrapper for a failed turn

use nukkad_core::SenderId;
use std::fmt;
use std::path::PathBuf;

/// Errors from transport operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The transport has no open connection.
    NotConnected,
    /// Opening the connection failed.
    ConnectFailed { reason: String },
    /// The remote side rejected a message.
    Rejected { operation: &'static str, reason: String },
    /// Writing to the connection failed.
    SendFailed { operation: &'static str, reason: String },
    /// Timeout waiting for the remote side.
    Timeout,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConnected => write!(f, "transport is not connected"),
            Self::ConnectFailed { reason } => write!(f, "connect failed: {reason}"),
            Self::Rejected { operation, reason } => {
                write!(f, "{operation} rejected: {reason}")
            }
            Self::SendFailed { operation, reason } => {
                write!(f, "{operation} failed: {reason}")
            }
            Self::Timeout => write!(f, "transport operation timed out"),
        }
    }
}

impl std::error::Error for TransportError {}

/// Errors from credential persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
    /// The stored state could not be read.
    ReadFailed { path: PathBuf, reason: String },
    /// The state could not be written.
    WriteFailed { path: PathBuf, reason: String },
    /// The stored state is not in the expected format.
    InvalidFormat { path: PathBuf, reason: String },
}

impl fmt::Display for CredentialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadFailed { path, reason } => {
                write!(f, "failed to read auth state from {}: {reason}", path.display())
            }
            Self::WriteFailed { path, reason } => {
                write!(f, "failed to write auth state to {}: {reason}", path.display())
            }
            Self::InvalidFormat { path, reason } => {
                write!(f, "invalid auth state in {}: {reason}", path.display())
            }
        }
    }
}

impl std::error::Error for CredentialError {}

/// A response could not be delivered, even as plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryError {
    /// Intended recipient.
    pub recipient: SenderId,
    /// Kind of response that was being delivered.
    pub kind: &'static str,
}

impl fmt::Display for DeliveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "could not deliver {} response to {}", self.kind, self.recipient)
    }
}

impl std::error::Error for DeliveryError {}

/// High-level turn errors.
///
/// Use these to add context when wrapping lower-level errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnError {
    /// Session lookup or update failed.
    Session { sender: SenderId },
    /// The reply could not be delivered.
    Delivery { sender: SenderId },
}

impl fmt::Display for TurnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Session { sender } => write!(f, "session operation failed for {sender}"),
            Self::Delivery { sender } => write!(f, "reply delivery failed for {sender}"),
        }
    }
}

impl std::error::Error for TurnError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_error_display() {
        let err = TransportError::Rejected {
            operation: "send_buttons",
            reason: "buttons unsupported".to_string(),
        };
        assert_eq!(err.to_string(), "send_buttons rejected: buttons unsupported");
    }

    #[test]
    fn credential_error_display_includes_path() {
        let err = CredentialError::InvalidFormat {
            path: PathBuf::from("/tmp/auth.json"),
            reason: "bad base64".to_string(),
        };
        assert!(err.to_string().contains("/tmp/auth.json"));
    }

    #[test]
    fn delivery_error_display() {
        let err = DeliveryError {
            recipient: SenderId::new("42@s.whatsapp.net"),
            kind: "text",
        };
        assert_eq!(err.to_string(), "could not deliver text response to 42@s.whatsapp.net");
    }
}
