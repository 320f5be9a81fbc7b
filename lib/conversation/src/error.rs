//! Error types for the conversation crate.
//!
//! Unrecognized text and unknown selections are not errors: they resolve
//! to fallback replies. The only fallible collaborator here is the session
//! store.

use nukkad_core::SenderId;
use std::fmt;

/// Errors from session store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The backing store could not be read.
    ReadFailed { id: SenderId, reason: String },
    /// The backing store could not be written.
    WriteFailed { id: SenderId, reason: String },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadFailed { id, reason } => {
                write!(f, "failed to read session for {id}: {reason}")
            }
            Self::WriteFailed { id, reason } => {
                write!(f, "failed to write session for {id}: {reason}")
            }
        }
    }
}

impl std::error::Error for SessionError {}
