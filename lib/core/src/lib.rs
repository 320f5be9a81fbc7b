//! Core types and utilities for the nukkad messaging front-end.
//!
//! This crate provides the identifiers and error handling shared by the
//! conversation engine and the transport gateway.

pub mod error;
pub mod id;

pub use error::Result;
pub use id::{ConnectionAttemptId, ParseIdError, SenderId, TurnId};
