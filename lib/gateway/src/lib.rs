//! Transport gateway for the nukkad messaging front-end.
//!
//! This crate provides:
//!
//! - **Transport trait**: The seam to the messaging network
//! - **Auth state**: Durable storage for transport credentials
//! - **Renderer**: Structured sends with plain-text degradation
//! - **Orchestrator**: One inbound message through a full conversation turn
//! - **Connection lifecycle**: Pairing, heartbeat, and reconnect handling

pub mod auth_state;
pub mod config;
pub mod error;
pub mod heartbeat;
pub mod intake;
pub mod lifecycle;
pub mod orchestrator;
pub mod renderer;
pub mod status;
pub mod timer;
pub mod transport;

#[cfg(test)]
mod testing;

pub use auth_state::{AuthBlob, AuthStateStore, FileAuthStateStore};
pub use config::{ConnectionConfig, RendererConfig};
pub use error::{CredentialError, DeliveryError, TransportError, TurnError};
pub use heartbeat::Heartbeat;
pub use intake::{DropReason, InboundEvent};
pub use lifecycle::{
    ConnectionHandle, ConnectionManager, ConnectionMachine, ConnectionState, Effect, Signal,
};
pub use orchestrator::{Orchestrator, TurnOutcome};
pub use renderer::{Delivery, Renderer};
pub use status::{ConnectionStatus, StatusBoard, StatusHandle};
pub use timer::{Timer, TokioTimer};
pub use transport::{DisconnectCause, Presence, Transport, TransportEvent};
