//! Conversation engine for the nukkad messaging front-end.
//!
//! This crate provides:
//!
//! - **Session Store**: Per-user menu position and order details
//! - **Intent Resolver**: Ordered keyword commands for free text
//! - **Selection Dispatcher**: Exact-match routing for buttons and list rows
//! - **Responses**: Structured reply descriptors and their plain-text form
//!
//! Nothing here performs I/O; the gateway crate delivers the replies.

pub mod catalog;
pub mod engine;
pub mod error;
pub mod intent;
pub mod replies;
pub mod response;
pub mod selection;
pub mod session;

pub use catalog::{BusinessHours, BusinessProfile, Category};
pub use engine::{ConversationEngine, TurnInput};
pub use error::SessionError;
pub use intent::{Command, Intent, IntentResolver, Resolution, Trigger};
pub use replies::{Hint, Replies};
pub use response::{Action, Reply, ResponseDescriptor, Row, Section};
pub use selection::{Selection, SelectionDispatcher};
pub use session::{InMemorySessionStore, MenuState, SessionPatch, SessionStore, UserSession};
