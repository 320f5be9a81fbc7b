//! Test doubles for the gateway collaborators.

use crate::auth_state::{AuthBlob, AuthStateStore};
use crate::error::{CredentialError, TransportError};
use crate::timer::Timer;
use crate::transport::{Presence, Transport};
use async_trait::async_trait;
use nukkad_conversation::{Action, Section};
use nukkad_core::{Result, SenderId};
use parking_lot::Mutex;
use std::time::Duration;
use tokio::sync::oneshot;

/// One call made against [`RecordingTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Connect { with_credentials: bool },
    Text { to: SenderId, body: String },
    Buttons { to: SenderId, body: String, action_ids: Vec<String> },
    List { to: SenderId, body: String, row_ids: Vec<String> },
    MarkRead { from: SenderId, message_id: String },
    Presence { to: Option<SenderId>, presence: Presence },
}

#[derive(Debug, Default, Clone, Copy)]
struct Failures {
    connect: bool,
    stall_connect: bool,
    text: bool,
    rich: bool,
    presence: bool,
}

/// Transport that records every call and can be told to fail.
///
/// Failed calls are recorded too.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    calls: Mutex<Vec<Call>>,
    failures: Mutex<Failures>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects buttons and lists, accepts text.
    pub fn rejecting_rich() -> Self {
        let transport = Self::default();
        transport.failures.lock().rich = true;
        transport
    }

    /// Rejects every send.
    pub fn failing_sends() -> Self {
        let transport = Self::rejecting_rich();
        transport.failures.lock().text = true;
        transport
    }

    pub fn fail_connect(&self, fail: bool) {
        self.failures.lock().connect = fail;
    }

    /// Makes connect record the call and then never complete.
    pub fn stall_connect(&self, stall: bool) {
        self.failures.lock().stall_connect = stall;
    }

    pub fn fail_presence(&self, fail: bool) {
        self.failures.lock().presence = fail;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Text { body, .. } => Some(body),
                _ => None,
            })
            .collect()
    }

    pub fn presences(&self) -> Vec<Presence> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Presence { presence, .. } => Some(presence),
                _ => None,
            })
            .collect()
    }

    pub fn connects(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Connect { .. }))
            .count()
    }

    fn record(&self, call: Call, fail: bool, operation: &'static str) -> Result<(), TransportError> {
        self.calls.lock().push(call);
        if fail {
            return Err(TransportError::Rejected {
                operation,
                reason: "rejected by test transport".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn connect(&self, credentials: Option<AuthBlob>) -> Result<(), TransportError> {
        let Failures {
            connect: fail,
            stall_connect: stall,
            ..
        } = *self.failures.lock();
        let result = self.record(
            Call::Connect {
                with_credentials: credentials.is_some(),
            },
            fail,
            "connect",
        );
        if stall {
            std::future::pending::<()>().await;
        }
        result
    }

    async fn send_text(&self, to: &SenderId, body: &str) -> Result<(), TransportError> {
        let fail = self.failures.lock().text;
        self.record(
            Call::Text {
                to: to.clone(),
                body: body.to_string(),
            },
            fail,
            "send_text",
        )
    }

    async fn send_buttons(
        &self,
        to: &SenderId,
        body: &str,
        actions: &[Action],
        _footer: &str,
    ) -> Result<(), TransportError> {
        let fail = self.failures.lock().rich;
        self.record(
            Call::Buttons {
                to: to.clone(),
                body: body.to_string(),
                action_ids: actions.iter().map(|a| a.id.clone()).collect(),
            },
            fail,
            "send_buttons",
        )
    }

    async fn send_list(
        &self,
        to: &SenderId,
        body: &str,
        _button_text: &str,
        sections: &[Section],
        _footer: &str,
    ) -> Result<(), TransportError> {
        let fail = self.failures.lock().rich;
        self.record(
            Call::List {
                to: to.clone(),
                body: body.to_string(),
                row_ids: sections
                    .iter()
                    .flat_map(|s| s.rows.iter().map(|r| r.id.clone()))
                    .collect(),
            },
            fail,
            "send_list",
        )
    }

    async fn mark_read(&self, from: &SenderId, message_id: &str) -> Result<(), TransportError> {
        self.record(
            Call::MarkRead {
                from: from.clone(),
                message_id: message_id.to_string(),
            },
            false,
            "mark_read",
        )
    }

    async fn send_presence(
        &self,
        to: Option<&SenderId>,
        presence: Presence,
    ) -> Result<(), TransportError> {
        let fail = self.failures.lock().presence;
        self.record(
            Call::Presence {
                to: to.cloned(),
                presence,
            },
            fail,
            "send_presence",
        )
    }
}

/// Auth-state store held in memory.
#[derive(Debug, Default)]
pub struct InMemoryAuthState {
    stored: Mutex<Option<AuthBlob>>,
}

impl InMemoryAuthState {
    pub fn with(blob: AuthBlob) -> Self {
        Self {
            stored: Mutex::new(Some(blob)),
        }
    }

    pub fn stored(&self) -> Option<AuthBlob> {
        self.stored.lock().clone()
    }
}

#[async_trait]
impl AuthStateStore for InMemoryAuthState {
    async fn load(&self) -> Result<Option<AuthBlob>, CredentialError> {
        Ok(self.stored())
    }

    async fn save(&self, credentials: &AuthBlob) -> Result<(), CredentialError> {
        *self.stored.lock() = Some(credentials.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), CredentialError> {
        *self.stored.lock() = None;
        Ok(())
    }
}

/// Timer whose sleeps only complete when the test fires them.
#[derive(Debug, Default)]
pub struct ManualTimer {
    pending: Mutex<Vec<(Duration, oneshot::Sender<()>)>>,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Durations of sleeps that are still being awaited, oldest first.
    pub fn pending(&self) -> Vec<Duration> {
        let mut pending = self.pending.lock();
        pending.retain(|(_, tx)| !tx.is_closed());
        pending.iter().map(|(d, _)| *d).collect()
    }

    /// Completes the oldest live sleep and returns its duration.
    pub fn fire_next(&self) -> Option<Duration> {
        let mut pending = self.pending.lock();
        pending.retain(|(_, tx)| !tx.is_closed());
        if pending.is_empty() {
            return None;
        }
        let (duration, tx) = pending.remove(0);
        let _ = tx.send(());
        Some(duration)
    }
}

#[async_trait]
impl Timer for ManualTimer {
    async fn sleep(&self, duration: Duration) {
        let (tx, rx) = oneshot::channel();
        self.pending.lock().push((duration, tx));
        let _ = rx.await;
    }
}

/// Yields to other tasks until `condition` holds.
///
/// # Panics
///
/// Panics if the condition does not hold after many yields.
pub async fn eventually(mut condition: impl FnMut() -> bool) {
    for _ in 0..10_000 {
        if condition() {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("condition not reached");
}
