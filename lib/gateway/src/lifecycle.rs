//! Connection lifecycle.
//!
//! [`ConnectionMachine`] is the pure state machine: it consumes [`Signal`]s
//! and returns the [`Effect`]s to perform, without doing any I/O itself.
//! [`ConnectionManager`] drives it, executing effects against the transport,
//! the auth-state store, and an injectable [`Timer`].
//!
//! ```text
//! Disconnected --Start--> Pairing --Opened--> Connected
//! Connected --Closed(recoverable)--> Reconnecting --ReconnectDue--> (connect again)
//! Reconnecting --Opened--> Connected
//! Reconnecting --PairingArtifact--> Pairing
//! any live state --Closed(terminal)--> LoggedOut --Start--> Pairing
//! ```
//!
//! There is no retry ceiling: recoverable drops keep scheduling one
//! reconnect at a time, spaced by the configured delay.

use crate::auth_state::{AuthBlob, AuthStateStore};
use crate::config::ConnectionConfig;
use crate::heartbeat::Heartbeat;
use crate::orchestrator::Orchestrator;
use crate::status::{StatusBoard, StatusHandle};
use crate::timer::Timer;
use crate::transport::{DisconnectCause, Transport, TransportEvent};
use nukkad_core::ConnectionAttemptId;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// Where the connection is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionState {
    Disconnected,
    Pairing,
    Connected,
    Reconnecting,
    LoggedOut,
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disconnected => write!(f, "disconnected"),
            Self::Pairing => write!(f, "pairing"),
            Self::Connected => write!(f, "connected"),
            Self::Reconnecting => write!(f, "reconnecting"),
            Self::LoggedOut => write!(f, "logged_out"),
        }
    }
}

/// Input to the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    /// Begin connecting (at startup, or to re-pair after a logout).
    Start,
    /// The transport produced a pairing code or QR payload.
    PairingArtifact(String),
    /// The connection opened.
    Opened,
    /// The connection closed, or a connect attempt failed.
    Closed(DisconnectCause),
    /// A scheduled reconnect is due. Carries the generation it was scheduled with.
    ReconnectDue(u64),
    /// The process is shutting down.
    Shutdown,
}

/// Work the driver must perform after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Start a connection attempt.
    Connect,
    /// Deliver `ReconnectDue(generation)` after `delay`.
    ScheduleReconnect { delay: Duration, generation: u64 },
    /// Start the keepalive heartbeat.
    StartHeartbeat,
    /// Stop the keepalive heartbeat.
    StopHeartbeat,
    /// Delete persisted credentials.
    ClearCredentials,
}

/// Pure connection state machine.
#[derive(Debug, Clone)]
pub struct ConnectionMachine {
    state: ConnectionState,
    pairing_artifact: Option<String>,
    reconnect_delay: Duration,
    /// Generation of the reconnect that is currently scheduled, if any.
    pending_reconnect: Option<u64>,
    generation: u64,
}

impl ConnectionMachine {
    /// Creates a machine in `Disconnected`.
    #[must_use]
    pub fn new(reconnect_delay: Duration) -> Self {
        Self {
            state: ConnectionState::Disconnected,
            pairing_artifact: None,
            reconnect_delay,
            pending_reconnect: None,
            generation: 0,
        }
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Returns the pairing artifact currently on offer.
    #[must_use]
    pub fn pairing_artifact(&self) -> Option<&str> {
        self.pairing_artifact.as_deref()
    }

    /// Returns whether a reconnect is scheduled.
    #[must_use]
    pub fn reconnect_pending(&self) -> bool {
        self.pending_reconnect.is_some()
    }

    /// Applies `signal` and returns the effects to perform, in order.
    ///
    /// Signals that make no sense in the current state are ignored.
    pub fn on_signal(&mut self, signal: Signal) -> Vec<Effect> {
        use ConnectionState::{Connected, Disconnected, LoggedOut, Pairing, Reconnecting};

        match (self.state, signal) {
            (Disconnected | LoggedOut, Signal::Start) => {
                self.state = Pairing;
                vec![Effect::Connect]
            }
            (Pairing | Reconnecting, Signal::PairingArtifact(artifact)) => {
                self.state = Pairing;
                self.pairing_artifact = Some(artifact);
                Vec::new()
            }
            (Pairing | Reconnecting, Signal::Opened) => {
                self.state = Connected;
                self.pairing_artifact = None;
                // The outstanding timer, if any, is now stale.
                self.pending_reconnect = None;
                vec![Effect::StartHeartbeat]
            }
            (Pairing | Connected | Reconnecting, Signal::Closed(cause)) if cause.is_terminal() => {
                self.state = LoggedOut;
                self.pairing_artifact = None;
                self.pending_reconnect = None;
                vec![Effect::StopHeartbeat, Effect::ClearCredentials]
            }
            (Pairing | Connected | Reconnecting, Signal::Closed(_)) => {
                self.state = Reconnecting;
                let mut effects = vec![Effect::StopHeartbeat];
                if self.pending_reconnect.is_none() {
                    self.generation += 1;
                    self.pending_reconnect = Some(self.generation);
                    effects.push(Effect::ScheduleReconnect {
                        delay: self.reconnect_delay,
                        generation: self.generation,
                    });
                }
                effects
            }
            (Reconnecting, Signal::ReconnectDue(generation))
                if self.pending_reconnect == Some(generation) =>
            {
                self.pending_reconnect = None;
                vec![Effect::Connect]
            }
            // Due outside `Reconnecting` (e.g. after falling back to pairing):
            // consume it so the next drop can schedule again.
            (_, Signal::ReconnectDue(generation)) if self.pending_reconnect == Some(generation) => {
                self.pending_reconnect = None;
                Vec::new()
            }
            (_, Signal::Shutdown) => {
                self.state = Disconnected;
                self.pairing_artifact = None;
                self.pending_reconnect = None;
                vec![Effect::StopHeartbeat]
            }
            _ => Vec::new(),
        }
    }
}

/// Control surface for a running [`ConnectionManager`].
#[derive(Debug, Clone)]
pub struct ConnectionHandle {
    signals: mpsc::UnboundedSender<Signal>,
    status: StatusHandle,
    shutdown: CancellationToken,
}

impl ConnectionHandle {
    /// Starts a fresh pairing cycle. Only has an effect while logged out or
    /// disconnected.
    pub fn request_pairing(&self) {
        if self.signals.send(Signal::Start).is_err() {
            warn!("connection manager is not running");
        }
    }

    /// Returns the read-only status view.
    #[must_use]
    pub fn status(&self) -> StatusHandle {
        self.status.clone()
    }

    /// Stops the manager.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }
}

/// Drives the connection state machine and feeds messages to the orchestrator.
pub struct ConnectionManager {
    transport: Arc<dyn Transport>,
    auth_state: Arc<dyn AuthStateStore>,
    timer: Arc<dyn Timer>,
    orchestrator: Arc<Orchestrator>,
    config: ConnectionConfig,
    machine: ConnectionMachine,
    heartbeat: Heartbeat,
    status: StatusBoard,
    credentials: Option<AuthBlob>,
    signals_tx: mpsc::UnboundedSender<Signal>,
    signals_rx: mpsc::UnboundedReceiver<Signal>,
    shutdown: CancellationToken,
}

impl ConnectionManager {
    /// Creates a manager. Nothing happens until [`run`](Self::run).
    #[must_use]
    pub fn new(
        transport: Arc<dyn Transport>,
        auth_state: Arc<dyn AuthStateStore>,
        timer: Arc<dyn Timer>,
        orchestrator: Arc<Orchestrator>,
        config: ConnectionConfig,
    ) -> Self {
        let (signals_tx, signals_rx) = mpsc::unbounded_channel();
        let heartbeat = Heartbeat::new(
            Arc::clone(&transport),
            Arc::clone(&timer),
            config.heartbeat_interval(),
        );

        Self {
            transport,
            auth_state,
            timer,
            orchestrator,
            machine: ConnectionMachine::new(config.reconnect_delay()),
            config,
            heartbeat,
            status: StatusBoard::new(),
            credentials: None,
            signals_tx,
            signals_rx,
            shutdown: CancellationToken::new(),
        }
    }

    /// Returns a control handle.
    #[must_use]
    pub fn handle(&self) -> ConnectionHandle {
        ConnectionHandle {
            signals: self.signals_tx.clone(),
            status: self.status.subscribe(),
            shutdown: self.shutdown.clone(),
        }
    }

    /// Runs until shutdown is requested or the transport event stream ends.
    pub async fn run(mut self, mut events: mpsc::Receiver<TransportEvent>) {
        self.credentials = match self.auth_state.load().await {
            Ok(credentials) => credentials,
            Err(e) => {
                error!(error = %e, "failed to load auth state, pairing from scratch");
                None
            }
        };
        info!(
            target: "connection",
            has_credentials = self.credentials.is_some(),
            "starting connection manager"
        );
        self.apply(Signal::Start).await;

        loop {
            tokio::select! {
                () = self.shutdown.cancelled() => break,
                Some(signal) = self.signals_rx.recv() => self.apply(signal).await,
                event = events.recv() => match event {
                    Some(event) => self.on_event(event).await,
                    None => {
                        warn!(target: "connection", "transport event stream ended");
                        break;
                    }
                },
            }
        }

        self.shutdown.cancel();
        self.apply(Signal::Shutdown).await;
        info!(target: "connection", "connection manager stopped");
    }

    async fn on_event(&mut self, event: TransportEvent) {
        match event {
            TransportEvent::PairingArtifact(artifact) => {
                info!(target: "connection", "pairing code generated");
                self.apply(Signal::PairingArtifact(artifact)).await;
            }
            TransportEvent::Opened => self.apply(Signal::Opened).await,
            TransportEvent::Closed(cause) => self.apply(Signal::Closed(cause)).await,
            TransportEvent::CredentialsUpdated(credentials) => {
                if let Err(e) = self.auth_state.save(&credentials).await {
                    error!(error = %e, "failed to persist credentials");
                }
                self.credentials = Some(credentials);
            }
            TransportEvent::Message(inbound) => {
                let orchestrator = Arc::clone(&self.orchestrator);
                tokio::spawn(async move {
                    orchestrator.handle(inbound).await;
                });
            }
        }
    }

    async fn apply(&mut self, signal: Signal) {
        let from = self.machine.state();
        let cause = match &signal {
            Signal::Closed(cause) => Some(*cause),
            _ => None,
        };
        let effects = self.machine.on_signal(signal);
        let to = self.machine.state();

        if from != to {
            match cause {
                Some(cause) => {
                    info!(target: "connection", %from, %to, %cause, "connection state changed");
                }
                None => info!(target: "connection", %from, %to, "connection state changed"),
            }
        }
        self.status.publish(to, self.machine.pairing_artifact());

        for effect in effects {
            self.execute(effect).await;
        }
    }

    async fn execute(&mut self, effect: Effect) {
        match effect {
            Effect::Connect => self.connect(),
            Effect::ScheduleReconnect { delay, generation } => {
                info!(target: "connection", delay_secs = delay.as_secs(), "reconnect scheduled");
                let timer = Arc::clone(&self.timer);
                let signals = self.signals_tx.clone();
                let shutdown = self.shutdown.clone();
                tokio::spawn(async move {
                    tokio::select! {
                        () = timer.sleep(delay) => {
                            let _ = signals.send(Signal::ReconnectDue(generation));
                        }
                        () = shutdown.cancelled() => {}
                    }
                });
            }
            Effect::StartHeartbeat => {
                self.heartbeat.start();
            }
            Effect::StopHeartbeat => {
                self.heartbeat.stop();
            }
            Effect::ClearCredentials => {
                self.credentials = None;
                if let Err(e) = self.auth_state.clear().await {
                    error!(error = %e, "failed to clear credentials");
                }
            }
        }
    }

    /// Starts a connect attempt in the background. Failures come back as
    /// `Closed` signals so the event loop never waits on the transport.
    fn connect(&self) {
        let attempt = ConnectionAttemptId::new();
        info!(
            target: "connection",
            %attempt,
            has_credentials = self.credentials.is_some(),
            "connecting"
        );

        let transport = Arc::clone(&self.transport);
        let timer = Arc::clone(&self.timer);
        let credentials = self.credentials.clone();
        let timeout = self.config.connect_timeout();
        let signals = self.signals_tx.clone();
        let shutdown = self.shutdown.clone();
        tokio::spawn(async move {
            let cause = tokio::select! {
                biased;
                () = shutdown.cancelled() => return,
                outcome = transport.connect(credentials) => match outcome {
                    Ok(()) => return,
                    Err(e) => {
                        warn!(target: "connection", %attempt, error = %e, "connect failed");
                        DisconnectCause::ConnectionLost
                    }
                },
                () = timer.sleep(timeout) => {
                    warn!(target: "connection", %attempt, "connect timed out");
                    DisconnectCause::TimedOut
                }
            };
            let _ = signals.send(Signal::Closed(cause));
        });
    }
}
