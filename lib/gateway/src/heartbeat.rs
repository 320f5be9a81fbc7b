//! Keepalive presence signalling while connected.

use crate::timer::Timer;
use crate::transport::{Presence, Transport};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Periodic presence signal that keeps an idle session from being evicted.
///
/// Starting and stopping are both idempotent.
pub struct Heartbeat {
    transport: Arc<dyn Transport>,
    timer: Arc<dyn Timer>,
    interval: Duration,
    running: Mutex<Option<CancellationToken>>,
}

impl Heartbeat {
    /// Creates a stopped heartbeat.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, timer: Arc<dyn Timer>, interval: Duration) -> Self {
        Self {
            transport,
            timer,
            interval,
            running: Mutex::new(None),
        }
    }

    /// Starts the heartbeat. Returns false if it was already running.
    pub fn start(&self) -> bool {
        let mut running = self.running.lock();
        if running.is_some() {
            return false;
        }

        let cancel = CancellationToken::new();
        tokio::spawn(run_heartbeat(
            Arc::clone(&self.transport),
            Arc::clone(&self.timer),
            self.interval,
            cancel.clone(),
        ));
        *running = Some(cancel);

        info!(
            target: "connection",
            interval_secs = self.interval.as_secs(),
            "heartbeat started"
        );
        true
    }

    /// Stops the heartbeat. Returns false if it was not running.
    pub fn stop(&self) -> bool {
        match self.running.lock().take() {
            Some(cancel) => {
                cancel.cancel();
                info!(target: "connection", "heartbeat stopped");
                true
            }
            None => false,
        }
    }

    /// Returns whether the heartbeat is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.lock().is_some()
    }
}

impl Drop for Heartbeat {
    fn drop(&mut self) {
        if let Some(cancel) = self.running.get_mut().take() {
            cancel.cancel();
        }
    }
}

async fn run_heartbeat(
    transport: Arc<dyn Transport>,
    timer: Arc<dyn Timer>,
    interval: Duration,
    cancel: CancellationToken,
) {
    loop {
        tokio::select! {
            () = timer.sleep(interval) => {
                match transport.send_presence(None, Presence::Available).await {
                    Ok(()) => debug!(target: "connection", "heartbeat sent"),
                    Err(e) => warn!(target: "connection", error = %e, "heartbeat failed"),
                }
            }
            () = cancel.cancelled() => return,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ManualTimer, RecordingTransport, eventually};

    fn heartbeat() -> (Heartbeat, Arc<RecordingTransport>, Arc<ManualTimer>) {
        let transport = Arc::new(RecordingTransport::new());
        let timer = Arc::new(ManualTimer::new());
        let heartbeat = Heartbeat::new(transport.clone(), timer.clone(), Duration::from_secs(30));
        (heartbeat, transport, timer)
    }

    #[tokio::test]
    async fn emits_presence_each_interval() {
        let (heartbeat, transport, timer) = heartbeat();
        assert!(heartbeat.start());

        for beats in 1..=2 {
            eventually(|| timer.pending().len() == 1).await;
            assert_eq!(timer.fire_next(), Some(Duration::from_secs(30)));
            eventually(|| transport.presences().len() == beats).await;
        }

        assert!(transport.presences().iter().all(|p| *p == Presence::Available));
        heartbeat.stop();
    }

    #[tokio::test]
    async fn start_and_stop_are_idempotent() {
        let (heartbeat, _transport, timer) = heartbeat();

        assert!(heartbeat.start());
        assert!(!heartbeat.start());
        assert!(heartbeat.is_running());
        eventually(|| timer.pending().len() == 1).await;

        assert!(heartbeat.stop());
        assert!(!heartbeat.stop());
        assert!(!heartbeat.is_running());
    }

    #[tokio::test]
    async fn stopped_heartbeat_sends_nothing() {
        let (heartbeat, transport, timer) = heartbeat();
        heartbeat.start();
        eventually(|| timer.pending().len() == 1).await;

        heartbeat.stop();
        eventually(|| timer.pending().is_empty()).await;

        assert_eq!(timer.fire_next(), None);
        assert!(transport.presences().is_empty());
    }

    #[tokio::test]
    async fn failed_beat_keeps_running() {
        let (heartbeat, transport, timer) = heartbeat();
        transport.fail_presence(true);
        heartbeat.start();

        eventually(|| timer.pending().len() == 1).await;
        timer.fire_next();
        eventually(|| transport.presences().len() == 1).await;
        eventually(|| timer.pending().len() == 1).await;

        assert!(heartbeat.is_running());
        heartbeat.stop();
    }
}
