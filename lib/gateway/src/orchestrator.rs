//! Conversation turns.
//!
//! A turn takes one inbound event through intake, the session store, the
//! conversation engine, and the renderer. Every failure inside a turn is
//! caught here: the user gets an apology and the process carries on.

use crate::error::TurnError;
use crate::intake::{self, InboundEvent};
use crate::renderer::{Delivery, Renderer};
use crate::transport::{Presence, Transport};
use nukkad_conversation::{
    ConversationEngine, SessionError, SessionPatch, SessionStore, TurnInput,
};
use nukkad_core::{SenderId, TurnId};
use rootcause::prelude::{Report, ResultExt};
use std::sync::Arc;
use tracing::{Instrument, debug, error, info, info_span, warn};

/// How a turn ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// First contact: the welcome was sent and the input discarded.
    Welcomed(Delivery),
    /// The input was answered.
    Replied(Delivery),
    /// The turn failed and an apology was attempted.
    Failed,
}

/// Runs conversation turns.
pub struct Orchestrator {
    transport: Arc<dyn Transport>,
    sessions: Arc<dyn SessionStore>,
    engine: ConversationEngine,
    renderer: Renderer,
}

impl Orchestrator {
    /// Creates an orchestrator.
    #[must_use]
    pub fn new(
        transport: Arc<dyn Transport>,
        sessions: Arc<dyn SessionStore>,
        engine: ConversationEngine,
        renderer: Renderer,
    ) -> Self {
        Self {
            transport,
            sessions,
            engine,
            renderer,
        }
    }

    /// Handles one inbound event. Returns `None` if the event was filtered out.
    pub async fn handle(&self, event: InboundEvent) -> Option<TurnOutcome> {
        let input = match intake::extract(&event) {
            Ok(input) => input,
            Err(reason) => {
                debug!(sender = event.sender_id.short(), %reason, "ignoring inbound event");
                return None;
            }
        };

        let span = info_span!("turn", turn = %TurnId::new(), sender = event.sender_id.short());
        Some(self.handle_input(&event, input).instrument(span).await)
    }

    async fn handle_input(&self, event: &InboundEvent, input: TurnInput) -> TurnOutcome {
        let sender = &event.sender_id;
        info!(
            target: "business",
            event = "message_received",
            sender = sender.short(),
            input = %input,
            "message received"
        );

        if let Err(e) = self.transport.mark_read(sender, &event.message_id).await {
            warn!(error = %e, "failed to mark message read");
        }
        self.set_presence(sender, Presence::Composing).await;

        let outcome = match self.run_turn(sender, &input).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(error = %e, "turn failed");
                self.apologize(sender).await;
                TurnOutcome::Failed
            }
        };

        self.set_presence(sender, Presence::Paused).await;
        outcome
    }

    async fn run_turn(
        &self,
        sender: &SenderId,
        input: &TurnInput,
    ) -> Result<TurnOutcome, Report<TurnError>> {
        let session_failed = || TurnError::Session {
            sender: sender.clone(),
        };
        let delivery_failed = || TurnError::Delivery {
            sender: sender.clone(),
        };

        let session = self
            .sessions
            .get_or_create(sender)
            .await
            .map_err(session_report)
            .context(session_failed())?;

        if session.is_first_time {
            let delivery = self
                .renderer
                .render(sender, self.engine.replies().welcome())
                .await
                .context(delivery_failed())?;
            self.sessions
                .patch(sender, SessionPatch::welcomed())
                .await
                .map_err(session_report)
                .context(session_failed())?;

            info!(target: "business", event = "welcome_sent", sender = sender.short(), "welcome sent");
            return Ok(TurnOutcome::Welcomed(delivery));
        }

        let reply = self.engine.respond(input, &session);
        let kind = reply.response.kind();
        let delivery = self
            .renderer
            .render(sender, reply.response)
            .await
            .context(delivery_failed())?;

        if let Some(patch) = reply.session_update {
            self.sessions
                .patch(sender, patch)
                .await
                .map_err(session_report)
                .context(session_failed())?;
        }

        info!(
            target: "business",
            event = "reply_sent",
            sender = sender.short(),
            kind,
            degraded = delivery == Delivery::Degraded,
            "reply sent"
        );
        Ok(TurnOutcome::Replied(delivery))
    }

    async fn apologize(&self, sender: &SenderId) {
        if let Err(e) = self.renderer.render(sender, self.engine.replies().apology()).await {
            error!(error = %e, "failed to send apology");
        }
    }

    async fn set_presence(&self, sender: &SenderId, presence: Presence) {
        if let Err(e) = self.transport.send_presence(Some(sender), presence).await {
            warn!(error = %e, ?presence, "failed to update presence");
        }
    }
}

fn session_report(e: SessionError) -> Report<SessionError> {
    e.into()
}
