//! Response delivery with plain-text degradation.

use crate::config::RendererConfig;
use crate::error::DeliveryError;
use crate::transport::Transport;
use nukkad_conversation::ResponseDescriptor;
use nukkad_core::{Result, SenderId};
use rootcause::prelude::ResultExt;
use std::sync::Arc;
use tracing::{instrument, warn};

/// How a response reached the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Sent in its structured form.
    Native,
    /// The structured form was rejected; sent as numbered plain text.
    Degraded,
}

/// Turns response descriptors into transport sends.
pub struct Renderer {
    transport: Arc<dyn Transport>,
    max_buttons: usize,
}

impl Renderer {
    /// Creates a renderer.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, config: &RendererConfig) -> Self {
        Self {
            transport,
            max_buttons: config.max_buttons,
        }
    }

    /// Delivers `response` to `to`.
    ///
    /// Button menus larger than the configured limit are sent as lists. If
    /// the structured send fails, the plain-text form is sent instead.
    ///
    /// # Errors
    ///
    /// Returns an error if no form of the response could be sent.
    #[instrument(skip(self, response), fields(to = to.short(), kind = response.kind()))]
    pub async fn render(
        &self,
        to: &SenderId,
        response: ResponseDescriptor,
    ) -> Result<Delivery, DeliveryError> {
        let response = response.fit_button_limit(self.max_buttons);
        let failed = DeliveryError {
            recipient: to.clone(),
            kind: response.kind(),
        };

        let native = match &response {
            ResponseDescriptor::Text { body } => {
                return self
                    .transport
                    .send_text(to, body)
                    .await
                    .context(failed)
                    .map(|()| Delivery::Native);
            }
            ResponseDescriptor::ButtonMenu {
                body,
                actions,
                footer,
            } => self.transport.send_buttons(to, body, actions, footer).await,
            ResponseDescriptor::ListMenu {
                body,
                button_text,
                sections,
                footer,
            } => {
                self.transport
                    .send_list(to, body, button_text, sections, footer)
                    .await
            }
        };

        if let Err(e) = native {
            warn!(error = %e, "structured delivery failed, sending plain text");
            self.transport
                .send_text(to, &response.to_plain_text())
                .await
                .context(failed)?;
            return Ok(Delivery::Degraded);
        }
        Ok(Delivery::Native)
    }
}
