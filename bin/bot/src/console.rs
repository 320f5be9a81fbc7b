//! Console transport for running the bot locally.
//!
//! Each stdin line is one inbound message: `<sender> <text>` for free text or
//! `<sender> #<selection_id>` for a tapped button or list row. A sender
//! without a domain is treated as an individual user. Outbound messages are
//! printed to stdout.

use async_trait::async_trait;
use nukkad_conversation::{Action, Section};
use nukkad_core::{Result, SenderId};
use nukkad_gateway::{AuthBlob, InboundEvent, Presence, Transport, TransportError, TransportEvent};
use std::fmt::Write as _;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

const USER_DOMAIN: &str = "@s.whatsapp.net";

/// Transport that talks to the local terminal.
pub struct ConsoleTransport {
    events: mpsc::Sender<TransportEvent>,
}

impl ConsoleTransport {
    /// Creates a console transport reporting lifecycle events on `events`.
    pub fn new(events: mpsc::Sender<TransportEvent>) -> Self {
        Self { events }
    }

    fn emit(&self, text: String) {
        println!("{text}");
    }
}

#[async_trait]
impl Transport for ConsoleTransport {
    async fn connect(&self, credentials: Option<AuthBlob>) -> Result<(), TransportError> {
        info!(has_credentials = credentials.is_some(), "console transport ready");
        self.events
            .send(TransportEvent::Opened)
            .await
            .map_err(|_| TransportError::NotConnected)?;
        Ok(())
    }

    async fn send_text(&self, to: &SenderId, body: &str) -> Result<(), TransportError> {
        self.emit(format_text(to, body));
        Ok(())
    }

    async fn send_buttons(
        &self,
        to: &SenderId,
        body: &str,
        actions: &[Action],
        footer: &str,
    ) -> Result<(), TransportError> {
        self.emit(format_buttons(to, body, actions, footer));
        Ok(())
    }

    async fn send_list(
        &self,
        to: &SenderId,
        body: &str,
        button_text: &str,
        sections: &[Section],
        footer: &str,
    ) -> Result<(), TransportError> {
        self.emit(format_list(to, body, button_text, sections, footer));
        Ok(())
    }

    async fn mark_read(&self, from: &SenderId, message_id: &str) -> Result<(), TransportError> {
        debug!(from = from.short(), message_id, "marked read");
        Ok(())
    }

    async fn send_presence(
        &self,
        to: Option<&SenderId>,
        presence: Presence,
    ) -> Result<(), TransportError> {
        debug!(to = to.map(SenderId::short), ?presence, "presence");
        Ok(())
    }
}

fn format_text(to: &SenderId, body: &str) -> String {
    format!("-> {}\n{body}\n", to.short())
}

fn format_buttons(to: &SenderId, body: &str, actions: &[Action], footer: &str) -> String {
    let mut out = format!("-> {}\n{body}\n", to.short());
    for action in actions {
        let _ = writeln!(out, "  [#{}] {}", action.id, action.label);
    }
    if !footer.is_empty() {
        let _ = writeln!(out, "_{footer}_");
    }
    out
}

fn format_list(
    to: &SenderId,
    body: &str,
    button_text: &str,
    sections: &[Section],
    footer: &str,
) -> String {
    let mut out = format!("-> {}\n{body}\n({button_text})\n", to.short());
    for section in sections {
        let _ = writeln!(out, "  *{}*", section.title);
        for row in &section.rows {
            if row.description.is_empty() {
                let _ = writeln!(out, "    [#{}] {}", row.id, row.title);
            } else {
                let _ = writeln!(out, "    [#{}] {} - {}", row.id, row.title, row.description);
            }
        }
    }
    if !footer.is_empty() {
        let _ = writeln!(out, "_{footer}_");
    }
    out
}

/// Parses one console line into an inbound event.
///
/// Returns `None` for blank lines and lines without a message after the sender.
fn parse_line(line: &str, message_id: String) -> Option<InboundEvent> {
    let (sender, content) = line.trim().split_once(char::is_whitespace)?;
    let content = content.trim();
    if content.is_empty() {
        return None;
    }

    let sender = if sender.contains('@') {
        SenderId::new(sender)
    } else {
        SenderId::new(format!("{sender}{USER_DOMAIN}"))
    };

    Some(match content.strip_prefix('#') {
        Some(selection) => InboundEvent::selection(message_id, sender, selection),
        None => InboundEvent::text(message_id, sender, content),
    })
}

/// Reads stdin until it closes, forwarding each line as a message event.
pub fn spawn_stdin_reader(events: mpsc::Sender<TransportEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut counter = 0_u64;
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => return,
                Err(e) => {
                    warn!(error = %e, "failed to read console input");
                    return;
                }
            };

            counter += 1;
            let message_id = format!("console-{counter}");
            let Some(event) = parse_line(&line, message_id) else {
                println!("usage: <sender> <text> | <sender> #<selection_id>");
                continue;
            };
            if events.send(TransportEvent::Message(event)).await.is_err() {
                return;
            }
        }
    })
}
