//! Structured outbound responses.
//!
//! A [`ResponseDescriptor`] describes what the user should see. The gateway
//! tries to deliver it natively (plain text, button set, or sectioned list)
//! and falls back to [`ResponseDescriptor::to_plain_text`] when the channel
//! rejects the rich form.

use crate::session::SessionPatch;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// A tappable button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// Selection identifier reported back when the button is tapped.
    pub id: String,
    /// Label shown on the button.
    pub label: String,
}

impl Action {
    /// Creates a new action.
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// A selectable row inside a list section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    /// Selection identifier reported back when the row is picked.
    pub id: String,
    /// Row title.
    pub title: String,
    /// Secondary line under the title.
    pub description: String,
}

impl Row {
    /// Creates a new row.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
        }
    }
}

/// A titled group of rows in a list menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Section heading.
    pub title: String,
    /// Rows in display order.
    pub rows: Vec<Row>,
}

impl Section {
    /// Creates a new section.
    #[must_use]
    pub fn new(title: impl Into<String>, rows: Vec<Row>) -> Self {
        Self {
            title: title.into(),
            rows,
        }
    }
}

/// What to send back to the user for one turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseDescriptor {
    /// Plain text message.
    Text {
        /// Message body.
        body: String,
    },
    /// Message with a row of buttons.
    ButtonMenu {
        /// Message body.
        body: String,
        /// Buttons in display order.
        actions: Vec<Action>,
        /// Small print under the buttons.
        footer: String,
    },
    /// Message with a list picker grouped into sections.
    ListMenu {
        /// Message body.
        body: String,
        /// Label of the button that opens the list.
        button_text: String,
        /// Sections in display order.
        sections: Vec<Section>,
        /// Small print under the list.
        footer: String,
    },
}

impl ResponseDescriptor {
    /// Creates a plain text response.
    #[must_use]
    pub fn text(body: impl Into<String>) -> Self {
        Self::Text { body: body.into() }
    }

    /// Creates a button menu response.
    #[must_use]
    pub fn buttons(body: impl Into<String>, actions: Vec<Action>, footer: impl Into<String>) -> Self {
        Self::ButtonMenu {
            body: body.into(),
            actions,
            footer: footer.into(),
        }
    }

    /// Creates a list menu response.
    #[must_use]
    pub fn list(
        body: impl Into<String>,
        button_text: impl Into<String>,
        sections: Vec<Section>,
        footer: impl Into<String>,
    ) -> Self {
        Self::ListMenu {
            body: body.into(),
            button_text: button_text.into(),
            sections,
            footer: footer.into(),
        }
    }

    /// Returns the message body regardless of variant.
    #[must_use]
    pub fn body(&self) -> &str {
        match self {
            Self::Text { body } | Self::ButtonMenu { body, .. } | Self::ListMenu { body, .. } => {
                body
            }
        }
    }

    /// Returns the buttons of a button menu, or an empty slice.
    #[must_use]
    pub fn actions(&self) -> &[Action] {
        match self {
            Self::ButtonMenu { actions, .. } => actions,
            _ => &[],
        }
    }

    /// Returns the short variant name, for logging.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text { .. } => "text",
            Self::ButtonMenu { .. } => "buttons",
            Self::ListMenu { .. } => "list",
        }
    }

    /// Converts a button menu with more than `max_buttons` actions into a
    /// single-section list menu. Every other response is returned unchanged.
    #[must_use]
    pub fn fit_button_limit(self, max_buttons: usize) -> Self {
        match self {
            Self::ButtonMenu {
                body,
                actions,
                footer,
            } if actions.len() > max_buttons => {
                let rows = actions
                    .into_iter()
                    .map(|action| Row::new(action.id, action.label, ""))
                    .collect();
                Self::ListMenu {
                    body,
                    button_text: "Choose an option".to_string(),
                    sections: vec![Section::new("Options", rows)],
                    footer,
                }
            }
            other => other,
        }
    }

    /// Renders the response as plain text.
    ///
    /// Every action and row becomes one numbered line, in original order.
    /// Lists number their rows as `section.row`.
    #[must_use]
    pub fn to_plain_text(&self) -> String {
        match self {
            Self::Text { body } => body.clone(),
            Self::ButtonMenu { body, actions, .. } => {
                let lines: Vec<String> = actions
                    .iter()
                    .enumerate()
                    .map(|(i, action)| format!("{}. {}", i + 1, action.label))
                    .collect();
                format!("{body}\n\n{}", lines.join("\n"))
            }
            Self::ListMenu { body, sections, .. } => {
                let mut text = format!("{body}\n\n");
                for (s, section) in sections.iter().enumerate() {
                    let _ = writeln!(text, "*{}:*", section.title);
                    for (r, row) in section.rows.iter().enumerate() {
                        let _ = writeln!(text, "{}.{} {}", s + 1, r + 1, row.title);
                    }
                    text.push('\n');
                }
                text
            }
        }
    }
}

/// A handler's answer: the response plus any session changes it implies.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    /// What to send.
    pub response: ResponseDescriptor,
    /// Changes to apply to the sender's session after delivery.
    pub session_update: Option<SessionPatch>,
}

impl Reply {
    /// Creates a reply that leaves the session untouched.
    #[must_use]
    pub fn new(response: ResponseDescriptor) -> Self {
        Self {
            response,
            session_update: None,
        }
    }

    /// Attaches a session update.
    #[must_use]
    pub fn with_session_update(mut self, patch: SessionPatch) -> Self {
        self.session_update = Some(patch);
        self
    }
}
