//! Routing of one turn's input to a reply.

use crate::catalog::BusinessProfile;
use crate::intent::IntentResolver;
use crate::replies::Replies;
use crate::response::Reply;
use crate::selection::SelectionDispatcher;
use crate::session::UserSession;
use std::fmt;

/// Content extracted from an inbound event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnInput {
    /// Free text typed by the user.
    Text(String),
    /// Identifier of a tapped button or picked list row.
    Selection(String),
}

impl TurnInput {
    /// Returns the raw input string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text(s) | Self::Selection(s) => s,
        }
    }
}

impl fmt::Display for TurnInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Selection(id) => write!(f, "#{id}"),
        }
    }
}

/// Routes inputs to the intent resolver or the selection dispatcher.
#[derive(Debug, Clone, Default)]
pub struct ConversationEngine {
    replies: Replies,
    intents: IntentResolver,
    selections: SelectionDispatcher,
}

impl ConversationEngine {
    /// Creates an engine with the standard commands and selections.
    #[must_use]
    pub fn new(profile: BusinessProfile) -> Self {
        Self {
            replies: Replies::new(profile),
            intents: IntentResolver::standard(),
            selections: SelectionDispatcher::standard(),
        }
    }

    /// Returns the reply builder.
    #[must_use]
    pub fn replies(&self) -> &Replies {
        &self.replies
    }

    /// Builds the reply to `input` for `session`.
    #[must_use]
    pub fn respond(&self, input: &TurnInput, session: &UserSession) -> Reply {
        match input {
            TurnInput::Text(text) => self.intents.respond(text, &self.replies),
            TurnInput::Selection(id) => self.selections.dispatch(id, session, &self.replies),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MenuState;
    use nukkad_core::SenderId;

    fn session() -> UserSession {
        UserSession::new(SenderId::new("919800000001@s.whatsapp.net"))
    }

    #[test]
    fn text_and_selection_route_separately() {
        let engine = ConversationEngine::default();

        let typed = engine.respond(&TurnInput::Text("2".into()), &session());
        let tapped = engine.respond(&TurnInput::Selection("menu_pricing".into()), &session());

        assert_eq!(typed.response, tapped.response);

        // Selections never go through keyword matching.
        let unknown = engine.respond(&TurnInput::Selection("hi".into()), &session());
        assert_eq!(unknown, engine.replies().unknown_selection());
    }

    #[test]
    fn selection_reply_carries_menu_patch() {
        let engine = ConversationEngine::default();
        let reply = engine.respond(&TurnInput::Selection("menu_hours".into()), &session());
        assert_eq!(
            reply.session_update.and_then(|p| p.current_menu_state),
            Some(MenuState::Hours)
        );
    }

    #[test]
    fn display_marks_selections() {
        assert_eq!(TurnInput::Selection("menu".into()).to_string(), "#menu");
        assert_eq!(TurnInput::Text("hi".into()).to_string(), "hi");
    }
}
