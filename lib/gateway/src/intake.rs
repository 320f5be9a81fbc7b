//! Inbound event filtering and content extraction.

use nukkad_conversation::TurnInput;
use nukkad_core::SenderId;
use std::fmt;

/// A message as reported by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEvent {
    /// Transport message identifier, used to mark the message read.
    pub message_id: String,
    /// Chat the message came from.
    pub sender_id: SenderId,
    /// Sent by this account.
    pub is_self: bool,
    /// Sent in a group chat.
    pub is_group: bool,
    /// Typed text, if any.
    pub text_content: Option<String>,
    /// Identifier of a tapped button or list row, if any.
    pub selection_id: Option<String>,
}

impl InboundEvent {
    /// Creates a text message event from another user.
    #[must_use]
    pub fn text(
        message_id: impl Into<String>,
        sender_id: SenderId,
        text: impl Into<String>,
    ) -> Self {
        Self {
            message_id: message_id.into(),
            is_group: sender_id.is_group(),
            sender_id,
            is_self: false,
            text_content: Some(text.into()),
            selection_id: None,
        }
    }

    /// Creates a selection event from another user.
    #[must_use]
    pub fn selection(
        message_id: impl Into<String>,
        sender_id: SenderId,
        selection_id: impl Into<String>,
    ) -> Self {
        Self {
            message_id: message_id.into(),
            is_group: sender_id.is_group(),
            sender_id,
            is_self: false,
            text_content: None,
            selection_id: Some(selection_id.into()),
        }
    }
}

/// Why an inbound event was not turned into a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    FromSelf,
    FromGroup,
    NoContent,
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FromSelf => write!(f, "sent by this account"),
            Self::FromGroup => write!(f, "group message"),
            Self::NoContent => write!(f, "no text or selection"),
        }
    }
}

/// Extracts the turn input from `event`.
///
/// A selection takes precedence over text in the same event. Content is
/// trimmed, and blank content counts as absent.
///
/// # Errors
///
/// Returns the reason the event should be ignored.
pub fn extract(event: &InboundEvent) -> Result<TurnInput, DropReason> {
    if event.is_self {
        return Err(DropReason::FromSelf);
    }
    if event.is_group || event.sender_id.is_group() {
        return Err(DropReason::FromGroup);
    }

    let present = |s: &Option<String>| {
        s.as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };

    if let Some(id) = present(&event.selection_id) {
        return Ok(TurnInput::Selection(id));
    }
    present(&event.text_content)
        .map(TurnInput::Text)
        .ok_or(DropReason::NoContent)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> SenderId {
        SenderId::new("919800000001@s.whatsapp.net")
    }

    #[test]
    fn text_event_becomes_text_input() {
        let event = InboundEvent::text("m1", user(), "hello");
        assert_eq!(extract(&event), Ok(TurnInput::Text("hello".into())));
    }

    #[test]
    fn selection_wins_over_text() {
        let mut event = InboundEvent::selection("m1", user(), "menu_pricing");
        event.text_content = Some("hi".into());
        assert_eq!(extract(&event), Ok(TurnInput::Selection("menu_pricing".into())));
    }

    #[test]
    fn self_and_group_events_are_dropped() {
        let mut own = InboundEvent::text("m1", user(), "hi");
        own.is_self = true;
        assert_eq!(extract(&own), Err(DropReason::FromSelf));

        let group = InboundEvent::text("m2", SenderId::new("12345-678@g.us"), "hi");
        assert!(group.is_group);
        assert_eq!(extract(&group), Err(DropReason::FromGroup));

        let mut flagged = InboundEvent::text("m3", user(), "hi");
        flagged.is_group = true;
        assert_eq!(extract(&flagged), Err(DropReason::FromGroup));
    }

    #[test]
    fn empty_content_is_dropped() {
        let mut event = InboundEvent::text("m1", user(), "   ");
        assert_eq!(extract(&event), Err(DropReason::NoContent));

        event.text_content = None;
        event.selection_id = Some(String::new());
        assert_eq!(extract(&event), Err(DropReason::NoContent));
    }

    #[test]
    fn blank_selection_falls_back_to_text() {
        let mut event = InboundEvent::text("m1", user(), "pricing");
        event.selection_id = Some(" ".into());
        assert_eq!(extract(&event), Ok(TurnInput::Text("pricing".into())));
    }

    #[test]
    fn selection_ids_are_trimmed() {
        let event = InboundEvent::selection("m1", user(), " menu_pricing \n");
        assert_eq!(extract(&event), Ok(TurnInput::Selection("menu_pricing".into())));
    }
}
