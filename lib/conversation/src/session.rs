//! Per-user conversational state.
//!
//! A session is created lazily the first time a sender is seen and lives in
//! memory for the rest of the process. Handlers never mutate sessions
//! directly: they return a [`SessionPatch`] which the orchestrator applies
//! once the turn's response has been sent.
//!
//! The store holds no lock across a turn. Two events from the same sender
//! that interleave will both read the same snapshot and the later patch
//! wins. Sessions are never evicted.

use crate::catalog::Category;
use crate::error::SessionError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use nukkad_core::SenderId;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Where the user currently is in the menu tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuState {
    #[default]
    Main,
    Collection,
    Pricing,
    Order,
    Contact,
    Channel,
    Hours,
    CategoryDetails,
    CategoryPricing,
    CategoryOrder,
    SizeChart,
    ColorOptions,
    OrderWhatsapp,
    QuickQuote,
    JoinChannel,
    JoinGroup,
    CatalogRequest,
    CallContact,
    LocationShare,
    BusinessCard,
    GetUpdates,
    QuickCatalog,
    QuickSupport,
}

/// Conversational state for one sender.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSession {
    /// Channel identity this session belongs to.
    pub id: SenderId,
    /// Set until the welcome message has been sent.
    pub is_first_time: bool,
    /// When the session was last touched by a patch.
    pub last_interaction: DateTime<Utc>,
    /// Current menu position.
    pub current_menu_state: MenuState,
    /// Category the user last looked at, if any.
    pub selected_category: Option<Category>,
    /// Free-form order details (for example `order_method`).
    pub order_data: HashMap<String, String>,
    /// Free-form user preferences.
    pub preferences: HashMap<String, String>,
}

impl UserSession {
    /// Creates a fresh session with defaults.
    #[must_use]
    pub fn new(id: SenderId) -> Self {
        Self {
            id,
            is_first_time: true,
            last_interaction: Utc::now(),
            current_menu_state: MenuState::Main,
            selected_category: None,
            order_data: HashMap::new(),
            preferences: HashMap::new(),
        }
    }

    /// Returns the selected category, falling back to the default one.
    #[must_use]
    pub fn category_or_default(&self) -> Category {
        self.selected_category.unwrap_or_default()
    }

    /// Merges a patch into this session and refreshes `last_interaction`.
    ///
    /// `last_interaction` never moves backwards, even if the wall clock does.
    pub fn apply(&mut self, patch: SessionPatch) {
        if let Some(first_time) = patch.is_first_time {
            self.is_first_time = first_time;
        }
        if let Some(state) = patch.current_menu_state {
            self.current_menu_state = state;
        }
        if let Some(category) = patch.selected_category {
            self.selected_category = Some(category);
        }
        self.order_data.extend(patch.order_data);
        self.preferences.extend(patch.preferences);
        self.last_interaction = self.last_interaction.max(Utc::now());
    }
}

/// A partial update to a [`UserSession`].
///
/// Unset fields leave the session unchanged; map entries are merged key by key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionPatch {
    /// New first-time flag.
    pub is_first_time: Option<bool>,
    /// New menu position.
    pub current_menu_state: Option<MenuState>,
    /// New selected category.
    pub selected_category: Option<Category>,
    /// Order details to merge.
    #[serde(default)]
    pub order_data: HashMap<String, String>,
    /// Preferences to merge.
    #[serde(default)]
    pub preferences: HashMap<String, String>,
}

impl SessionPatch {
    /// Creates a patch that only moves the menu position.
    #[must_use]
    pub fn menu(state: MenuState) -> Self {
        Self {
            current_menu_state: Some(state),
            ..Self::default()
        }
    }

    /// Creates a patch that marks the welcome as delivered.
    #[must_use]
    pub fn welcomed() -> Self {
        Self {
            is_first_time: Some(false),
            ..Self::default()
        }
    }

    /// Sets the selected category.
    #[must_use]
    pub fn with_category(mut self, category: Category) -> Self {
        self.selected_category = Some(category);
        self
    }

    /// Adds an order detail.
    #[must_use]
    pub fn with_order_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.order_data.insert(key.into(), value.into());
        self
    }
}

/// Storage for user sessions.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the sender's session, creating it with defaults if absent.
    async fn get_or_create(&self, id: &SenderId) -> Result<UserSession, SessionError>;

    /// Merges `patch` into the sender's session and returns the result.
    async fn patch(&self, id: &SenderId, patch: SessionPatch) -> Result<UserSession, SessionError>;

    /// Returns the number of sessions held.
    async fn len(&self) -> Result<usize, SessionError>;
}

/// Session store backed by an in-process map.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<SenderId, UserSession>>,
}

impl InMemorySessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get_or_create(&self, id: &SenderId) -> Result<UserSession, SessionError> {
        if let Some(session) = self.sessions.read().get(id) {
            return Ok(session.clone());
        }

        let mut sessions = self.sessions.write();
        let session = sessions
            .entry(id.clone())
            .or_insert_with(|| UserSession::new(id.clone()));
        Ok(session.clone())
    }

    async fn patch(&self, id: &SenderId, patch: SessionPatch) -> Result<UserSession, SessionError> {
        let mut sessions = self.sessions.write();
        let session = sessions
            .entry(id.clone())
            .or_insert_with(|| UserSession::new(id.clone()));
        session.apply(patch);
        Ok(session.clone())
    }

    async fn len(&self) -> Result<usize, SessionError> {
        Ok(self.sessions.read().len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sender() -> SenderId {
        SenderId::new("919800000001@s.whatsapp.net")
    }

    #[tokio::test]
    async fn creates_session_with_defaults() {
        let store = InMemorySessionStore::new();
        let session = store.get_or_create(&sender()).await.expect("session");

        assert!(session.is_first_time);
        assert_eq!(session.current_menu_state, MenuState::Main);
        assert!(session.selected_category.is_none());
        assert_eq!(store.len().await.expect("len"), 1);
    }

    #[tokio::test]
    async fn one_session_per_identity() {
        let store = InMemorySessionStore::new();
        store.get_or_create(&sender()).await.expect("first");
        store.get_or_create(&sender()).await.expect("second");
        store
            .get_or_create(&SenderId::new("other@s.whatsapp.net"))
            .await
            .expect("other");

        assert_eq!(store.len().await.expect("len"), 2);
    }

    #[tokio::test]
    async fn patch_is_visible_and_refreshes_interaction_time() {
        let store = InMemorySessionStore::new();
        let before = store.get_or_create(&sender()).await.expect("session");

        store
            .patch(&sender(), SessionPatch::menu(MenuState::Pricing))
            .await
            .expect("patch");
        let after = store.get_or_create(&sender()).await.expect("session");

        assert_eq!(after.current_menu_state, MenuState::Pricing);
        assert!(after.last_interaction >= before.last_interaction);
    }

    #[tokio::test]
    async fn patch_merges_maps_without_dropping_keys() {
        let store = InMemorySessionStore::new();
        store
            .patch(&sender(), SessionPatch::default().with_order_data("order_method", "whatsapp"))
            .await
            .expect("patch");
        let session = store
            .patch(&sender(), SessionPatch::default().with_order_data("action", "quote_request"))
            .await
            .expect("patch");

        assert_eq!(session.order_data.get("order_method").map(String::as_str), Some("whatsapp"));
        assert_eq!(session.order_data.get("action").map(String::as_str), Some("quote_request"));
    }

    #[test]
    fn unset_patch_fields_leave_session_unchanged() {
        let mut session = UserSession::new(sender());
        session.apply(SessionPatch::default().with_category(Category::Silk));
        session.apply(SessionPatch::menu(MenuState::CategoryOrder));

        assert_eq!(session.selected_category, Some(Category::Silk));
        assert_eq!(session.current_menu_state, MenuState::CategoryOrder);
        assert!(session.is_first_time);
    }

    #[test]
    fn last_interaction_never_moves_backwards() {
        let mut session = UserSession::new(sender());
        let future = Utc::now() + chrono::Duration::hours(1);
        session.last_interaction = future;

        session.apply(SessionPatch::welcomed());

        assert_eq!(session.last_interaction, future);
        assert!(!session.is_first_time);
    }

    #[test]
    fn menu_state_serializes_snake_case() {
        let json = serde_json::to_string(&MenuState::CategoryDetails).expect("serialize");
        assert_eq!(json, "\"category_details\"");
    }
}
