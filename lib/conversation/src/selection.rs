//! Structured selection dispatch.
//!
//! Button and list identifiers are resolved once, at construction, into a
//! closed [`Selection`] tag set. Lookup is exact match only.

use crate::catalog::Category;
use crate::replies::Replies;
use crate::response::Reply;
use crate::session::UserSession;
use std::collections::HashMap;
use tracing::{info, warn};

/// Every structured selection the bot understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selection {
    MainMenu,
    Collection,
    Pricing,
    Order,
    Contact,
    Channel,
    Hours,
    Category(Category),
    BulkPricing,
    PaymentTerms,
    WhatsappOrder,
    CallOrder,
    CatalogRequest,
    CallContact,
    Location,
    BusinessCard,
    JoinChannel,
    JoinGroup,
    GetUpdates,
    CategoryPricing,
    CategoryOrder,
    SizeChart,
    ColourOptions,
    QuickQuote,
    QuickCatalog,
    QuickSupport,
}

const REGISTRY: &[(&str, Selection)] = &[
    ("menu", Selection::MainMenu),
    ("back_to_menu", Selection::MainMenu),
    ("menu_collection", Selection::Collection),
    ("back_to_collection", Selection::Collection),
    ("menu_pricing", Selection::Pricing),
    ("back_to_pricing", Selection::Pricing),
    ("menu_order", Selection::Order),
    ("menu_contact", Selection::Contact),
    ("menu_channel", Selection::Channel),
    ("menu_hours", Selection::Hours),
    ("pricing_bulk", Selection::BulkPricing),
    ("pricing_payment", Selection::PaymentTerms),
    ("order_whatsapp", Selection::WhatsappOrder),
    ("order_call", Selection::CallOrder),
    ("order_catalog", Selection::CatalogRequest),
    ("contact_call", Selection::CallContact),
    ("contact_location", Selection::Location),
    ("contact_business_card", Selection::BusinessCard),
    ("join_channel", Selection::JoinChannel),
    ("join_group", Selection::JoinGroup),
    ("get_updates", Selection::GetUpdates),
    ("cat_pricing", Selection::CategoryPricing),
    ("cat_order", Selection::CategoryOrder),
    ("cat_sizes", Selection::SizeChart),
    ("cat_colors", Selection::ColourOptions),
    ("quick_quote", Selection::QuickQuote),
    ("quick_catalog", Selection::QuickCatalog),
    ("quick_support", Selection::QuickSupport),
];

impl Selection {
    /// Builds the reply for this selection.
    ///
    /// Category-scoped selections act on the session's selected category.
    #[must_use]
    pub fn reply(self, session: &UserSession, replies: &Replies) -> Reply {
        match self {
            Self::MainMenu => replies.main_menu(true),
            Self::Collection => replies.collection(),
            Self::Pricing => replies.pricing(),
            Self::Order => replies.order(),
            Self::Contact => replies.contact(),
            Self::Channel => replies.channel(),
            Self::Hours => replies.hours(),
            Self::Category(category) => replies.category_details(category),
            Self::BulkPricing => replies.bulk_pricing(),
            Self::PaymentTerms => replies.payment_terms(),
            Self::WhatsappOrder => replies.whatsapp_order(),
            Self::CallOrder => replies.call_order(),
            Self::CatalogRequest => replies.catalog_request(),
            Self::CallContact => replies.call_contact(),
            Self::Location => replies.location(),
            Self::BusinessCard => replies.business_card(),
            Self::JoinChannel => replies.join_channel(),
            Self::JoinGroup => replies.join_group(),
            Self::GetUpdates => replies.get_updates(),
            Self::CategoryPricing => replies.category_pricing(session.category_or_default()),
            Self::CategoryOrder => replies.category_order(session.category_or_default()),
            Self::SizeChart => replies.size_chart(),
            Self::ColourOptions => replies.colour_options(session.category_or_default()),
            Self::QuickQuote => replies.quick_quote(),
            Self::QuickCatalog => replies.quick_catalog(),
            Self::QuickSupport => replies.quick_support(),
        }
    }
}

/// Exact-match lookup from selection identifier to [`Selection`].
#[derive(Debug, Clone)]
pub struct SelectionDispatcher {
    registry: HashMap<&'static str, Selection>,
}

impl SelectionDispatcher {
    /// Creates a dispatcher with every standard selection registered.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry: HashMap<&'static str, Selection> = REGISTRY.iter().copied().collect();
        for category in Category::ALL {
            registry.insert(category.selection_id(), Selection::Category(category));
        }
        Self { registry }
    }

    /// Returns the selection registered under `id`.
    #[must_use]
    pub fn lookup(&self, id: &str) -> Option<Selection> {
        self.registry.get(id).copied()
    }

    /// Dispatches `id` for `session`. Unknown identifiers get the
    /// unknown-selection reply.
    #[must_use]
    pub fn dispatch(&self, id: &str, session: &UserSession, replies: &Replies) -> Reply {
        info!(
            target: "business",
            event = "button_click",
            sender = session.id.short(),
            selection = id,
            "button click"
        );

        match self.lookup(id) {
            Some(selection) => selection.reply(session, replies),
            None => {
                warn!(sender = session.id.short(), selection = id, "unknown selection");
                replies.unknown_selection()
            }
        }
    }

    /// Returns all registered identifiers.
    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.registry.keys().copied()
    }

    /// Returns the number of registered identifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// Returns whether nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }
}

impl Default for SelectionDispatcher {
    fn default() -> Self {
        Self::standard()
    }
}
