//! Reply screens.
//!
//! Each method builds one screen of the menu tree from the business profile
//! and the static catalog. Screens that move the user to a new menu position
//! carry the matching session patch.

use crate::catalog::{BusinessProfile, Category, MINIMUM_ORDER, SIZES};
use crate::response::{Action, Reply, ResponseDescriptor, Row, Section};
use crate::session::{MenuState, SessionPatch};
use chrono::Utc;
use rand::seq::SliceRandom;

/// Hint extracted from text that matched no command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hint {
    Pricing,
    Collection,
    Order,
    Contact,
}

impl Hint {
    fn suggestion(self) -> &'static str {
        match self {
            Self::Pricing => "💡 Try: Type 'pricing' for wholesale rates",
            Self::Collection => "💡 Try: Type 'collection' to see our products",
            Self::Order => "💡 Try: Type 'order' to place an order",
            Self::Contact => "💡 Try: Type 'contact' for our details",
        }
    }
}

const DISCOUNT_SLABS: &str = "• 12-24 pieces: Regular wholesale price\n\
• 25-49 pieces: 5% additional discount\n\
• 50-99 pieces: 8% additional discount\n\
• 100+ pieces: 12% additional discount";

const PAYMENT_TERMS: &str = "• 50% advance payment\n• 50% before dispatch\n• UPI, Bank Transfer accepted";

/// Builds reply screens for one business.
#[derive(Debug, Clone, Default)]
pub struct Replies {
    profile: BusinessProfile,
}

impl Replies {
    /// Creates a reply builder for `profile`.
    #[must_use]
    pub fn new(profile: BusinessProfile) -> Self {
        Self { profile }
    }

    /// Returns the business profile.
    #[must_use]
    pub fn profile(&self) -> &BusinessProfile {
        &self.profile
    }

    fn status(&self) -> &'static str {
        self.profile.status_badge(Utc::now())
    }

    /// First-contact welcome, sent once per sender.
    #[must_use]
    pub fn welcome(&self) -> ResponseDescriptor {
        let name = &self.profile.name;
        ResponseDescriptor::buttons(
            format!(
                "🙏 *Welcome to {name}!* 🙏\n\n\
                 🌟 *Premium Kurti Collection Wholesale* 🌟\n\n\
                 📱 *Quick Menu:*\n\
                 1️⃣ View Our Collection\n\
                 2️⃣ Wholesale Pricing\n\
                 3️⃣ Place Order\n\
                 4️⃣ Contact Information\n\
                 5️⃣ Join Our Channel\n\
                 6️⃣ Business Hours\n\n\
                 Simply type the number or use the buttons below to get started!"
            ),
            vec![
                Action::new("menu_collection", "👗 View Collection"),
                Action::new("menu_pricing", "💰 Wholesale Pricing"),
                Action::new("menu_contact", "📞 Contact Info"),
            ],
            format!("🌟 {name} - Your Wholesale Partner 🌟"),
        )
    }

    /// Greeting in one of a few variants.
    #[must_use]
    pub fn greeting(&self) -> Reply {
        let name = &self.profile.name;
        let variants = [
            format!("🙏 Namaste! Welcome to {name}. How can we help you today?"),
            format!("🙏 Welcome to {name}! How can we assist you with our kurti collection today?"),
            format!("🌟 Hello! Thank you for choosing {name}. What would you like to know about our wholesale kurtis?"),
        ];
        let body = variants
            .choose(&mut rand::thread_rng())
            .cloned()
            .unwrap_or_default();

        Reply::new(ResponseDescriptor::buttons(
            body,
            vec![
                Action::new("menu_collection", "👗 View Collection"),
                Action::new("menu_pricing", "💰 Pricing Info"),
                Action::new("menu_contact", "📞 Contact Us"),
            ],
            "Choose an option to continue",
        ))
    }

    /// Top-level menu as a sectioned list.
    #[must_use]
    pub fn main_menu(&self, returning: bool) -> Reply {
        let lead = if returning {
            "Welcome back! Select an option to continue:"
        } else {
            "Select an option from the menu below:"
        };

        Reply::new(ResponseDescriptor::list(
            format!("🏢 *{} - Main Menu*\n\n{lead}", self.profile.name),
            "📋 Select Option",
            vec![
                Section::new(
                    "🛍️ Products & Services",
                    vec![
                        Row::new("menu_collection", "👗 View Collection", "Browse our kurti categories"),
                        Row::new("menu_pricing", "💰 Wholesale Pricing", "Get pricing information"),
                        Row::new("menu_order", "🛒 Place Order", "Start your order process"),
                    ],
                ),
                Section::new(
                    "📞 Contact & Info",
                    vec![
                        Row::new("menu_contact", "📱 Contact Information", "Phone, address & details"),
                        Row::new("menu_channel", "📢 Join Our Channel", "Latest updates & offers"),
                        Row::new("menu_hours", "🕒 Business Hours", "Our working hours"),
                    ],
                ),
            ],
            format!("{} - Your Wholesale Partner", self.profile.name),
        ))
        .with_session_update(SessionPatch::menu(MenuState::Main))
    }

    /// Category picker.
    #[must_use]
    pub fn collection(&self) -> Reply {
        let rows = |categories: &[Category]| -> Vec<Row> {
            categories
                .iter()
                .map(|c| {
                    let details = c.details();
                    Row::new(
                        c.selection_id(),
                        c.name(),
                        format!("₹{}+ | {}", details.starting_price, details.tagline),
                    )
                })
                .collect()
        };

        Reply::new(ResponseDescriptor::list(
            format!(
                "👗 *{} - Product Collection*\n\nExplore our premium kurti collection with wholesale pricing:",
                self.profile.name
            ),
            "👗 Select Category",
            vec![
                Section::new("🌟 Premium Fabric Collection", rows(&Category::ALL[..4])),
                Section::new("🎨 Design Collection", rows(&Category::ALL[4..])),
            ],
            format!("📦 Min Order: {MINIMUM_ORDER} pieces | 🚚 Free shipping above ₹5000"),
        ))
        .with_session_update(SessionPatch::menu(MenuState::Collection))
    }

    /// Wholesale pricing overview.
    #[must_use]
    pub fn pricing(&self) -> Reply {
        Reply::new(ResponseDescriptor::buttons(
            format!(
                "💰 *Wholesale Pricing Information*\n\n📊 *Quantity-Based Pricing:*\n{DISCOUNT_SLABS}\n\n\
                 💳 *Payment Terms:*\n{PAYMENT_TERMS}\n\n\
                 🚚 *Shipping:*\n• Free shipping above ₹5000\n• 3-5 business days delivery"
            ),
            vec![
                Action::new("pricing_bulk", "📊 Bulk Discounts"),
                Action::new("pricing_payment", "💳 Payment Options"),
                Action::new("quick_quote", "💬 Get Quote"),
            ],
            "Best wholesale prices guaranteed!",
        ))
        .with_session_update(SessionPatch::menu(MenuState::Pricing))
    }

    /// Order process overview.
    #[must_use]
    pub fn order(&self) -> Reply {
        Reply::new(ResponseDescriptor::buttons(
            format!(
                "🛒 *Place Your Order*\n\n📋 *Easy Order Process:*\n\
                 1️⃣ Browse our collection\n2️⃣ Select categories & quantities (Min: {MINIMUM_ORDER} pieces)\n\
                 3️⃣ Get instant price quote\n4️⃣ Confirm order details\n5️⃣ Make advance payment (50%)\n\
                 6️⃣ We prepare your order\n7️⃣ Final payment & dispatch\n\n\
                 📞 *Quick Order:* {}",
                self.profile.phone
            ),
            vec![
                Action::new("order_whatsapp", "💬 Order via WhatsApp"),
                Action::new("order_call", "📞 Call to Order"),
                Action::new("order_catalog", "📋 Request Catalog"),
            ],
            "🚚 Fast delivery across India",
        ))
        .with_session_update(SessionPatch::menu(MenuState::Order))
    }

    /// Contact details.
    #[must_use]
    pub fn contact(&self) -> Reply {
        let p = &self.profile;
        Reply::new(ResponseDescriptor::buttons(
            format!(
                "📞 *Contact {}*\n\n🏢 *Business Information:*\n• Name: {}\n• Category: {}\n• Phone: {}\n\n\
                 🕒 *Business Hours:*\n• Monday to Sunday: {}\n• Currently: {}",
                p.name,
                p.name,
                p.category,
                p.phone,
                p.hours.window(),
                self.status()
            ),
            vec![
                Action::new("contact_call", "📞 Call Now"),
                Action::new("contact_location", "📍 Get Location"),
                Action::new("contact_business_card", "💼 Business Card"),
            ],
            "We're here to help you!",
        ))
        .with_session_update(SessionPatch::menu(MenuState::Contact))
    }

    /// Community channel and group links.
    #[must_use]
    pub fn channel(&self) -> Reply {
        Reply::new(ResponseDescriptor::buttons(
            format!(
                "📢 *Join Our Community*\n\n🔗 *WhatsApp Channel:*\n{}\n• Latest collection updates\n• Special offers & discounts\n\n\
                 👥 *WhatsApp Group:*\n{}\n• Connect with retailers\n• Get instant support",
                self.profile.channel_link, self.profile.group_link
            ),
            vec![
                Action::new("join_channel", "📢 Join Channel"),
                Action::new("join_group", "👥 Join Group"),
                Action::new("get_updates", "🔔 Get Updates"),
            ],
            format!("Stay connected with {}!", self.profile.name),
        ))
        .with_session_update(SessionPatch::menu(MenuState::Channel))
    }

    /// Opening hours and current status.
    #[must_use]
    pub fn hours(&self) -> Reply {
        let now = Utc::now();
        let hours = &self.profile.hours;
        Reply::new(ResponseDescriptor::buttons(
            format!(
                "🕒 *Business Hours*\n\n⏰ *Operating Hours:*\n• Monday to Sunday\n• {}\n\n\
                 🕐 *Current Time:* {}\n📍 *Status:* {}\n\n📞 *For Urgent Inquiries:* {}",
                hours.window(),
                hours.local_time(now),
                self.profile.status_badge(now),
                self.profile.phone
            ),
            vec![
                Action::new("contact_call", "📞 Call Now"),
                Action::new("quick_support", "💬 Quick Support"),
                Action::new("back_to_menu", "🏠 Main Menu"),
            ],
            "We're committed to serving you!",
        ))
        .with_session_update(SessionPatch::menu(MenuState::Hours))
    }

    /// Details for one category.
    #[must_use]
    pub fn category_details(&self, category: Category) -> Reply {
        let details = category.details();
        let features: Vec<String> = details.features.iter().map(|f| format!("• {f}")).collect();

        Reply::new(ResponseDescriptor::buttons(
            format!(
                "👗 *{category} Collection*\n\n💰 *Starting Price:* ₹{} (Wholesale)\n\n\
                 ✨ *Features:*\n{}\n\n📏 *Available Sizes:* {SIZES}\n🎨 *Colors:* {}+ options\n\
                 📦 *Minimum Order:* {MINIMUM_ORDER} pieces\n🚚 *Delivery:* 3-5 business days",
                details.starting_price,
                features.join("\n"),
                details.colour_count
            ),
            vec![
                Action::new("cat_pricing", "💰 Get Pricing"),
                Action::new("cat_order", "🛒 Order Now"),
                Action::new("cat_sizes", "📏 Size Chart"),
                Action::new("cat_colors", "🎨 Color Options"),
            ],
            format!("{category} - Premium Quality Guaranteed"),
        ))
        .with_session_update(
            SessionPatch::menu(MenuState::CategoryDetails).with_category(category),
        )
    }

    /// Discount slabs in detail.
    #[must_use]
    pub fn bulk_pricing(&self) -> Reply {
        Reply::new(ResponseDescriptor::buttons(
            format!(
                "📊 *Bulk Discount Structure*\n\n💰 *Quantity-Based Discounts:*\n{DISCOUNT_SLABS}\n\n\
                 💡 *Special Offers:*\n• Festival seasons: Extra 2-3% off\n• Repeat customers: Loyalty discounts"
            ),
            vec![
                Action::new("quick_quote", "💬 Get Custom Quote"),
                Action::new("pricing_payment", "💳 Payment Terms"),
                Action::new("back_to_pricing", "⬅️ Back to Pricing"),
            ],
            "Bigger orders = Better savings!",
        ))
    }

    /// Payment methods and structure.
    #[must_use]
    pub fn payment_terms(&self) -> Reply {
        Reply::new(ResponseDescriptor::buttons(
            format!(
                "💳 *Payment Terms & Options*\n\n💰 *Payment Structure:*\n{PAYMENT_TERMS}\n\n\
                 🏦 *Accepted Methods:*\n• UPI (Google Pay, PhonePe, Paytm)\n• Bank Transfer (NEFT/RTGS)\n• IMPS\n\n\
                 🏛️ GST invoice provided with every order."
            ),
            vec![
                Action::new("quick_quote", "💬 Get Payment Details"),
                Action::new("pricing_bulk", "📊 Bulk Discounts"),
                Action::new("back_to_pricing", "⬅️ Back to Pricing"),
            ],
            "Secure & convenient payment options",
        ))
    }

    /// Instructions for ordering over chat.
    #[must_use]
    pub fn whatsapp_order(&self) -> Reply {
        Reply::new(ResponseDescriptor::text(format!(
            "💬 *Order via WhatsApp*\n\n📝 *To place your order, please send us:*\n\
             1️⃣ Category, quantity and size preferences\n\
             2️⃣ Your business name, delivery address and contact number\n\
             3️⃣ Colour preferences and delivery timeline\n\n\
             📞 *Send your requirements to:* {}\n\n\
             ⚡ *Quick Template:*\n\"Hi, I want to order [quantity] pieces of [category] kurtis for my business [business name].\"",
            self.profile.phone
        )))
        .with_session_update(
            SessionPatch::menu(MenuState::OrderWhatsapp).with_order_data("order_method", "whatsapp"),
        )
    }

    /// Instructions for ordering by phone.
    #[must_use]
    pub fn call_order(&self) -> Reply {
        Reply::new(ResponseDescriptor::buttons(
            format!(
                "📞 *Call to Order*\n\n📱 Call: {}\n\n⏰ *Best Time to Call:*\n\
                 • Morning: 10:00 AM - 12:00 PM\n• Evening: 6:00 PM - 8:00 PM\n• Currently: {}",
                self.profile.phone,
                self.status()
            ),
            vec![
                Action::new("contact_call", "📞 Call Now"),
                Action::new("order_whatsapp", "💬 WhatsApp Order"),
                Action::new("back_to_menu", "🏠 Main Menu"),
            ],
            "Speak directly with our sales team!",
        ))
        .with_session_update(SessionPatch::default().with_order_data("order_method", "call"))
    }

    /// How to request the full catalog.
    #[must_use]
    pub fn catalog_request(&self) -> Reply {
        Reply::new(ResponseDescriptor::text(format!(
            "📋 *Request Detailed Catalog*\n\n📞 Call or WhatsApp: {}\n\n\
             📧 *What we'll send you:*\n• Product images\n• Complete price list\n• Size charts\n• Color options",
            self.profile.phone
        )))
        .with_session_update(SessionPatch::menu(MenuState::CatalogRequest))
    }

    /// Phone contact details.
    #[must_use]
    pub fn call_contact(&self) -> Reply {
        Reply::new(ResponseDescriptor::text(format!(
            "📞 *Call {}*\n\n📱 *Phone Number:* {}\n\n⏰ *Currently:* {}\n\n\
             💬 *What to Discuss:*\n• Product requirements\n• Bulk pricing\n• Custom orders\n• Delivery details",
            self.profile.name,
            self.profile.phone,
            self.status()
        )))
        .with_session_update(SessionPatch::menu(MenuState::CallContact))
    }

    /// Location and service area.
    #[must_use]
    pub fn location(&self) -> Reply {
        Reply::new(ResponseDescriptor::text(format!(
            "📍 *{} Location*\n\n🚚 *Service Areas:*\n• Pan India delivery\n• Wholesale supply nationwide\n\n\
             📞 *For exact location and directions:* {}",
            self.profile.name, self.profile.phone
        )))
        .with_session_update(SessionPatch::menu(MenuState::LocationShare))
    }

    /// Digital business card.
    #[must_use]
    pub fn business_card(&self) -> Reply {
        let p = &self.profile;
        Reply::new(ResponseDescriptor::text(format!(
            "💼 *{} - Business Card*\n\n• Category: {}\n• Phone: {}\n• Channel: {}\n• Group: {}\n• Hours: {}\n\n\
             🌟 \"Quality • Variety • Best Prices\"",
            p.name,
            p.category,
            p.phone,
            p.channel_link,
            p.group_link,
            p.hours.window()
        )))
        .with_session_update(SessionPatch::menu(MenuState::BusinessCard))
    }

    /// Channel invite.
    #[must_use]
    pub fn join_channel(&self) -> Reply {
        Reply::new(ResponseDescriptor::text(format!(
            "📢 *Join Our WhatsApp Channel*\n\n🔗 {}\n\n📱 *How to Join:*\n\
             1. Open the link above\n2. Tap \"Follow\"\n3. Enable notifications for updates",
            self.profile.channel_link
        )))
        .with_session_update(
            SessionPatch::menu(MenuState::JoinChannel).with_order_data("action", "channel_join"),
        )
    }

    /// Group invite.
    #[must_use]
    pub fn join_group(&self) -> Reply {
        Reply::new(ResponseDescriptor::text(format!(
            "👥 *Join Our WhatsApp Group*\n\n🔗 {}\n\n🤝 *Group Benefits:*\n\
             • Connect with other retailers\n• Get instant support\n• Share market insights",
            self.profile.group_link
        )))
        .with_session_update(SessionPatch::menu(MenuState::JoinGroup))
    }

    /// Update channels overview.
    #[must_use]
    pub fn get_updates(&self) -> Reply {
        Reply::new(ResponseDescriptor::buttons(
            "🔔 *Get Latest Updates*\n\n📢 *Stay Updated With:*\n• New collection launches\n\
             • Special wholesale offers\n• Festival season discounts",
            vec![
                Action::new("join_channel", "📢 Join Channel"),
                Action::new("join_group", "👥 Join Group"),
                Action::new("quick_support", "💬 Personal Updates"),
            ],
            "Choose your preferred update method",
        ))
        .with_session_update(SessionPatch::menu(MenuState::GetUpdates))
    }

    /// Pricing for the selected category.
    #[must_use]
    pub fn category_pricing(&self, category: Category) -> Reply {
        Reply::new(ResponseDescriptor::text(format!(
            "💰 *{category} - Pricing Details*\n\n💰 *Starting at:* ₹{} per piece\n\n\
             📊 *Wholesale Pricing:*\n{DISCOUNT_SLABS}\n\n📞 *For exact pricing:* {}",
            category.details().starting_price,
            self.profile.phone
        )))
        .with_session_update(SessionPatch::menu(MenuState::CategoryPricing))
    }

    /// Ordering options for the selected category.
    #[must_use]
    pub fn category_order(&self, category: Category) -> Reply {
        Reply::new(ResponseDescriptor::buttons(
            format!(
                "🛒 *Order {category}*\n\n📝 *Order Process:*\n1. Specify quantity (Min: {MINIMUM_ORDER} pieces)\n\
                 2. Choose size preferences\n3. Select color options\n4. Get instant quotation\n\
                 5. Confirm order and make advance payment"
            ),
            vec![
                Action::new("order_whatsapp", "💬 WhatsApp Order"),
                Action::new("order_call", "📞 Call to Order"),
                Action::new("quick_quote", "💰 Get Quote"),
            ],
            format!("{category} - Ready to ship!"),
        ))
        .with_session_update(SessionPatch::menu(MenuState::CategoryOrder))
    }

    /// Size chart shared by all categories.
    #[must_use]
    pub fn size_chart(&self) -> Reply {
        Reply::new(ResponseDescriptor::text(format!(
            "📏 *Size Chart - Kurtis*\n\n\
             • Small (S): Bust 36\"\n• Medium (M): Bust 38\"\n• Large (L): Bust 40\"\n\
             • Extra Large (XL): Bust 42\"\n• Double XL (XXL): Bust 44\"\n\
             Length: 44-46\" for all sizes\n\n📞 *Custom Sizes Available:* {}",
            self.profile.phone
        )))
        .with_session_update(SessionPatch::menu(MenuState::SizeChart))
    }

    /// Colour range for the selected category.
    #[must_use]
    pub fn colour_options(&self, category: Category) -> Reply {
        Reply::new(ResponseDescriptor::text(format!(
            "🎨 *{category} - Color Options*\n\n🌈 *{}+ colours, including:*\n\
             • Red, Maroon, Pink, Magenta\n• Blue, Navy, Sky Blue, Teal\n• Green, Olive, Mint\n\
             • Yellow, Orange, Peach\n• Black, White, Grey, Beige\n\n📞 *For color catalog:* {}",
            category.details().colour_count,
            self.profile.phone
        )))
        .with_session_update(SessionPatch::menu(MenuState::ColorOptions))
    }

    /// Quote request template.
    #[must_use]
    pub fn quick_quote(&self) -> Reply {
        Reply::new(ResponseDescriptor::text(format!(
            "💬 *Get Quick Quote*\n\n📝 *For instant pricing, send us:*\n\"QUOTE: [Category] - [Quantity] pieces\"\n\n\
             *Example:* \"QUOTE: Cotton Kurtis - 50 pieces\"\n\n📞 *Contact for Quote:* {}",
            self.profile.phone
        )))
        .with_session_update(
            SessionPatch::menu(MenuState::QuickQuote).with_order_data("action", "quote_request"),
        )
    }

    /// Fast catalog access.
    #[must_use]
    pub fn quick_catalog(&self) -> Reply {
        Reply::new(ResponseDescriptor::text(format!(
            "📋 *Quick Catalog Access*\n\n📱 Send \"CATALOG\" to: {}\n\n\
             🚀 Catalog shared within 30 minutes with product images and the wholesale price list.",
            self.profile.phone
        )))
        .with_session_update(SessionPatch::menu(MenuState::QuickCatalog))
    }

    /// Support options.
    #[must_use]
    pub fn quick_support(&self) -> Reply {
        Reply::new(ResponseDescriptor::buttons(
            format!(
                "💬 *Quick Support*\n\n🆘 *Need Help With:*\n• Product information\n• Pricing queries\n\
                 • Order assistance\n\n⏰ *Support Hours:* {} (Daily)\n• Emergency: {}",
                self.profile.hours.window(),
                self.profile.phone
            ),
            vec![
                Action::new("contact_call", "📞 Call Support"),
                Action::new("order_whatsapp", "💬 WhatsApp Help"),
                Action::new("join_group", "👥 Community Help"),
            ],
            "We're here to help you succeed!",
        ))
        .with_session_update(SessionPatch::menu(MenuState::QuickSupport))
    }

    /// Sign-off in one of a few variants.
    #[must_use]
    pub fn thanks(&self) -> Reply {
        let name = &self.profile.name;
        let variants = [
            format!("🙏 Thank you for choosing {name}! We appreciate your business."),
            format!("🙏 Thank you for your interest in {name}! We look forward to serving you."),
            "✨ It was our pleasure helping you! Feel free to contact us anytime for your kurti needs."
                .to_string(),
        ];
        let thanks = variants
            .choose(&mut rand::thread_rng())
            .cloned()
            .unwrap_or_default();

        Reply::new(ResponseDescriptor::buttons(
            format!("{thanks}\n\n👋 Thank you for visiting {name}! Have a great day!"),
            vec![
                Action::new("menu_collection", "👗 Browse Again"),
                Action::new("menu_contact", "📞 Contact Us"),
                Action::new("join_channel", "📢 Join Channel"),
            ],
            "Visit us again soon!",
        ))
    }

    /// Reply to text that matched no command.
    #[must_use]
    pub fn unknown_command(&self, hint: Option<Hint>) -> Reply {
        let mut body = "🤔 I didn't understand that. Please use our menu options or type 'menu' to see available options.".to_string();
        if let Some(hint) = hint {
            body.push_str("\n\n");
            body.push_str(hint.suggestion());
        }

        Reply::new(ResponseDescriptor::buttons(
            body,
            vec![
                Action::new("menu", "📋 Main Menu"),
                Action::new("menu_collection", "👗 View Collection"),
                Action::new("menu_contact", "📞 Contact Us"),
            ],
            "We're here to help!",
        ))
    }

    /// Reply to a selection identifier nobody registered.
    #[must_use]
    pub fn unknown_selection(&self) -> Reply {
        Reply::new(ResponseDescriptor::buttons(
            "🤔 *Unknown Option*\n\nSorry, that option is not available right now. Please choose from the menu below:",
            vec![
                Action::new("back_to_menu", "🏠 Main Menu"),
                Action::new("menu_collection", "👗 View Collection"),
                Action::new("quick_support", "💬 Get Help"),
            ],
            "We're here to help!",
        ))
    }

    /// Apology sent when a turn fails.
    #[must_use]
    pub fn apology(&self) -> ResponseDescriptor {
        ResponseDescriptor::text(format!(
            "🙏 Sorry, there was a technical issue. Please try again or contact us at {}",
            self.profile.phone
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn replies() -> Replies {
        Replies::new(BusinessProfile::default())
    }

    #[test]
    fn welcome_offers_three_buttons() {
        let welcome = replies().welcome();
        assert_eq!(welcome.actions().len(), 3);
        assert!(welcome.body().contains("Welcome to Nukkad Fabrics"));
    }

    #[test]
    fn collection_lists_every_category_once() {
        let reply = replies().collection();
        let ResponseDescriptor::ListMenu { sections, .. } = reply.response else {
            panic!("collection should be a list");
        };
        let ids: Vec<_> = sections
            .iter()
            .flat_map(|s| s.rows.iter().map(|r| r.id.clone()))
            .collect();
        let expected: Vec<_> = Category::ALL.iter().map(|c| c.selection_id().to_string()).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn category_details_records_the_category() {
        let reply = replies().category_details(Category::Rayon);
        let patch = reply.session_update.expect("patch");
        assert_eq!(patch.selected_category, Some(Category::Rayon));
        assert_eq!(patch.current_menu_state, Some(MenuState::CategoryDetails));
        assert!(reply.response.body().contains("Rayon Kurtis"));
    }

    #[test]
    fn unknown_command_appends_hint() {
        let reply = replies().unknown_command(Some(Hint::Order));
        assert!(reply.response.body().contains("Type 'order'"));
        assert_eq!(reply.response.actions()[0].id, "menu");
    }

    #[test]
    fn apology_mentions_phone() {
        assert!(replies().apology().body().contains("+91 78598 43042"));
    }
}
