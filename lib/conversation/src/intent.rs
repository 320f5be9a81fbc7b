//! Free-text intent resolution.
//!
//! Commands are checked in declaration order and the first match wins, so
//! overlapping triggers resolve to the earlier command. Matching is keyword
//! based only.

use crate::catalog::Category;
use crate::replies::{Hint, Replies};
use crate::response::Reply;

/// What the user asked for in free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Greeting,
    MainMenu,
    Collection,
    Pricing,
    Order,
    Contact,
    Channel,
    Hours,
    Category(Category),
    Thanks,
}

impl Intent {
    /// Returns a short name for logging.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Greeting => "greeting",
            Self::MainMenu => "main_menu",
            Self::Collection => "collection",
            Self::Pricing => "pricing",
            Self::Order => "order",
            Self::Contact => "contact",
            Self::Channel => "channel",
            Self::Hours => "hours",
            Self::Category(_) => "category",
            Self::Thanks => "thanks",
        }
    }

    /// Builds the reply for this intent.
    #[must_use]
    pub fn reply(self, replies: &Replies) -> Reply {
        match self {
            Self::Greeting => replies.greeting(),
            Self::MainMenu => replies.main_menu(false),
            Self::Collection => replies.collection(),
            Self::Pricing => replies.pricing(),
            Self::Order => replies.order(),
            Self::Contact => replies.contact(),
            Self::Channel => replies.channel(),
            Self::Hours => replies.hours(),
            Self::Category(category) => replies.category_details(category),
            Self::Thanks => replies.thanks(),
        }
    }
}

/// A pattern that selects a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Matches when the phrase occurs anywhere in the input. This covers
    /// equality and prefix matches too.
    Phrase(&'static str),
    /// Matches only when it is the whole input. Used for menu digits and
    /// identifiers typed as text, which would otherwise match inside
    /// unrelated words.
    Shortcut(&'static str),
}

impl Trigger {
    fn matches(self, input: &str) -> bool {
        match self {
            Self::Phrase(phrase) => input.contains(phrase),
            Self::Shortcut(shortcut) => input == shortcut,
        }
    }
}

/// An intent together with the triggers that select it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Intent produced on match.
    pub intent: Intent,
    /// Any one of these selects the command.
    pub triggers: Vec<Trigger>,
}

impl Command {
    /// Creates a command.
    #[must_use]
    pub fn new(intent: Intent, triggers: Vec<Trigger>) -> Self {
        Self { intent, triggers }
    }

    fn matches(&self, input: &str) -> bool {
        self.triggers.iter().any(|t| t.matches(input))
    }
}

/// Outcome of resolving free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// A declared command matched.
    Matched(Intent),
    /// Nothing matched; carries a suggestion if a secondary keyword was found.
    Unrecognized(Option<Hint>),
}

const HINT_KEYWORDS: &[(&[&str], Hint)] = &[
    (&["price", "cost", "rate"], Hint::Pricing),
    (&["product", "kurti", "dress"], Hint::Collection),
    (&["order", "buy"], Hint::Order),
    (&["contact", "phone"], Hint::Contact),
];

/// Ordered list of commands.
#[derive(Debug, Clone)]
pub struct IntentResolver {
    commands: Vec<Command>,
}

impl IntentResolver {
    /// Creates a resolver over `commands`, checked in the given order.
    #[must_use]
    pub fn new(commands: Vec<Command>) -> Self {
        Self { commands }
    }

    /// Creates the resolver with the standard command set.
    #[must_use]
    pub fn standard() -> Self {
        use Trigger::{Phrase, Shortcut};

        let category = |c: Category, word: &'static str| {
            Command::new(Intent::Category(c), vec![Phrase(word)])
        };

        Self::new(vec![
            Command::new(
                Intent::Greeting,
                vec![
                    Phrase("hi"),
                    Phrase("hello"),
                    Phrase("hey"),
                    Phrase("namaste"),
                    Phrase("good morning"),
                    Phrase("good afternoon"),
                    Phrase("good evening"),
                ],
            ),
            Command::new(
                Intent::MainMenu,
                vec![
                    Phrase("menu"),
                    Phrase("options"),
                    Phrase("help"),
                    Phrase("start"),
                    Shortcut("0"),
                ],
            ),
            Command::new(
                Intent::Collection,
                vec![
                    Phrase("collection"),
                    Phrase("products"),
                    Phrase("kurtis"),
                    Phrase("catalog"),
                    Shortcut("1"),
                    Shortcut("btn_0"),
                ],
            ),
            Command::new(
                Intent::Pricing,
                vec![
                    Phrase("price"),
                    Phrase("pricing"),
                    Phrase("wholesale"),
                    Phrase("rates"),
                    Phrase("cost"),
                    Shortcut("2"),
                    Shortcut("btn_1"),
                ],
            ),
            Command::new(
                Intent::Order,
                vec![
                    Phrase("order"),
                    Phrase("buy"),
                    Phrase("purchase"),
                    Phrase("place order"),
                    Shortcut("3"),
                ],
            ),
            Command::new(
                Intent::Contact,
                vec![
                    Phrase("contact"),
                    Phrase("phone"),
                    Phrase("number"),
                    Phrase("address"),
                    Shortcut("4"),
                    Shortcut("btn_2"),
                ],
            ),
            Command::new(
                Intent::Channel,
                vec![
                    Phrase("channel"),
                    Phrase("group"),
                    Phrase("join"),
                    Phrase("community"),
                    Shortcut("5"),
                ],
            ),
            Command::new(
                Intent::Hours,
                vec![
                    Phrase("hours"),
                    Phrase("time"),
                    Phrase("timing"),
                    Phrase("open"),
                    Phrase("close"),
                    Shortcut("6"),
                ],
            ),
            category(Category::Cotton, "cotton"),
            category(Category::Rayon, "rayon"),
            category(Category::Georgette, "georgette"),
            category(Category::Silk, "silk"),
            Command::new(
                Intent::Thanks,
                vec![
                    Phrase("thank"),
                    Phrase("thanks"),
                    Phrase("thank you"),
                    Phrase("bye"),
                    Phrase("goodbye"),
                    Phrase("see you"),
                ],
            ),
        ])
    }

    /// Resolves `input` to the first matching command.
    #[must_use]
    pub fn resolve(&self, input: &str) -> Resolution {
        let normalized = input.trim().to_lowercase();

        match self.commands.iter().find(|c| c.matches(&normalized)) {
            Some(command) => Resolution::Matched(command.intent),
            None => Resolution::Unrecognized(hint_for(&normalized)),
        }
    }

    /// Resolves `input` and builds the reply, including the fallback.
    #[must_use]
    pub fn respond(&self, input: &str, replies: &Replies) -> Reply {
        match self.resolve(input) {
            Resolution::Matched(intent) => intent.reply(replies),
            Resolution::Unrecognized(hint) => replies.unknown_command(hint),
        }
    }

    /// Returns the number of declared commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns whether no commands are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Default for IntentResolver {
    fn default() -> Self {
        Self::standard()
    }
}

fn hint_for(input: &str) -> Option<Hint> {
    HINT_KEYWORDS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| input.contains(k)))
        .map(|(_, hint)| *hint)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::ResponseDescriptor;

    fn resolve(input: &str) -> Resolution {
        IntentResolver::standard().resolve(input)
    }

    #[test]
    fn greeting_matches_by_equality_and_containment() {
        assert_eq!(resolve("hi"), Resolution::Matched(Intent::Greeting));
        assert_eq!(resolve("  Hello there "), Resolution::Matched(Intent::Greeting));
        assert_eq!(resolve("namaste ji"), Resolution::Matched(Intent::Greeting));
    }

    #[test]
    fn digit_shortcuts_only_match_whole_input() {
        assert_eq!(resolve("2"), Resolution::Matched(Intent::Pricing));
        assert_eq!(resolve("6"), Resolution::Matched(Intent::Hours));
        assert_eq!(resolve("xyz123"), Resolution::Unrecognized(None));
    }

    #[test]
    fn earlier_command_wins_on_overlap() {
        // "shipping" contains "hi", so the greeting is declared first and wins.
        assert_eq!(resolve("shipping cost"), Resolution::Matched(Intent::Greeting));
        // "order price" matches both pricing and order; pricing comes first.
        assert_eq!(resolve("order price"), Resolution::Matched(Intent::Pricing));

        let resolver = IntentResolver::new(vec![
            Command::new(Intent::Order, vec![Trigger::Shortcut("7")]),
            Command::new(Intent::Thanks, vec![Trigger::Shortcut("7")]),
        ]);
        assert_eq!(resolver.resolve("7"), Resolution::Matched(Intent::Order));
    }

    #[test]
    fn typed_menu_identifiers_hit_main_menu_first() {
        assert_eq!(resolve("menu_pricing"), Resolution::Matched(Intent::MainMenu));
        assert_eq!(resolve("btn_1"), Resolution::Matched(Intent::Pricing));
    }

    #[test]
    fn category_words_resolve_to_their_category() {
        assert_eq!(
            resolve("georgette kurti"),
            Resolution::Matched(Intent::Category(Category::Georgette))
        );
        assert_eq!(resolve("SILK"), Resolution::Matched(Intent::Category(Category::Silk)));
    }

    #[test]
    fn unrecognized_input_carries_hint() {
        assert_eq!(resolve("dress"), Resolution::Unrecognized(Some(Hint::Collection)));
        assert_eq!(resolve("rate?"), Resolution::Unrecognized(Some(Hint::Pricing)));
    }

    #[test]
    fn greeting_reply_has_three_actions() {
        let reply = IntentResolver::standard().respond("hi", &Replies::default());
        match reply.response {
            ResponseDescriptor::ButtonMenu { actions, .. } => assert_eq!(actions.len(), 3),
            other => panic!("expected button menu, got {other:?}"),
        }
    }

    #[test]
    fn unknown_reply_offers_main_menu() {
        let reply = IntentResolver::standard().respond("xyz123", &Replies::default());
        assert!(reply.response.actions().iter().any(|a| a.id == "menu"));
    }

    #[test]
    fn text_category_records_selection() {
        let reply = IntentResolver::standard().respond("rayon", &Replies::default());
        let patch = reply.session_update.expect("patch");
        assert_eq!(patch.selected_category, Some(Category::Rayon));
    }
}
