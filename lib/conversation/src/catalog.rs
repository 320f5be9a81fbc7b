//! Business profile and product catalog.
//!
//! This is static content: contact details come from configuration, the
//! category details are compiled in.

use chrono::{DateTime, FixedOffset, Offset, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
    #[default]
    #[serde(rename = "Cotton Kurtis")]
    Cotton,
    #[serde(rename = "Rayon Kurtis")]
    Rayon,
    #[serde(rename = "Georgette Kurtis")]
    Georgette,
    #[serde(rename = "Silk Kurtis")]
    Silk,
    #[serde(rename = "Printed Kurtis")]
    Printed,
    #[serde(rename = "Embroidered Kurtis")]
    Embroidered,
    #[serde(rename = "Designer Kurtis")]
    Designer,
    #[serde(rename = "Casual Kurtis")]
    Casual,
}

/// Static description of a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryDetails {
    /// Starting wholesale price per piece, in rupees.
    pub starting_price: u32,
    /// Short selling points.
    pub features: &'static [&'static str],
    /// Number of colours stocked.
    pub colour_count: u32,
    /// One-line summary used in list rows.
    pub tagline: &'static str,
}

/// Sizes stocked for every category.
pub const SIZES: &str = "S, M, L, XL, XXL";

/// Minimum order quantity in pieces.
pub const MINIMUM_ORDER: u32 = 12;

impl Category {
    /// All categories in catalog order.
    pub const ALL: [Self; 8] = [
        Self::Cotton,
        Self::Rayon,
        Self::Georgette,
        Self::Silk,
        Self::Printed,
        Self::Embroidered,
        Self::Designer,
        Self::Casual,
    ];

    /// Returns the display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Cotton => "Cotton Kurtis",
            Self::Rayon => "Rayon Kurtis",
            Self::Georgette => "Georgette Kurtis",
            Self::Silk => "Silk Kurtis",
            Self::Printed => "Printed Kurtis",
            Self::Embroidered => "Embroidered Kurtis",
            Self::Designer => "Designer Kurtis",
            Self::Casual => "Casual Kurtis",
        }
    }

    /// Returns the selection identifier for this category's list row.
    #[must_use]
    pub const fn selection_id(self) -> &'static str {
        match self {
            Self::Cotton => "cat_cotton",
            Self::Rayon => "cat_rayon",
            Self::Georgette => "cat_georgette",
            Self::Silk => "cat_silk",
            Self::Printed => "cat_printed",
            Self::Embroidered => "cat_embroidered",
            Self::Designer => "cat_designer",
            Self::Casual => "cat_casual",
        }
    }

    /// Returns the static details for this category.
    #[must_use]
    pub const fn details(self) -> CategoryDetails {
        match self {
            Self::Cotton => CategoryDetails {
                starting_price: 180,
                features: &["100% pure cotton", "Breathable fabric", "Easy care", "Comfortable fit"],
                colour_count: 15,
                tagline: "Comfortable & Breathable",
            },
            Self::Rayon => CategoryDetails {
                starting_price: 220,
                features: &["Soft rayon fabric", "Elegant drape", "Wrinkle resistant", "Vibrant colours"],
                colour_count: 20,
                tagline: "Soft & Elegant",
            },
            Self::Georgette => CategoryDetails {
                starting_price: 280,
                features: &["Light weight", "Flowy texture", "Party wear", "Premium finish"],
                colour_count: 12,
                tagline: "Light & Flowy",
            },
            Self::Silk => CategoryDetails {
                starting_price: 350,
                features: &["Pure silk fabric", "Luxurious feel", "Festival special", "Rich texture"],
                colour_count: 10,
                tagline: "Luxurious & Rich",
            },
            Self::Printed => CategoryDetails {
                starting_price: 200,
                features: &["Trendy patterns", "Colour-fast prints", "Everyday wear"],
                colour_count: 25,
                tagline: "Trendy Patterns",
            },
            Self::Embroidered => CategoryDetails {
                starting_price: 320,
                features: &["Handwork details", "Festive look", "Premium threads"],
                colour_count: 12,
                tagline: "Handwork Details",
            },
            Self::Designer => CategoryDetails {
                starting_price: 450,
                features: &["Latest fashion", "Boutique finish", "Limited runs"],
                colour_count: 8,
                tagline: "Latest Fashion",
            },
            Self::Casual => CategoryDetails {
                starting_price: 160,
                features: &["Daily wear", "Easy wash", "Relaxed fit"],
                colour_count: 18,
                tagline: "Daily Wear",
            },
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Opening hours, evaluated in the business's local offset.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BusinessHours {
    /// Opening hour (inclusive), 0-23.
    #[serde(default = "default_open_hour")]
    pub open_hour: u32,
    /// Closing hour (exclusive), 0-23.
    #[serde(default = "default_close_hour")]
    pub close_hour: u32,
    /// Offset of local time from UTC, in minutes.
    #[serde(default = "default_utc_offset_minutes")]
    pub utc_offset_minutes: i32,
}

fn default_open_hour() -> u32 {
    9
}

fn default_close_hour() -> u32 {
    21
}

fn default_utc_offset_minutes() -> i32 {
    330
}

impl Default for BusinessHours {
    fn default() -> Self {
        Self {
            open_hour: default_open_hour(),
            close_hour: default_close_hour(),
            utc_offset_minutes: default_utc_offset_minutes(),
        }
    }
}

impl BusinessHours {
    fn offset(&self) -> FixedOffset {
        self.utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| Utc.fix())
    }

    /// Returns true if the business is open at `instant`.
    #[must_use]
    pub fn is_open_at(&self, instant: DateTime<Utc>) -> bool {
        let hour = instant.with_timezone(&self.offset()).hour();
        hour >= self.open_hour && hour < self.close_hour
    }

    /// Returns the local wall-clock time at `instant`, formatted for display.
    #[must_use]
    pub fn local_time(&self, instant: DateTime<Utc>) -> String {
        instant.with_timezone(&self.offset()).format("%I:%M %p").to_string()
    }

    /// Formats the opening window for display, e.g. `9:00 AM - 9:00 PM`.
    #[must_use]
    pub fn window(&self) -> String {
        format!("{} - {}", clock_label(self.open_hour), clock_label(self.close_hour))
    }
}

fn clock_label(hour: u32) -> String {
    let suffix = if hour < 12 { "AM" } else { "PM" };
    let twelve = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{twelve}:00 {suffix}")
}

/// Contact details and links for the business.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BusinessProfile {
    /// Trading name.
    #[serde(default = "default_name")]
    pub name: String,
    /// Line of business.
    #[serde(default = "default_category")]
    pub category: String,
    /// Phone number shown to customers.
    #[serde(default = "default_phone")]
    pub phone: String,
    /// Broadcast channel invite link.
    #[serde(default = "default_channel_link")]
    pub channel_link: String,
    /// Community group invite link.
    #[serde(default = "default_group_link")]
    pub group_link: String,
    /// Opening hours.
    #[serde(default)]
    pub hours: BusinessHours,
}

fn default_name() -> String {
    "Nukkad Fabrics".to_string()
}

fn default_category() -> String {
    "Apparel & Clothing".to_string()
}

fn default_phone() -> String {
    "+91 78598 43042".to_string()
}

fn default_channel_link() -> String {
    "https://whatsapp.com/channel/0029VaHAHDtGE56n45w8930k".to_string()
}

fn default_group_link() -> String {
    "https://chat.whatsapp.com/IwGIwsv02hsLByaidXJpXe".to_string()
}

impl Default for BusinessProfile {
    fn default() -> Self {
        Self {
            name: default_name(),
            category: default_category(),
            phone: default_phone(),
            channel_link: default_channel_link(),
            group_link: default_group_link(),
            hours: BusinessHours::default(),
        }
    }
}

impl BusinessProfile {
    /// Returns a status badge for `instant`.
    #[must_use]
    pub fn status_badge(&self, instant: DateTime<Utc>) -> &'static str {
        if self.hours.is_open_at(instant) {
            "🟢 OPEN"
        } else {
            "🔴 CLOSED"
        }
    }
}
