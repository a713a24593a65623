//! Fixed service-location reference data served by `GET /locations`.
//!
//! This is static configuration, not store-backed content: the set is
//! compiled in, lives for the process lifetime, and is served verbatim.

use serde::Serialize;

/// A city the business serves, used for SEO content generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Location {
    /// URL-safe identifier, unique within the set.
    pub slug: &'static str,
    /// Display name.
    pub name: &'static str,
    /// County the city belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub county: Option<&'static str>,
}

const fn location(
    slug: &'static str,
    name: &'static str,
    county: &'static str,
) -> Location {
    Location {
        slug,
        name,
        county: Some(county),
    }
}

/// Every location the business serves, in display order.
pub const LOCATIONS: [Location; 16] = [
    location("fontana", "Fontana", "San Bernardino"),
    location("rancho-cucamonga", "Rancho Cucamonga", "San Bernardino"),
    location("ontario", "Ontario", "San Bernardino"),
    location("upland", "Upland", "San Bernardino"),
    location("rialto", "Rialto", "San Bernardino"),
    location("san-bernardino", "San Bernardino", "San Bernardino"),
    location("redlands", "Redlands", "San Bernardino"),
    location("colton", "Colton", "San Bernardino"),
    location("corona", "Corona", "Riverside"),
    location("riverside", "Riverside", "Riverside"),
    location("eastvale", "Eastvale", "Riverside"),
    location("norco", "Norco", "Riverside"),
    location("jurupa-valley", "Jurupa Valley", "Riverside"),
    location("chino", "Chino", "San Bernardino"),
    location("chino-hills", "Chino Hills", "San Bernardino"),
    location("yucaipa", "Yucaipa", "San Bernardino"),
];
