use std::{fmt, str::FromStr};

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// Lowercase slug identifying a city in the catalog (`"paris"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct CityId(String);

impl CityId {
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for CityId {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<CityId> for String {
    fn from(id: CityId) -> Self {
        id.0
    }
}

impl fmt::Display for CityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AttractionCategory {
    Sightseeing,
    Museum,
    Religious,
    Shopping,
    Temple,
}

impl AttractionCategory {
    pub const ALL: [AttractionCategory; 5] = [
        AttractionCategory::Museum,
        AttractionCategory::Religious,
        AttractionCategory::Shopping,
        AttractionCategory::Sightseeing,
        AttractionCategory::Temple,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AttractionCategory::Sightseeing => "Sightseeing",
            AttractionCategory::Museum => "Museum",
            AttractionCategory::Religious => "Religious",
            AttractionCategory::Shopping => "Shopping",
            AttractionCategory::Temple => "Temple",
        }
    }
}

impl fmt::Display for AttractionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown attraction category '{0}'")]
pub struct UnknownCategory(pub String);

impl FromStr for AttractionCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownCategory(trimmed.to_string()))
    }
}

/// Swipe-deck entry. Immutable once the catalog is loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attraction {
    pub name: String,
    pub category: AttractionCategory,
    pub rating: f32,
    pub reviews: u32,
    pub hours: String,
    pub summary: String,
    pub photos: Vec<String>,
}

impl Attraction {
    /// Highest valid photo index. Catalog validation guarantees `photos` is non-empty.
    pub fn max_photo_index(&self) -> usize {
        self.photos.len().saturating_sub(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaceCategory {
    Iconic,
    Museum,
    Historic,
    Shopping,
    Temple,
    Nature,
    Experience,
}

impl fmt::Display for PlaceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PlaceCategory::Iconic => "Iconic",
            PlaceCategory::Museum => "Museum",
            PlaceCategory::Historic => "Historic",
            PlaceCategory::Shopping => "Shopping",
            PlaceCategory::Temple => "Temple",
            PlaceCategory::Nature => "Nature",
            PlaceCategory::Experience => "Experience",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    #[serde(flatten)]
    pub location: LatLon,
    pub duration_minutes: u32,
    pub category: PlaceCategory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub name: String,
    #[serde(flatten)]
    pub location: LatLon,
    pub cuisine: String,
    pub price: String,
    pub stars: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopKind {
    Attraction,
    Restaurant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItineraryStop {
    pub name: String,
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    pub kind: StopKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItineraryDay {
    pub label: String,
    pub date: String,
    pub theme: String,
    pub color: String,
    pub stops: Vec<ItineraryStop>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Meal {
    Lunch,
    Dinner,
}

impl fmt::Display for Meal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Meal::Lunch => f.write_str("lunch"),
            Meal::Dinner => f.write_str("dinner"),
        }
    }
}

/// A day the planner knows is missing a meal, and the slot it would go in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealGap {
    pub day: String,
    pub meal: Meal,
    #[serde(with = "hhmm")]
    pub slot: NaiveTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DelayRisk {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightOption {
    pub carrier: String,
    pub departure: String,
    pub arrival: String,
    pub return_departure: String,
    pub return_arrival: String,
    pub duration: String,
    pub cost_inr: u32,
    pub cancellation: String,
    pub delays: DelayRisk,
    pub audience: String,
    pub rating: u8,
    pub recommended: bool,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightRoute {
    pub origin: String,
    pub destination: String,
    pub traveller_type: String,
    pub travel_start: String,
    pub travel_end: String,
    pub options: Vec<FlightOption>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostKind {
    Gem,
    Scam,
    Experience,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunityPost {
    pub author: String,
    pub content: String,
    pub kind: PostKind,
    pub likes: u32,
    pub useful: u32,
    pub not_useful: u32,
    #[serde(default)]
    pub comments: Vec<String>,
    pub posted_hours_ago: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelReminder {
    pub days_left: u32,
    pub temperature_range: String,
    pub packing: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Origin {
    pub name: String,
    #[serde(flatten)]
    pub location: LatLon,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    pub name: String,
    pub country: String,
    #[serde(flatten)]
    pub location: LatLon,
    pub visa: String,
    pub visa_time: String,
    pub funds: String,
    pub known_for: String,
    pub daily_cost: String,
    pub safety: u8,
    pub where_to_go: u8,
    pub catchment_radius_m: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DestinationBoard {
    pub origin: Origin,
    pub destinations: Vec<Destination>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhotoDirection {
    Prev,
    Next,
}

/// `HH:MM` wall-clock times, as written in catalog files and on the wire.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn parse(raw: &str) -> Result<NaiveTime, chrono::ParseError> {
        NaiveTime::parse_from_str(raw.trim(), FORMAT)
    }

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(|e| D::Error::custom(format!("invalid HH:MM time '{raw}': {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn city_ids_are_normalized_slugs() {
        assert_eq!(CityId::new("  Paris ").as_str(), "paris");

        let parsed: CityId = serde_json::from_value(serde_json::json!(" Bangkok")).expect("id");
        assert_eq!(parsed, CityId::new("bangkok"));
        assert_eq!(
            serde_json::to_value(&parsed).expect("json"),
            serde_json::json!("bangkok")
        );
    }

    #[test]
    fn categories_parse_case_insensitively() {
        assert_eq!(
            "museum".parse::<AttractionCategory>().expect("category"),
            AttractionCategory::Museum
        );
        assert!("Beach".parse::<AttractionCategory>().is_err());
    }

    #[test]
    fn stop_times_round_trip_as_hhmm() {
        let stop: ItineraryStop = serde_json::from_value(serde_json::json!({
            "name": "Eiffel Tower",
            "start": "09:00",
            "kind": "attraction",
        }))
        .expect("stop");
        assert_eq!(stop.start, NaiveTime::from_hms_opt(9, 0, 0).expect("time"));
        assert_eq!(
            serde_json::to_value(&stop).expect("json")["start"],
            serde_json::json!("09:00")
        );
    }
}
