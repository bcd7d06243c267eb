use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    hhmm, AttractionCategory, CityId, DelayRisk, LatLon, Meal, Origin, PlaceCategory, PostKind,
    Restaurant, SessionId,
};

/// One user interaction with the swipe deck of a city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum SwipeEvent {
    Skip,
    Like,
    PrevPhoto,
    NextPhoto,
    Finalize,
    SetFilter {
        #[serde(default)]
        categories: Vec<AttractionCategory>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CitySummary {
    pub city: CityId,
    pub name: String,
    pub attraction_count: usize,
    pub categories: Vec<AttractionCategory>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSessionResponse {
    pub session_id: SessionId,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwipeView {
    pub city: CityId,
    pub filter: Vec<AttractionCategory>,
    pub visible_count: usize,
    pub position: SwipePosition,
    pub liked: Vec<String>,
    pub finalized: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SwipePosition {
    NoMatches,
    Exhausted,
    Viewing { index: usize, card: AttractionCard },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttractionCard {
    pub name: String,
    pub category: AttractionCategory,
    pub rating: f32,
    pub reviews: u32,
    pub hours: String,
    pub summary: String,
    pub photo: PhotoView,
    pub can_go_prev: bool,
    pub can_go_next: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoView {
    pub index: usize,
    pub count: usize,
    pub file_name: String,
    pub status: PhotoStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PhotoStatus {
    Available { width: u32, height: u32 },
    Missing,
    Unreadable { reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    #[serde(with = "hhmm")]
    pub end: NaiveTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "category", rename_all = "snake_case")]
pub enum RowCategory {
    Restaurant,
    Attraction(PlaceCategory),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItineraryRow {
    pub time_range: TimeRange,
    pub location: String,
    pub duration_minutes: u32,
    pub category: RowCategory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayPlan {
    pub label: String,
    pub date: String,
    pub theme: String,
    pub color: String,
    pub rows: Vec<ItineraryRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealGapView {
    pub day: String,
    pub meal: Meal,
    #[serde(with = "hhmm")]
    pub slot: NaiveTime,
    pub filled_by: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripSummary {
    pub days: usize,
    pub attractions: usize,
    pub meals: usize,
    pub total_minutes: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteMarker {
    pub label: String,
    pub position: LatLon,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayRoute {
    pub day: String,
    pub color: String,
    pub path: Vec<LatLon>,
    pub markers: Vec<RouteMarker>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteMap {
    pub center: LatLon,
    pub routes: Vec<DayRoute>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItineraryView {
    pub city: CityId,
    pub days: Vec<DayPlan>,
    pub meal_gaps: Vec<MealGapView>,
    pub restaurants: Vec<Restaurant>,
    pub summary: TripSummary,
    pub routes: RouteMap,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealSelectionRequest {
    pub day: String,
    pub restaurant: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reaction {
    Like,
    Useful,
    NotUseful,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReactionRequest {
    pub reaction: Reaction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentRequest {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostView {
    pub index: usize,
    pub author: String,
    pub content: String,
    pub kind: PostKind,
    pub likes: u32,
    pub useful: u32,
    pub not_useful: u32,
    pub comments: Vec<String>,
    pub posted: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderView {
    pub destination: String,
    pub days_left: u32,
    pub temperature_range: String,
    pub packing: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedView {
    pub city: CityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder: Option<ReminderView>,
    pub posts: Vec<PostView>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlightSort {
    #[default]
    Listed,
    Cost,
    Rating,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightLeg {
    pub departure: String,
    pub arrival: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightView {
    pub carrier: String,
    pub outbound: FlightLeg,
    pub inbound: FlightLeg,
    pub duration: String,
    pub cost_inr: u32,
    pub cancellation: String,
    pub delays: DelayRisk,
    pub audience: String,
    pub rating: u8,
    pub recommended: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightListView {
    pub origin: String,
    pub destination: String,
    pub traveller_type: String,
    pub travel_start: String,
    pub travel_end: String,
    pub sort: FlightSort,
    pub options: Vec<FlightView>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationTier {
    HighlyRecommended,
    GoodChoice,
    ConsiderCarefully,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DestinationView {
    pub name: String,
    pub country: String,
    pub location: LatLon,
    pub visa: String,
    pub visa_time: String,
    pub funds: String,
    pub known_for: String,
    pub daily_cost: String,
    pub safety: u8,
    pub safety_color: String,
    pub where_to_go: u8,
    pub badge_colors: [String; 2],
    pub tier: RecommendationTier,
    pub flight_path: [LatLon; 2],
    pub midpoint: LatLon,
    pub catchment_radius_m: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DestinationBoardView {
    pub origin: Origin,
    pub destinations: Vec<DestinationView>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swipe_events_use_tagged_json() {
        let like: SwipeEvent =
            serde_json::from_value(serde_json::json!({ "type": "like" })).expect("like");
        assert_eq!(like, SwipeEvent::Like);

        let filter: SwipeEvent = serde_json::from_value(serde_json::json!({
            "type": "set_filter",
            "payload": { "categories": ["Museum", "Shopping"] },
        }))
        .expect("filter");
        assert_eq!(
            filter,
            SwipeEvent::SetFilter {
                categories: vec![AttractionCategory::Museum, AttractionCategory::Shopping],
            }
        );
    }

    #[test]
    fn swipe_position_is_tagged_by_state() {
        let value = serde_json::to_value(SwipePosition::Exhausted).expect("json");
        assert_eq!(value, serde_json::json!({ "state": "exhausted" }));
    }
}
