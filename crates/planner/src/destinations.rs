//! Read model for the "where to go" board.
//!
//! Badge colours run along a red to green gradient over the where-to-go
//! index. Indices below 20 or above 75 fall outside the gradient and are
//! clamped to a valid channel.

use shared::{
    domain::{Destination, DestinationBoard, LatLon},
    protocol::{DestinationBoardView, DestinationView, RecommendationTier},
};

const GRADIENT_MIN: f64 = 20.0;
const GRADIENT_MAX: f64 = 75.0;
const SAFE_COLOR: &str = "#4ECDC4";
const UNSAFE_COLOR: &str = "#FF6B6B";

fn channel(from: f64, to: f64, norm: f64) -> u8 {
    // truncates like an integer cast, then clamps
    ((1.0 - norm) * from + norm * to).trunc().clamp(0.0, 255.0) as u8
}

/// `rgb(r,g,b)` badge colour for a where-to-go index.
pub fn index_color(index: i32) -> String {
    let norm = (f64::from(index) - GRADIENT_MIN) / (GRADIENT_MAX - GRADIENT_MIN);
    format!(
        "rgb({},{},{})",
        channel(255.0, 76.0, norm),
        channel(76.0, 175.0, norm),
        channel(76.0, 80.0, norm),
    )
}

pub fn safety_color(safety: u8) -> &'static str {
    if safety > 30 {
        SAFE_COLOR
    } else {
        UNSAFE_COLOR
    }
}

pub fn tier(where_to_go: u8) -> RecommendationTier {
    match where_to_go {
        70.. => RecommendationTier::HighlyRecommended,
        60..=69 => RecommendationTier::GoodChoice,
        _ => RecommendationTier::ConsiderCarefully,
    }
}

pub fn midpoint(a: LatLon, b: LatLon) -> LatLon {
    LatLon {
        lat: (a.lat + b.lat) / 2.0,
        lon: (a.lon + b.lon) / 2.0,
    }
}

fn view(origin: LatLon, destination: &Destination) -> DestinationView {
    let index = i32::from(destination.where_to_go);
    DestinationView {
        name: destination.name.clone(),
        country: destination.country.clone(),
        location: destination.location,
        visa: destination.visa.clone(),
        visa_time: destination.visa_time.clone(),
        funds: destination.funds.clone(),
        known_for: destination.known_for.clone(),
        daily_cost: destination.daily_cost.clone(),
        safety: destination.safety,
        safety_color: safety_color(destination.safety).to_string(),
        where_to_go: destination.where_to_go,
        badge_colors: [index_color(index), index_color(index - 5)],
        tier: tier(destination.where_to_go),
        flight_path: [origin, destination.location],
        midpoint: midpoint(origin, destination.location),
        catchment_radius_m: destination.catchment_radius_m,
    }
}

pub fn destination_board(board: &DestinationBoard) -> DestinationBoardView {
    let origin = board.origin.location;
    DestinationBoardView {
        origin: board.origin.clone(),
        destinations: board
            .destinations
            .iter()
            .map(|destination| view(origin, destination))
            .collect(),
    }
}

#[cfg(test)]
#[path = "tests/destinations_tests.rs"]
mod tests;
