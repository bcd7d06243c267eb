use std::collections::BTreeMap;

use catalog::CityGuide;
use chrono::{Duration, NaiveTime};
use shared::{
    domain::{ItineraryDay, LatLon, StopKind},
    protocol::{
        DayPlan, DayRoute, ItineraryRow, ItineraryView, MealGapView, RouteMap, RouteMarker,
        RowCategory, TimeRange, TripSummary,
    },
};
use tracing::debug;

use crate::PlannerError;

/// Restaurants a session picked to fill the catalog's meal gaps, by day label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MealSelections {
    filled: BTreeMap<String, String>,
}

impl MealSelections {
    /// Fills (or re-fills) the meal gap of `day`.
    pub fn select(
        &mut self,
        guide: &CityGuide,
        day: &str,
        restaurant: &str,
    ) -> Result<(), PlannerError> {
        if !guide.meal_gaps.iter().any(|gap| gap.day == day) {
            return Err(PlannerError::NoMealGap(day.to_string()));
        }
        if guide.restaurant(restaurant).is_none() {
            return Err(PlannerError::UnknownRestaurant(restaurant.to_string()));
        }
        debug!(city = %guide.id, day, restaurant, "meal gap filled");
        self.filled.insert(day.to_string(), restaurant.to_string());
        Ok(())
    }

    pub fn filled(&self, day: &str) -> Option<&str> {
        self.filled.get(day).map(String::as_str)
    }
}

/// Wall-clock end of a visit; wraps past midnight.
pub fn end_time(start: NaiveTime, minutes: u32) -> NaiveTime {
    let (end, _) = start.overflowing_add_signed(Duration::minutes(i64::from(minutes)));
    end
}

fn row(guide: &CityGuide, name: &str, start: NaiveTime, kind: StopKind) -> Option<ItineraryRow> {
    let category = match kind {
        StopKind::Restaurant => RowCategory::Restaurant,
        StopKind::Attraction => RowCategory::Attraction(guide.place(name)?.category),
    };
    let duration_minutes = match kind {
        StopKind::Restaurant => catalog::MEAL_MINUTES,
        StopKind::Attraction => guide.duration_of(name),
    };
    Some(ItineraryRow {
        time_range: TimeRange {
            start,
            end: end_time(start, duration_minutes),
        },
        location: name.to_string(),
        duration_minutes,
        category,
    })
}

/// Rows of one day in start-time order, including any filled meal gap.
pub fn day_rows(guide: &CityGuide, day: &ItineraryDay, meals: &MealSelections) -> Vec<ItineraryRow> {
    let mut rows: Vec<_> = day
        .stops
        .iter()
        .filter_map(|stop| row(guide, &stop.name, stop.start, stop.kind))
        .collect();

    if let Some(restaurant) = meals.filled(&day.label) {
        let slots = guide.meal_gaps.iter().filter(|gap| gap.day == day.label);
        rows.extend(slots.filter_map(|gap| row(guide, restaurant, gap.slot, StopKind::Restaurant)));
    }

    rows.sort_by_key(|row| row.time_range.start);
    rows
}

pub fn summary(days: &[DayPlan]) -> TripSummary {
    let rows = days.iter().flat_map(|day| day.rows.iter());
    let mut summary = TripSummary {
        days: days.len(),
        attractions: 0,
        meals: 0,
        total_minutes: 0,
    };
    for row in rows {
        match row.category {
            RowCategory::Restaurant => summary.meals += 1,
            RowCategory::Attraction(_) => summary.attractions += 1,
        }
        summary.total_minutes += row.duration_minutes;
    }
    summary
}

fn location_of(guide: &CityGuide, name: &str) -> Option<LatLon> {
    guide
        .place(name)
        .map(|place| place.location)
        .or_else(|| guide.restaurant(name).map(|r| r.location))
}

/// Per-day polylines and stop markers for the map collaborator.
pub fn routes(guide: &CityGuide, days: &[DayPlan]) -> RouteMap {
    let routes: Vec<DayRoute> = days
        .iter()
        .map(|day| {
            let path: Vec<LatLon> = day
                .rows
                .iter()
                .filter_map(|row| location_of(guide, &row.location))
                .collect();
            let markers = path
                .iter()
                .enumerate()
                .map(|(idx, position)| RouteMarker {
                    label: format!("{} - Stop {}", day.label, idx + 1),
                    position: *position,
                })
                .collect();
            DayRoute {
                day: day.label.clone(),
                color: day.color.clone(),
                path,
                markers,
            }
        })
        .collect();

    let points: Vec<&LatLon> = routes.iter().flat_map(|route| route.path.iter()).collect();
    let center = if points.is_empty() {
        LatLon { lat: 0.0, lon: 0.0 }
    } else {
        let count = points.len() as f64;
        LatLon {
            lat: points.iter().map(|p| p.lat).sum::<f64>() / count,
            lon: points.iter().map(|p| p.lon).sum::<f64>() / count,
        }
    };

    RouteMap { center, routes }
}

pub fn itinerary_view(guide: &CityGuide, meals: &MealSelections) -> ItineraryView {
    let days: Vec<DayPlan> = guide
        .itinerary
        .iter()
        .map(|day| DayPlan {
            label: day.label.clone(),
            date: day.date.clone(),
            theme: day.theme.clone(),
            color: day.color.clone(),
            rows: day_rows(guide, day, meals),
        })
        .collect();

    let meal_gaps = guide
        .meal_gaps
        .iter()
        .map(|gap| MealGapView {
            day: gap.day.clone(),
            meal: gap.meal,
            slot: gap.slot,
            filled_by: meals.filled(&gap.day).map(str::to_string),
        })
        .collect();

    ItineraryView {
        city: guide.id.clone(),
        summary: summary(&days),
        routes: routes(guide, &days),
        meal_gaps,
        restaurants: guide.restaurants.clone(),
        days,
    }
}

#[cfg(test)]
#[path = "tests/itinerary_tests.rs"]
mod tests;
