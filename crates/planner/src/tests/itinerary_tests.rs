use super::*;
use catalog::Catalog;
use shared::domain::{CityId, PlaceCategory};

fn guide(city: &str) -> CityGuide {
    Catalog::builtin()
        .expect("builtin catalog")
        .city(&CityId::new(city))
        .expect("city")
        .clone()
}

fn hm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).expect("time")
}

#[test]
fn end_time_adds_the_visit_length() {
    assert_eq!(end_time(hm(9, 0), 90), hm(10, 30));
    assert_eq!(end_time(hm(23, 30), 60), hm(0, 30));
}

#[test]
fn paris_first_day_rows_are_typed() {
    let paris = guide("paris");
    let rows = day_rows(&paris, &paris.itinerary[0], &MealSelections::default());
    assert_eq!(rows.len(), 4);

    assert_eq!(rows[0].location, "Eiffel Tower");
    assert_eq!(rows[0].time_range.end, hm(10, 30));
    assert_eq!(rows[0].category, RowCategory::Attraction(PlaceCategory::Iconic));

    assert_eq!(rows[2].location, "Café de Flore");
    assert_eq!(rows[2].category, RowCategory::Restaurant);
    assert_eq!(rows[2].duration_minutes, 60);
    assert_eq!(rows[2].time_range.end, hm(14, 30));
}

#[test]
fn paris_summary_matches_the_planned_days() {
    let paris = guide("paris");
    let view = itinerary_view(&paris, &MealSelections::default());
    assert_eq!(
        view.summary,
        TripSummary {
            days: 3,
            attractions: 7,
            meals: 2,
            total_minutes: 945,
        }
    );
    assert_eq!(view.meal_gaps.len(), 1);
    assert_eq!(view.meal_gaps[0].filled_by, None);
}

#[test]
fn filling_the_lunch_gap_adds_a_row_in_time_order() {
    let paris = guide("paris");
    let mut meals = MealSelections::default();
    meals
        .select(&paris, "Day 3", "Joe's Pizza")
        .expect("select lunch");

    let view = itinerary_view(&paris, &meals);
    let day3 = &view.days[2];
    let names: Vec<_> = day3.rows.iter().map(|r| r.location.as_str()).collect();
    assert_eq!(
        names,
        vec!["Sacré-Cœur Basilica", "Joe's Pizza", "Versailles Palace"]
    );
    assert_eq!(day3.rows[1].time_range.start, hm(13, 0));
    assert_eq!(view.summary.meals, 3);
    assert_eq!(view.summary.total_minutes, 1005);
    assert_eq!(view.meal_gaps[0].filled_by.as_deref(), Some("Joe's Pizza"));
}

#[test]
fn reselecting_a_meal_replaces_the_previous_choice() {
    let paris = guide("paris");
    let mut meals = MealSelections::default();
    meals.select(&paris, "Day 3", "Joe's Pizza").expect("first");
    meals.select(&paris, "Day 3", "Marais Falafel").expect("second");
    assert_eq!(meals.filled("Day 3"), Some("Marais Falafel"));

    let view = itinerary_view(&paris, &meals);
    assert_eq!(view.summary.meals, 3);
}

#[test]
fn meal_selection_is_validated() {
    let paris = guide("paris");
    let mut meals = MealSelections::default();
    assert_eq!(
        meals.select(&paris, "Day 1", "Joe's Pizza"),
        Err(PlannerError::NoMealGap("Day 1".into()))
    );
    assert_eq!(
        meals.select(&paris, "Day 3", "Nowhere Diner"),
        Err(PlannerError::UnknownRestaurant("Nowhere Diner".into()))
    );
    assert_eq!(meals, MealSelections::default());
}

#[test]
fn bangkok_dinner_gap_lands_in_the_evening() {
    let bangkok = guide("bangkok");
    let mut meals = MealSelections::default();
    meals
        .select(&bangkok, "Day 3", "Blue Elephant")
        .expect("select dinner");
    let view = itinerary_view(&bangkok, &meals);
    let last = view.days[2].rows.last().expect("row");
    assert_eq!(last.location, "Blue Elephant");
    assert_eq!(last.time_range.start, hm(18, 0));
    assert_eq!(last.time_range.end, hm(19, 0));
}

#[test]
fn routes_follow_the_stops_of_each_day() {
    let paris = guide("paris");
    let view = itinerary_view(&paris, &MealSelections::default());
    let day1 = &view.routes.routes[0];
    assert_eq!(day1.color, "#FF6B6B");
    assert_eq!(day1.path.len(), 4);
    assert_eq!(day1.path[0], LatLon { lat: 48.8584, lon: 2.2945 });
    assert_eq!(day1.markers[3].label, "Day 1 - Stop 4");

    let center = view.routes.center;
    assert!((48.80..48.90).contains(&center.lat));
    assert!((2.10..2.40).contains(&center.lon));
}
