use super::*;
use catalog::Catalog;
use shared::domain::CityId;

fn route(city: &str) -> FlightRoute {
    Catalog::builtin()
        .expect("builtin catalog")
        .city(&CityId::new(city))
        .expect("city")
        .flights
        .clone()
}

fn carriers(view: &FlightListView) -> Vec<&str> {
    view.options.iter().map(|o| o.carrier.as_str()).collect()
}

#[test]
fn listed_order_is_catalog_order() {
    let view = flight_list(&route("paris"), FlightSort::default());
    assert_eq!(
        carriers(&view),
        vec!["Air India", "Emirates", "Air France", "Lufthansa"]
    );
    assert_eq!(view.sort, FlightSort::Listed);
}

#[test]
fn cost_sort_is_cheapest_first() {
    let view = flight_list(&route("paris"), FlightSort::Cost);
    assert_eq!(
        carriers(&view),
        vec!["Air India", "Air France", "Lufthansa", "Emirates"]
    );
}

#[test]
fn rating_sort_is_best_first() {
    let view = flight_list(&route("bangkok"), FlightSort::Rating);
    assert_eq!(
        carriers(&view),
        vec!["Singapore Airlines", "Thai Airways", "IndiGo"]
    );
}

#[test]
fn only_recommended_options_carry_a_reason() {
    let view = flight_list(&route("paris"), FlightSort::Listed);
    assert!(view.options[0].recommended);
    assert!(view.options[0]
        .reason
        .as_deref()
        .is_some_and(|reason| reason.starts_with("Full carrier")));
    assert!(!view.options[2].recommended);
    assert_eq!(view.options[2].reason, None);
}

#[test]
fn legs_split_outbound_and_return() {
    let paris = route("paris");
    let view = flight_list(&paris, FlightSort::Listed);
    let first = &view.options[0];
    assert_eq!(first.outbound.departure, paris.options[0].departure);
    assert_eq!(first.inbound.arrival, paris.options[0].return_arrival);
}
