use std::cmp::Reverse;

use shared::{
    domain::{FlightOption, FlightRoute},
    protocol::{FlightLeg, FlightListView, FlightSort, FlightView},
};

fn view(option: &FlightOption) -> FlightView {
    FlightView {
        carrier: option.carrier.clone(),
        outbound: FlightLeg {
            departure: option.departure.clone(),
            arrival: option.arrival.clone(),
        },
        inbound: FlightLeg {
            departure: option.return_departure.clone(),
            arrival: option.return_arrival.clone(),
        },
        duration: option.duration.clone(),
        cost_inr: option.cost_inr,
        cancellation: option.cancellation.clone(),
        delays: option.delays,
        audience: option.audience.clone(),
        rating: option.rating,
        recommended: option.recommended,
        reason: option.recommended.then(|| option.reason.clone()),
    }
}

/// Options of `route` in the requested order. Ties keep catalog order.
pub fn flight_list(route: &FlightRoute, sort: FlightSort) -> FlightListView {
    let mut options: Vec<&FlightOption> = route.options.iter().collect();
    match sort {
        FlightSort::Listed => {}
        FlightSort::Cost => options.sort_by_key(|option| option.cost_inr),
        FlightSort::Rating => options.sort_by_key(|option| Reverse(option.rating)),
    }

    FlightListView {
        origin: route.origin.clone(),
        destination: route.destination.clone(),
        traveller_type: route.traveller_type.clone(),
        travel_start: route.travel_start.clone(),
        travel_end: route.travel_end.clone(),
        sort,
        options: options.into_iter().map(view).collect(),
    }
}

#[cfg(test)]
#[path = "tests/flights_tests.rs"]
mod tests;
