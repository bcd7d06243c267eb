//! Read models for the trip pages: itineraries, the community feed, flight
//! comparisons and the destinations board. Everything here is a pure
//! function of the catalog plus whatever small per-session state the page
//! keeps (filled meals, feed counters).

pub mod community;
pub mod destinations;
pub mod flights;
pub mod format;
pub mod itinerary;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlannerError {
    #[error("no meal is missing on '{0}'")]
    NoMealGap(String),
    #[error("unknown restaurant '{0}'")]
    UnknownRestaurant(String),
    #[error("post {0} does not exist")]
    UnknownPost(usize),
    #[error("comment must not be empty")]
    EmptyComment,
    #[error("comment is longer than {0} characters")]
    CommentTooLong(usize),
}
