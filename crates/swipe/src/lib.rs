//! Swipe deck state machine.
//!
//! Every city a user browses gets a [`CityCursor`]: which attraction of the
//! filtered deck is on screen, which of its photos is shown, what has been
//! liked so far and whether the selection is finalized. Interactions arrive
//! as [`SwipeEvent`]s and are folded into a [`SwipeSession`] by [`reduce`].

mod cursor;
mod filter;
mod session;

pub use cursor::CityCursor;
pub use filter::FilterSelection;
pub use session::{reduce, Position, SwipeError, SwipeSession};
pub use shared::{domain::PhotoDirection, protocol::SwipeEvent};
