use std::collections::HashMap;

use shared::{
    domain::{Attraction, AttractionCategory, CityId, PhotoDirection},
    protocol::SwipeEvent,
};
use thiserror::Error;
use tracing::debug;

use crate::{cursor::CityCursor, filter::FilterSelection};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SwipeError {
    #[error("no attraction left to swipe in '{city}'")]
    Exhausted { city: CityId },
}

/// What the deck of a city currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum Position<'a> {
    /// The active filter hides every attraction of the city.
    NoMatches,
    /// The cursor is past the end of the filtered deck. Terminal.
    Exhausted,
    Viewing {
        index: usize,
        attraction: &'a Attraction,
        photo_index: usize,
    },
}

/// Swipe state of one user session across all the cities they browse.
///
/// The filter is shared by every city; changing it leaves the cursors where
/// they are, so a narrower filter can land a cursor past the end of its deck.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SwipeSession {
    filter: FilterSelection,
    cursors: HashMap<CityId, CityCursor>,
}

impl SwipeSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(&self) -> &FilterSelection {
        &self.filter
    }

    pub fn apply_filter(&mut self, categories: impl IntoIterator<Item = AttractionCategory>) {
        self.filter = FilterSelection::new(categories);
    }

    pub fn cursor(&self, city: &CityId) -> Option<&CityCursor> {
        self.cursors.get(city)
    }

    /// Cursor for `city`, created empty on first view.
    pub fn open(&mut self, city: &CityId) -> &CityCursor {
        self.cursor_mut(city)
    }

    fn cursor_mut(&mut self, city: &CityId) -> &mut CityCursor {
        self.cursors.entry(city.clone()).or_default()
    }

    pub fn position<'a>(&self, deck: &'a [Attraction], city: &CityId) -> Position<'a> {
        let visible = self.filter.apply(deck);
        if visible.is_empty() {
            return Position::NoMatches;
        }

        let (index, photo_index) = self
            .cursors
            .get(city)
            .map(|c| (c.current_index(), c.current_photo_index()))
            .unwrap_or_default();
        match visible.get(index) {
            Some(&attraction) => Position::Viewing {
                index,
                attraction,
                photo_index: photo_index.min(attraction.max_photo_index()),
            },
            None => Position::Exhausted,
        }
    }

    pub fn apply(
        &mut self,
        deck: &[Attraction],
        city: &CityId,
        event: SwipeEvent,
    ) -> Result<(), SwipeError> {
        debug!(city = %city, ?event, "applying swipe event");
        match event {
            SwipeEvent::Skip => {
                self.viewing(deck, city)?;
                self.cursor_mut(city).advance(None);
            }
            SwipeEvent::Like => {
                let attraction = self.viewing(deck, city)?;
                self.cursor_mut(city).advance(Some(&attraction.name));
            }
            SwipeEvent::PrevPhoto => {
                let attraction = self.viewing(deck, city)?;
                self.cursor_mut(city)
                    .shift_photo(PhotoDirection::Prev, attraction.max_photo_index());
            }
            SwipeEvent::NextPhoto => {
                let attraction = self.viewing(deck, city)?;
                self.cursor_mut(city)
                    .shift_photo(PhotoDirection::Next, attraction.max_photo_index());
            }
            SwipeEvent::Finalize => self.cursor_mut(city).finalize(),
            SwipeEvent::SetFilter { categories } => self.apply_filter(categories),
        }
        Ok(())
    }

    fn viewing<'a>(
        &self,
        deck: &'a [Attraction],
        city: &CityId,
    ) -> Result<&'a Attraction, SwipeError> {
        match self.position(deck, city) {
            Position::Viewing { attraction, .. } => Ok(attraction),
            Position::NoMatches | Position::Exhausted => Err(SwipeError::Exhausted {
                city: city.clone(),
            }),
        }
    }
}

/// `(session, event) -> session'`. A rejected event leaves no trace.
pub fn reduce(
    mut session: SwipeSession,
    deck: &[Attraction],
    city: &CityId,
    event: SwipeEvent,
) -> Result<SwipeSession, SwipeError> {
    session.apply(deck, city, event)?;
    Ok(session)
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
