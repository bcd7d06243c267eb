use std::{
    collections::{BTreeMap, HashSet},
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use shared::domain::{
    Attraction, CityId, CommunityPost, DestinationBoard, FlightRoute, ItineraryDay, MealGap,
    Place, Restaurant, StopKind, TravelReminder,
};
use thiserror::Error;
use tracing::debug;

const BUILTIN_CITIES: [(&str, &str); 2] = [
    ("paris.toml", include_str!("../data/paris.toml")),
    ("bangkok.toml", include_str!("../data/bangkok.toml")),
];
const BUILTIN_DESTINATIONS: &str = include_str!("../data/destinations.toml");

/// Meals have no catalog duration of their own.
pub const MEAL_MINUTES: u32 = 60;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse catalog {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("city '{0}' is declared more than once")]
    DuplicateCity(CityId),
    #[error("city '{city}': attraction '{name}' is declared more than once")]
    DuplicateAttraction { city: CityId, name: String },
    #[error("city '{city}': attraction '{name}' has no photos")]
    MissingPhotos { city: CityId, name: String },
    #[error("city '{city}': {day} stop '{stop}' is not a known {kind:?}")]
    UnknownStop {
        city: CityId,
        day: String,
        stop: String,
        kind: StopKind,
    },
    #[error("city '{city}': meal gap references unknown day '{day}'")]
    UnknownGapDay { city: CityId, day: String },
}

/// Everything the product knows about one city. Loaded once, never mutated.
#[derive(Debug, Clone, Deserialize)]
pub struct CityGuide {
    pub id: CityId,
    pub name: String,
    pub reminder: TravelReminder,
    pub attractions: Vec<Attraction>,
    #[serde(default)]
    pub places: Vec<Place>,
    #[serde(default)]
    pub restaurants: Vec<Restaurant>,
    #[serde(default)]
    pub itinerary: Vec<ItineraryDay>,
    #[serde(default)]
    pub meal_gaps: Vec<MealGap>,
    pub flights: FlightRoute,
    #[serde(default)]
    pub community: Vec<CommunityPost>,
}

impl CityGuide {
    pub fn place(&self, name: &str) -> Option<&Place> {
        self.places.iter().find(|place| place.name == name)
    }

    pub fn restaurant(&self, name: &str) -> Option<&Restaurant> {
        self.restaurants.iter().find(|r| r.name == name)
    }

    pub fn day(&self, label: &str) -> Option<&ItineraryDay> {
        self.itinerary.iter().find(|day| day.label == label)
    }

    /// Visit length of a stop: the place's own duration, otherwise a meal slot.
    pub fn duration_of(&self, name: &str) -> u32 {
        self.place(name)
            .map(|place| place.duration_minutes)
            .unwrap_or(MEAL_MINUTES)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let mut names = HashSet::new();
        for attraction in &self.attractions {
            if !names.insert(attraction.name.as_str()) {
                return Err(CatalogError::DuplicateAttraction {
                    city: self.id.clone(),
                    name: attraction.name.clone(),
                });
            }
            if attraction.photos.is_empty() {
                return Err(CatalogError::MissingPhotos {
                    city: self.id.clone(),
                    name: attraction.name.clone(),
                });
            }
        }

        for day in &self.itinerary {
            for stop in &day.stops {
                let known = match stop.kind {
                    StopKind::Attraction => self.place(&stop.name).is_some(),
                    StopKind::Restaurant => self.restaurant(&stop.name).is_some(),
                };
                if !known {
                    return Err(CatalogError::UnknownStop {
                        city: self.id.clone(),
                        day: day.label.clone(),
                        stop: stop.name.clone(),
                        kind: stop.kind,
                    });
                }
            }
        }

        if let Some(gap) = self.meal_gaps.iter().find(|gap| self.day(&gap.day).is_none()) {
            return Err(CatalogError::UnknownGapDay {
                city: self.id.clone(),
                day: gap.day.clone(),
            });
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    cities: Vec<CityGuide>,
    destinations: DestinationBoard,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    cities: BTreeMap<CityId, CityGuide>,
    destinations: DestinationBoard,
}

impl Catalog {
    /// The catalog compiled into the binary (Paris, Bangkok and the destination board).
    pub fn builtin() -> Result<Self, CatalogError> {
        let cities = BUILTIN_CITIES
            .iter()
            .map(|(origin, raw)| parse::<CityGuide>(raw, origin))
            .collect::<Result<Vec<_>, _>>()?;
        let destinations = parse::<DestinationBoard>(BUILTIN_DESTINATIONS, "destinations.toml")?;
        Self::from_parts(cities, destinations)
    }

    /// Single-file catalog with `[[cities]]` and `[destinations]` tables.
    pub fn from_toml_str(raw: &str) -> Result<Self, CatalogError> {
        let file = parse::<CatalogFile>(raw, "document")?;
        Self::from_parts(file.cities, file.destinations)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file = parse::<CatalogFile>(&raw, &format!("'{}'", path.display()))?;
        Self::from_parts(file.cities, file.destinations)
    }

    fn from_parts(
        guides: Vec<CityGuide>,
        destinations: DestinationBoard,
    ) -> Result<Self, CatalogError> {
        let mut cities = BTreeMap::new();
        for guide in guides {
            guide.validate()?;
            let id = guide.id.clone();
            if cities.insert(id.clone(), guide).is_some() {
                return Err(CatalogError::DuplicateCity(id));
            }
        }
        debug!(cities = cities.len(), "catalog loaded");
        Ok(Self {
            cities,
            destinations,
        })
    }

    pub fn city(&self, id: &CityId) -> Option<&CityGuide> {
        self.cities.get(id)
    }

    pub fn cities(&self) -> impl Iterator<Item = &CityGuide> {
        self.cities.values()
    }

    pub fn destinations(&self) -> &DestinationBoard {
        &self.destinations
    }
}

fn parse<T: for<'de> Deserialize<'de>>(raw: &str, origin: &str) -> Result<T, CatalogError> {
    toml::from_str(raw).map_err(|source| CatalogError::Parse {
        origin: origin.to_string(),
        source,
    })
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
