use std::collections::BTreeSet;

use shared::domain::{Attraction, AttractionCategory};

/// Categories the user wants to see. Empty means the whole deck.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    categories: BTreeSet<AttractionCategory>,
}

impl FilterSelection {
    pub fn new(categories: impl IntoIterator<Item = AttractionCategory>) -> Self {
        Self {
            categories: categories.into_iter().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn categories(&self) -> impl Iterator<Item = AttractionCategory> + '_ {
        self.categories.iter().copied()
    }

    pub fn matches(&self, attraction: &Attraction) -> bool {
        self.categories.is_empty() || self.categories.contains(&attraction.category)
    }

    /// The visible deck, in catalog order.
    pub fn apply<'a>(&self, deck: &'a [Attraction]) -> Vec<&'a Attraction> {
        deck.iter().filter(|a| self.matches(a)).collect()
    }
}
