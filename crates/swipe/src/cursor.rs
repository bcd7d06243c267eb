use shared::domain::PhotoDirection;

/// Per-city position in the deck.
///
/// `current_index` only ever grows and `finalized` only ever flips to true.
/// Bounds against the deck are the session's job; the cursor itself knows
/// nothing about the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CityCursor {
    current_index: usize,
    current_photo_index: usize,
    liked: Vec<String>,
    finalized: bool,
}

impl CityCursor {
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_photo_index(&self) -> usize {
        self.current_photo_index
    }

    pub fn liked(&self) -> &[String] {
        &self.liked
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Moves to the next attraction and rewinds to its first photo.
    pub fn advance(&mut self, liked: Option<&str>) {
        self.current_index += 1;
        self.current_photo_index = 0;
        if let Some(name) = liked {
            self.liked.push(name.to_string());
        }
    }

    /// Steps through the photos of the attraction under the cursor. A stale
    /// index left by a filter change is clamped to `max_index` before stepping.
    pub fn shift_photo(&mut self, direction: PhotoDirection, max_index: usize) {
        let current = self.current_photo_index.min(max_index);
        self.current_photo_index = match direction {
            PhotoDirection::Prev => current.saturating_sub(1),
            PhotoDirection::Next => (current + 1).min(max_index),
        };
    }

    pub fn finalize(&mut self) {
        self.finalized = true;
    }
}

#[cfg(test)]
#[path = "tests/cursor_tests.rs"]
mod tests;
