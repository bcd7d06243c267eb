//! In-memory session store.
//!
//! Every browser tab (or CLI run) gets a [`TravelSession`] holding its own
//! swipe cursors, filled meal gaps and feed counters. Nothing is persisted;
//! sessions idle for longer than the configured window are evicted.

use std::{collections::HashMap, sync::Arc};

use catalog::CityGuide;
use chrono::{DateTime, Duration, Utc};
use planner::{community::Feed, itinerary::MealSelections};
use shared::domain::{CityId, SessionId};
use swipe::SwipeSession;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("unknown session {0}")]
    UnknownSession(SessionId),
}

#[derive(Debug, Clone)]
pub struct TravelSession {
    pub id: SessionId,
    pub swipe: SwipeSession,
    meals: HashMap<CityId, MealSelections>,
    feeds: HashMap<CityId, Feed>,
    pub created_at: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
}

impl TravelSession {
    fn new(id: SessionId, now: DateTime<Utc>) -> Self {
        Self {
            id,
            swipe: SwipeSession::new(),
            meals: HashMap::new(),
            feeds: HashMap::new(),
            created_at: now,
            last_seen: now,
        }
    }

    pub fn meals(&self, city: &CityId) -> Option<&MealSelections> {
        self.meals.get(city)
    }

    pub fn meals_mut(&mut self, city: &CityId) -> &mut MealSelections {
        self.meals.entry(city.clone()).or_default()
    }

    /// The session's feed for `guide`, seeded from the catalog on first use.
    pub fn feed_mut(&mut self, guide: &CityGuide) -> &mut Feed {
        self.feeds
            .entry(guide.id.clone())
            .or_insert_with(|| Feed::seeded(guide))
    }

    pub fn feed(&self, city: &CityId) -> Option<&Feed> {
        self.feeds.get(city)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, TravelSession>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self) -> (SessionId, DateTime<Utc>) {
        let id = SessionId::new();
        let now = Utc::now();
        self.sessions
            .write()
            .await
            .insert(id, TravelSession::new(id, now));
        info!(session_id = %id, "session created");
        (id, now)
    }

    pub async fn end(&self, id: SessionId) -> Result<(), StoreError> {
        match self.sessions.write().await.remove(&id) {
            Some(_) => {
                info!(session_id = %id, "session ended");
                Ok(())
            }
            None => Err(StoreError::UnknownSession(id)),
        }
    }

    /// Runs `f` against the session under the write lock and marks it as seen.
    pub async fn with_session<T>(
        &self,
        id: SessionId,
        f: impl FnOnce(&mut TravelSession) -> T,
    ) -> Result<T, StoreError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(&id)
            .ok_or(StoreError::UnknownSession(id))?;
        session.last_seen = Utc::now();
        Ok(f(session))
    }

    /// Read-only access; does not count as activity.
    pub async fn read<T>(
        &self,
        id: SessionId,
        f: impl FnOnce(&TravelSession) -> T,
    ) -> Result<T, StoreError> {
        let sessions = self.sessions.read().await;
        sessions
            .get(&id)
            .map(f)
            .ok_or(StoreError::UnknownSession(id))
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Drops sessions not seen for longer than `max_idle`. Returns how many went.
    pub async fn evict_idle(&self, max_idle: Duration) -> usize {
        self.evict_idle_at(max_idle, Utc::now()).await
    }

    pub async fn evict_idle_at(&self, max_idle: Duration, now: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| now - session.last_seen <= max_idle);
        let evicted = before - sessions.len();
        if evicted > 0 {
            debug!(evicted, remaining = sessions.len(), "idle sessions evicted");
        }
        evicted
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
