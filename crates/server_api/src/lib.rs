mod photos;

use std::sync::Arc;

use catalog::{Catalog, CityGuide};
use planner::{
    community::{self, Feed},
    destinations, flights, itinerary, PlannerError,
};
use shared::{
    domain::{Attraction, AttractionCategory, CityId, SessionId},
    error::{ApiError, ErrorCode},
    protocol::{
        AttractionCard, CitySummary, CommentRequest, CreateSessionResponse, DestinationBoardView,
        FeedView, FlightListView, FlightSort, ItineraryView, MealSelectionRequest, PhotoView,
        PostView, ReactionRequest, SwipeEvent, SwipePosition, SwipeView,
    },
};
use storage::{SessionStore, StoreError};
use swipe::{FilterSelection, Position, SwipeError, SwipeSession};
use tracing::info;

pub use photos::PhotoLibrary;

#[derive(Clone)]
pub struct ApiContext {
    pub store: SessionStore,
    pub catalog: Arc<Catalog>,
    pub photos: PhotoLibrary,
}

pub async fn list_cities(ctx: &ApiContext) -> Vec<CitySummary> {
    ctx.catalog
        .cities()
        .map(|guide| {
            let mut categories: Vec<AttractionCategory> =
                guide.attractions.iter().map(|a| a.category).collect();
            categories.sort();
            categories.dedup();
            CitySummary {
                city: guide.id.clone(),
                name: guide.name.clone(),
                attraction_count: guide.attractions.len(),
                categories,
            }
        })
        .collect()
}

pub async fn list_attractions(
    ctx: &ApiContext,
    city: &str,
    categories: Vec<AttractionCategory>,
) -> Result<Vec<Attraction>, ApiError> {
    let guide = city_guide(ctx, city)?;
    Ok(FilterSelection::new(categories)
        .apply(&guide.attractions)
        .into_iter()
        .cloned()
        .collect())
}

pub async fn create_session(ctx: &ApiContext) -> CreateSessionResponse {
    let (session_id, created_at) = ctx.store.create().await;
    CreateSessionResponse {
        session_id,
        created_at,
    }
}

pub async fn end_session(ctx: &ApiContext, session_id: SessionId) -> Result<(), ApiError> {
    ctx.store.end(session_id).await.map_err(store_error)
}

pub async fn swipe_view(
    ctx: &ApiContext,
    session_id: SessionId,
    city: &str,
) -> Result<SwipeView, ApiError> {
    let guide = city_guide(ctx, city)?;
    let snapshot = ctx
        .store
        .with_session(session_id, |session| snapshot(&mut session.swipe, guide))
        .await
        .map_err(store_error)?;
    Ok(render(ctx, guide, snapshot).await)
}

pub async fn apply_swipe_event(
    ctx: &ApiContext,
    session_id: SessionId,
    city: &str,
    event: SwipeEvent,
) -> Result<SwipeView, ApiError> {
    let guide = city_guide(ctx, city)?;
    let snapshot = ctx
        .store
        .with_session(session_id, |session| {
            session.swipe.apply(&guide.attractions, &guide.id, event)?;
            Ok::<_, SwipeError>(snapshot(&mut session.swipe, guide))
        })
        .await
        .map_err(store_error)?
        .map_err(swipe_error)?;
    if snapshot.finalized {
        info!(%session_id, city = %guide.id, liked = ?snapshot.liked, "swipe finalized");
    }
    Ok(render(ctx, guide, snapshot).await)
}

pub async fn itinerary_view(
    ctx: &ApiContext,
    session_id: SessionId,
    city: &str,
) -> Result<ItineraryView, ApiError> {
    let guide = city_guide(ctx, city)?;
    ctx.store
        .with_session(session_id, |session| {
            itinerary::itinerary_view(guide, session.meals_mut(&guide.id))
        })
        .await
        .map_err(store_error)
}

pub async fn select_meal(
    ctx: &ApiContext,
    session_id: SessionId,
    city: &str,
    request: MealSelectionRequest,
) -> Result<ItineraryView, ApiError> {
    let guide = city_guide(ctx, city)?;
    ctx.store
        .with_session(session_id, |session| {
            let meals = session.meals_mut(&guide.id);
            meals.select(guide, &request.day, &request.restaurant)?;
            Ok::<_, PlannerError>(itinerary::itinerary_view(guide, meals))
        })
        .await
        .map_err(store_error)?
        .map_err(planner_error)
}

pub async fn community_feed(
    ctx: &ApiContext,
    session_id: SessionId,
    city: &str,
) -> Result<FeedView, ApiError> {
    let guide = city_guide(ctx, city)?;
    ctx.store
        .with_session(session_id, |session| {
            community::feed_view(guide, session.feed_mut(guide))
        })
        .await
        .map_err(store_error)
}

pub async fn react_to_post(
    ctx: &ApiContext,
    session_id: SessionId,
    city: &str,
    post: usize,
    request: ReactionRequest,
) -> Result<PostView, ApiError> {
    let guide = city_guide(ctx, city)?;
    ctx.store
        .with_session(session_id, |session| {
            let feed = session.feed_mut(guide);
            feed.react(post, request.reaction)?;
            post_view(feed, post)
        })
        .await
        .map_err(store_error)?
        .map_err(planner_error)
}

pub async fn comment_on_post(
    ctx: &ApiContext,
    session_id: SessionId,
    city: &str,
    post: usize,
    request: CommentRequest,
) -> Result<PostView, ApiError> {
    let guide = city_guide(ctx, city)?;
    ctx.store
        .with_session(session_id, |session| {
            let feed = session.feed_mut(guide);
            feed.comment(post, &request.text)?;
            post_view(feed, post)
        })
        .await
        .map_err(store_error)?
        .map_err(planner_error)
}

pub async fn list_flights(
    ctx: &ApiContext,
    city: &str,
    sort: FlightSort,
) -> Result<FlightListView, ApiError> {
    let guide = city_guide(ctx, city)?;
    Ok(flights::flight_list(&guide.flights, sort))
}

pub async fn destination_board(ctx: &ApiContext) -> DestinationBoardView {
    destinations::destination_board(ctx.catalog.destinations())
}

fn city_guide<'a>(ctx: &'a ApiContext, city: &str) -> Result<&'a CityGuide, ApiError> {
    ctx.catalog
        .city(&CityId::new(city))
        .ok_or_else(|| ApiError::not_found(format!("unknown city '{city}'")))
}

fn post_view(feed: &Feed, index: usize) -> Result<PostView, PlannerError> {
    feed.post_views()
        .into_iter()
        .nth(index)
        .ok_or(PlannerError::UnknownPost(index))
}

/// Everything a swipe view needs, copied out while the session lock is held.
struct SwipeSnapshot {
    filter: Vec<AttractionCategory>,
    visible_count: usize,
    liked: Vec<String>,
    finalized: bool,
    position: PendingPosition,
}

enum PendingPosition {
    NoMatches,
    Exhausted,
    Viewing {
        index: usize,
        attraction: Attraction,
        photo_index: usize,
    },
}

fn snapshot(session: &mut SwipeSession, guide: &CityGuide) -> SwipeSnapshot {
    let cursor = session.open(&guide.id).clone();
    let position = match session.position(&guide.attractions, &guide.id) {
        Position::NoMatches => PendingPosition::NoMatches,
        Position::Exhausted => PendingPosition::Exhausted,
        Position::Viewing {
            index,
            attraction,
            photo_index,
        } => PendingPosition::Viewing {
            index,
            attraction: attraction.clone(),
            photo_index,
        },
    };
    SwipeSnapshot {
        filter: session.filter().categories().collect(),
        visible_count: session.filter().apply(&guide.attractions).len(),
        liked: cursor.liked().to_vec(),
        finalized: cursor.is_finalized(),
        position,
    }
}

async fn render(ctx: &ApiContext, guide: &CityGuide, snapshot: SwipeSnapshot) -> SwipeView {
    let position = match snapshot.position {
        PendingPosition::NoMatches => SwipePosition::NoMatches,
        PendingPosition::Exhausted => SwipePosition::Exhausted,
        PendingPosition::Viewing {
            index,
            attraction,
            photo_index,
        } => {
            let file_name = attraction
                .photos
                .get(photo_index)
                .cloned()
                .unwrap_or_default();
            let status = ctx.photos.probe(&file_name).await;
            SwipePosition::Viewing {
                index,
                card: AttractionCard {
                    photo: PhotoView {
                        index: photo_index,
                        count: attraction.photos.len(),
                        file_name,
                        status,
                    },
                    can_go_prev: photo_index > 0,
                    can_go_next: photo_index < attraction.max_photo_index(),
                    name: attraction.name,
                    category: attraction.category,
                    rating: attraction.rating,
                    reviews: attraction.reviews,
                    hours: attraction.hours,
                    summary: attraction.summary,
                },
            }
        }
    };

    SwipeView {
        city: guide.id.clone(),
        filter: snapshot.filter,
        visible_count: snapshot.visible_count,
        position,
        liked: snapshot.liked,
        finalized: snapshot.finalized,
    }
}

fn store_error(err: StoreError) -> ApiError {
    ApiError::not_found(err.to_string())
}

fn swipe_error(err: SwipeError) -> ApiError {
    match err {
        SwipeError::Exhausted { .. } => ApiError::new(ErrorCode::Conflict, err.to_string()),
    }
}

fn planner_error(err: PlannerError) -> ApiError {
    match err {
        PlannerError::UnknownPost(_) => ApiError::not_found(err.to_string()),
        PlannerError::NoMealGap(_)
        | PlannerError::UnknownRestaurant(_)
        | PlannerError::EmptyComment
        | PlannerError::CommentTooLong(_) => ApiError::validation(err.to_string()),
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
