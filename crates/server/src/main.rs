use std::{net::SocketAddr, str::FromStr, sync::Arc, time::Duration};

use anyhow::Context;
use axum::{
    extract::{rejection::PathRejection, FromRequestParts, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use catalog::Catalog;
use serde::Deserialize;
use server_api::{ApiContext, PhotoLibrary};
use shared::{
    domain::{Attraction, AttractionCategory, SessionId},
    error::{ApiError, ErrorCode},
    protocol::{
        CitySummary, CommentRequest, CreateSessionResponse, DestinationBoardView, FeedView,
        FlightListView, FlightSort, ItineraryView, MealSelectionRequest, PostView,
        ReactionRequest, SwipeEvent, SwipeView,
    },
};
use storage::SessionStore;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod app_state;
mod config;

use app_state::AppState;
use config::load_settings;

const MAX_BODY_BYTES: usize = 64 * 1024;

type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

/// `Path` whose rejection is a JSON `ApiError` like every other failure.
#[derive(FromRequestParts)]
#[from_request(via(Path), rejection(BadPath))]
struct ApiPath<T>(T);

struct BadPath(ApiError);

impl From<PathRejection> for BadPath {
    fn from(rejection: PathRejection) -> Self {
        Self(ApiError::validation(rejection.body_text()))
    }
}

impl IntoResponse for BadPath {
    fn into_response(self) -> Response {
        reject(self.0).into_response()
    }
}

#[derive(Debug, Deserialize)]
struct AttractionsQuery {
    /// Comma separated, e.g. `Museum,Shopping`.
    categories: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FlightsQuery {
    #[serde(default)]
    sort: FlightSort,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = load_settings()?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let catalog = match &settings.catalog_path {
        Some(path) => Catalog::load(path)
            .with_context(|| format!("failed to load catalog '{}'", path.display()))?,
        None => Catalog::builtin().context("bundled catalog is invalid")?,
    };
    info!(
        cities = catalog.cities().count(),
        images_dir = %settings.images_dir.display(),
        "catalog loaded"
    );

    let max_idle = i64::try_from(settings.session_idle_minutes)
        .ok()
        .and_then(chrono::Duration::try_minutes)
        .context("session_idle_minutes is out of range")?;

    let api = ApiContext {
        store: SessionStore::new(),
        catalog: Arc::new(catalog),
        photos: PhotoLibrary::new(&settings.images_dir),
    };
    spawn_eviction(
        api.store.clone(),
        Duration::from_secs(settings.eviction_interval_secs.max(1)),
        max_idle,
    );

    let app = build_router(Arc::new(AppState { api }));

    let addr: SocketAddr = settings
        .bind_addr
        .parse()
        .with_context(|| format!("invalid bind address '{}'", settings.bind_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}

fn spawn_eviction(store: SessionStore, every: Duration, max_idle: chrono::Duration) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        loop {
            ticker.tick().await;
            let evicted = store.evict_idle(max_idle).await;
            if evicted > 0 {
                info!(evicted, "idle sessions evicted");
            }
        }
    });
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/cities", get(http_list_cities))
        .route("/cities/:city/attractions", get(http_list_attractions))
        .route("/cities/:city/flights", get(http_list_flights))
        .route("/destinations", get(http_destination_board))
        .route("/sessions", post(http_create_session))
        .route("/sessions/:session_id", delete(http_end_session))
        .route("/sessions/:session_id/swipe/:city", get(http_swipe_view))
        .route(
            "/sessions/:session_id/swipe/:city/events",
            post(http_swipe_event),
        )
        .route(
            "/sessions/:session_id/itinerary/:city",
            get(http_itinerary_view),
        )
        .route(
            "/sessions/:session_id/itinerary/:city/meals",
            post(http_select_meal),
        )
        .route(
            "/sessions/:session_id/community/:city",
            get(http_community_feed),
        )
        .route(
            "/sessions/:session_id/community/:city/posts/:post/reactions",
            post(http_react_to_post),
        )
        .route(
            "/sessions/:session_id/community/:city/posts/:post/comments",
            post(http_comment_on_post),
        )
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::Validation => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn reject(err: ApiError) -> (StatusCode, Json<ApiError>) {
    (status_for(err.code), Json(err))
}

fn parse_categories(raw: Option<&str>) -> Result<Vec<AttractionCategory>, ApiError> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            AttractionCategory::from_str(part).map_err(|e| ApiError::validation(e.to_string()))
        })
        .collect()
}

async fn healthz() -> &'static str {
    "ok"
}

async fn http_list_cities(State(state): State<Arc<AppState>>) -> Json<Vec<CitySummary>> {
    Json(server_api::list_cities(&state.api).await)
}

async fn http_list_attractions(
    State(state): State<Arc<AppState>>,
    ApiPath(city): ApiPath<String>,
    Query(q): Query<AttractionsQuery>,
) -> ApiResult<Json<Vec<Attraction>>> {
    let categories = parse_categories(q.categories.as_deref()).map_err(reject)?;
    let attractions = server_api::list_attractions(&state.api, &city, categories)
        .await
        .map_err(reject)?;
    Ok(Json(attractions))
}

async fn http_list_flights(
    State(state): State<Arc<AppState>>,
    ApiPath(city): ApiPath<String>,
    Query(q): Query<FlightsQuery>,
) -> ApiResult<Json<FlightListView>> {
    let flights = server_api::list_flights(&state.api, &city, q.sort)
        .await
        .map_err(reject)?;
    Ok(Json(flights))
}

async fn http_destination_board(
    State(state): State<Arc<AppState>>,
) -> Json<DestinationBoardView> {
    Json(server_api::destination_board(&state.api).await)
}

async fn http_create_session(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<CreateSessionResponse>) {
    let created = server_api::create_session(&state.api).await;
    (StatusCode::CREATED, Json(created))
}

async fn http_end_session(
    State(state): State<Arc<AppState>>,
    ApiPath(session_id): ApiPath<SessionId>,
) -> ApiResult<StatusCode> {
    server_api::end_session(&state.api, session_id)
        .await
        .map_err(reject)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn http_swipe_view(
    State(state): State<Arc<AppState>>,
    ApiPath((session_id, city)): ApiPath<(SessionId, String)>,
) -> ApiResult<Json<SwipeView>> {
    let view = server_api::swipe_view(&state.api, session_id, &city)
        .await
        .map_err(reject)?;
    Ok(Json(view))
}

async fn http_swipe_event(
    State(state): State<Arc<AppState>>,
    ApiPath((session_id, city)): ApiPath<(SessionId, String)>,
    Json(event): Json<SwipeEvent>,
) -> ApiResult<Json<SwipeView>> {
    let view = server_api::apply_swipe_event(&state.api, session_id, &city, event)
        .await
        .map_err(reject)?;
    Ok(Json(view))
}

async fn http_itinerary_view(
    State(state): State<Arc<AppState>>,
    ApiPath((session_id, city)): ApiPath<(SessionId, String)>,
) -> ApiResult<Json<ItineraryView>> {
    let view = server_api::itinerary_view(&state.api, session_id, &city)
        .await
        .map_err(reject)?;
    Ok(Json(view))
}

async fn http_select_meal(
    State(state): State<Arc<AppState>>,
    ApiPath((session_id, city)): ApiPath<(SessionId, String)>,
    Json(req): Json<MealSelectionRequest>,
) -> ApiResult<Json<ItineraryView>> {
    let view = server_api::select_meal(&state.api, session_id, &city, req)
        .await
        .map_err(reject)?;
    Ok(Json(view))
}

async fn http_community_feed(
    State(state): State<Arc<AppState>>,
    ApiPath((session_id, city)): ApiPath<(SessionId, String)>,
) -> ApiResult<Json<FeedView>> {
    let feed = server_api::community_feed(&state.api, session_id, &city)
        .await
        .map_err(reject)?;
    Ok(Json(feed))
}

async fn http_react_to_post(
    State(state): State<Arc<AppState>>,
    ApiPath((session_id, city, post)): ApiPath<(SessionId, String, usize)>,
    Json(req): Json<ReactionRequest>,
) -> ApiResult<Json<PostView>> {
    let view = server_api::react_to_post(&state.api, session_id, &city, post, req)
        .await
        .map_err(reject)?;
    Ok(Json(view))
}

async fn http_comment_on_post(
    State(state): State<Arc<AppState>>,
    ApiPath((session_id, city, post)): ApiPath<(SessionId, String, usize)>,
    Json(req): Json<CommentRequest>,
) -> ApiResult<Json<PostView>> {
    let view = server_api::comment_on_post(&state.api, session_id, &city, post, req)
        .await
        .map_err(reject)?;
    Ok(Json(view))
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
