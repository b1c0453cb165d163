// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes used by the single-page app.

use crate::error::{AppError, Result};
use crate::models::{DestinationDetail, MapView, Place, Review, ReviewDraft, VoteRecord};
use crate::services::itinerary::{group_by_day, Itinerary};
use crate::services::RenderOutcome;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

const DEFAULT_PHOTO_HEIGHT: u32 = 600;
const DEFAULT_PHOTO_WIDTH: u32 = 800;
/// Largest photo dimension the places API serves.
const MAX_PHOTO_DIMENSION: u32 = 4800;

/// API routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/journey", get(get_journey).post(add_to_journey))
        .route("/api/journey/days", get(get_journey_days))
        .route("/api/journey/{index}", delete(remove_from_journey))
        .route("/api/votes", get(get_votes).post(record_vote))
        .route("/api/map", get(render_map))
        .route("/api/map/current", get(get_current_map))
        .route("/api/map/geojson", get(get_map_geojson))
        .route("/api/destinations", get(get_destinations))
        .route("/api/destinations/detail", get(get_destination_detail))
        .route("/api/photo", get(get_photo_url))
        .route("/api/reviews", get(get_reviews).post(submit_review))
}

// ─── Journey ─────────────────────────────────────────────────

#[derive(Serialize)]
pub struct JourneyResponse {
    pub places: Vec<Place>,
    pub count: usize,
}

async fn get_journey(State(state): State<Arc<AppState>>) -> Json<JourneyResponse> {
    let places = state.journey.list().await;
    Json(JourneyResponse {
        count: places.len(),
        places,
    })
}

/// Result of adding a place to the journey.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct AddResponse {
    pub added: bool,
    pub message: String,
}

async fn add_to_journey(
    State(state): State<Arc<AppState>>,
    Json(place): Json<Place>,
) -> Result<Json<AddResponse>> {
    place.validate()?;
    let added = state.journey.add(place).await?;

    let message = if added {
        "Added to your journey!"
    } else {
        "Already in your journey!"
    };
    Ok(Json(AddResponse {
        added,
        message: message.to_string(),
    }))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RemoveResponse {
    pub removed: bool,
}

/// Remove by position. An out-of-range index is not an error.
async fn remove_from_journey(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
) -> Result<Json<RemoveResponse>> {
    let removed = state.journey.remove(index).await?;
    Ok(Json(RemoveResponse { removed }))
}

#[derive(Deserialize)]
struct DaysQuery {
    /// Date used for the map label when nothing is scheduled (`YYYY-MM-DD`)
    today: Option<NaiveDate>,
}

async fn get_journey_days(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DaysQuery>,
) -> Json<Itinerary> {
    let journey = state.journey.list().await;
    let today = params.today.unwrap_or_else(|| Utc::now().date_naive());
    Json(group_by_day(&journey, today))
}

// ─── Votes ───────────────────────────────────────────────────

#[derive(Deserialize, Validate)]
struct VoteRequest {
    #[validate(nested)]
    #[serde(flatten)]
    place: Place,
    interested: bool,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct VoteResponse {
    pub recorded: bool,
    pub added_to_journey: bool,
}

/// Record a swipe. Accepting a card also saves it to the journey.
async fn record_vote(
    State(state): State<Arc<AppState>>,
    Json(request): Json<VoteRequest>,
) -> Result<Json<VoteResponse>> {
    request.validate()?;

    let recorded = state
        .votes
        .record_vote(&request.place, request.interested)
        .await?;

    let added_to_journey = if request.interested {
        state.journey.add(request.place).await?
    } else {
        false
    };

    Ok(Json(VoteResponse {
        recorded,
        added_to_journey,
    }))
}

async fn get_votes(State(state): State<Arc<AppState>>) -> Json<VoteRecord> {
    Json(state.votes.record().await)
}

// ─── Map ─────────────────────────────────────────────────────

/// Resolve the saved journey and render it.
///
/// The cycle is registered before resolution starts, so a request that
/// arrives later always wins; the loser answers 409.
async fn render_map(State(state): State<Arc<AppState>>) -> Result<Json<MapView>> {
    let ticket = state.renderer.begin();
    let locations = state.resolver.resolve_saved().await;

    match state.renderer.render(ticket, &locations).await {
        RenderOutcome::Rendered(view) => Ok(Json(view)),
        RenderOutcome::Superseded => Err(AppError::Superseded),
    }
}

async fn get_current_map(State(state): State<Arc<AppState>>) -> Result<Json<MapView>> {
    state
        .renderer
        .current_view()
        .map(Json)
        .ok_or_else(|| AppError::NotFound("No map has been rendered yet".to_string()))
}

async fn get_map_geojson(
    State(state): State<Arc<AppState>>,
) -> Result<Json<geojson::FeatureCollection>> {
    let view = state
        .renderer
        .current_view()
        .ok_or_else(|| AppError::NotFound("No map has been rendered yet".to_string()))?;
    Ok(Json(view.to_geojson()))
}

// ─── Destinations ────────────────────────────────────────────

#[derive(Serialize)]
pub struct DestinationsResponse {
    pub destinations: Vec<Place>,
}

async fn get_destinations(State(state): State<Arc<AppState>>) -> Json<DestinationsResponse> {
    Json(DestinationsResponse {
        destinations: state.discovery.deck().await,
    })
}

#[derive(Deserialize)]
struct DetailQuery {
    name: String,
    #[serde(default)]
    address: String,
}

async fn get_destination_detail(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DetailQuery>,
) -> Result<Json<DestinationDetail>> {
    let name = params.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("Destination name is required".to_string()));
    }
    Ok(Json(state.details.detail(name, params.address.trim()).await))
}

#[derive(Deserialize)]
struct PhotoQuery {
    name: String,
    max_height: Option<u32>,
    max_width: Option<u32>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PhotoResponse {
    pub url: String,
}

async fn get_photo_url(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PhotoQuery>,
) -> Result<Json<PhotoResponse>> {
    if !params.name.starts_with("places/") || !params.name.contains("/photos/") {
        return Err(AppError::BadRequest(format!(
            "Invalid photo name: {}",
            params.name
        )));
    }

    let clamp = |v: Option<u32>, default: u32| v.unwrap_or(default).clamp(1, MAX_PHOTO_DIMENSION);
    let url = state.places.photo_url(
        &params.name,
        clamp(params.max_height, DEFAULT_PHOTO_HEIGHT),
        clamp(params.max_width, DEFAULT_PHOTO_WIDTH),
    );
    Ok(Json(PhotoResponse { url }))
}

// ─── Reviews ─────────────────────────────────────────────────

async fn submit_review(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<ReviewDraft>,
) -> Result<(StatusCode, Json<Review>)> {
    let review = state.reviews.submit(draft).await?;
    Ok((StatusCode::CREATED, Json(review)))
}

#[derive(Deserialize)]
struct ReviewsQuery {
    destination: String,
}

#[derive(Serialize)]
pub struct ReviewsResponse {
    pub reviews: Vec<Review>,
}

async fn get_reviews(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ReviewsQuery>,
) -> Json<ReviewsResponse> {
    Json(ReviewsResponse {
        reviews: state.reviews.list(&params.destination).await,
    })
}
