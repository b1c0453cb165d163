// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Google Maps Platform client.
//!
//! Handles:
//! - Places text search (swipe deck, detail page, nearby places)
//! - Place photo URLs
//! - Address geocoding
//! - Driving directions through ordered waypoints

use crate::error::AppError;
use crate::models::place::LocalizedText;
use crate::models::Coordinates;
use crate::services::providers::{Route, RouteRequest};
use geo::{BoundingRect, LineString, Rect};
use serde::{Deserialize, Serialize};

const PLACES_BASE_URL: &str = "https://places.googleapis.com/v1";
const MAPS_BASE_URL: &str = "https://maps.googleapis.com/maps/api";

/// Encoded polyline precision used by the directions endpoint.
const POLYLINE_PRECISION: u32 = 5;

/// Google Maps Platform API client.
#[derive(Clone)]
pub struct GoogleMapsClient {
    http: reqwest::Client,
    places_base_url: String,
    maps_base_url: String,
    places_api_key: String,
    maps_api_key: String,
}

impl GoogleMapsClient {
    /// Create a new client with API keys.
    pub fn new(places_api_key: String, maps_api_key: String) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("journey-planner/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            places_base_url: PLACES_BASE_URL.to_string(),
            maps_base_url: MAPS_BASE_URL.to_string(),
            places_api_key,
            maps_api_key,
        })
    }

    /// Point the client at different endpoints (local stubs).
    pub fn with_base_urls(mut self, places_base_url: String, maps_base_url: String) -> Self {
        self.places_base_url = places_base_url;
        self.maps_base_url = maps_base_url;
        self
    }

    /// Run a Places text search.
    pub async fn search_text(&self, search: &TextSearch) -> Result<Vec<ApiPlace>, AppError> {
        let url = format!("{}/places:searchText", self.places_base_url);

        let response = self
            .http
            .post(&url)
            .header("X-Goog-Api-Key", &self.places_api_key)
            .header("X-Goog-FieldMask", search.field_mask)
            .json(search)
            .send()
            .await
            .map_err(|e| AppError::PlacesApi(e.to_string()))?;

        let body: SearchTextResponse = self.check_response_json(response).await?;
        tracing::debug!(
            query = %search.text_query,
            results = body.places.len(),
            "Places text search completed"
        );
        Ok(body.places)
    }

    /// URL of a place photo scaled to fit the given box.
    pub fn photo_url(&self, photo_name: &str, max_height: u32, max_width: u32) -> String {
        build_photo_url(
            &self.places_base_url,
            &self.places_api_key,
            photo_name,
            max_height,
            max_width,
        )
    }

    /// Geocode a free-text address to its best match.
    pub async fn geocode(&self, address: &str) -> Result<Coordinates, AppError> {
        let url = format!("{}/geocode/json", self.maps_base_url);

        let response = self
            .http
            .get(&url)
            .query(&[("address", address), ("key", self.maps_api_key.as_str())])
            .send()
            .await
            .map_err(|e| AppError::PlacesApi(e.to_string()))?;

        let body: GeocodeResponse = self.check_response_json(response).await?;
        body.results
            .into_iter()
            .next()
            .map(|r| Coordinates::new(r.geometry.location.lat, r.geometry.location.lng))
            .ok_or_else(|| AppError::PlacesApi(AppError::NO_GEOCODE_RESULT.to_string()))
    }

    /// Request a driving route; waypoints are visited in the given order.
    pub async fn directions(&self, request: &RouteRequest) -> Result<Route, AppError> {
        let url = format!("{}/directions/json", self.maps_base_url);

        let mut query = vec![
            ("origin", request.origin.to_query()),
            ("destination", request.destination.to_query()),
            ("mode", request.travel_mode.as_str().to_string()),
            ("key", self.maps_api_key.clone()),
        ];
        if !request.waypoints.is_empty() {
            let stops: Vec<String> = request.waypoints.iter().map(|w| w.to_query()).collect();
            let prefix = if request.optimize_waypoints {
                "optimize:true|"
            } else {
                ""
            };
            query.push(("waypoints", format!("{}{}", prefix, stops.join("|"))));
        }

        let response = self
            .http
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|e| AppError::Routing(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AppError::Routing(format!("HTTP {}", status)));
        }

        let body: DirectionsResponse = response
            .json()
            .await
            .map_err(|e| AppError::Routing(format!("JSON parse error: {}", e)))?;

        if body.status != "OK" {
            return Err(AppError::Routing(body.status));
        }

        let route = body
            .routes
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Routing("ZERO_RESULTS".to_string()))?;
        route.into_route()
    }

    /// Check response and parse JSON body.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, AppError> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 {
                tracing::warn!("Google Maps quota exceeded (429)");
            }

            return Err(AppError::PlacesApi(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::PlacesApi(format!("JSON parse error: {}", e)))
    }
}

/// Build a Places photo media URL.
pub fn build_photo_url(
    base_url: &str,
    api_key: &str,
    photo_name: &str,
    max_height: u32,
    max_width: u32,
) -> String {
    format!(
        "{}/{}/media?maxHeightPx={}&maxWidthPx={}&key={}",
        base_url,
        photo_name,
        max_height,
        max_width,
        urlencoding::encode(api_key)
    )
}

/// Photo URL against the public Places endpoint.
pub fn public_photo_url(api_key: &str, photo_name: &str, max_height: u32, max_width: u32) -> String {
    build_photo_url(PLACES_BASE_URL, api_key, photo_name, max_height, max_width)
}

// ─── Places API (New) ────────────────────────────────────────

/// Field masks for the different searches.
pub mod field_masks {
    pub const DECK: &str = "places.displayName,places.formattedAddress,places.rating,places.priceLevel,places.photos,places.editorialSummary";
    pub const DETAIL: &str = "places.id,places.displayName,places.formattedAddress,places.rating,places.userRatingCount,places.photos,places.editorialSummary,places.regularOpeningHours,places.types,places.reviews,places.location";
    pub const NEARBY: &str = "places.displayName,places.formattedAddress,places.rating,places.photos,places.location";
}

/// `places:searchText` request body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextSearch {
    pub text_query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub included_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_bias: Option<LocationBias>,
    pub max_result_count: u32,
    #[serde(skip)]
    pub field_mask: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct LocationBias {
    pub circle: Circle,
}

#[derive(Debug, Clone, Serialize)]
pub struct Circle {
    pub center: LatLng,
    pub radius: f64,
}

impl LocationBias {
    pub fn circle(center: Coordinates, radius_meters: f64) -> Self {
        Self {
            circle: Circle {
                center: LatLng {
                    latitude: center.lat,
                    longitude: center.lng,
                },
                radius: radius_meters,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct SearchTextResponse {
    #[serde(default)]
    places: Vec<ApiPlace>,
}

/// Place record from the Places API. Only fields in the field mask are present.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiPlace {
    pub id: Option<String>,
    pub display_name: Option<LocalizedText>,
    pub formatted_address: Option<String>,
    pub rating: Option<f64>,
    pub user_rating_count: Option<u32>,
    pub price_level: Option<String>,
    #[serde(default)]
    pub photos: Vec<ApiPhoto>,
    pub editorial_summary: Option<LocalizedText>,
    pub regular_opening_hours: Option<OpeningHours>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub reviews: Vec<ApiReview>,
    pub location: Option<LatLng>,
}

impl ApiPlace {
    pub fn display_text(&self) -> Option<&str> {
        self.display_name
            .as_ref()
            .map(|d| d.text.as_str())
            .filter(|t| !t.is_empty())
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        self.location
            .map(|l| Coordinates::new(l.latitude, l.longitude))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiPhoto {
    /// Resource name, `places/{place_id}/photos/{photo_id}`
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpeningHours {
    #[serde(default)]
    pub weekday_descriptions: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiReview {
    pub text: Option<LocalizedText>,
    pub author_attribution: Option<AuthorAttribution>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorAttribution {
    pub display_name: Option<String>,
}

// ─── Geocoding API ───────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Clone, Deserialize)]
struct GeocodeResult {
    geometry: GeocodeGeometry,
}

#[derive(Debug, Clone, Deserialize)]
struct GeocodeGeometry {
    location: LatLngLiteral,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct LatLngLiteral {
    lat: f64,
    lng: f64,
}

// ─── Directions API ──────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
struct DirectionsResponse {
    status: String,
    #[serde(default)]
    routes: Vec<DirectionsRoute>,
}

#[derive(Debug, Clone, Deserialize)]
struct DirectionsRoute {
    bounds: Option<DirectionsBounds>,
    overview_polyline: Option<EncodedPolyline>,
    #[serde(default)]
    legs: Vec<DirectionsLeg>,
}

#[derive(Debug, Clone, Deserialize)]
struct DirectionsBounds {
    northeast: LatLngLiteral,
    southwest: LatLngLiteral,
}

#[derive(Debug, Clone, Deserialize)]
struct EncodedPolyline {
    points: String,
}

#[derive(Debug, Clone, Deserialize)]
struct DirectionsLeg {
    distance: Option<ValueField>,
    duration: Option<ValueField>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct ValueField {
    value: f64,
}

impl DirectionsRoute {
    fn into_route(self) -> Result<Route, AppError> {
        let encoded = self
            .overview_polyline
            .map(|p| p.points)
            .ok_or_else(|| AppError::Routing("Route has no overview polyline".to_string()))?;

        let path: LineString<f64> = polyline::decode_polyline(&encoded, POLYLINE_PRECISION)
            .map_err(|e| AppError::Routing(format!("Failed to decode polyline: {}", e)))?;

        let bounds = match self.bounds {
            Some(b) => Rect::new(
                geo::coord! { x: b.southwest.lng, y: b.southwest.lat },
                geo::coord! { x: b.northeast.lng, y: b.northeast.lat },
            ),
            None => path
                .bounding_rect()
                .ok_or_else(|| AppError::Routing("Route path is empty".to_string()))?,
        };

        let distance_meters = sum_legs(&self.legs, |l| l.distance);
        let duration_seconds = sum_legs(&self.legs, |l| l.duration);

        Ok(Route {
            polyline: encoded,
            path,
            bounds,
            distance_meters,
            duration_seconds,
        })
    }
}

fn sum_legs(legs: &[DirectionsLeg], field: impl Fn(&DirectionsLeg) -> Option<ValueField>) -> Option<f64> {
    if legs.is_empty() {
        return None;
    }
    legs.iter()
        .map(|l| field(l).map(|v| v.value))
        .sum::<Option<f64>>()
}
