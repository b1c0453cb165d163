// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use futures_util::future::BoxFuture;
use geo::{BoundingRect, LineString};
use journey_planner::config::Config;
use journey_planner::db::LocalStore;
use journey_planner::error::AppError;
use journey_planner::models::Coordinates;
use journey_planner::routes::create_router;
use journey_planner::services::google::{ApiPlace, TextSearch};
use journey_planner::services::providers::{Route, RouteRequest};
use journey_planner::services::{Geocoder, PlaceSearch, RouteProvider};
use journey_planner::AppState;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Geocoder answering from a fixed table; unknown addresses fail.
#[derive(Default)]
pub struct FakeGeocoder {
    table: HashMap<String, Coordinates>,
    calls: AtomicUsize,
}

#[allow(dead_code)]
impl FakeGeocoder {
    pub fn with(entries: &[(&str, f64, f64)]) -> Self {
        Self {
            table: entries
                .iter()
                .map(|(address, lat, lng)| (address.to_string(), Coordinates::new(*lat, *lng)))
                .collect(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Geocoder for FakeGeocoder {
    fn geocode<'a>(&'a self, address: &'a str) -> BoxFuture<'a, Result<Coordinates, AppError>> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.table
                .get(address)
                .copied()
                .ok_or_else(|| AppError::PlacesApi(AppError::NO_GEOCODE_RESULT.to_string()))
        })
    }
}

/// Route provider drawing straight lines between the requested points.
#[derive(Default)]
pub struct FakeRouter {
    pub fail: bool,
    requests: Mutex<Vec<RouteRequest>>,
}

#[allow(dead_code)]
impl FakeRouter {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn requests(&self) -> Vec<RouteRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl RouteProvider for FakeRouter {
    fn route<'a>(&'a self, request: &'a RouteRequest) -> BoxFuture<'a, Result<Route, AppError>> {
        Box::pin(async move {
            self.requests.lock().unwrap().push(request.clone());
            if self.fail {
                return Err(AppError::Routing("ZERO_RESULTS".to_string()));
            }

            let points: Vec<Coordinates> = std::iter::once(request.origin)
                .chain(request.waypoints.iter().copied())
                .chain(std::iter::once(request.destination))
                .collect();
            let path: LineString<f64> = points.iter().map(|c| (c.lng, c.lat)).collect();
            let bounds = path.bounding_rect().unwrap();
            let polyline = polyline::encode_coordinates(path.coords().copied(), 5).unwrap();

            Ok(Route {
                polyline,
                path,
                bounds,
                distance_meters: Some(1000.0 * (points.len() - 1) as f64),
                duration_seconds: Some(120.0 * (points.len() - 1) as f64),
            })
        })
    }
}

/// Places search that never finds anything.
pub struct EmptyPlaces;

impl PlaceSearch for EmptyPlaces {
    fn search_text<'a>(
        &'a self,
        _search: &'a TextSearch,
    ) -> BoxFuture<'a, Result<Vec<ApiPlace>, AppError>> {
        Box::pin(async { Ok(Vec::new()) })
    }

    fn photo_url(&self, photo_name: &str, max_height: u32, max_width: u32) -> String {
        format!("https://photos.test/{}?h={}&w={}", photo_name, max_height, max_width)
    }
}

/// Addresses known to the default test geocoder.
#[allow(dead_code)]
pub const KNOWN_PLACES: &[(&str, f64, f64)] = &[
    ("Paris", 48.8566, 2.3522),
    ("London", 51.5074, -0.1278),
    ("South Bank", -27.4810, 153.0234),
    ("Story Bridge", -27.4635, 153.0358),
];

/// Create a test app with an in-memory store and fake providers.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let (app, state, _, _) = create_test_app_with(
        Arc::new(FakeGeocoder::with(KNOWN_PLACES)),
        Arc::new(FakeRouter::default()),
    );
    (app, state)
}

/// Like [`create_test_app`], with the given providers.
#[allow(dead_code)]
pub fn create_test_app_with(
    geocoder: Arc<FakeGeocoder>,
    router: Arc<FakeRouter>,
) -> (axum::Router, Arc<AppState>, Arc<FakeGeocoder>, Arc<FakeRouter>) {
    let state = Arc::new(AppState::new(
        Config::default(),
        LocalStore::new_memory(),
        geocoder.clone(),
        router.clone(),
        Arc::new(EmptyPlaces),
    ));
    (create_router(state.clone()), state, geocoder, router)
}
