// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! External collaborator seams (places search, geocoding, directions) and the
//! shared, lazily initialised Google Maps provider behind them.

use crate::config::Config;
use crate::error::AppError;
use crate::models::Coordinates;
use crate::services::google::{public_photo_url, ApiPlace, GoogleMapsClient, TextSearch};
use futures_util::future::BoxFuture;
use geo::{LineString, Rect};
use tokio::sync::OnceCell;

/// Free-text address → best-match coordinates.
pub trait Geocoder: Send + Sync {
    fn geocode<'a>(&'a self, address: &'a str) -> BoxFuture<'a, Result<Coordinates, AppError>>;
}

/// Multi-stop route between ordered points.
pub trait RouteProvider: Send + Sync {
    fn route<'a>(&'a self, request: &'a RouteRequest) -> BoxFuture<'a, Result<Route, AppError>>;
}

/// Places text search and photo URLs.
pub trait PlaceSearch: Send + Sync {
    fn search_text<'a>(
        &'a self,
        search: &'a TextSearch,
    ) -> BoxFuture<'a, Result<Vec<ApiPlace>, AppError>>;

    fn photo_url(&self, photo_name: &str, max_height: u32, max_width: u32) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TravelMode {
    Driving,
}

impl TravelMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Driving => "driving",
        }
    }
}

/// Origin, ordered intermediate stops and destination.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    pub origin: Coordinates,
    pub destination: Coordinates,
    pub waypoints: Vec<Coordinates>,
    pub travel_mode: TravelMode,
    pub optimize_waypoints: bool,
}

/// A computed route.
#[derive(Debug, Clone)]
pub struct Route {
    /// Encoded overview polyline as returned by the provider
    pub polyline: String,
    pub path: LineString<f64>,
    pub bounds: Rect<f64>,
    pub distance_meters: Option<f64>,
    pub duration_seconds: Option<f64>,
}

/// Google Maps provider, created once per process.
///
/// The HTTP client is built on first use. Concurrent first callers wait on
/// the same initialisation and every caller gets the same client afterwards.
pub struct MapsProvider {
    places_api_key: String,
    maps_api_key: String,
    base_urls: Option<(String, String)>,
    client: OnceCell<GoogleMapsClient>,
}

impl MapsProvider {
    pub fn new(config: &Config) -> Self {
        Self {
            places_api_key: config.places_api_key.clone(),
            maps_api_key: config.maps_api_key.clone(),
            base_urls: None,
            client: OnceCell::new(),
        }
    }

    /// Use other endpoints than the public Google ones.
    pub fn with_base_urls(mut self, places_base_url: String, maps_base_url: String) -> Self {
        self.base_urls = Some((places_base_url, maps_base_url));
        self
    }

    /// Get the shared client, initialising it on first call.
    pub async fn client(&self) -> Result<&GoogleMapsClient, AppError> {
        self.client
            .get_or_try_init(|| async {
                let client =
                    GoogleMapsClient::new(self.places_api_key.clone(), self.maps_api_key.clone())?;
                let client = match &self.base_urls {
                    Some((places, maps)) => client.with_base_urls(places.clone(), maps.clone()),
                    None => client,
                };
                tracing::info!("Google Maps client initialized");
                Ok(client)
            })
            .await
    }

    /// Whether the client has been initialised yet.
    pub fn is_loaded(&self) -> bool {
        self.client.initialized()
    }
}

impl Geocoder for MapsProvider {
    fn geocode<'a>(&'a self, address: &'a str) -> BoxFuture<'a, Result<Coordinates, AppError>> {
        Box::pin(async move { self.client().await?.geocode(address).await })
    }
}

impl RouteProvider for MapsProvider {
    fn route<'a>(&'a self, request: &'a RouteRequest) -> BoxFuture<'a, Result<Route, AppError>> {
        Box::pin(async move { self.client().await?.directions(request).await })
    }
}

impl PlaceSearch for MapsProvider {
    fn search_text<'a>(
        &'a self,
        search: &'a TextSearch,
    ) -> BoxFuture<'a, Result<Vec<ApiPlace>, AppError>> {
        Box::pin(async move { self.client().await?.search_text(search).await })
    }

    fn photo_url(&self, photo_name: &str, max_height: u32, max_width: u32) -> String {
        match &self.base_urls {
            Some((places, _)) => crate::services::google::build_photo_url(
                places,
                &self.places_api_key,
                photo_name,
                max_height,
                max_width,
            ),
            None => public_photo_url(&self.places_api_key, photo_name, max_height, max_width),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_client_is_initialised_once() {
        let provider = Arc::new(MapsProvider::new(&Config::default()));
        assert!(!provider.is_loaded());

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let provider = provider.clone();
                tokio::spawn(async move {
                    provider.client().await.map(|c| c as *const GoogleMapsClient as usize)
                })
            })
            .collect();

        let mut addresses = Vec::new();
        for handle in handles {
            addresses.push(handle.await.unwrap().unwrap());
        }

        assert!(provider.is_loaded());
        assert!(addresses.windows(2).all(|w| w[0] == w[1]));
    }
}
