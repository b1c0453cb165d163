// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Journey Planner: swipe through destinations, save them to a journey and
//! see the journey on a map.
//!
//! This crate provides the local backend: journey and vote persistence,
//! geocoding with a short-lived cache, route rendering and the destination
//! deck and detail lookups.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::LocalStore;
use services::{
    DetailService, DiscoveryService, Geocoder, JourneyStore, LocationResolver, MapRenderer,
    PlaceSearch, ReviewBook, RouteProvider, VoteRecorder,
};
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: LocalStore,
    pub journey: JourneyStore,
    pub votes: VoteRecorder,
    pub reviews: ReviewBook,
    pub resolver: LocationResolver,
    pub renderer: MapRenderer,
    pub discovery: DiscoveryService,
    pub details: DetailService,
    pub places: Arc<dyn PlaceSearch>,
}

impl AppState {
    /// Wire all services over one store and one set of providers.
    pub fn new(
        config: Config,
        store: LocalStore,
        geocoder: Arc<dyn Geocoder>,
        router: Arc<dyn RouteProvider>,
        places: Arc<dyn PlaceSearch>,
    ) -> Self {
        Self {
            journey: JourneyStore::new(store.clone()),
            votes: VoteRecorder::new(store.clone()),
            reviews: ReviewBook::new(store.clone()),
            resolver: LocationResolver::new(store.clone(), geocoder),
            renderer: MapRenderer::new(router),
            discovery: DiscoveryService::new(places.clone()),
            details: DetailService::new(places.clone()),
            places,
            config,
            store,
        }
    }
}
