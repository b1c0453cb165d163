// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod detail;
pub mod discovery;
pub mod geocode_cache;
pub mod google;
pub mod itinerary;
pub mod journey;
pub mod map_renderer;
pub mod providers;
pub mod resolver;
pub mod reviews;
pub mod votes;

pub use detail::DetailService;
pub use discovery::DiscoveryService;
pub use geocode_cache::GeocodeCache;
pub use google::GoogleMapsClient;
pub use itinerary::{group_by_day, Itinerary};
pub use journey::JourneyStore;
pub use map_renderer::{MapRenderer, RenderOutcome, RenderPhase, RenderTicket};
pub use providers::{Geocoder, MapsProvider, PlaceSearch, RouteProvider};
pub use resolver::LocationResolver;
pub use reviews::ReviewBook;
pub use votes::VoteRecorder;
