// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod destination;
pub mod location;
pub mod map;
pub mod place;
pub mod review;
pub mod vote;

pub use destination::{DestinationDetail, FeaturedReview, NearbyPlace, ReviewSummary};
pub use location::{Bounds, CachedCoordinates, Coordinates, ResolvedLocation};
pub use map::{MapMarker, MapView, RenderKind, RouteLine, Viewport};
pub use place::{normalize_address, Place};
pub use review::{Review, ReviewDraft};
pub use vote::{VoteEntry, VoteRecord};
