// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Coordinates, geocode cache entries and map-ready locations.

use geo::{Coord, Point, Rect};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Default map centre: Brisbane CBD.
pub const DEFAULT_CENTER: Coordinates = Coordinates {
    lat: -27.4698,
    lng: 153.0251,
};
pub const DEFAULT_CENTER_NAME: &str = "Brisbane CBD";
pub const DEFAULT_CENTER_ADDRESS: &str = "Brisbane City QLD";

/// WGS84 latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// `lat,lng` as accepted by the directions endpoint.
    pub fn to_query(&self) -> String {
        format!("{},{}", self.lat, self.lng)
    }
}

// geo uses x = longitude, y = latitude.
impl From<Coordinates> for Coord<f64> {
    fn from(c: Coordinates) -> Self {
        Coord { x: c.lng, y: c.lat }
    }
}

impl From<Coordinates> for Point<f64> {
    fn from(c: Coordinates) -> Self {
        Point::new(c.lng, c.lat)
    }
}

impl From<Coord<f64>> for Coordinates {
    fn from(c: Coord<f64>) -> Self {
        Self { lat: c.y, lng: c.x }
    }
}

/// Geocode cache value. `timestamp` is milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CachedCoordinates {
    pub lat: f64,
    pub lng: f64,
    pub timestamp: i64,
}

impl CachedCoordinates {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lng)
    }
}

/// A journey entry with coordinates, ready to be placed on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ResolvedLocation {
    pub name: String,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
}

impl ResolvedLocation {
    pub fn new(name: impl Into<String>, address: impl Into<String>, at: Coordinates) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            lat: at.lat,
            lng: at.lng,
        }
    }

    /// The default city centre, used when nothing else can be shown.
    pub fn fallback() -> Self {
        Self::new(DEFAULT_CENTER_NAME, DEFAULT_CENTER_ADDRESS, DEFAULT_CENTER)
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lng)
    }
}

/// Axis-aligned lat/lng box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    pub fn contains(&self, c: Coordinates) -> bool {
        c.lat >= self.south && c.lat <= self.north && c.lng >= self.west && c.lng <= self.east
    }
}

impl From<Rect<f64>> for Bounds {
    fn from(rect: Rect<f64>) -> Self {
        Self {
            south: rect.min().y,
            west: rect.min().x,
            north: rect.max().y,
            east: rect.max().x,
        }
    }
}
