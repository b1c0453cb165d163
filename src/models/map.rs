// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Rendered map view handed to the web client.

use super::location::{Bounds, Coordinates, ResolvedLocation};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A single map pin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MapMarker {
    pub title: String,
    pub position: Coordinates,
}

impl From<&ResolvedLocation> for MapMarker {
    fn from(loc: &ResolvedLocation) -> Self {
        Self {
            title: loc.name.clone(),
            position: loc.coordinates(),
        }
    }
}

/// How the camera is placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Viewport {
    Center { center: Coordinates, zoom: u8 },
    FitBounds { bounds: Bounds, padding: u32 },
}

/// Driving route drawn between the stops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RouteLine {
    /// Encoded polyline (precision 5)
    pub polyline: String,
    pub path: Vec<Coordinates>,
    pub distance_meters: Option<f64>,
    pub duration_seconds: Option<f64>,
}

/// Terminal state of a completed render cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum RenderKind {
    RouteRendered,
    MarkersOnly,
}

/// Result of one render cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MapView {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub generation: u64,
    pub kind: RenderKind,
    pub markers: Vec<MapMarker>,
    pub viewport: Viewport,
    pub route: Option<RouteLine>,
}

impl MapView {
    /// Export markers (and route, if any) as a GeoJSON feature collection.
    pub fn to_geojson(&self) -> geojson::FeatureCollection {
        let mut features: Vec<geojson::Feature> = self
            .markers
            .iter()
            .map(|marker| {
                let mut properties = geojson::JsonObject::new();
                properties.insert("title".to_string(), marker.title.clone().into());
                properties.insert("kind".to_string(), "marker".into());
                geojson::Feature {
                    bbox: None,
                    geometry: Some(geojson::Geometry::new(geojson::Value::Point(vec![
                        marker.position.lng,
                        marker.position.lat,
                    ]))),
                    id: None,
                    properties: Some(properties),
                    foreign_members: None,
                }
            })
            .collect();

        if let Some(route) = &self.route {
            let mut properties = geojson::JsonObject::new();
            properties.insert("kind".to_string(), "route".into());
            if let Some(distance) = route.distance_meters {
                properties.insert("distance_meters".to_string(), distance.into());
            }
            features.push(geojson::Feature {
                bbox: None,
                geometry: Some(geojson::Geometry::new(geojson::Value::LineString(
                    route.path.iter().map(|c| vec![c.lng, c.lat]).collect(),
                ))),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            });
        }

        geojson::FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        }
    }
}
