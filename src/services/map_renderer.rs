// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Map renderer: turns resolved locations into markers, a viewport and,
//! for two or more stops, a driving route.
//!
//! Every render cycle is tagged with a generation number. A cycle that
//! completes after a newer one has started is discarded instead of
//! overwriting the newer view.

use crate::models::location::DEFAULT_CENTER;
use crate::models::{
    Bounds, Coordinates, MapMarker, MapView, RenderKind, ResolvedLocation, RouteLine, Viewport,
};
use crate::services::providers::{RouteProvider, RouteRequest, TravelMode};
use geo::{BoundingRect, MultiPoint, Point};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// Padding (px) used when fitting the viewport to a route or marker set.
pub const FIT_PADDING: u32 = 48;
/// Zoom used when centring on a single location.
pub const SINGLE_LOCATION_ZOOM: u8 = 13;
/// Zoom used when centring on the default city.
pub const DEFAULT_ZOOM: u8 = 12;

/// Renderer phase between cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPhase {
    Idle,
    Loading { generation: u64 },
}

/// Handle for one render cycle, obtained before resolution starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderTicket {
    generation: u64,
}

impl RenderTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Outcome of a render cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderOutcome {
    Rendered(MapView),
    /// A newer cycle started before this one finished; nothing was applied.
    Superseded,
}

#[derive(Debug)]
struct Surface {
    phase: RenderPhase,
    view: Option<MapView>,
}

/// Map renderer with its current view.
#[derive(Clone)]
pub struct MapRenderer {
    router: Arc<dyn RouteProvider>,
    generation: Arc<AtomicU64>,
    surface: Arc<Mutex<Surface>>,
}

impl MapRenderer {
    pub fn new(router: Arc<dyn RouteProvider>) -> Self {
        Self {
            router,
            generation: Arc::new(AtomicU64::new(0)),
            surface: Arc::new(Mutex::new(Surface {
                phase: RenderPhase::Idle,
                view: None,
            })),
        }
    }

    fn surface(&self) -> std::sync::MutexGuard<'_, Surface> {
        self.surface.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start a new cycle. Any cycle started earlier becomes stale.
    pub fn begin(&self) -> RenderTicket {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.surface().phase = RenderPhase::Loading { generation };
        tracing::debug!(generation, "Map render cycle started");
        RenderTicket { generation }
    }

    pub fn phase(&self) -> RenderPhase {
        self.surface().phase
    }

    /// Last view applied by a completed, non-superseded cycle.
    pub fn current_view(&self) -> Option<MapView> {
        self.surface().view.clone()
    }

    /// Start and run a cycle in one go.
    pub async fn render_now(&self, locations: &[ResolvedLocation]) -> RenderOutcome {
        let ticket = self.begin();
        self.render(ticket, locations).await
    }

    /// Render `locations` for the cycle identified by `ticket`.
    ///
    /// Markers are rebuilt from scratch. With one location the map is
    /// centred on it; with two or more a route is requested through all of
    /// them in order, falling back to fitting the markers if routing fails.
    pub async fn render(&self, ticket: RenderTicket, locations: &[ResolvedLocation]) -> RenderOutcome {
        let markers: Vec<MapMarker> = locations.iter().map(MapMarker::from).collect();

        let (kind, viewport, route) = match locations {
            [] => (
                RenderKind::MarkersOnly,
                Viewport::Center {
                    center: DEFAULT_CENTER,
                    zoom: DEFAULT_ZOOM,
                },
                None,
            ),
            [only] => (
                RenderKind::MarkersOnly,
                Viewport::Center {
                    center: only.coordinates(),
                    zoom: SINGLE_LOCATION_ZOOM,
                },
                None,
            ),
            [origin, stops @ .., destination] => {
                let request = RouteRequest {
                    origin: origin.coordinates(),
                    destination: destination.coordinates(),
                    waypoints: stops.iter().map(|s| s.coordinates()).collect(),
                    travel_mode: TravelMode::Driving,
                    optimize_waypoints: false,
                };

                match self.router.route(&request).await {
                    Ok(route) => (
                        RenderKind::RouteRendered,
                        Viewport::FitBounds {
                            bounds: Bounds::from(route.bounds),
                            padding: FIT_PADDING,
                        },
                        Some(RouteLine {
                            polyline: route.polyline,
                            path: route.path.coords().map(|c| Coordinates::from(*c)).collect(),
                            distance_meters: route.distance_meters,
                            duration_seconds: route.duration_seconds,
                        }),
                    ),
                    Err(e) => {
                        tracing::warn!(
                            generation = ticket.generation,
                            error = %e,
                            "Directions request failed, showing markers only"
                        );
                        (
                            RenderKind::MarkersOnly,
                            marker_viewport(&markers),
                            None,
                        )
                    }
                }
            }
        };

        let mut surface = self.surface();
        if self.generation.load(Ordering::SeqCst) != ticket.generation {
            tracing::debug!(generation = ticket.generation, "Discarding superseded map render");
            return RenderOutcome::Superseded;
        }

        let view = MapView {
            generation: ticket.generation,
            kind,
            markers,
            viewport,
            route,
        };
        surface.view = Some(view.clone());
        surface.phase = RenderPhase::Idle;

        tracing::debug!(
            generation = ticket.generation,
            markers = view.markers.len(),
            kind = ?view.kind,
            "Map rendered"
        );
        RenderOutcome::Rendered(view)
    }
}

/// Fit the viewport around all markers.
fn marker_viewport(markers: &[MapMarker]) -> Viewport {
    let points: MultiPoint<f64> = markers
        .iter()
        .map(|m| Point::from(m.position))
        .collect::<Vec<_>>()
        .into();

    match points.bounding_rect() {
        Some(rect) => Viewport::FitBounds {
            bounds: Bounds::from(rect),
            padding: FIT_PADDING,
        },
        None => Viewport::Center {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_viewport_covers_all_markers() {
        let markers = vec![
            MapMarker {
                title: "A".to_string(),
                position: Coordinates::new(-27.40, 153.00),
            },
            MapMarker {
                title: "B".to_string(),
                position: Coordinates::new(-27.50, 153.10),
            },
        ];

        match marker_viewport(&markers) {
            Viewport::FitBounds { bounds, padding } => {
                assert_eq!(padding, FIT_PADDING);
                assert!(markers.iter().all(|m| bounds.contains(m.position)));
                assert_eq!(bounds.south, -27.50);
                assert_eq!(bounds.east, 153.10);
            }
            other => panic!("expected FitBounds, got {:?}", other),
        }
    }
}
