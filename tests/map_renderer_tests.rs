// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Map renderer tests: routing rules, fallback viewport, stale cycles.

use journey_planner::models::location::DEFAULT_CENTER;
use journey_planner::models::{Coordinates, RenderKind, ResolvedLocation, Viewport};
use journey_planner::services::map_renderer::{FIT_PADDING, SINGLE_LOCATION_ZOOM};
use journey_planner::services::{MapRenderer, RenderOutcome, RenderPhase};
use std::sync::Arc;

mod common;

use common::FakeRouter;

fn location(name: &str, lat: f64, lng: f64) -> ResolvedLocation {
    ResolvedLocation::new(name, name, Coordinates::new(lat, lng))
}

fn rendered(outcome: RenderOutcome) -> journey_planner::models::MapView {
    match outcome {
        RenderOutcome::Rendered(view) => view,
        RenderOutcome::Superseded => panic!("render unexpectedly superseded"),
    }
}

#[tokio::test]
async fn test_single_location_centres_without_routing() {
    let router = Arc::new(FakeRouter::default());
    let renderer = MapRenderer::new(router.clone());

    let view = rendered(renderer.render_now(&[location("Museum", -27.47, 153.02)]).await);

    assert!(router.requests().is_empty());
    assert_eq!(view.kind, RenderKind::MarkersOnly);
    assert_eq!(view.markers.len(), 1);
    assert_eq!(
        view.viewport,
        Viewport::Center {
            center: Coordinates::new(-27.47, 153.02),
            zoom: SINGLE_LOCATION_ZOOM,
        }
    );
    assert!(view.route.is_none());
}

#[tokio::test]
async fn test_route_through_waypoints_in_order() {
    let router = Arc::new(FakeRouter::default());
    let renderer = MapRenderer::new(router.clone());

    let stops = [
        location("A", -27.40, 153.00),
        location("B", -27.45, 153.05),
        location("C", -27.42, 153.10),
        location("D", -27.50, 153.02),
    ];
    let view = rendered(renderer.render_now(&stops).await);

    let requests = router.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.origin, Coordinates::new(-27.40, 153.00));
    assert_eq!(request.destination, Coordinates::new(-27.50, 153.02));
    assert_eq!(
        request.waypoints,
        vec![Coordinates::new(-27.45, 153.05), Coordinates::new(-27.42, 153.10)]
    );
    assert!(!request.optimize_waypoints);

    assert_eq!(view.kind, RenderKind::RouteRendered);
    let route = view.route.as_ref().unwrap();
    assert_eq!(route.path.len(), 4);
    assert_eq!(route.distance_meters, Some(3000.0));
    match view.viewport {
        Viewport::FitBounds { bounds, padding } => {
            assert_eq!(padding, FIT_PADDING);
            assert!(stops.iter().all(|s| bounds.contains(s.coordinates())));
        }
        other => panic!("expected FitBounds, got {:?}", other),
    }
}

#[tokio::test]
async fn test_two_locations_always_request_a_route() {
    let router = Arc::new(FakeRouter::default());
    let renderer = MapRenderer::new(router.clone());

    renderer
        .render_now(&[location("A", -27.40, 153.00), location("B", -27.45, 153.05)])
        .await;

    let requests = router.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].waypoints.is_empty());
}

#[tokio::test]
async fn test_routing_failure_fits_markers() {
    let router = Arc::new(FakeRouter::failing());
    let renderer = MapRenderer::new(router.clone());

    let stops = [location("A", -27.40, 153.00), location("B", -27.50, 153.10)];
    let view = rendered(renderer.render_now(&stops).await);

    assert_eq!(router.requests().len(), 1);
    assert_eq!(view.kind, RenderKind::MarkersOnly);
    assert_eq!(view.markers.len(), 2);
    assert!(view.route.is_none());
    match view.viewport {
        Viewport::FitBounds { bounds, .. } => {
            assert_eq!(bounds.north, -27.40);
            assert_eq!(bounds.south, -27.50);
            assert_eq!(bounds.west, 153.00);
            assert_eq!(bounds.east, 153.10);
        }
        other => panic!("expected FitBounds, got {:?}", other),
    }
}

#[tokio::test]
async fn test_empty_input_centres_on_default_city() {
    let renderer = MapRenderer::new(Arc::new(FakeRouter::default()));
    let view = rendered(renderer.render_now(&[]).await);
    assert!(view.markers.is_empty());
    assert!(matches!(view.viewport, Viewport::Center { center, .. } if center == DEFAULT_CENTER));
}

#[tokio::test]
async fn test_stale_cycle_is_discarded() {
    let renderer = MapRenderer::new(Arc::new(FakeRouter::default()));

    let older = renderer.begin();
    let newer = renderer.begin();
    assert_eq!(
        renderer.phase(),
        RenderPhase::Loading {
            generation: newer.generation()
        }
    );

    let view = rendered(
        renderer
            .render(newer, &[location("Newer", -27.46, 153.03)])
            .await,
    );
    assert_eq!(view.generation, newer.generation());
    assert_eq!(renderer.phase(), RenderPhase::Idle);

    // The older cycle finishes last and must not overwrite the newer view
    let outcome = renderer
        .render(older, &[location("Older", -27.40, 153.00)])
        .await;
    assert_eq!(outcome, RenderOutcome::Superseded);

    let current = renderer.current_view().unwrap();
    assert_eq!(current.markers[0].title, "Newer");
}

#[tokio::test]
async fn test_markers_are_replaced_each_cycle() {
    let renderer = MapRenderer::new(Arc::new(FakeRouter::default()));

    renderer
        .render_now(&[
            location("A", -27.40, 153.00),
            location("B", -27.45, 153.05),
            location("C", -27.50, 153.10),
        ])
        .await;
    renderer.render_now(&[location("D", -27.41, 153.01)]).await;

    let current = renderer.current_view().unwrap();
    let titles: Vec<&str> = current.markers.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, vec!["D"]);
    assert!(current.route.is_none());
}

#[tokio::test]
async fn test_geojson_export() {
    let renderer = MapRenderer::new(Arc::new(FakeRouter::default()));
    let view = rendered(
        renderer
            .render_now(&[location("A", -27.40, 153.00), location("B", -27.45, 153.05)])
            .await,
    );

    let collection = view.to_geojson();
    // Two markers plus the route line
    assert_eq!(collection.features.len(), 3);
}
