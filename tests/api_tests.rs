// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP API tests against the full router.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
};
use serde_json::{json, Value};
use tower::ServiceExt;

mod common;

async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health() {
    let (app, _state) = common::create_test_app();
    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get("Cache-Control").unwrap(), "no-store");
    assert_eq!(body_json(response).await["status"], "ok");
}

#[tokio::test]
async fn test_add_list_and_remove_journey_entries() {
    let (app, _state) = common::create_test_app();

    let place = json!({"name": "Eiffel Tower", "address": "Paris", "rating": 4.7});
    let response = app
        .clone()
        .oneshot(post_json("/api/journey", place.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["added"], true);

    let response = app
        .clone()
        .oneshot(post_json("/api/journey", place))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["added"], false);
    assert_eq!(body["message"], "Already in your journey!");

    let response = app.clone().oneshot(get("/api/journey")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["places"][0]["name"], "Eiffel Tower");
    assert!(body["places"][0]["addedAt"].is_string());

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/journey/0")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(body_json(response).await["removed"], true);

    let response = app.oneshot(get("/api/journey")).await.unwrap();
    assert_eq!(body_json(response).await["count"], 0);
}

#[tokio::test]
async fn test_invalid_place_is_rejected() {
    let (app, state) = common::create_test_app();

    let response = app
        .oneshot(post_json(
            "/api/journey",
            json!({"name": "Somewhere", "address": "Brisbane", "rating": 7.5}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "bad_request");
    assert!(state.journey.list().await.is_empty());
}

#[tokio::test]
async fn test_interested_vote_also_saves_to_journey() {
    let (app, state) = common::create_test_app();

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/votes",
            json!({"name": "Story Bridge", "address": "Story Bridge", "interested": true}),
        ))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["recorded"], true);
    assert_eq!(body["added_to_journey"], true);

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/votes",
            json!({"name": "Casino", "address": "Queen St", "interested": false}),
        ))
        .await
        .unwrap();
    assert_eq!(body_json(response).await["added_to_journey"], false);

    let journey = state.journey.list().await;
    assert_eq!(journey.len(), 1);
    assert_eq!(journey[0].name, "Story Bridge");

    let response = app.oneshot(get("/api/votes")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["interested"].as_array().unwrap().len(), 1);
    assert_eq!(body["notInterested"][0]["name"], "Casino");
}

#[tokio::test]
async fn test_map_before_and_after_render() {
    let (app, state) = common::create_test_app();

    let response = app.clone().oneshot(get("/api/map/current")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Empty journey renders the default city centre
    let response = app.clone().oneshot(get("/api/map")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["kind"], "markers_only");
    assert_eq!(body["markers"][0]["title"], "Brisbane CBD");
    assert_eq!(body["viewport"]["mode"], "center");

    state
        .journey
        .add(journey_planner::models::Place::new("Queensland Museum", "South Bank"))
        .await
        .unwrap();
    state
        .journey
        .add(journey_planner::models::Place::new("Story Bridge", "Story Bridge"))
        .await
        .unwrap();

    let response = app.clone().oneshot(get("/api/map")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["kind"], "route_rendered");
    assert_eq!(body["viewport"]["mode"], "fit_bounds");
    assert_eq!(body["viewport"]["padding"], 48);

    let response = app.oneshot(get("/api/map/geojson")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["type"], "FeatureCollection");
    assert_eq!(body["features"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_journey_days() {
    let (app, _state) = common::create_test_app();

    app.clone()
        .oneshot(post_json(
            "/api/journey",
            json!({"name": "Breakfast", "address": "South Bank", "start": "2025-06-02T08:00:00Z"}),
        ))
        .await
        .unwrap();

    let response = app
        .oneshot(get("/api/journey/days?today=2025-01-01"))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["days"][0]["day"], "2025-06-02");
    assert_eq!(body["days"][0]["entries"][0]["startTime"], "08:00");
    assert_eq!(body["mapDateLabel"], "06-02-2025");
}

#[tokio::test]
async fn test_destinations_fall_back_to_builtin_list() {
    let (app, _state) = common::create_test_app();
    let response = app.oneshot(get("/api/destinations")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["destinations"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_destination_detail() {
    let (app, _state) = common::create_test_app();

    let response = app
        .clone()
        .oneshot(get("/api/destinations/detail?name=Nowhere&address=Atlantis"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["openingHours"], "All day");

    let response = app
        .oneshot(get("/api/destinations/detail?name=%20"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_photo_url() {
    let (app, _state) = common::create_test_app();

    let response = app
        .clone()
        .oneshot(get("/api/photo?name=places/abc/photos/def&max_height=400"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["url"],
        "https://photos.test/places/abc/photos/def?h=400&w=800"
    );

    let response = app
        .oneshot(get("/api/photo?name=../../etc/passwd"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_reviews() {
    let (app, _state) = common::create_test_app();

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/reviews",
            json!({"destination": "Story Bridge", "rating": 0, "text": "Great"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["details"], "Please select a rating");

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/reviews",
            json!({"destination": "Story Bridge", "rating": 5, "text": "Great", "anonymous": true}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["authorName"], "Anonymous");

    let response = app
        .oneshot(get("/api/reviews?destination=Story%20Bridge"))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["reviews"].as_array().unwrap().len(), 1);
}
