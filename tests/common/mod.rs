// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request, Response};
use std::sync::Arc;
use tokio::sync::Mutex;
use workout_tracker::config::Config;
use workout_tracker::db::{KeyValueStore, MemoryStore};
use workout_tracker::models::Coordinates;
use workout_tracker::routes::create_router;
use workout_tracker::services::{FixedPosition, HeadlessMapProvider, Tracker, TrackerDeps};
use workout_tracker::AppState;

/// Position reported by the test geolocation provider.
#[allow(dead_code)]
pub const HOME: Coordinates = Coordinates {
    lat: 38.72,
    lng: -9.14,
};

/// Tracker dependencies backed by `store`.
#[allow(dead_code)]
pub fn test_deps(store: Arc<dyn KeyValueStore>, position: Option<Coordinates>) -> TrackerDeps {
    TrackerDeps {
        store,
        map_provider: Arc::new(HeadlessMapProvider),
        geolocation: Arc::new(FixedPosition::new(position)),
        map_settings: Config::default().map,
    }
}

/// Create a test app on top of an existing store.
#[allow(dead_code)]
pub fn create_app_with_store(
    store: Arc<dyn KeyValueStore>,
    position: Option<Coordinates>,
) -> (axum::Router, Arc<AppState>) {
    let tracker = Tracker::start(test_deps(store, position));
    let state = Arc::new(AppState {
        config: Config::default(),
        tracker: Mutex::new(tracker),
    });
    (create_router(state.clone()), state)
}

/// Create a test app with an in-memory store and a known position.
/// Returns the router, the shared state and the store.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>, MemoryStore) {
    let store = MemoryStore::new();
    let (app, state) = create_app_with_store(Arc::new(store.clone()), Some(HOME));
    (app, state, store)
}

/// Build a JSON request.
#[allow(dead_code)]
pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Build a request without a body.
#[allow(dead_code)]
pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn read_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
