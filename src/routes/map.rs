// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Map routes: geolocation callbacks, map clicks and map state.

use crate::error::{AppError, Result};
use crate::models::{Coordinates, MapSnapshot, WorkoutForm};
use crate::services::map::markers_to_geojson;
use crate::services::GeolocationError;
use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use geojson::FeatureCollection;
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

/// Browser `GeolocationPositionError.PERMISSION_DENIED`.
const PERMISSION_DENIED: u16 = 1;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/map", get(get_map))
        .route("/api/map/markers", get(get_markers))
        .route("/api/map/load", post(load_map))
        .route("/api/map/position-error", post(position_error))
        .route("/api/map/click", post(click_map))
}

/// A latitude/longitude pair sent by the browser.
#[derive(Debug, Deserialize, Validate)]
struct PositionRequest {
    #[validate(range(min = -90.0, max = 90.0))]
    lat: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    lng: f64,
}

impl PositionRequest {
    fn coordinates(&self) -> Result<Coordinates> {
        self.validate()
            .map_err(|e| AppError::BadRequest(format!("Invalid position: {}", e)))?;
        Ok(Coordinates::new(self.lat, self.lng))
    }
}

/// Current map state for the browser to replay.
async fn get_map(State(state): State<Arc<AppState>>) -> Result<Json<MapSnapshot>> {
    let tracker = state.tracker.lock().await;
    tracker.map_snapshot().map(Json).ok_or(AppError::MapNotLoaded)
}

/// Markers as a GeoJSON FeatureCollection.
async fn get_markers(State(state): State<Arc<AppState>>) -> Result<Json<FeatureCollection>> {
    let tracker = state.tracker.lock().await;
    let snapshot = tracker.map_snapshot().ok_or(AppError::MapNotLoaded)?;
    Ok(Json(markers_to_geojson(&snapshot)))
}

/// Geolocation succeeded in the browser: load the map there.
async fn load_map(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PositionRequest>,
) -> Result<Json<MapSnapshot>> {
    let position = req.coordinates()?;
    let mut tracker = state.tracker.lock().await;
    tracker.load_map(position)?;
    tracker
        .map_snapshot()
        .map(Json)
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Map missing after load")))
}

#[derive(Debug, Deserialize)]
struct PositionErrorRequest {
    #[serde(default)]
    code: Option<u16>,
    #[serde(default)]
    message: Option<String>,
}

/// Geolocation failed in the browser.
async fn position_error(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PositionErrorRequest>,
) -> Result<StatusCode> {
    let error = match (req.code, req.message) {
        (Some(PERMISSION_DENIED), _) => GeolocationError::Denied,
        (_, Some(message)) => GeolocationError::Other(message),
        (_, None) => GeolocationError::Unavailable,
    };
    state.tracker.lock().await.position_failed(error)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Map clicked: open the form for a workout at that spot.
async fn click_map(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PositionRequest>,
) -> Result<Json<WorkoutForm>> {
    let click = req.coordinates()?;
    let mut tracker = state.tracker.lock().await;
    tracker.show_form(click)?;
    Ok(Json(tracker.form().clone()))
}
