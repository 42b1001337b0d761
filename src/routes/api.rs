// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout, list and form routes.

use crate::error::Result;
use crate::models::{StoredWorkout, WorkoutForm, WorkoutSubmission};
use crate::services::render::ListRow;
use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/workouts",
            get(get_workouts).post(create_workout).delete(reset_workouts),
        )
        .route("/api/workouts/list", get(get_list))
        .route("/api/list/click", post(click_list))
        .route("/api/form", get(get_form))
        .route("/api/form/toggle", post(toggle_form))
        .route("/api/form/hide", post(hide_form))
}

// ─── Workouts ────────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WorkoutsResponse {
    /// Workouts in submission order
    pub workouts: Vec<StoredWorkout>,
    pub count: u32,
}

/// Get all workouts.
async fn get_workouts(State(state): State<Arc<AppState>>) -> Json<WorkoutsResponse> {
    let tracker = state.tracker.lock().await;
    let workouts: Vec<StoredWorkout> = tracker
        .workouts()
        .iter()
        .map(StoredWorkout::from)
        .collect();

    Json(WorkoutsResponse {
        count: workouts.len() as u32,
        workouts,
    })
}

/// Submit the workout form.
///
/// Invalid input is answered with a `validation_error` whose details are
/// the alert text for the user.
async fn create_workout(
    State(state): State<Arc<AppState>>,
    Json(submission): Json<WorkoutSubmission>,
) -> Result<(StatusCode, Json<StoredWorkout>)> {
    let mut tracker = state.tracker.lock().await;
    let workout = tracker.submit_workout(submission)?;
    Ok((StatusCode::CREATED, Json(StoredWorkout::from(&workout))))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ResetResponse {
    pub success: bool,
    pub message: String,
}

/// Delete all workouts and start over.
async fn reset_workouts(State(state): State<Arc<AppState>>) -> Result<Json<ResetResponse>> {
    let mut tracker = state.tracker.lock().await;
    tracker.reset()?;

    Ok(Json(ResetResponse {
        success: true,
        message: "All workouts were removed.".to_string(),
    }))
}

// ─── List ────────────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ListResponse {
    /// Rendered rows, most recent first
    pub rows: Vec<ListRow>,
    /// All rows joined, ready to insert after the form
    pub html: String,
}

/// Get the rendered workout list.
async fn get_list(State(state): State<Arc<AppState>>) -> Json<ListResponse> {
    let tracker = state.tracker.lock().await;
    let list = tracker.list();

    Json(ListResponse {
        rows: list.rows().to_vec(),
        html: list.to_html(),
    })
}

#[derive(Deserialize)]
struct ListClickRequest {
    /// `data-id` of the row enclosing the click; absent when the click
    /// missed every row.
    #[serde(default)]
    row_id: Option<String>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ListClickResponse {
    /// Whether the map was moved to a workout
    pub moved: bool,
}

/// Click in the workout list: move the map to the clicked workout.
async fn click_list(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ListClickRequest>,
) -> Result<Json<ListClickResponse>> {
    let mut tracker = state.tracker.lock().await;
    let moved = tracker.move_to_popup(req.row_id.as_deref())?;
    Ok(Json(ListClickResponse { moved }))
}

// ─── Form ────────────────────────────────────────────────────

async fn get_form(State(state): State<Arc<AppState>>) -> Json<WorkoutForm> {
    Json(state.tracker.lock().await.form().clone())
}

/// Workout type changed.
async fn toggle_form(State(state): State<Arc<AppState>>) -> Json<WorkoutForm> {
    let mut tracker = state.tracker.lock().await;
    tracker.toggle_variant_field();
    Json(tracker.form().clone())
}

async fn hide_form(State(state): State<Arc<AppState>>) -> Json<WorkoutForm> {
    let mut tracker = state.tracker.lock().await;
    tracker.hide_form();
    Json(tracker.form().clone())
}
