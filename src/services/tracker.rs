// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout tracker controller.
//!
//! Handles the core workflow:
//! 1. Restore stored workouts and render them as list rows
//! 2. Look up the user position and load the map (markers for every workout)
//! 3. Map click opens the form, form submission creates a workout
//! 4. New workouts are rendered as marker + list row and the list is saved
//!
//! One tracker exists per application; handlers receive it explicitly.

use crate::config::MapSettings;
use crate::db::{keys, KeyValueStore};
use crate::error::{AppError, Result};
use crate::models::form::{WorkoutForm, WorkoutSubmission};
use crate::models::map::{MapSnapshot, PopupOptions, ViewOptions};
use crate::models::stored::{decode_workouts, encode_workouts};
use crate::models::workout::{Coordinates, Workout};
use crate::services::geolocation::{GeolocationError, GeolocationProvider};
use crate::services::map::{MapProvider, MapWidget};
use crate::services::render::{popup_content, ListView};
use crate::services::validation::validate_submission;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// External collaborators the tracker is wired to.
#[derive(Clone)]
pub struct TrackerDeps {
    pub store: Arc<dyn KeyValueStore>,
    pub map_provider: Arc<dyn MapProvider>,
    pub geolocation: Arc<dyn GeolocationProvider>,
    pub map_settings: MapSettings,
}

/// Outcome of the one position lookup per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionState {
    Pending,
    Loaded,
    Failed,
}

/// The application controller.
pub struct Tracker {
    deps: TrackerDeps,
    workouts: Vec<Workout>,
    position: PositionState,
    map: Option<Box<dyn MapWidget>>,
    /// Location of the last map click; where the next workout is placed.
    map_event: Option<Coordinates>,
    form: WorkoutForm,
    list: ListView,
}

impl Tracker {
    /// Create an idle tracker with no history and no map.
    pub fn new(deps: TrackerDeps) -> Self {
        Self {
            deps,
            workouts: Vec::new(),
            position: PositionState::Pending,
            map: None,
            map_event: None,
            form: WorkoutForm::default(),
            list: ListView::default(),
        }
    }

    /// Start the application: restore history, then locate the user and
    /// load the map.
    pub fn start(deps: TrackerDeps) -> Self {
        let mut tracker = Self::new(deps);
        tracker.restore();
        tracker.request_position();
        tracker
    }

    // ─── Map ─────────────────────────────────────────────────────

    fn request_position(&mut self) {
        let outcome = match self.deps.geolocation.current_position() {
            Ok(Some(position)) => self.load_map(position),
            Ok(None) => {
                tracing::debug!("Waiting for the browser to report the position");
                Ok(())
            }
            Err(e) => self.position_failed(e),
        };
        if let Err(e) = outcome {
            tracing::warn!(error = %e, "Position lookup ignored");
        }
    }

    /// Create the map centered on `position` and show every workout on it.
    ///
    /// The position is settled once per session; later reports are
    /// rejected and leave the map as it is.
    pub fn load_map(&mut self, position: Coordinates) -> Result<()> {
        self.settle_position(PositionState::Loaded)?;
        let settings = &self.deps.map_settings;
        let mut map = self
            .deps
            .map_provider
            .create_map(&settings.container_id, position, settings.zoom);
        map.add_tile_layer(&settings.tile_url, &settings.tile_attribution);

        // Restored workouts only get their markers now.
        for workout in &self.workouts {
            place_marker(map.as_mut(), workout);
        }
        self.map = Some(map);

        tracing::info!(
            lat = position.lat,
            lng = position.lng,
            workouts = self.workouts.len(),
            "Map loaded"
        );
        Ok(())
    }

    /// Geolocation failed; the map stays unloaded for the session.
    pub fn position_failed(&mut self, error: GeolocationError) -> Result<()> {
        self.settle_position(PositionState::Failed)?;
        tracing::warn!(error = %error, "Could not get your position");
        Ok(())
    }

    fn settle_position(&mut self, outcome: PositionState) -> Result<()> {
        if self.position != PositionState::Pending {
            return Err(AppError::PositionResolved);
        }
        self.position = outcome;
        Ok(())
    }

    pub fn position_state(&self) -> PositionState {
        self.position
    }

    pub fn is_map_loaded(&self) -> bool {
        self.map.is_some()
    }

    pub fn map_snapshot(&self) -> Option<MapSnapshot> {
        self.map.as_ref().map(|m| m.snapshot())
    }

    /// Place a marker with an open popup for `workout`.
    ///
    /// Skipped while the map is not loaded.
    pub fn render_workout_marker(&mut self, workout: &Workout) {
        match self.map.as_mut() {
            Some(map) => place_marker(map.as_mut(), workout),
            None => tracing::debug!(id = %workout.id, "Map not loaded, marker deferred"),
        }
    }

    // ─── Form ────────────────────────────────────────────────────

    /// Handle a map click: remember the location and open the form.
    pub fn show_form(&mut self, click: Coordinates) -> Result<()> {
        if self.map.is_none() {
            return Err(AppError::MapNotLoaded);
        }
        self.map_event = Some(click);
        self.form.show();
        Ok(())
    }

    /// Clear and hide the form. The next workout needs a new map click.
    pub fn hide_form(&mut self) {
        self.map_event = None;
        self.form.hide();
    }

    /// Workout type changed: swap the cadence and elevation inputs.
    pub fn toggle_variant_field(&mut self) {
        self.form.toggle_variant_field();
    }

    pub fn form(&self) -> &WorkoutForm {
        &self.form
    }

    pub fn submit_workout(&mut self, submission: WorkoutSubmission) -> Result<Workout> {
        self.submit_workout_at(submission, Utc::now())
    }

    /// Validate the form input and record a new workout at the last
    /// clicked location.
    ///
    /// Rejected input leaves the tracker unchanged.
    pub fn submit_workout_at(
        &mut self,
        submission: WorkoutSubmission,
        now: DateTime<Utc>,
    ) -> Result<Workout> {
        let coordinates = self.map_event.ok_or_else(|| {
            AppError::BadRequest("Click on the map to place the workout first".to_string())
        })?;

        let validated = validate_submission(&submission)?;
        let workout = validated.into_workout(coordinates, now);

        tracing::info!(
            id = %workout.id,
            kind = %workout.tag(),
            distance_km = workout.distance_km,
            duration_min = workout.duration_min,
            "Workout created"
        );

        self.workouts.push(workout.clone());
        self.render_workout_marker(&workout);
        self.render_workout(&workout);
        self.hide_form();
        self.save()?;

        Ok(workout)
    }

    // ─── List ────────────────────────────────────────────────────

    /// Add a row for `workout` to the list.
    pub fn render_workout(&mut self, workout: &Workout) {
        self.list.insert_after_form(workout);
    }

    pub fn list(&self) -> &ListView {
        &self.list
    }

    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    /// Handle a click in the workout list: pan the map to the clicked
    /// workout.
    ///
    /// `row_id` is the `data-id` of the row enclosing the click, if any.
    /// Returns whether the map moved.
    pub fn move_to_popup(&mut self, row_id: Option<&str>) -> Result<bool> {
        let Some(row_id) = row_id else {
            return Ok(false);
        };
        let Some(row) = self.list.row(row_id) else {
            tracing::debug!(row_id, "Click outside the rendered rows");
            return Ok(false);
        };
        let Some(index) = self.workouts.iter().position(|w| w.id == row.id) else {
            tracing::debug!(row_id, "No workout for clicked row");
            return Ok(false);
        };
        let Some(map) = self.map.as_mut() else {
            tracing::debug!(row_id, "Map not loaded, ignoring list click");
            return Ok(false);
        };

        let workout = &mut self.workouts[index];
        map.set_view(
            workout.coordinates,
            self.deps.map_settings.zoom,
            ViewOptions::default(),
        );
        workout.click();
        tracing::debug!(
            id = %workout.id,
            clicks = workout.interaction_count,
            "Moved to workout"
        );

        self.save()?;
        Ok(true)
    }

    // ─── Persistence ─────────────────────────────────────────────

    /// Write all workouts to storage.
    pub fn save(&self) -> Result<()> {
        let blob = encode_workouts(&self.workouts)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to encode workouts: {}", e)))?;
        self.deps.store.set_item(keys::WORKOUTS, &blob)?;
        tracing::debug!(count = self.workouts.len(), "Workouts saved");
        Ok(())
    }

    /// Load stored workouts and render their list rows.
    ///
    /// Missing, unreadable or corrupt data counts as no history. Markers
    /// are not rendered here; they follow once the map loads.
    pub fn restore(&mut self) -> usize {
        let blob = match self.deps.store.get_item(keys::WORKOUTS) {
            Ok(Some(blob)) => blob,
            Ok(None) => return 0,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read stored workouts");
                return 0;
            }
        };

        let workouts = match decode_workouts(&blob) {
            Ok(workouts) => workouts,
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring corrupt stored workouts");
                return 0;
            }
        };

        self.list = ListView::default();
        for workout in &workouts {
            self.list.insert_after_form(workout);
        }
        self.workouts = workouts;

        tracing::info!(count = self.workouts.len(), "Workouts restored");
        self.workouts.len()
    }

    /// Delete all stored workouts and start over as if freshly loaded.
    pub fn reset(&mut self) -> Result<()> {
        self.deps.store.remove_item(keys::WORKOUTS)?;
        tracing::info!(discarded = self.workouts.len(), "Tracker reset");
        *self = Self::start(self.deps.clone());
        Ok(())
    }
}

/// Add a marker with an open popup for `workout`.
fn place_marker(map: &mut dyn MapWidget, workout: &Workout) {
    let marker = map.add_marker(workout.coordinates);
    map.bind_popup(
        marker,
        PopupOptions::for_kind(workout.tag()),
        popup_content(workout),
    );
    map.open_popup(marker);
}
