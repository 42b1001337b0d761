// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout record model.
//!
//! A workout is created once from validated form input and never mutated
//! afterwards, except for its interaction counter.

use crate::time_utils::format_month_day;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Number of trailing timestamp digits kept in a workout ID.
const ID_DIGITS: usize = 12;

/// A map location as `[lat, lng]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<[f64; 2]> for Coordinates {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<Coordinates> for [f64; 2] {
    fn from(c: Coordinates) -> Self {
        [c.lat, c.lng]
    }
}

impl From<Coordinates> for geo::Point<f64> {
    fn from(c: Coordinates) -> Self {
        geo::Point::new(c.lng, c.lat)
    }
}

/// Lookup key for a workout, derived from its creation time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkoutId(String);

impl WorkoutId {
    /// Last 12 digits of the creation time in milliseconds.
    pub fn from_timestamp(created_at: DateTime<Utc>) -> Self {
        let millis = created_at.timestamp_millis().to_string();
        let start = millis.len().saturating_sub(ID_DIGITS);
        Self(millis[start..].to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which workout variant a form submission or record refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum KindTag {
    #[default]
    Running,
    Cycling,
}

impl KindTag {
    pub fn as_str(self) -> &'static str {
        match self {
            KindTag::Running => "running",
            KindTag::Cycling => "cycling",
        }
    }

    /// Icon shown in popups and list rows.
    pub fn icon(self) -> &'static str {
        match self {
            KindTag::Running => "🏃‍♂️",
            KindTag::Cycling => "🚴‍♀️",
        }
    }

    /// The other variant (used by the form's type selector).
    pub fn toggled(self) -> Self {
        match self {
            KindTag::Running => KindTag::Cycling,
            KindTag::Cycling => KindTag::Running,
        }
    }

    fn capitalized(self) -> &'static str {
        match self {
            KindTag::Running => "Running",
            KindTag::Cycling => "Cycling",
        }
    }
}

impl fmt::Display for KindTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Variant-specific input and its derived metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorkoutKind {
    /// Cadence in steps/min, pace in min/km.
    Running { cadence: f64, pace: f64 },
    /// Elevation gain in meters, speed in km/h.
    Cycling { elevation_gain_m: f64, speed: f64 },
}

impl WorkoutKind {
    pub fn tag(&self) -> KindTag {
        match self {
            WorkoutKind::Running { .. } => KindTag::Running,
            WorkoutKind::Cycling { .. } => KindTag::Cycling,
        }
    }
}

/// min/km
pub fn calc_pace(distance_km: f64, duration_min: f64) -> f64 {
    duration_min / distance_km
}

/// km/h
pub fn calc_speed(distance_km: f64, duration_min: f64) -> f64 {
    distance_km / (duration_min / 60.0)
}

/// A single logged exercise session.
#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    pub id: WorkoutId,
    pub created_at: DateTime<Utc>,
    pub coordinates: Coordinates,
    pub distance_km: f64,
    pub duration_min: f64,
    pub interaction_count: u32,
    pub description: String,
    pub kind: WorkoutKind,
}

impl Workout {
    /// Create a running workout. Inputs must already be validated.
    pub fn running(
        coordinates: Coordinates,
        distance_km: f64,
        duration_min: f64,
        cadence: f64,
        now: DateTime<Utc>,
    ) -> Self {
        let pace = calc_pace(distance_km, duration_min);
        Self::new(
            coordinates,
            distance_km,
            duration_min,
            WorkoutKind::Running { cadence, pace },
            now,
        )
    }

    /// Create a cycling workout. Inputs must already be validated.
    pub fn cycling(
        coordinates: Coordinates,
        distance_km: f64,
        duration_min: f64,
        elevation_gain_m: f64,
        now: DateTime<Utc>,
    ) -> Self {
        let speed = calc_speed(distance_km, duration_min);
        Self::new(
            coordinates,
            distance_km,
            duration_min,
            WorkoutKind::Cycling {
                elevation_gain_m,
                speed,
            },
            now,
        )
    }

    fn new(
        coordinates: Coordinates,
        distance_km: f64,
        duration_min: f64,
        kind: WorkoutKind,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: WorkoutId::from_timestamp(now),
            created_at: now,
            coordinates,
            distance_km,
            duration_min,
            interaction_count: 0,
            description: describe(kind.tag(), now),
            kind,
        }
    }

    pub fn tag(&self) -> KindTag {
        self.kind.tag()
    }

    pub fn pace(&self) -> Option<f64> {
        match self.kind {
            WorkoutKind::Running { pace, .. } => Some(pace),
            WorkoutKind::Cycling { .. } => None,
        }
    }

    pub fn speed(&self) -> Option<f64> {
        match self.kind {
            WorkoutKind::Cycling { speed, .. } => Some(speed),
            WorkoutKind::Running { .. } => None,
        }
    }

    /// Count a user interaction with this workout's row/marker.
    pub fn click(&mut self) {
        self.interaction_count = self.interaction_count.saturating_add(1);
    }
}

/// "<Kind> on <Month> <day>", e.g. "Running on April 14".
pub fn describe(kind: KindTag, created_at: DateTime<Utc>) -> String {
    format!("{} on {}", kind.capitalized(), format_month_day(created_at))
}
