// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Persisted workout layout.
//!
//! Workouts are stored as a JSON array of flat objects under a single
//! storage key. Restoring rebuilds the full [`Workout`] variant and
//! recomputes its derived metric.

use crate::models::workout::{
    calc_pace, calc_speed, Coordinates, KindTag, Workout, WorkoutId, WorkoutKind,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// One workout as written to storage and returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct StoredWorkout {
    #[cfg_attr(feature = "binding-generation", ts(type = "[number, number]"))]
    pub coordinates: Coordinates,
    pub distance_km: f64,
    pub duration_min: f64,
    pub kind: KindTag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cadence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pace: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation_gain_m: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub id: WorkoutId,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub created_at: DateTime<Utc>,
    pub description: String,
    #[serde(default)]
    pub interaction_count: u32,
}

impl From<&Workout> for StoredWorkout {
    fn from(w: &Workout) -> Self {
        let (cadence, pace, elevation_gain_m, speed) = match w.kind {
            WorkoutKind::Running { cadence, pace } => (Some(cadence), Some(pace), None, None),
            WorkoutKind::Cycling {
                elevation_gain_m,
                speed,
            } => (None, None, Some(elevation_gain_m), Some(speed)),
        };

        Self {
            coordinates: w.coordinates,
            distance_km: w.distance_km,
            duration_min: w.duration_min,
            kind: w.tag(),
            cadence,
            pace,
            elevation_gain_m,
            speed,
            id: w.id.clone(),
            created_at: w.created_at,
            description: w.description.clone(),
            interaction_count: w.interaction_count,
        }
    }
}

impl TryFrom<StoredWorkout> for Workout {
    type Error = RestoreError;

    fn try_from(s: StoredWorkout) -> Result<Self, Self::Error> {
        check_positive("distanceKm", s.distance_km)?;
        check_positive("durationMin", s.duration_min)?;
        if !(s.coordinates.lat.is_finite() && s.coordinates.lng.is_finite()) {
            return Err(RestoreError::InvalidField("coordinates"));
        }

        let kind = match s.kind {
            KindTag::Running => {
                let cadence = s.cadence.ok_or(RestoreError::MissingField("cadence"))?;
                check_positive("cadence", cadence)?;
                WorkoutKind::Running {
                    cadence,
                    pace: calc_pace(s.distance_km, s.duration_min),
                }
            }
            KindTag::Cycling => {
                let elevation_gain_m = s
                    .elevation_gain_m
                    .ok_or(RestoreError::MissingField("elevationGainM"))?;
                check_positive("elevationGainM", elevation_gain_m)?;
                WorkoutKind::Cycling {
                    elevation_gain_m,
                    speed: calc_speed(s.distance_km, s.duration_min),
                }
            }
        };

        Ok(Workout {
            id: s.id,
            created_at: s.created_at,
            coordinates: s.coordinates,
            distance_km: s.distance_km,
            duration_min: s.duration_min,
            interaction_count: s.interaction_count,
            description: s.description,
            kind,
        })
    }
}

fn check_positive(field: &'static str, value: f64) -> Result<(), RestoreError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(RestoreError::InvalidField(field))
    }
}

/// Serialize a workout list into the stored blob.
pub fn encode_workouts(workouts: &[Workout]) -> Result<String, serde_json::Error> {
    let stored: Vec<StoredWorkout> = workouts.iter().map(StoredWorkout::from).collect();
    serde_json::to_string(&stored)
}

/// Parse a stored blob back into workouts.
///
/// Any malformed entry fails the whole blob.
pub fn decode_workouts(blob: &str) -> Result<Vec<Workout>, RestoreError> {
    let stored: Vec<StoredWorkout> = serde_json::from_str(blob)?;
    stored.into_iter().map(Workout::try_from).collect()
}

/// Errors from rebuilding workouts out of stored data.
#[derive(Debug, thiserror::Error)]
pub enum RestoreError {
    #[error("Stored workouts are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Stored workout is missing field: {0}")]
    MissingField(&'static str),

    #[error("Stored workout has invalid field: {0}")]
    InvalidField(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Vec<Workout> {
        let t = Utc.with_ymd_and_hms(2026, 4, 14, 7, 0, 0).unwrap();
        vec![
            Workout::running(Coordinates::new(39.1, -12.3), 5.2, 24.0, 178.0, t),
            Workout::cycling(
                Coordinates::new(39.2, -12.4),
                27.0,
                95.0,
                523.0,
                t + chrono::Duration::milliseconds(5),
            ),
        ]
    }

    #[test]
    fn test_stored_layout_field_names() {
        let blob = encode_workouts(&sample()[..1]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&blob).unwrap();
        let first = &value[0];

        assert_eq!(first["kind"], "running");
        assert_eq!(first["coordinates"], serde_json::json!([39.1, -12.3]));
        assert_eq!(first["distanceKm"], 5.2);
        assert_eq!(first["durationMin"], 24.0);
        assert_eq!(first["cadence"], 178.0);
        assert_eq!(first["description"], "Running on April 14");
        assert_eq!(first["interactionCount"], 0);
        assert!(first.get("elevationGainM").is_none());
        assert!(first["id"].is_string());
        assert!(first["createdAt"].is_string());
    }

    #[test]
    fn test_decode_restores_variants() {
        let original = sample();
        let blob = encode_workouts(&original).unwrap();
        let restored = decode_workouts(&blob).unwrap();

        assert_eq!(restored, original);
        assert!(restored[0].pace().is_some());
        assert!(restored[1].speed().is_some());
    }

    #[test]
    fn test_decode_recomputes_derived_metric() {
        let blob = r#"[{"coordinates":[1,2],"distanceKm":10,"durationMin":30,"kind":"cycling",
            "elevationGainM":50,"speed":999,"id":"1","createdAt":"2026-04-14T07:00:00Z",
            "description":"Cycling on April 14","interactionCount":3}]"#;
        let restored = decode_workouts(blob).unwrap();

        assert_eq!(restored[0].speed(), Some(20.0));
        assert_eq!(restored[0].interaction_count, 3);
    }

    #[test]
    fn test_decode_rejects_missing_variant_field() {
        let blob = r#"[{"coordinates":[1,2],"distanceKm":10,"durationMin":30,"kind":"running",
            "id":"1","createdAt":"2026-04-14T07:00:00Z","description":"Running on April 14"}]"#;
        let err = decode_workouts(blob).unwrap_err();
        assert!(matches!(err, RestoreError::MissingField("cadence")));
    }

    #[test]
    fn test_decode_rejects_non_positive_values() {
        let blob = r#"[{"coordinates":[1,2],"distanceKm":0,"durationMin":30,"kind":"running",
            "cadence":170,"id":"1","createdAt":"2026-04-14T07:00:00Z","description":"x"}]"#;
        let err = decode_workouts(blob).unwrap_err();
        assert!(matches!(err, RestoreError::InvalidField("distanceKm")));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(
            decode_workouts("{not json"),
            Err(RestoreError::Json(_))
        ));
        assert!(matches!(decode_workouts("null"), Err(RestoreError::Json(_))));
    }
}
