// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout form input validation.

use crate::error::{AppError, Result};
use crate::models::form::WorkoutSubmission;
use crate::models::workout::{Coordinates, KindTag, Workout};
use chrono::{DateTime, Utc};

/// Form input that passed validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatedWorkout {
    pub kind: KindTag,
    pub distance_km: f64,
    pub duration_min: f64,
    /// Cadence for running, elevation gain for cycling.
    pub variant_value: f64,
}

impl ValidatedWorkout {
    /// Build the workout record at `coordinates`.
    pub fn into_workout(self, coordinates: Coordinates, now: DateTime<Utc>) -> Workout {
        match self.kind {
            KindTag::Running => Workout::running(
                coordinates,
                self.distance_km,
                self.duration_min,
                self.variant_value,
                now,
            ),
            KindTag::Cycling => Workout::cycling(
                coordinates,
                self.distance_km,
                self.duration_min,
                self.variant_value,
                now,
            ),
        }
    }
}

/// Parse a raw input; anything that is not a number becomes NaN.
pub fn parse_number(raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or(f64::NAN)
}

pub fn all_finite(inputs: &[f64]) -> bool {
    inputs.iter().all(|v| v.is_finite())
}

pub fn all_positive(inputs: &[f64]) -> bool {
    inputs.iter().all(|v| *v > 0.0)
}

/// Check a submission and pick the variant field matching its kind.
pub fn validate_submission(submission: &WorkoutSubmission) -> Result<ValidatedWorkout> {
    let distance_km = parse_number(&submission.distance);
    let duration_min = parse_number(&submission.duration);
    let variant_value = match submission.kind {
        KindTag::Running => parse_number(&submission.cadence),
        KindTag::Cycling => parse_number(&submission.elevation),
    };

    let inputs = [distance_km, duration_min, variant_value];
    if !all_finite(&inputs) || !all_positive(&inputs) {
        tracing::debug!(kind = %submission.kind, "Rejected workout inputs");
        return Err(AppError::invalid_inputs());
    }

    Ok(ValidatedWorkout {
        kind: submission.kind,
        distance_km,
        duration_min,
        variant_value,
    })
}
