// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod form;
pub mod map;
pub mod stored;
pub mod workout;

pub use form::{WorkoutForm, WorkoutSubmission};
pub use map::MapSnapshot;
pub use stored::StoredWorkout;
pub use workout::{Coordinates, KindTag, Workout, WorkoutId, WorkoutKind};
