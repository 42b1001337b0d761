// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User position lookup.

use crate::models::workout::Coordinates;

/// Single-shot position lookup. There is no retry.
pub trait GeolocationProvider: Send + Sync {
    /// `Ok(None)` means the answer arrives later from the browser, through
    /// the map load or position error callbacks.
    fn current_position(&self) -> Result<Option<Coordinates>, GeolocationError>;
}

/// Position fixed by configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedPosition {
    outcome: Result<Option<Coordinates>, GeolocationError>,
}

impl FixedPosition {
    /// Without a configured position the browser reports it instead.
    pub fn new(position: Option<Coordinates>) -> Self {
        Self {
            outcome: Ok(position),
        }
    }

    /// A provider that always fails, as when the user denies access.
    pub fn unavailable() -> Self {
        Self {
            outcome: Err(GeolocationError::Unavailable),
        }
    }
}

impl GeolocationProvider for FixedPosition {
    fn current_position(&self) -> Result<Option<Coordinates>, GeolocationError> {
        self.outcome.clone()
    }
}

/// Errors from geolocation lookup.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeolocationError {
    #[error("Position is unavailable")]
    Unavailable,

    #[error("Permission to read the position was denied")]
    Denied,

    #[error("Position lookup failed: {0}")]
    Other(String),
}
