// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod geolocation;
pub mod map;
pub mod render;
pub mod tracker;
pub mod validation;

pub use geolocation::{FixedPosition, GeolocationError, GeolocationProvider};
pub use map::{HeadlessMap, HeadlessMapProvider, MapProvider, MapWidget};
pub use render::ListView;
pub use tracker::{PositionState, Tracker, TrackerDeps};
