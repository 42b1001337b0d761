// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Map widget value types shared with the browser host.

use crate::models::workout::{Coordinates, KindTag};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Handle to a marker placed on a map widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarkerId(pub u32);

/// Base tile layer drawn under the markers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TileLayer {
    pub url_template: String,
    pub attribution: String,
}

/// Popup presentation options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PopupOptions {
    pub max_width: u32,
    pub min_width: u32,
    pub auto_close: bool,
    pub close_on_click: bool,
    pub class_name: String,
}

impl PopupOptions {
    /// Popups stay open until the user closes them, styled per workout kind.
    pub fn for_kind(kind: KindTag) -> Self {
        Self {
            max_width: 250,
            min_width: 100,
            auto_close: false,
            close_on_click: false,
            class_name: format!("{}-popup", kind),
        }
    }
}

/// Animation requested when re-centering the map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ViewOptions {
    pub animate: bool,
    pub pan_duration_secs: f64,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            animate: true,
            pan_duration_secs: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Popup {
    pub options: PopupOptions,
    pub content: String,
    pub open: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MapMarker {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: MarkerId,
    #[cfg_attr(feature = "binding-generation", ts(type = "[number, number]"))]
    pub coordinates: Coordinates,
    pub popup: Option<Popup>,
}

/// Observable state of a map widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MapSnapshot {
    pub container_id: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "[number, number]"))]
    pub center: Coordinates,
    pub zoom: u8,
    pub tile_layer: Option<TileLayer>,
    pub markers: Vec<MapMarker>,
    /// Animation of the most recent `set_view`, if any.
    pub last_view: Option<ViewOptions>,
}
