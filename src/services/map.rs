// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Map widget interface and the headless widget used by the server.
//!
//! The tracker drives the map only through [`MapWidget`]. The headless
//! implementation records what was asked of it so a browser host can replay
//! the same state with its mapping library.

use crate::models::map::{
    MapMarker, MapSnapshot, MarkerId, Popup, PopupOptions, TileLayer, ViewOptions,
};
use crate::models::workout::Coordinates;
use geojson::{Feature, FeatureCollection, JsonObject};

/// Operations the tracker needs from a map widget.
pub trait MapWidget: Send {
    fn add_tile_layer(&mut self, url_template: &str, attribution: &str);

    fn add_marker(&mut self, coordinates: Coordinates) -> MarkerId;

    fn bind_popup(&mut self, marker: MarkerId, options: PopupOptions, content: String);

    fn open_popup(&mut self, marker: MarkerId);

    fn set_view(&mut self, center: Coordinates, zoom: u8, options: ViewOptions);

    fn snapshot(&self) -> MapSnapshot;
}

/// Creates map widgets once a position is known.
pub trait MapProvider: Send + Sync {
    fn create_map(&self, container_id: &str, center: Coordinates, zoom: u8)
        -> Box<dyn MapWidget>;
}

/// In-memory map widget.
#[derive(Debug, Clone)]
pub struct HeadlessMap {
    state: MapSnapshot,
    next_marker: u32,
}

impl HeadlessMap {
    pub fn new(container_id: &str, center: Coordinates, zoom: u8) -> Self {
        Self {
            state: MapSnapshot {
                container_id: container_id.to_string(),
                center,
                zoom,
                tile_layer: None,
                markers: Vec::new(),
                last_view: None,
            },
            next_marker: 0,
        }
    }

    fn marker_mut(&mut self, id: MarkerId) -> Option<&mut MapMarker> {
        self.state.markers.iter_mut().find(|m| m.id == id)
    }
}

impl MapWidget for HeadlessMap {
    fn add_tile_layer(&mut self, url_template: &str, attribution: &str) {
        self.state.tile_layer = Some(TileLayer {
            url_template: url_template.to_string(),
            attribution: attribution.to_string(),
        });
    }

    fn add_marker(&mut self, coordinates: Coordinates) -> MarkerId {
        let id = MarkerId(self.next_marker);
        self.next_marker += 1;
        self.state.markers.push(MapMarker {
            id,
            coordinates,
            popup: None,
        });
        id
    }

    fn bind_popup(&mut self, marker: MarkerId, options: PopupOptions, content: String) {
        match self.marker_mut(marker) {
            Some(m) => {
                m.popup = Some(Popup {
                    options,
                    content,
                    open: false,
                })
            }
            None => tracing::warn!(marker = marker.0, "bind_popup on unknown marker"),
        }
    }

    fn open_popup(&mut self, marker: MarkerId) {
        let auto_close = match self.marker_mut(marker).and_then(|m| m.popup.as_ref()) {
            Some(popup) => popup.options.auto_close,
            None => return,
        };

        // Popups with auto_close close the others when opened.
        for m in &mut self.state.markers {
            if let Some(popup) = m.popup.as_mut() {
                if m.id == marker {
                    popup.open = true;
                } else if auto_close && popup.options.auto_close {
                    popup.open = false;
                }
            }
        }
    }

    fn set_view(&mut self, center: Coordinates, zoom: u8, options: ViewOptions) {
        self.state.center = center;
        self.state.zoom = zoom;
        self.state.last_view = Some(options);
    }

    fn snapshot(&self) -> MapSnapshot {
        self.state.clone()
    }
}

/// Provider for [`HeadlessMap`] widgets.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessMapProvider;

impl MapProvider for HeadlessMapProvider {
    fn create_map(
        &self,
        container_id: &str,
        center: Coordinates,
        zoom: u8,
    ) -> Box<dyn MapWidget> {
        Box::new(HeadlessMap::new(container_id, center, zoom))
    }
}

/// Export a map's markers as a GeoJSON FeatureCollection of points.
pub fn markers_to_geojson(snapshot: &MapSnapshot) -> FeatureCollection {
    let features = snapshot
        .markers
        .iter()
        .map(|marker| {
            let point: geo::Point<f64> = marker.coordinates.into();
            let mut properties = JsonObject::new();
            properties.insert("marker_id".to_string(), marker.id.0.into());
            if let Some(popup) = &marker.popup {
                properties.insert("popup".to_string(), popup.content.clone().into());
                properties.insert(
                    "class_name".to_string(),
                    popup.options.class_name.clone().into(),
                );
                properties.insert("open".to_string(), popup.open.into());
            }

            Feature {
                bbox: None,
                geometry: Some(geojson::Geometry::new(geojson::Value::from(&point))),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::workout::KindTag;

    fn map() -> HeadlessMap {
        HeadlessMap::new("map", Coordinates::new(10.0, 20.0), 13)
    }

    #[test]
    fn test_markers_get_distinct_ids() {
        let mut m = map();
        let a = m.add_marker(Coordinates::new(1.0, 1.0));
        let b = m.add_marker(Coordinates::new(2.0, 2.0));
        assert_ne!(a, b);
        assert_eq!(m.snapshot().markers.len(), 2);
    }

    #[test]
    fn test_persistent_popups_stay_open() {
        let mut m = map();
        let a = m.add_marker(Coordinates::new(1.0, 1.0));
        let b = m.add_marker(Coordinates::new(2.0, 2.0));
        m.bind_popup(a, PopupOptions::for_kind(KindTag::Running), "a".into());
        m.bind_popup(b, PopupOptions::for_kind(KindTag::Cycling), "b".into());
        m.open_popup(a);
        m.open_popup(b);

        let snap = m.snapshot();
        assert!(snap.markers.iter().all(|mk| mk.popup.as_ref().unwrap().open));
        assert_eq!(
            snap.markers[1].popup.as_ref().unwrap().options.class_name,
            "cycling-popup"
        );
    }

    #[test]
    fn test_auto_close_popups_replace_each_other() {
        let mut m = map();
        let options = PopupOptions {
            auto_close: true,
            ..PopupOptions::for_kind(KindTag::Running)
        };
        let a = m.add_marker(Coordinates::new(1.0, 1.0));
        let b = m.add_marker(Coordinates::new(2.0, 2.0));
        m.bind_popup(a, options.clone(), "a".into());
        m.bind_popup(b, options, "b".into());
        m.open_popup(a);
        m.open_popup(b);

        let snap = m.snapshot();
        assert!(!snap.markers[0].popup.as_ref().unwrap().open);
        assert!(snap.markers[1].popup.as_ref().unwrap().open);
    }

    #[test]
    fn test_set_view_records_animation() {
        let mut m = map();
        m.set_view(Coordinates::new(5.0, 6.0), 13, ViewOptions::default());

        let snap = m.snapshot();
        assert_eq!(snap.center, Coordinates::new(5.0, 6.0));
        assert_eq!(snap.last_view, Some(ViewOptions::default()));
    }

    #[test]
    fn test_geojson_export_uses_lng_lat_order() {
        let mut m = map();
        let id = m.add_marker(Coordinates::new(10.0, 20.0));
        m.bind_popup(id, PopupOptions::for_kind(KindTag::Running), "hi".into());

        let fc = markers_to_geojson(&m.snapshot());
        assert_eq!(fc.features.len(), 1);

        let geometry = fc.features[0].geometry.as_ref().unwrap();
        assert_eq!(geometry.value, geojson::Value::Point(vec![20.0, 10.0]));
        assert_eq!(
            fc.features[0].property("popup").and_then(|v| v.as_str()),
            Some("hi")
        );
    }
}
