// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTML for workout list rows and marker popups.

use crate::models::workout::{Workout, WorkoutId, WorkoutKind};
use serde::Serialize;
use std::fmt::Write;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Popup text: kind icon followed by the description.
pub fn popup_content(workout: &Workout) -> String {
    format!(
        "{} {}",
        workout.tag().icon(),
        escape_html(&workout.description)
    )
}

fn detail(html: &mut String, icon: &str, value: &str, unit: &str) {
    // Writing into a String cannot fail.
    let _ = write!(
        html,
        r#"
  <div class="workout__details">
    <span class="workout__icon">{icon}</span>
    <span class="workout__value">{value}</span>
    <span class="workout__unit">{unit}</span>
  </div>"#
    );
}

/// Render one `<li>` row for the workout list.
pub fn render_workout_row(workout: &Workout) -> String {
    let tag = workout.tag();
    let mut html = format!(
        r#"<li class="workout workout--{tag}" data-id="{id}">
  <h2 class="workout__title">{title}</h2>"#,
        id = escape_html(workout.id.as_str()),
        title = escape_html(&workout.description),
    );

    detail(&mut html, tag.icon(), &workout.distance_km.to_string(), "km");
    detail(&mut html, "⏱", &workout.duration_min.to_string(), "min");

    match workout.kind {
        WorkoutKind::Running { cadence, pace } => {
            detail(&mut html, "⚡️", &format!("{:.1}", pace), "min/km");
            detail(&mut html, "🦶🏼", &cadence.to_string(), "spm");
        }
        WorkoutKind::Cycling {
            elevation_gain_m,
            speed,
        } => {
            detail(&mut html, "⚡️", &format!("{:.1}", speed), "km/h");
            detail(&mut html, "🚵‍♂️", &elevation_gain_m.to_string(), "m");
        }
    }

    html.push_str("\n</li>");
    html
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// A rendered list row keyed by workout ID.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ListRow {
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub id: WorkoutId,
    pub html: String,
}

/// The rendered workout list below the form.
///
/// Rows are inserted directly after the form, so the most recently rendered
/// row comes first.
#[derive(Debug, Clone, Default)]
pub struct ListView {
    rows: Vec<ListRow>,
}

impl ListView {
    pub fn insert_after_form(&mut self, workout: &Workout) {
        self.rows.insert(
            0,
            ListRow {
                id: workout.id.clone(),
                html: render_workout_row(workout),
            },
        );
    }

    pub fn rows(&self) -> &[ListRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Resolve a clicked row ID back to the row, if it is in the list.
    pub fn row(&self, id: &str) -> Option<&ListRow> {
        self.rows.iter().find(|r| r.id.as_str() == id)
    }

    pub fn to_html(&self) -> String {
        self.rows
            .iter()
            .map(|r| r.html.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::workout::Coordinates;
    use chrono::{TimeZone, Utc};

    fn run() -> Workout {
        let t = Utc.with_ymd_and_hms(2026, 4, 14, 7, 0, 0).unwrap();
        Workout::running(Coordinates::new(10.0, 20.0), 5.2, 24.0, 178.0, t)
    }

    fn ride() -> Workout {
        let t = Utc.with_ymd_and_hms(2026, 4, 15, 7, 0, 0).unwrap();
        Workout::cycling(Coordinates::new(10.0, 20.0), 27.0, 95.0, 523.0, t)
    }

    #[test]
    fn test_popup_content() {
        assert_eq!(popup_content(&run()), "🏃‍♂️ Running on April 14");
        assert_eq!(popup_content(&ride()), "🚴‍♀️ Cycling on April 15");
    }

    #[test]
    fn test_running_row() {
        let w = run();
        let html = render_workout_row(&w);

        assert!(html.starts_with(r#"<li class="workout workout--running""#));
        assert!(html.contains(&format!(r#"data-id="{}""#, w.id)));
        assert!(html.contains(r#"<h2 class="workout__title">Running on April 14</h2>"#));
        assert!(html.contains(r#"<span class="workout__value">5.2</span>"#));
        assert!(html.contains(r#"<span class="workout__value">24</span>"#));
        // 24 / 5.2 = 4.615...
        assert!(html.contains(r#"<span class="workout__value">4.6</span>"#));
        assert!(html.contains("min/km"));
        assert!(html.contains(r#"<span class="workout__value">178</span>"#));
        assert!(html.contains("spm"));
        assert!(html.ends_with("</li>"));
    }

    #[test]
    fn test_cycling_row() {
        let html = render_workout_row(&ride());

        assert!(html.contains("workout--cycling"));
        // 27 / (95 / 60) = 17.05...
        assert!(html.contains(r#"<span class="workout__value">17.1</span>"#));
        assert!(html.contains("km/h"));
        assert!(html.contains(r#"<span class="workout__icon">🚵‍♂️</span>"#));
        assert!(html.contains(r#"<span class="workout__value">523</span>"#));
        assert!(!html.contains("spm"));
    }

    #[test]
    fn test_description_is_escaped() {
        let mut w = run();
        w.description = "<script>".to_string();
        assert!(render_workout_row(&w).contains("&lt;script&gt;"));
        assert!(popup_content(&w).ends_with("&lt;script&gt;"));
    }

    #[test]
    fn test_list_puts_newest_first() {
        let mut list = ListView::default();
        let (a, b) = (run(), ride());
        list.insert_after_form(&a);
        list.insert_after_form(&b);

        assert_eq!(list.len(), 2);
        assert_eq!(list.rows()[0].id, b.id);
        assert_eq!(list.rows()[1].id, a.id);
        assert!(list.row(a.id.as_str()).is_some());
        assert!(list.row("nope").is_none());
    }
}
